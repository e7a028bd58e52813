//! Per-instance data for the cube grid.
//!
//! Every instance of the base cube carries:
//!
//! - a model matrix ([`glam::Mat4`]) placing and rotating it in the grid
//! - an [`InstanceParameter`] bundle with its colors and texture offset
//!
//! Both are produced in row-major order over a [`GridExtent`], so a flat index
//! returned by a hit test addresses the same instance in either sequence.
//!
//! # GPU Layout
//!
//! [`InstanceRaw`] packs one instance for an instance vertex buffer (112 bytes):
//!
//! | Field      | Format        | Offset |
//! |------------|---------------|--------|
//! | model      | 4 × Float32x4 | 0      |
//! | diffuse    | Float32x4     | 64     |
//! | emissive   | Float32x4     | 80     |
//! | tex_offset | Float32x2     | 96     |
//! | padding    | Float32x2     | 104    |

use std::sync::Arc;

use glam::{Mat4, Vec2, Vec3};

use crate::color::Color;
use crate::config::AnimatorConfig;
use crate::phase::AnimationPhase;

/// Spacing between neighbouring cells along the row and column axes.
const CELL_SPACING: f32 = 1.2;

/// Non-geometric rendering attributes of one instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceParameter {
    /// Base color, a gradient over the grid position.
    pub diffuse: Color,
    /// Highlight color. Transparent unless the instance was toggled.
    pub emissive: Color,
    /// Offset added to the cube's texture coordinates, selecting a quadrant.
    pub tex_offset: Vec2,
}

impl InstanceParameter {
    /// Flip between no highlight and [`Color::YELLOW`]. Returns the new color.
    pub fn toggle_highlight(&mut self) -> Color {
        self.emissive = if self.emissive.is_transparent() {
            Color::YELLOW
        } else {
            Color::TRANSPARENT
        };
        self.emissive
    }

    pub fn is_highlighted(&self) -> bool {
        !self.emissive.is_transparent()
    }
}

/// Half-open index range `[start, end)` shared by rows and columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridExtent {
    pub start: i32,
    pub end: i32,
}

impl GridExtent {
    /// Extent for the given x-phase: `[-N - floor(x), N + x)`.
    pub fn for_phase(half_extent: i32, x: f32) -> Self {
        let start = (-half_extent).saturating_sub(x.floor() as i32);
        // Largest integer strictly below `N + x`, plus one.
        let end = (half_extent as f32 + x).ceil() as i32;
        Self { start, end }
    }

    /// Number of indices along one axis.
    pub fn len(&self) -> usize {
        if self.end > self.start {
            self.end.abs_diff(self.start) as usize
        } else {
            0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of instances in the square grid.
    pub fn instance_count(&self) -> usize {
        self.len().saturating_mul(self.len())
    }

    /// Grid coordinates in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (self.start..self.end).flat_map(move |i| (self.start..self.end).map(move |j| (i, j)))
    }

    /// Row and column of a flat row-major index.
    pub fn cell_at(&self, index: usize) -> Option<(i32, i32)> {
        if index >= self.instance_count() {
            return None;
        }
        let side = self.len();
        Some((
            self.start + (index / side) as i32,
            self.start + (index % side) as i32,
        ))
    }
}

/// Model matrix of cell `(i, j)`: rotate about +Y by `x * sign(j)`, then
/// translate into place with a `i * j / 2` skew along Z.
pub fn instance_transform(i: i32, j: i32, x: f32) -> Mat4 {
    let translation = Vec3::new(
        i as f32 * CELL_SPACING + i.signum() as f32,
        j as f32 * CELL_SPACING + j.signum() as f32,
        (i * j) as f32 / 2.0,
    );
    Mat4::from_translation(translation) * Mat4::from_rotation_y(x * j.signum() as f32)
}

/// Gradient color of cell `(i, j)`, normalized by the half extent.
pub fn instance_color(i: i32, j: i32, half_extent: i32) -> Color {
    let n = half_extent as f32;
    Color::rgba(
        i.abs() as f32 / n,
        j.abs() as f32 / n,
        (i + j).abs() as f32 / (2.0 * n),
        1.0,
    )
}

/// One of four quadrant offsets, chosen by `|i + j| mod 4` and slid along U by `x`.
pub fn texture_offset(i: i32, j: i32, x: f32) -> Vec2 {
    match (i + j).abs() % 4 {
        0 => Vec2::new(x, 0.0),
        1 => Vec2::new(0.5 + x, 0.0),
        2 => Vec2::new(0.5 + x, 0.5),
        _ => Vec2::new(x, 0.5),
    }
}

/// Build fresh transform and parameter sequences for the current phase.
pub fn build_instances(
    phase: &AnimationPhase,
    config: &AnimatorConfig,
) -> (GridExtent, Vec<Mat4>, Vec<InstanceParameter>) {
    let extent = GridExtent::for_phase(config.half_extent, phase.x);
    let count = extent.instance_count();
    let mut transforms = Vec::with_capacity(count);
    let mut parameters = Vec::with_capacity(count);

    for (i, j) in extent.cells() {
        transforms.push(instance_transform(i, j, phase.x));
        parameters.push(InstanceParameter {
            diffuse: instance_color(i, j, config.half_extent),
            emissive: Color::TRANSPARENT,
            tex_offset: texture_offset(i, j, phase.x),
        });
    }

    (extent, transforms, parameters)
}

/// An immutable, published set of instances.
///
/// Cloning is cheap. A new batch (with a new revision and new allocations) is
/// published whenever the contents change, so consumers can detect changes
/// either by revision or by [`Arc::ptr_eq`].
#[derive(Clone, Debug)]
pub struct InstanceBatch {
    pub revision: u64,
    pub extent: GridExtent,
    pub transforms: Arc<[Mat4]>,
    pub parameters: Arc<[InstanceParameter]>,
}

impl InstanceBatch {
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Pack the batch for upload into an instance buffer.
    pub fn to_raw(&self) -> Vec<InstanceRaw> {
        self.transforms
            .iter()
            .zip(self.parameters.iter())
            .map(|(model, params)| InstanceRaw::new(model, params))
            .collect()
    }
}

/// GPU representation of one instance.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub diffuse: [f32; 4],
    pub emissive: [f32; 4],
    pub tex_offset: [f32; 2],
    pub _padding: [f32; 2],
}

impl InstanceRaw {
    pub fn new(model: &Mat4, params: &InstanceParameter) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            diffuse: params.diffuse.to_array(),
            emissive: params.emissive.to_array(),
            tex_offset: params.tex_offset.to_array(),
            _padding: [0.0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::Direction;

    fn phase_at(x: f32) -> AnimationPhase {
        AnimationPhase::at(x, Direction::Increasing)
    }

    #[test]
    fn extent_at_zero_and_max_phase() {
        let extent = GridExtent::for_phase(20, 0.0);
        assert_eq!(extent, GridExtent { start: -20, end: 20 });
        assert_eq!(extent.instance_count(), 1600);

        let extent = GridExtent::for_phase(20, 15.0);
        assert_eq!(extent, GridExtent { start: -35, end: 35 });
        assert_eq!(extent.instance_count(), 4900);
    }

    #[test]
    fn extent_with_fractional_phase() {
        // [-20, 20.1) includes 20.
        assert_eq!(
            GridExtent::for_phase(20, 0.1),
            GridExtent { start: -20, end: 21 }
        );
        // [-20 + 4, 20 - 3.5) = [-16, 16.5)
        assert_eq!(
            GridExtent::for_phase(20, -3.5),
            GridExtent { start: -16, end: 17 }
        );
    }

    #[test]
    fn extreme_extent_does_not_overflow() {
        let extent = GridExtent {
            start: i32::MIN,
            end: i32::MAX,
        };
        assert_eq!(extent.len(), u32::MAX as usize);
        assert!(GridExtent { start: 5, end: -5 }.is_empty());
        assert!(GridExtent::for_phase(i32::MAX, -1.0e30).is_empty());
    }

    #[test]
    fn sequences_have_equal_length() {
        let config = AnimatorConfig::default();
        for x in [-15.1, -7.3, 0.0, 0.1, 9.9, 15.1] {
            let (extent, transforms, parameters) = build_instances(&phase_at(x), &config);
            assert_eq!(transforms.len(), parameters.len());
            assert_eq!(transforms.len(), extent.instance_count());
        }
    }

    #[test]
    fn origin_instance_at_rest() {
        let config = AnimatorConfig::default();
        let (extent, transforms, parameters) = build_instances(&phase_at(0.0), &config);
        // Row 0, column 0 sits at flat index 20 * 40 + 20.
        let index = 20 * extent.len() + 20;
        assert_eq!(extent.cell_at(index), Some((0, 0)));
        assert_eq!(transforms[index], Mat4::IDENTITY);
        assert_eq!(parameters[index].diffuse, Color::rgba(0.0, 0.0, 0.0, 1.0));
        assert_eq!(parameters[index].tex_offset, Vec2::ZERO);
        assert!(parameters[index].emissive.is_transparent());
    }

    #[test]
    fn row_major_order() {
        let extent = GridExtent { start: -1, end: 1 };
        let cells: Vec<_> = extent.cells().collect();
        assert_eq!(cells, vec![(-1, -1), (-1, 0), (0, -1), (0, 0)]);
        assert_eq!(extent.cell_at(2), Some((0, -1)));
        assert_eq!(extent.cell_at(4), None);
    }

    #[test]
    fn transform_translates_with_skew() {
        let m = instance_transform(2, -3, 0.0);
        let p = m.transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(2.0 * 1.2 + 1.0, -3.0 * 1.2 - 1.0, -3.0)).length() < 1e-5);
    }

    #[test]
    fn rotation_sign_follows_column() {
        let x = 0.5;
        let pos = instance_transform(0, 1, x).transform_vector3(Vec3::X);
        let neg = instance_transform(0, -1, x).transform_vector3(Vec3::X);
        let none = instance_transform(0, 0, x).transform_vector3(Vec3::X);
        assert!((pos - Mat4::from_rotation_y(x).transform_vector3(Vec3::X)).length() < 1e-6);
        assert!((neg - Mat4::from_rotation_y(-x).transform_vector3(Vec3::X)).length() < 1e-6);
        assert_eq!(none, Vec3::X);
    }

    #[test]
    fn color_is_not_clamped() {
        let c = instance_color(30, -25, 20);
        assert_eq!(c.r, 1.5);
        assert_eq!(c.g, 1.25);
        assert_eq!(c.b, 5.0 / 40.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn texture_offset_has_period_four() {
        let x = 0.7;
        for i in -10..10 {
            for j in -10..10 {
                let sum = i + j;
                // Depends only on the diagonal, repeating every 4 away from zero.
                let further = if sum >= 0 { sum + 4 } else { sum - 4 };
                assert_eq!(texture_offset(i, j, x), texture_offset(sum, 0, x));
                assert_eq!(texture_offset(i, j, x), texture_offset(further, 0, x));
            }
        }
        assert!(texture_offset(0, 0, x).abs_diff_eq(Vec2::new(0.7, 0.0), 1e-6));
        assert!(texture_offset(1, 0, x).abs_diff_eq(Vec2::new(1.2, 0.0), 1e-6));
        assert!(texture_offset(1, 1, x).abs_diff_eq(Vec2::new(1.2, 0.5), 1e-6));
        assert!(texture_offset(-3, 0, x).abs_diff_eq(Vec2::new(0.7, 0.5), 1e-6));
    }

    #[test]
    fn toggle_highlight_round_trips() {
        let mut params = InstanceParameter {
            diffuse: Color::WHITE,
            emissive: Color::TRANSPARENT,
            tex_offset: Vec2::ZERO,
        };
        assert_eq!(params.toggle_highlight(), Color::YELLOW);
        assert!(params.is_highlighted());
        assert_eq!(params.toggle_highlight(), Color::TRANSPARENT);
        assert!(!params.is_highlighted());
    }

    #[test]
    fn raw_layout_is_112_bytes() {
        assert_eq!(std::mem::size_of::<InstanceRaw>(), 112);

        let params = InstanceParameter {
            diffuse: Color::rgb(0.25, 0.5, 0.75),
            emissive: Color::YELLOW,
            tex_offset: Vec2::new(0.5, 0.5),
        };
        let raw = InstanceRaw::new(&Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)), &params);
        assert_eq!(raw.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(raw.emissive, [1.0, 1.0, 0.0, 1.0]);

        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&raw));
        assert_eq!(floats.len(), 28);
        assert_eq!(&floats[16..20], &[0.25, 0.5, 0.75, 1.0]);
        assert_eq!(&floats[24..26], &[0.5, 0.5]);
    }
}
