use glam::Vec3;

/// Perspective camera placement handed to the host renderer.
///
/// Only the placement is described here; projection and view math stay with
/// the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Not normalized: the length is the distance to the point looked at.
    pub look_direction: Vec3,
    pub up: Vec3,
    pub fov: f32, // radians
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(40.0, 40.0, 40.0),
            look_direction: Vec3::new(-40.0, -40.0, -40.0),
            up: Vec3::Y,
            fov: 45f32.to_radians(),
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    pub fn looking_at(mut self, target_x: f32, target_y: f32, target_z: f32) -> Self {
        self.look_direction = Vec3::new(target_x, target_y, target_z) - self.position;
        self
    }

    pub fn with_fov(mut self, fov_degrees: f32) -> Self {
        self.fov = fov_degrees.to_radians();
        self
    }

    /// The point the camera looks at.
    pub fn target(&self) -> Vec3 {
        self.position + self.look_direction
    }

    /// Compute the right vector from the look direction and up.
    pub fn right(&self) -> Vec3 {
        self.look_direction.cross(self.up).normalize_or_zero()
    }
}
