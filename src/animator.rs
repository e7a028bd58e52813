//! The animated instance grid.
//!
//! [`InstanceGridAnimator`] owns the oscillating [`AnimationPhase`] and the most
//! recently published [`InstanceBatch`]. It knows nothing about timers or
//! input: a host calls [`advance`](InstanceGridAnimator::advance) and
//! [`generate_instances`](InstanceGridAnimator::generate_instances) on each
//! tick, and [`toggle_highlight`](InstanceGridAnimator::toggle_highlight) on a
//! click.
//!
//! ```
//! use instance_grid::{AnimatorConfig, InstanceGridAnimator};
//!
//! let mut animator = InstanceGridAnimator::new(AnimatorConfig::default()).unwrap();
//! let batch = animator.generate_instances();
//! assert_eq!(batch.len(), 1600);
//!
//! animator.toggle_highlight(0).unwrap();
//! assert!(animator.batch().parameters[0].is_highlighted());
//! ```

use std::sync::Arc;

use crate::color::Color;
use crate::config::AnimatorConfig;
use crate::error::InstancingError;
use crate::instance::{GridExtent, InstanceBatch, InstanceParameter, build_instances};
use crate::phase::AnimationPhase;

pub struct InstanceGridAnimator {
    config: AnimatorConfig,
    phase: AnimationPhase,
    batch: InstanceBatch,
}

impl InstanceGridAnimator {
    /// Create an animator at rest (zero phase, increasing). The published
    /// batch starts empty until the first [`generate_instances`](Self::generate_instances).
    pub fn new(config: AnimatorConfig) -> Result<Self, InstancingError> {
        Self::with_phase(config, AnimationPhase::new())
    }

    /// Create an animator starting from an arbitrary phase.
    pub fn with_phase(
        config: AnimatorConfig,
        phase: AnimationPhase,
    ) -> Result<Self, InstancingError> {
        config.validate()?;
        Ok(Self {
            config,
            phase,
            batch: InstanceBatch {
                revision: 0,
                extent: GridExtent { start: 0, end: 0 },
                transforms: Arc::from(Vec::new()),
                parameters: Arc::from(Vec::new()),
            },
        })
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    pub fn phase(&self) -> &AnimationPhase {
        &self.phase
    }

    /// The most recently published batch.
    pub fn batch(&self) -> &InstanceBatch {
        &self.batch
    }

    /// Step the phase by one tick. Returns `true` if the direction reversed.
    pub fn advance(&mut self) -> bool {
        let reversed = self
            .phase
            .advance(self.config.step, self.config.reversal_bound);
        if reversed {
            tracing::debug!(
                x = self.phase.x,
                direction = ?self.phase.direction,
                "animation phase reversed"
            );
        }
        reversed
    }

    /// Rebuild every instance from the current phase and publish the result.
    ///
    /// Any highlights toggled on the previous batch are discarded.
    pub fn generate_instances(&mut self) -> InstanceBatch {
        let (extent, transforms, parameters) = build_instances(&self.phase, &self.config);
        self.publish(extent, transforms.into(), parameters.into());
        self.batch.clone()
    }

    /// Flip the highlight of one instance in the published batch.
    ///
    /// The batch is republished as a new allocation with a new revision so
    /// observers comparing by identity see the change. Returns the instance's
    /// new emissive color.
    pub fn toggle_highlight(&mut self, index: usize) -> Result<Color, InstancingError> {
        let len = self.batch.len();
        if index >= len {
            return Err(InstancingError::OutOfRange { index, len });
        }

        let mut parameters: Vec<InstanceParameter> = self.batch.parameters.to_vec();
        let emissive = parameters[index].toggle_highlight();

        let extent = self.batch.extent;
        let transforms = Arc::clone(&self.batch.transforms);
        self.publish(extent, transforms, parameters.into());
        Ok(emissive)
    }

    fn publish(
        &mut self,
        extent: GridExtent,
        transforms: Arc<[glam::Mat4]>,
        parameters: Arc<[InstanceParameter]>,
    ) {
        self.batch = InstanceBatch {
            revision: self.batch.revision + 1,
            extent,
            transforms,
            parameters,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::Direction;

    fn animator() -> InstanceGridAnimator {
        InstanceGridAnimator::new(AnimatorConfig::default()).unwrap()
    }

    #[test]
    fn starts_empty() {
        let animator = animator();
        assert!(animator.batch().is_empty());
        assert_eq!(animator.batch().revision, 0);
    }

    #[test]
    fn rejects_invalid_config() {
        let result = InstanceGridAnimator::new(AnimatorConfig::new().half_extent(-1));
        assert!(matches!(result, Err(InstancingError::InvalidConfig(_))));
    }

    #[test]
    fn generate_publishes_fresh_batch() {
        let mut animator = animator();
        let first = animator.generate_instances();
        let second = animator.generate_instances();
        assert_eq!(first.len(), 1600);
        assert_eq!(second.revision, first.revision + 1);
        assert!(!Arc::ptr_eq(&first.parameters, &second.parameters));
        assert_eq!(first.parameters[..], second.parameters[..]);
    }

    #[test]
    fn grid_grows_with_phase() {
        let phase = AnimationPhase::at(15.0, Direction::Decreasing);
        let mut animator =
            InstanceGridAnimator::with_phase(AnimatorConfig::default(), phase).unwrap();
        let batch = animator.generate_instances();
        assert_eq!(batch.len(), 4900);
        assert_eq!(batch.transforms.len(), batch.parameters.len());
    }

    #[test]
    fn advance_then_generate_tracks_extent() {
        let mut animator = animator();
        for _ in 0..50 {
            animator.advance();
        }
        let batch = animator.generate_instances();
        assert_eq!(batch.extent, GridExtent::for_phase(20, animator.phase().x));
        assert_eq!(batch.len(), batch.extent.instance_count());
    }

    #[test]
    fn toggle_twice_restores() {
        let mut animator = animator();
        let original = animator.generate_instances();

        assert_eq!(animator.toggle_highlight(42).unwrap(), Color::YELLOW);
        let toggled = animator.batch().clone();
        assert!(toggled.parameters[42].is_highlighted());
        assert!(!Arc::ptr_eq(&original.parameters, &toggled.parameters));
        assert!(Arc::ptr_eq(&original.transforms, &toggled.transforms));
        // The earlier snapshot is untouched.
        assert!(!original.parameters[42].is_highlighted());

        assert_eq!(animator.toggle_highlight(42).unwrap(), Color::TRANSPARENT);
        assert_eq!(animator.batch().parameters[..], original.parameters[..]);
        assert_eq!(animator.batch().revision, original.revision + 2);
    }

    #[test]
    fn toggle_out_of_range_leaves_batch() {
        let mut animator = animator();
        let before = animator.generate_instances();

        let err = animator.toggle_highlight(1600).unwrap_err();
        assert!(matches!(
            err,
            InstancingError::OutOfRange {
                index: 1600,
                len: 1600
            }
        ));
        assert_eq!(animator.batch().revision, before.revision);
        assert!(Arc::ptr_eq(&animator.batch().parameters, &before.parameters));
    }

    #[test]
    fn toggle_on_empty_batch_is_out_of_range() {
        let mut animator = animator();
        assert!(matches!(
            animator.toggle_highlight(0),
            Err(InstancingError::OutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn regenerate_discards_highlights() {
        let mut animator = animator();
        animator.generate_instances();
        animator.toggle_highlight(7).unwrap();
        animator.advance();
        let batch = animator.generate_instances();
        assert!(batch.parameters.iter().all(|p| !p.is_highlighted()));
    }
}
