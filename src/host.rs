use crate::animator::InstanceGridAnimator;
use crate::color::Color;
use crate::config::AnimatorConfig;
use crate::error::InstancingError;
use crate::instance::{InstanceBatch, InstanceRaw};
use crate::scene::SceneDescription;

/// What a click did to the published batch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClickOutcome {
    /// The instance's highlight was flipped to `emissive`.
    Toggled { index: usize, emissive: Color },
    /// Clicks are ignored while the grid is animating.
    IgnoredWhileAnimating,
}

/// View-model sitting between a renderer/event loop and the animator.
///
/// The host owns the "animation enabled" flag that decides what the two entry
/// points do: [`on_tick`](Self::on_tick) rebuilds the grid only while
/// animating, [`on_instance_clicked`](Self::on_instance_clicked) toggles
/// highlights only while paused.
///
/// ```
/// use instance_grid::{ClickOutcome, InstancingHost};
///
/// let mut host = InstancingHost::new().unwrap();
/// host.set_animation_enabled(false);
/// let outcome = host.on_instance_clicked(3).unwrap();
/// assert!(matches!(outcome, ClickOutcome::Toggled { index: 3, .. }));
/// ```
pub struct InstancingHost {
    scene: SceneDescription,
    animator: InstanceGridAnimator,
    animation_enabled: bool,
    subtitle: String,
}

impl InstancingHost {
    /// Host with the demo scene and default animator settings.
    pub fn new() -> Result<Self, InstancingError> {
        Self::with_config(SceneDescription::default(), AnimatorConfig::default())
    }

    /// Build the host and publish the first batch.
    ///
    /// The scene is created the same way a tick creates it (advance, then
    /// generate), so the first batch is already one step into the animation.
    pub fn with_config(
        scene: SceneDescription,
        config: AnimatorConfig,
    ) -> Result<Self, InstancingError> {
        let animator = InstanceGridAnimator::new(config)?;
        let mut host = Self {
            scene,
            animator,
            animation_enabled: true,
            subtitle: String::new(),
        };
        host.rebuild();
        Ok(host)
    }

    pub fn scene(&self) -> &SceneDescription {
        &self.scene
    }

    pub fn animator(&self) -> &InstanceGridAnimator {
        &self.animator
    }

    pub fn animation_enabled(&self) -> bool {
        self.animation_enabled
    }

    pub fn set_animation_enabled(&mut self, enabled: bool) {
        if self.animation_enabled != enabled {
            tracing::info!(enabled, "animation toggled");
        }
        self.animation_enabled = enabled;
    }

    /// Status line shown under the scene title.
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn batch(&self) -> &InstanceBatch {
        self.animator.batch()
    }

    pub fn instance_count(&self) -> usize {
        self.batch().len()
    }

    /// Instance buffer contents for the current batch.
    pub fn instance_buffer(&self) -> Vec<InstanceRaw> {
        self.batch().to_raw()
    }

    /// Timer callback. Returns `true` if a new batch was published.
    pub fn on_tick(&mut self) -> bool {
        if !self.animation_enabled {
            return false;
        }
        self.rebuild();
        true
    }

    /// Pointer callback with the flat index reported by the hit test.
    pub fn on_instance_clicked(&mut self, index: usize) -> Result<ClickOutcome, InstancingError> {
        if self.animation_enabled {
            tracing::debug!(index, "click ignored while animating");
            return Ok(ClickOutcome::IgnoredWhileAnimating);
        }

        let emissive = self.animator.toggle_highlight(index).inspect_err(|e| {
            tracing::warn!(index, error = %e, "highlight toggle rejected");
        })?;
        let cell = self.batch().extent.cell_at(index);
        tracing::info!(
            index,
            ?cell,
            highlighted = !emissive.is_transparent(),
            "instance highlight toggled"
        );
        Ok(ClickOutcome::Toggled { index, emissive })
    }

    fn rebuild(&mut self) {
        self.animator.advance();
        let batch = self.animator.generate_instances();
        self.subtitle = format!("Number of Instances: {}", batch.len());
        tracing::trace!(
            revision = batch.revision,
            instances = batch.len(),
            x = self.animator.phase().x,
            "instances rebuilt"
        );
    }
}
