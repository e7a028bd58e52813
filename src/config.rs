//! Tunables of the animated grid.
//!
//! [`AnimatorConfig::default()`] reproduces the demo exactly: a half extent of
//! 20 instances, per-tick phase steps of `(0.1, 0.2, 0.3)`, a reversal bound of
//! ±15 on the x-phase and a 30 ms tick.
//!
//! ```
//! use instance_grid::AnimatorConfig;
//!
//! let config = AnimatorConfig::new().half_extent(8).tick_interval_ms(16);
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::InstancingError;

/// Largest grid, in instances, a configuration may reach at full extent.
pub const MAX_INSTANCES: usize = 4_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    /// Grid half extent `N` at zero phase. Also the color normalization factor.
    pub half_extent: i32,
    /// Per-tick phase step for the x, y and z axes.
    pub step: Vec3,
    /// The x-phase reverses direction once it moves past `±reversal_bound`.
    pub reversal_bound: f32,
    /// Period of the tick source driving the host, in milliseconds.
    pub tick_interval_ms: u64,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            half_extent: 20,
            step: Vec3::new(0.1, 0.2, 0.3),
            reversal_bound: 15.0,
            tick_interval_ms: 30,
        }
    }
}

impl AnimatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn half_extent(mut self, half_extent: i32) -> Self {
        self.half_extent = half_extent;
        self
    }

    pub fn step(mut self, x: f32, y: f32, z: f32) -> Self {
        self.step = Vec3::new(x, y, z);
        self
    }

    pub fn reversal_bound(mut self, bound: f32) -> Self {
        self.reversal_bound = bound;
        self
    }

    pub fn tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Reject configurations that cannot produce a grid or a tick.
    pub fn validate(&self) -> Result<(), InstancingError> {
        if self.half_extent <= 0 {
            return Err(InstancingError::InvalidConfig(format!(
                "half_extent must be positive, got {}",
                self.half_extent
            )));
        }
        if !self.step.is_finite() {
            return Err(InstancingError::InvalidConfig(format!(
                "step must be finite, got {:?}",
                self.step
            )));
        }
        // The x-step drives the reversal; without a forward step x never turns around.
        if self.step.x <= 0.0 {
            return Err(InstancingError::InvalidConfig(format!(
                "step.x must be positive, got {}",
                self.step.x
            )));
        }
        if !(self.reversal_bound.is_finite() && self.reversal_bound > 0.0) {
            return Err(InstancingError::InvalidConfig(format!(
                "reversal_bound must be positive, got {}",
                self.reversal_bound
            )));
        }
        let max_count = self.max_instance_count();
        if max_count > MAX_INSTANCES as f64 {
            return Err(InstancingError::InvalidConfig(format!(
                "grid reaches {max_count} instances at full extent, limit is {MAX_INSTANCES}"
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(InstancingError::InvalidConfig(
                "tick_interval_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Instance count of the widest grid, with x one step past the bound.
    pub fn max_instance_count(&self) -> f64 {
        let reach = f64::from(self.half_extent)
            + (f64::from(self.reversal_bound) + f64::from(self.step.x)).ceil();
        let side = 2.0 * reach + 1.0;
        side * side
    }

    /// Parse a JSON document. Missing fields fall back to the defaults.
    pub fn from_json(text: &str) -> Result<Self, InstancingError> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| InstancingError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
