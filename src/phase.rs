use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Which way the phase is currently moving.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Increasing,
    Decreasing,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Increasing => 1.0,
            Direction::Decreasing => -1.0,
        }
    }
}

/// Oscillating animation state.
///
/// `x` drives both the per-column rotation angle (radians) and the grid extent,
/// and is the only component that reverses. `y` and `z` advance alongside it
/// and are left unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationPhase {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub direction: Direction,
}

impl AnimationPhase {
    pub fn new() -> Self {
        Self::default()
    }

    /// A phase resting at the given x value, moving in `direction`.
    pub fn at(x: f32, direction: Direction) -> Self {
        Self {
            x,
            direction,
            ..Self::default()
        }
    }

    /// Apply one tick's step and reverse if `x` moved past `±bound`.
    ///
    /// Returns `true` on the tick that flipped the direction. The reversal is
    /// checked after stepping, so `x` may overshoot the bound by at most one
    /// step before it turns around.
    pub fn advance(&mut self, step: Vec3, bound: f32) -> bool {
        let delta = step * self.direction.sign();
        self.x += delta.x;
        self.y += delta.y;
        self.z += delta.z;

        let next = match self.direction {
            Direction::Increasing if self.x > bound => Direction::Decreasing,
            Direction::Decreasing if self.x < -bound => Direction::Increasing,
            d => d,
        };
        let reversed = next != self.direction;
        self.direction = next;
        reversed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: Vec3 = Vec3::new(0.1, 0.2, 0.3);

    #[test]
    fn steps_all_axes_by_direction() {
        let mut phase = AnimationPhase::new();
        assert!(!phase.advance(STEP, 15.0));
        assert_eq!((phase.x, phase.y, phase.z), (0.1, 0.2, 0.3));

        let mut phase = AnimationPhase::at(0.0, Direction::Decreasing);
        phase.advance(STEP, 15.0);
        assert_eq!((phase.x, phase.y, phase.z), (-0.1, -0.2, -0.3));
    }

    #[test]
    fn flips_once_in_151_ticks() {
        let mut phase = AnimationPhase::new();
        let mut flips = Vec::new();
        for tick in 1..=151 {
            let before = phase.x;
            if phase.advance(STEP, 15.0) {
                flips.push(tick);
                // The flip happens on the first advance that crosses the bound.
                assert!(before <= 15.0);
                assert!(phase.x > 15.0);
            }
        }
        assert_eq!(flips.len(), 1);
        assert_eq!(phase.direction, Direction::Decreasing);
    }

    #[test]
    fn x_stays_within_one_step_of_bound() {
        let mut phase = AnimationPhase::new();
        let mut flips = 0;
        // Several full oscillations.
        for _ in 0..2000 {
            if phase.advance(STEP, 15.0) {
                flips += 1;
            }
            assert!(phase.x >= -15.1 - 1e-3 && phase.x <= 15.1 + 1e-3, "x = {}", phase.x);
        }
        // One flip per half period of ~300 ticks.
        assert!((6..=7).contains(&flips), "flips = {flips}");
    }

    #[test]
    fn reverses_back_at_lower_bound() {
        let mut phase = AnimationPhase::at(-14.95, Direction::Decreasing);
        assert!(phase.advance(STEP, 15.0));
        assert_eq!(phase.direction, Direction::Increasing);
        assert!(!phase.advance(STEP, 15.0));
        assert_eq!(phase.direction, Direction::Increasing);
    }

    #[test]
    fn y_and_z_are_unbounded() {
        let mut phase = AnimationPhase::at(0.0, Direction::Increasing);
        for _ in 0..100 {
            phase.advance(STEP, 15.0);
        }
        assert!(phase.z > 15.0);
    }
}
