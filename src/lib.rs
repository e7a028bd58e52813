//! # instance-grid
//!
//! **An animated grid of instanced cubes, ready to hand to an instanced renderer.**
//!
//! Each tick the grid is rebuilt: every cube gets a model matrix (rotated about
//! +Y, translated into its cell, skewed along Z) and a parameter bundle
//! (gradient color, texture quadrant offset, highlight color). The grid
//! breathes in and out as its phase oscillates. While paused, clicking an
//! instance toggles a yellow highlight on it.
//!
//! ## Quick Start
//!
//! ```
//! use instance_grid::*;
//!
//! let mut host = InstancingHost::new().unwrap();
//!
//! // Timer callback, every 30 ms
//! host.on_tick();
//! let buffer: Vec<InstanceRaw> = host.instance_buffer();
//! assert_eq!(buffer.len(), host.instance_count());
//!
//! // Pause, then react to a hit test
//! host.set_animation_enabled(false);
//! host.on_instance_clicked(0).unwrap();
//! ```
//!
//! Rendering, picking and the event loop belong to the host; the crate only
//! describes the scene ([`SceneDescription`]) and feeds it instances.

mod animator;
mod camera;
mod color;
mod config;
mod error;
mod host;
mod instance;
mod phase;
mod scene;
mod schedule;
mod texture;

pub use animator::InstanceGridAnimator;
pub use camera::Camera;
pub use color::Color;
pub use config::AnimatorConfig;
pub use error::InstancingError;
pub use host::{ClickOutcome, InstancingHost};
pub use instance::{
    GridExtent, InstanceBatch, InstanceParameter, InstanceRaw, build_instances, instance_color,
    instance_transform, texture_offset,
};
pub use phase::{AnimationPhase, Direction};
pub use scene::{CubeMesh, Lighting, MaterialDescription, OutlineBox, SceneDescription};
pub use schedule::TickSchedule;
pub use texture::{MaterialTextures, TextureImage};

// Re-export glam math types for convenience
pub use glam::{Mat4, Vec2, Vec3, Vec4};
