//! Vantage Core - Core types and utilities for the vantage camera rigs
//!
//! This crate provides the foundational types used by the rigs:
//! - Mathematical primitives (re-exported from glam)
//! - Transform for camera and pivot placement
//! - Tick clock supplying frame-rate independent delta time
//! - Smoothing helpers shared by every rig

pub mod smoothing;
pub mod time;
pub mod types;

pub use glam::{EulerRot, Quat, Vec2, Vec3};
pub use smoothing::{inverse_lerp, lerp, lerp_factor, move_towards};
pub use time::{GameTime, TimeConfig};
pub use types::Transform;
