//! Vantage camera rigs
//!
//! Two per-tick camera controllers fed by an explicit input snapshot:
//! a free-roam strategy rig ([`RtsRig`]) and an orbiting follow rig
//! ([`FollowRig`]) that pulls in when the view to its target is blocked.

pub mod error;
pub mod follow;
pub mod input;
pub mod orbit;
pub mod pose;
pub mod rts;
pub mod zoom;

pub use error::ConfigError;
pub use follow::{DistanceRecovery, FollowConfig, FollowRig};
pub use input::{ButtonState, InputAction, InputBindings, InputHandler, RigInput};
pub use orbit::{OrbitAngles, OrbitLimits};
pub use rts::{EdgeScrollDirection, MovementBounds, RtsConfig, RtsRig};
pub use zoom::{ContinuousZoom, StepZoom};
