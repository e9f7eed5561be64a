//! Target-following orbit camera

mod config;
mod controller;
mod resolver;

pub use config::{DistanceRecovery, FollowConfig};
pub use controller::FollowRig;
pub use resolver::{DistanceResolver, Resolved};
