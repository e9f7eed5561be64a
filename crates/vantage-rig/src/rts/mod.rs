//! Free-roam strategy camera

mod arbitration;
mod config;
mod controller;
mod integrator;

pub use arbitration::{resolve, DragPan, GroundFrame, MoveIntent};
pub use config::{EdgeScrollDirection, MovementBounds, RtsConfig};
pub use controller::RtsRig;
pub use integrator::{pan_factor, MotionIntegrator};
