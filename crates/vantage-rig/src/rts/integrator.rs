//! Velocity-based pivot translation

use glam::Vec3;
use vantage_core::{lerp, move_towards};

use super::config::RtsConfig;

/// Pan speed multiplier for a normalized zoom (0 = closest, 1 = farthest)
///
/// Closer zoom pans more slowly.
pub fn pan_factor(config: &RtsConfig, normalized_zoom: f32) -> f32 {
    lerp(config.min_pan_factor, config.max_pan_factor, normalized_zoom.clamp(0.0, 1.0))
}

/// Accelerates towards a requested direction and decays to rest otherwise
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotionIntegrator {
    velocity: Vec3,
}

impl MotionIntegrator {
    /// Current velocity
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Drop all momentum
    pub fn stop(&mut self) {
        self.velocity = Vec3::ZERO;
    }

    /// Update the velocity for one tick and return the pivot displacement
    ///
    /// A zero `direction` means no movement was requested this tick.
    pub fn integrate(
        &mut self,
        direction: Vec3,
        pan_factor: f32,
        config: &RtsConfig,
        dt: f32,
    ) -> Vec3 {
        match direction.try_normalize() {
            Some(direction) => {
                self.velocity += direction * config.acceleration * dt;
                self.velocity = self.velocity.clamp_length_max(config.max_speed);
            }
            None => {
                self.velocity = move_towards(self.velocity, Vec3::ZERO, config.damping * dt);
            }
        }

        self.velocity * pan_factor * dt
    }
}
