//! Orbit angles shared by both rigs

use glam::{EulerRot, Quat, Vec2};
use vantage_core::lerp;

/// Clamp limits for orbit angles, in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitLimits {
    pub min_yaw: f32,
    pub max_yaw: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
}

impl OrbitLimits {
    /// Free yaw with the given pitch range in degrees
    pub fn pitch_only(min_pitch_deg: f32, max_pitch_deg: f32) -> Self {
        Self {
            min_yaw: f32::NEG_INFINITY,
            max_yaw: f32::INFINITY,
            min_pitch: min_pitch_deg.to_radians(),
            max_pitch: max_pitch_deg.to_radians(),
        }
    }

    /// Restrict yaw to a range in degrees
    pub fn with_yaw(mut self, min_yaw_deg: f32, max_yaw_deg: f32) -> Self {
        self.min_yaw = min_yaw_deg.to_radians();
        self.max_yaw = max_yaw_deg.to_radians();
        self
    }
}

/// Yaw and pitch in radians
///
/// Yaw turns counter-clockwise seen from above; positive pitch tilts the view
/// down towards the ground.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrbitAngles {
    pub yaw: f32,
    pub pitch: f32,
}

impl OrbitAngles {
    /// Build from angles in degrees
    pub fn from_degrees(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw: yaw.to_radians(),
            pitch: pitch.to_radians(),
        }
    }

    /// Apply a rotation delta in radians
    ///
    /// Positive `delta.x` turns the view right, positive `delta.y` tilts it
    /// down. The result is clamped to `limits`.
    pub fn rotate(&mut self, delta: Vec2, limits: &OrbitLimits) {
        self.yaw -= delta.x;
        self.pitch += delta.y;
        self.clamp(limits);
    }

    /// Saturate both angles at their limits
    pub fn clamp(&mut self, limits: &OrbitLimits) {
        self.yaw = self.yaw.clamp(limits.min_yaw, limits.max_yaw);
        self.pitch = self.pitch.clamp(limits.min_pitch, limits.max_pitch);
    }

    /// Move part of the way towards `target`
    pub fn approach(&mut self, target: &OrbitAngles, t: f32) {
        self.yaw = lerp(self.yaw, target.yaw, t);
        self.pitch = lerp(self.pitch, target.pitch, t);
    }

    /// Orientation for these angles (forward = -Z)
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, -self.pitch, 0.0)
    }
}
