//! Follow rig configuration

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{check_constant, check_range, ConfigError};

/// How the follow distance grows back after an obstruction clears
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DistanceRecovery {
    /// Ease towards the zoom distance (capped by any obstruction) at `rate` per second
    ZoomSmoothing { rate: f32 },
    /// Only explicit zoom input changes the distance
    Manual,
}

impl Default for DistanceRecovery {
    fn default() -> Self {
        DistanceRecovery::ZoomSmoothing { rate: 4.0 }
    }
}

/// Follow rig configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowConfig {
    /// Offset added to the target position to get the orbit anchor
    pub target_offset: Vec3,
    /// Zoom distance at activation
    pub distance: f32,
    /// Closest zoom distance
    pub min_zoom: f32,
    /// Farthest zoom distance
    pub max_zoom: f32,
    /// Zoom speed in units per second while scrolling
    pub zoom_speed: f32,
    /// Distance recovery policy
    pub recovery: DistanceRecovery,

    /// Yaw at activation in degrees
    pub initial_yaw: f32,
    /// Pitch at activation in degrees
    pub initial_pitch: f32,
    /// Optional yaw range in degrees (min, max); `None` orbits freely
    pub yaw_range: Option<Vec2>,
    /// Minimum pitch in degrees
    pub min_pitch: f32,
    /// Maximum pitch in degrees
    pub max_pitch: f32,
    /// Degrees of orbit per pixel of pointer movement
    pub orbit_sensitivity: f32,
    /// Degrees per second of orbit while the look axis is fully deflected
    pub look_axis_rate: f32,
    /// Rate at which orbit angles follow input (1/s, 0 = snap)
    pub orbit_smooth: f32,
    /// Cap on the pointer movement per tick, in pixels
    pub max_look_delta: f32,
    /// Ignore orbit input entirely
    pub lock_orbit: bool,

    /// Also check for obstructions before zoom and orbit are applied
    pub double_collision_check: bool,
    /// Collision response per unit of orbit speed (radians per second)
    pub collision_gain: f32,
    /// Orbit speed assumed when the view is still, so a resting camera
    /// still reacts to obstructions
    pub min_collision_response: f32,

    /// Ease the camera towards its destination instead of snapping
    pub lerp_follow_target: bool,
    /// Rate for eased following (1/s)
    pub follow_lerp_rate: f32,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            target_offset: Vec3::new(0.0, 1.5, 0.0),
            distance: 5.0,
            min_zoom: 1.0,
            max_zoom: 6.0,
            zoom_speed: 50.0,
            recovery: DistanceRecovery::default(),
            initial_yaw: 0.0,
            initial_pitch: 10.0,
            yaw_range: None,
            min_pitch: -30.0,
            max_pitch: 70.0,
            orbit_sensitivity: 1.0,
            look_axis_rate: 60.0,
            orbit_smooth: 0.0,
            max_look_delta: 6.0,
            lock_orbit: true,
            double_collision_check: false,
            collision_gain: 50.0,
            min_collision_response: 0.2,
            lerp_follow_target: false,
            follow_lerp_rate: 10.0,
        }
    }
}

impl FollowConfig {
    /// Reject configurations that would misbehave at runtime
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("distance", self.distance),
            ("min_zoom", self.min_zoom),
            ("zoom_speed", self.zoom_speed),
            ("orbit_sensitivity", self.orbit_sensitivity),
            ("look_axis_rate", self.look_axis_rate),
            ("orbit_smooth", self.orbit_smooth),
            ("max_look_delta", self.max_look_delta),
            ("collision_gain", self.collision_gain),
            ("min_collision_response", self.min_collision_response),
            ("follow_lerp_rate", self.follow_lerp_rate),
        ] {
            check_constant(name, value)?;
        }
        if let DistanceRecovery::ZoomSmoothing { rate } = self.recovery {
            check_constant("recovery.rate", rate)?;
        }

        check_range("zoom", self.min_zoom, self.max_zoom)?;
        check_range("pitch", self.min_pitch, self.max_pitch)?;
        if let Some(range) = self.yaw_range {
            check_range("yaw", range.x, range.y)?;
        }

        if !self.target_offset.is_finite() {
            return Err(ConfigError::DegenerateOffset);
        }

        Ok(())
    }
}
