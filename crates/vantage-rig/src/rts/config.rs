//! Free-roam rig configuration

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{check_constant, check_range, ConfigError};

/// Which way edge scrolling pans relative to the edge the pointer touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EdgeScrollDirection {
    /// Pointer at the right edge pans the view to the right
    #[default]
    TowardEdge,
    /// Pointer at the right edge pans the view to the left
    AwayFromEdge,
}

/// Rectangular bounds on the ground plane (x and z)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementBounds {
    /// Allowed x range (min, max)
    pub x: Vec2,
    /// Allowed z range (min, max)
    pub z: Vec2,
}

impl Default for MovementBounds {
    fn default() -> Self {
        Self {
            x: Vec2::new(-50.0, 50.0),
            z: Vec2::new(-50.0, 50.0),
        }
    }
}

impl MovementBounds {
    /// Clamp the horizontal components, leaving height untouched
    pub fn clamp(&self, position: Vec3) -> Vec3 {
        Vec3::new(
            position.x.clamp(self.x.x, self.x.y),
            position.y,
            position.z.clamp(self.z.x, self.z.y),
        )
    }

    /// Whether a position lies inside the bounds horizontally
    pub fn contains(&self, position: Vec3) -> bool {
        (self.x.x..=self.x.y).contains(&position.x) && (self.z.x..=self.z.y).contains(&position.z)
    }
}

/// Free-roam rig configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RtsConfig {
    /// Maximum pan speed in units per second
    pub max_speed: f32,
    /// Pan acceleration while a direction is requested
    pub acceleration: f32,
    /// Deceleration towards rest when no direction is requested
    pub damping: f32,
    /// Pan speed multiplier at the closest zoom
    pub min_pan_factor: f32,
    /// Pan speed multiplier at the farthest zoom
    pub max_pan_factor: f32,

    /// Distance change per scroll event
    pub zoom_step: f32,
    /// Rate at which the camera follows the zoom target (1/s)
    pub zoom_damping: f32,
    /// Closest zoom distance
    pub min_zoom: f32,
    /// Farthest zoom distance
    pub max_zoom: f32,
    /// Camera offset from the pivot in pivot space at activation
    pub camera_offset: Vec3,

    /// Drag velocity gained per pixel of pointer movement
    pub drag_sensitivity: f32,
    /// Rate at which drag inertia decays (1/s)
    pub drag_friction: f32,

    /// Degrees of rotation per pixel of pointer movement
    pub rotation_speed: f32,
    /// Degrees per second per unit of look axis input
    pub look_axis_rate: f32,
    /// Rate at which the pivot turns towards its target orientation (1/s)
    pub rotation_smooth: f32,
    /// Yaw at activation in degrees
    pub initial_yaw: f32,
    /// Pitch at activation in degrees
    pub initial_pitch: f32,
    /// Minimum pitch in degrees (keeps the view from reaching the horizon)
    pub min_pitch: f32,
    /// Maximum pitch in degrees (keeps the view from looking straight down)
    pub max_pitch: f32,

    /// Pan when the pointer rests near a screen edge
    pub enable_edge_scrolling: bool,
    /// Width of the edge bands as a fraction of the screen size
    pub edge_tolerance: f32,
    /// Edge scroll direction policy
    pub edge_scroll_direction: EdgeScrollDirection,

    /// Horizontal bounds for the pivot
    pub bounds: MovementBounds,
}

impl Default for RtsConfig {
    fn default() -> Self {
        Self {
            max_speed: 40.0,
            acceleration: 150.0,
            damping: 100.0,
            min_pan_factor: 0.975,
            max_pan_factor: 1.0,
            zoom_step: 2.5,
            zoom_damping: 7.5,
            min_zoom: 10.0,
            max_zoom: 50.0,
            camera_offset: Vec3::new(0.0, 0.0, 30.0),
            drag_sensitivity: 5.0,
            drag_friction: 150.0,
            rotation_speed: 0.5,
            look_axis_rate: 90.0,
            rotation_smooth: 10.0,
            initial_yaw: 0.0,
            initial_pitch: 45.0,
            min_pitch: 20.0,
            max_pitch: 80.0,
            enable_edge_scrolling: true,
            edge_tolerance: 0.05,
            edge_scroll_direction: EdgeScrollDirection::TowardEdge,
            bounds: MovementBounds::default(),
        }
    }
}

impl RtsConfig {
    /// Reject configurations that would misbehave at runtime
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("max_speed", self.max_speed),
            ("acceleration", self.acceleration),
            ("damping", self.damping),
            ("min_pan_factor", self.min_pan_factor),
            ("max_pan_factor", self.max_pan_factor),
            ("zoom_step", self.zoom_step),
            ("zoom_damping", self.zoom_damping),
            ("drag_sensitivity", self.drag_sensitivity),
            ("drag_friction", self.drag_friction),
            ("rotation_speed", self.rotation_speed),
            ("look_axis_rate", self.look_axis_rate),
            ("rotation_smooth", self.rotation_smooth),
            ("min_zoom", self.min_zoom),
        ] {
            check_constant(name, value)?;
        }

        check_range("zoom", self.min_zoom, self.max_zoom)?;
        check_range("pitch", self.min_pitch, self.max_pitch)?;
        check_range("bounds.x", self.bounds.x.x, self.bounds.x.y)?;
        check_range("bounds.z", self.bounds.z.x, self.bounds.z.y)?;

        if !(0.0..0.5).contains(&self.edge_tolerance) {
            return Err(ConfigError::EdgeTolerance(self.edge_tolerance));
        }

        let offset_length = self.camera_offset.length();
        if !offset_length.is_finite() || offset_length <= f32::EPSILON {
            return Err(ConfigError::DegenerateOffset);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(RtsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_zoom_rejected() {
        let config = RtsConfig {
            min_zoom: 60.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedRange {
                name: "zoom",
                min: 60.0,
                max: 50.0
            })
        );
    }

    #[test]
    fn test_bad_constants_rejected() {
        let config = RtsConfig {
            damping: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidConstant { name: "damping", .. })
        ));

        let config = RtsConfig {
            edge_tolerance: 0.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EdgeTolerance(0.5)));

        let config = RtsConfig {
            camera_offset: Vec3::ZERO,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::DegenerateOffset));
    }

    #[test]
    fn test_bounds_clamp() {
        let bounds = MovementBounds::default();
        let clamped = bounds.clamp(Vec3::new(80.0, 7.0, -60.0));
        assert_eq!(clamped, Vec3::new(50.0, 7.0, -50.0));
        assert!(bounds.contains(clamped));
    }
}
