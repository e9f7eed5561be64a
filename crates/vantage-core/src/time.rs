//! Tick clock for the camera rigs
//!
//! Every smoothing and integration formula in the rigs is expressed in terms
//! of the delta time produced here.

use serde::{Deserialize, Serialize};

/// Configuration for the tick clock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeConfig {
    /// How many simulated seconds pass per real second
    pub time_scale: f32,
    /// Maximum delta time to prevent a single huge step after a stall
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            max_delta_time: 0.25,
        }
    }
}

/// Per-frame time tracking
#[derive(Debug, Clone, Default)]
pub struct GameTime {
    /// Configuration
    pub config: TimeConfig,
    /// Time since start in seconds
    pub total_time: f64,
    /// Delta time for this frame (clamped and scaled)
    pub delta_time: f32,
    /// Unscaled delta time
    pub unscaled_delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
    /// Whether simulation is paused
    pub paused: bool,
}

impl GameTime {
    /// Create a new tick clock with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Advance the clock with the raw delta from the previous frame
    pub fn update(&mut self, raw_delta: f32) {
        // NaN and negative deltas collapse to a zero-length tick
        let raw_delta = if raw_delta.is_finite() { raw_delta.max(0.0) } else { 0.0 };
        self.unscaled_delta_time = raw_delta.min(self.config.max_delta_time);
        self.frame_count += 1;

        if self.paused {
            self.delta_time = 0.0;
            return;
        }

        self.delta_time = self.unscaled_delta_time * self.config.time_scale;
        self.total_time += self.delta_time as f64;
    }

    /// Delta time for the current frame
    pub fn dt(&self) -> f32 {
        self.delta_time
    }

    /// Pause the clock
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Set the time scale (0.0 = frozen, 1.0 = normal, 2.0 = double speed)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.config.time_scale = scale.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_time() {
        let mut time = GameTime::default();
        time.update(0.016);

        assert!(time.delta_time > 0.0);
        assert_eq!(time.frame_count, 1);

        time.pause();
        time.update(0.016);
        assert_eq!(time.delta_time, 0.0);
        assert_eq!(time.frame_count, 2);
    }

    #[test]
    fn test_delta_clamped() {
        let mut time = GameTime::default();
        time.update(3.0);
        assert_eq!(time.dt(), 0.25);
    }

    #[test]
    fn test_degenerate_delta() {
        let mut time = GameTime::default();
        time.update(f32::NAN);
        assert_eq!(time.dt(), 0.0);
        time.update(-1.0);
        assert_eq!(time.dt(), 0.0);
    }

    #[test]
    fn test_time_scale() {
        let mut time = GameTime::default();
        time.set_time_scale(2.0);
        time.update(0.01);
        assert!((time.dt() - 0.02).abs() < 1e-6);

        time.set_time_scale(-4.0);
        assert_eq!(time.config.time_scale, 0.0);
    }
}
