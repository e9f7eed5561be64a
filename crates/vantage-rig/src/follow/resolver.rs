//! Collision-aware follow distance

use vantage_core::{lerp, lerp_factor};
use vantage_physics::Obstruction;

use super::config::{DistanceRecovery, FollowConfig};

/// Outcome of resolving the follow distance for one query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    /// Stored follow distance after this step
    pub follow_distance: f32,
    /// Distance the camera is placed at this tick
    pub applied_distance: f32,
    /// Whether an obstruction constrained the distance
    pub obstructed: bool,
}

/// Shrinks the follow distance towards obstructions and relaxes it back out
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceResolver {
    gain: f32,
    min_response: f32,
    recovery: DistanceRecovery,
    min_zoom: f32,
    max_zoom: f32,
}

impl DistanceResolver {
    pub fn new(config: &FollowConfig) -> Self {
        Self {
            gain: config.collision_gain,
            min_response: config.min_collision_response,
            recovery: config.recovery,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
        }
    }

    /// Pull the follow distance in if `obstruction` is closer than it
    ///
    /// The stored distance eases towards the obstruction faster while the
    /// view is turning; the applied distance never exceeds the obstruction.
    pub fn constrain(
        &self,
        follow_distance: f32,
        obstruction: Obstruction,
        look_speed: f32,
        dt: f32,
    ) -> Option<Resolved> {
        let limit = obstruction.closer_than(follow_distance)?;

        let response = (self.gain * look_speed.max(self.min_response) * dt).clamp(0.0, 1.0);
        let follow_distance = lerp(follow_distance, limit, response);

        Some(Resolved {
            follow_distance,
            applied_distance: follow_distance.min(limit),
            obstructed: true,
        })
    }

    /// Resolve against a fresh query, relaxing back out when nothing is closer
    /// than the current follow distance
    ///
    /// `desired_distance` is the zoom distance and `zoom_delta` the change the
    /// zoom solver applied this tick.
    pub fn resolve(
        &self,
        follow_distance: f32,
        desired_distance: f32,
        zoom_delta: f32,
        obstruction: Obstruction,
        look_speed: f32,
        dt: f32,
    ) -> Resolved {
        if let Some(resolved) = self.constrain(follow_distance, obstruction, look_speed, dt) {
            return resolved;
        }

        let follow_distance = match self.recovery {
            DistanceRecovery::ZoomSmoothing { rate } => {
                let goal = obstruction
                    .distance()
                    .map_or(desired_distance, |limit| desired_distance.min(limit));
                lerp(follow_distance, goal, lerp_factor(rate, dt))
            }
            DistanceRecovery::Manual => {
                let limit = obstruction.distance().unwrap_or(f32::INFINITY);
                (follow_distance + zoom_delta)
                    .clamp(self.min_zoom, self.max_zoom)
                    .min(limit.max(follow_distance))
            }
        };

        Resolved {
            follow_distance,
            applied_distance: follow_distance,
            obstructed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn resolver(recovery: DistanceRecovery) -> DistanceResolver {
        DistanceResolver::new(&FollowConfig {
            recovery,
            ..Default::default()
        })
    }

    #[test]
    fn test_clear_keeps_distance_at_rest() {
        let resolver = resolver(DistanceRecovery::default());
        let resolved = resolver.resolve(5.0, 5.0, 0.0, Obstruction::Clear, 0.0, DT);
        assert_eq!(resolved.follow_distance, 5.0);
        assert_eq!(resolved.applied_distance, 5.0);
        assert!(!resolved.obstructed);
    }

    #[test]
    fn test_obstruction_applied_same_tick() {
        let resolver = resolver(DistanceRecovery::default());
        let resolved = resolver.resolve(5.0, 5.0, 0.0, Obstruction::Blocked(3.0), 0.0, DT);

        assert!(resolved.obstructed);
        assert_eq!(resolved.applied_distance, 3.0);
        assert!(resolved.follow_distance < 5.0);
        assert!(resolved.follow_distance > 3.0);
    }

    #[test]
    fn test_obstruction_converges_without_overshoot() {
        let resolver = resolver(DistanceRecovery::default());
        let mut follow = 5.0;
        for _ in 0..120 {
            let resolved = resolver.resolve(follow, 5.0, 0.0, Obstruction::Blocked(3.0), 0.0, DT);
            assert!(resolved.follow_distance >= 3.0);
            assert!(resolved.applied_distance <= 3.0);
            follow = resolved.follow_distance;
        }
        assert!((follow - 3.0).abs() < 1e-3);
    }

    #[test]
    fn test_faster_look_reacts_faster() {
        let resolver = resolver(DistanceRecovery::default());
        let still = resolver.resolve(5.0, 5.0, 0.0, Obstruction::Blocked(3.0), 0.0, DT);
        let turning = resolver.resolve(5.0, 5.0, 0.0, Obstruction::Blocked(3.0), 0.5, DT);
        assert!(turning.follow_distance < still.follow_distance);
    }

    #[test]
    fn test_far_obstruction_is_ignored() {
        let resolver = resolver(DistanceRecovery::Manual);
        let resolved = resolver.resolve(4.0, 4.0, 0.0, Obstruction::Blocked(4.5), 0.0, DT);
        assert!(!resolved.obstructed);
        assert_eq!(resolved.applied_distance, 4.0);
    }

    #[test]
    fn test_zoom_smoothing_recovers() {
        let resolver = resolver(DistanceRecovery::ZoomSmoothing { rate: 4.0 });
        let mut follow = 3.0;
        for _ in 0..240 {
            let resolved = resolver.resolve(follow, 5.0, 0.0, Obstruction::Clear, 0.0, DT);
            assert!(resolved.follow_distance >= follow);
            follow = resolved.follow_distance;
        }
        assert!((follow - 5.0).abs() < 1e-3);

        // A partial clearance only lets the distance grow up to the obstruction
        let mut follow = 3.0;
        for _ in 0..240 {
            follow = resolver
                .resolve(follow, 5.0, 0.0, Obstruction::Blocked(4.0), 0.0, DT)
                .follow_distance;
            assert!(follow <= 4.0);
        }
        assert!((follow - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_manual_recovery_needs_zoom() {
        let resolver = resolver(DistanceRecovery::Manual);
        let resolved = resolver.resolve(3.0, 5.0, 0.0, Obstruction::Clear, 0.0, DT);
        assert_eq!(resolved.follow_distance, 3.0);

        let resolved = resolver.resolve(3.0, 5.0, 0.5, Obstruction::Clear, 0.0, DT);
        assert_eq!(resolved.follow_distance, 3.5);

        let resolved = resolver.resolve(3.0, 5.0, 2.0, Obstruction::Blocked(4.0), 0.0, DT);
        assert_eq!(resolved.follow_distance, 4.0);
    }
}
