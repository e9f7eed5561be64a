//! Orbiting follow rig with obstruction avoidance

use glam::{Vec2, Vec3};
use tracing::{debug, trace, warn};
use vantage_core::{lerp_factor, Transform};
use vantage_physics::{CollisionQuery, Obstruction, TargetHandle, TargetSource};

use super::config::FollowConfig;
use super::resolver::{DistanceResolver, Resolved};
use crate::error::ConfigError;
use crate::input::RigInput;
use crate::orbit::{OrbitAngles, OrbitLimits};
use crate::pose;
use crate::zoom::ContinuousZoom;

/// Camera that orbits a followed object at a zoomable distance
///
/// The rig only holds a handle to its target and looks it up each tick. If
/// the lookup fails the camera holds its last pose until the target returns.
#[derive(Debug, Clone)]
pub struct FollowRig {
    config: FollowConfig,
    target: TargetHandle,
    limits: OrbitLimits,
    /// Angles the orbit is heading towards
    orbit_target: OrbitAngles,
    /// Angles used for placement this tick
    orbit: OrbitAngles,
    zoom: ContinuousZoom,
    resolver: DistanceResolver,
    follow_distance: f32,
    applied_distance: f32,
    transform: Transform,
    /// False until the first pose has been composed
    placed: bool,
    target_lost: bool,
}

impl FollowRig {
    /// Activate a rig following `target`
    pub fn new(config: FollowConfig, target: TargetHandle) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut limits = OrbitLimits::pitch_only(config.min_pitch, config.max_pitch);
        if let Some(range) = config.yaw_range {
            limits = limits.with_yaw(range.x, range.y);
        }
        let mut orbit = OrbitAngles::from_degrees(config.initial_yaw, config.initial_pitch);
        orbit.clamp(&limits);

        let zoom = ContinuousZoom::new(
            config.distance,
            config.zoom_speed,
            config.min_zoom,
            config.max_zoom,
        );
        let distance = zoom.desired();
        let resolver = DistanceResolver::new(&config);

        debug!(?target, distance, "follow rig activated");

        Ok(Self {
            config,
            target,
            limits,
            orbit_target: orbit,
            orbit,
            zoom,
            resolver,
            follow_distance: distance,
            applied_distance: distance,
            transform: Transform::default(),
            placed: false,
            target_lost: false,
        })
    }

    /// Configuration
    pub fn config(&self) -> &FollowConfig {
        &self.config
    }

    /// Camera world transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Handle of the followed object
    pub fn target(&self) -> TargetHandle {
        self.target
    }

    /// Whether the target resolved on the last tick
    pub fn has_target(&self) -> bool {
        !self.target_lost
    }

    /// Distance the zoom solver asks for
    pub fn desired_distance(&self) -> f32 {
        self.zoom.desired()
    }

    /// Stored follow distance, shrunk by obstructions
    pub fn follow_distance(&self) -> f32 {
        self.follow_distance
    }

    /// Distance the camera was placed at on the last tick
    pub fn applied_distance(&self) -> f32 {
        self.applied_distance
    }

    /// Current orbit angles in radians
    pub fn orbit(&self) -> OrbitAngles {
        self.orbit
    }

    /// Follow a different object, snapping to it on the next tick
    pub fn retarget(&mut self, target: TargetHandle) {
        debug!(from = ?self.target, to = ?target, "follow rig retargeted");
        self.target = target;
        self.target_lost = false;
        self.placed = false;
    }

    /// Update the rig (call each frame)
    ///
    /// Without a collision service every query is treated as unobstructed.
    pub fn update(
        &mut self,
        input: &RigInput,
        scene: &dyn TargetSource,
        collision: Option<&dyn CollisionQuery>,
        dt: f32,
    ) {
        let Some(target_position) = scene.target_position(self.target) else {
            if !self.target_lost {
                warn!(target = ?self.target, "follow target missing, holding camera");
                self.target_lost = true;
            }
            return;
        };
        if self.target_lost {
            debug!(target = ?self.target, "follow target reacquired");
            self.target_lost = false;
        }

        let anchor = target_position + self.config.target_offset;
        let look = self.look_delta(input, dt);
        // Orbit speed in radians per second drives how fast obstructions pull in
        let look_speed = if dt > 0.0 { look.length() / dt } else { 0.0 };
        let mut obstructed = false;

        if self.config.double_collision_check {
            let obstruction = self.query(collision, anchor);
            let pre = self
                .resolver
                .constrain(self.follow_distance, obstruction, look_speed, dt);
            if let Some(resolved) = pre {
                self.follow_distance = resolved.follow_distance;
                obstructed = true;
            }
        }

        let zoom_delta = self.zoom.apply_scroll(input.scroll, dt);
        self.update_orbit(look, dt);

        let obstruction = self.query(collision, anchor);
        let resolved = self.resolver.resolve(
            self.follow_distance,
            self.zoom.desired(),
            zoom_delta,
            obstruction,
            look_speed,
            dt,
        );
        self.apply(resolved);
        obstructed |= resolved.obstructed;

        let destination =
            pose::orbit_destination(anchor, self.orbit.rotation(), self.applied_distance);
        let position = if self.config.lerp_follow_target && self.placed && !obstructed {
            let eased = self
                .transform
                .position
                .lerp(destination, lerp_factor(self.config.follow_lerp_rate, dt));
            // Easing must not leave the camera behind the obstruction
            let limit = obstruction.distance().unwrap_or(f32::INFINITY);
            if (eased - anchor).length() > limit {
                destination
            } else {
                eased
            }
        } else {
            destination
        };

        self.transform = pose::aimed_at(position, anchor);
        self.placed = true;
    }

    /// Orbit change requested this tick, in radians
    ///
    /// Pointer movement is already a per-tick amount and is only capped. The
    /// look axis is a rate and is scaled by `dt`.
    fn look_delta(&self, input: &RigInput, dt: f32) -> Vec2 {
        let pointer = input
            .pointer_delta
            .clamp_length_max(self.config.max_look_delta)
            * self.config.orbit_sensitivity;
        let axis = input.look_axis * self.config.look_axis_rate * dt;
        (pointer + axis) * 1f32.to_radians()
    }

    fn update_orbit(&mut self, look: Vec2, dt: f32) {
        if !self.config.lock_orbit && look != Vec2::ZERO {
            self.orbit_target.rotate(look, &self.limits);
        }

        if self.config.orbit_smooth <= 0.0 || !self.placed {
            self.orbit = self.orbit_target;
        } else {
            self.orbit
                .approach(&self.orbit_target, lerp_factor(self.config.orbit_smooth, dt));
        }
    }

    /// Query along the current orbit direction
    ///
    /// The ray starts at the anchor (target position plus `target_offset`),
    /// the same point the camera is placed from and aimed at, so the reported
    /// distance is directly comparable to the applied distance.
    fn query(&self, collision: Option<&dyn CollisionQuery>, anchor: Vec3) -> Obstruction {
        let Some(collision) = collision else {
            return Obstruction::Clear;
        };
        let direction = self.orbit.rotation() * Vec3::Z;
        let reach = self.follow_distance.max(self.zoom.desired());
        let obstruction = collision.obstruction(anchor, direction, reach);
        trace!(?obstruction, reach, "follow collision query");
        obstruction
    }

    fn apply(&mut self, resolved: Resolved) {
        self.follow_distance = resolved.follow_distance;
        self.applied_distance = resolved.applied_distance;
    }
}
