//! Obstruction queries between a followed target and its camera

use glam::Vec3;
use rapier3d::prelude::QueryFilter;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{PhysicsWorld, TargetHandle};

/// Result of a single obstruction query
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Obstruction {
    /// Something blocks the line at this distance from the query origin
    Blocked(f32),
    /// Nothing blocks the line up to the requested distance
    Clear,
}

impl Obstruction {
    /// Build a result from a raw distance where infinity means unobstructed
    ///
    /// Non-finite and negative distances are treated as clear.
    pub fn from_distance(distance: f32) -> Self {
        if distance.is_finite() && distance >= 0.0 {
            Obstruction::Blocked(distance)
        } else {
            Obstruction::Clear
        }
    }

    /// The blocking distance, if any
    pub fn distance(&self) -> Option<f32> {
        match self {
            Obstruction::Blocked(distance) => Some(*distance),
            Obstruction::Clear => None,
        }
    }

    /// The blocking distance if it is shorter than `desired`
    pub fn closer_than(&self, desired: f32) -> Option<f32> {
        self.distance().filter(|distance| *distance < desired)
    }
}

/// A synchronous, side-effect free obstruction query
pub trait CollisionQuery {
    /// Distance along `direction` from `origin` at which the camera would be
    /// obstructed, looking no further than `desired_distance`
    fn obstruction(&self, origin: Vec3, direction: Vec3, desired_distance: f32) -> Obstruction;
}

/// Probe configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Collision radius for the camera
    pub radius: f32,
    /// Closest the probe will ever report an obstruction
    pub min_distance: f32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            radius: 0.3,
            min_distance: 0.5,
        }
    }
}

/// Ray probe against a physics world
pub struct CameraProbe<'a> {
    world: &'a PhysicsWorld,
    config: ProbeConfig,
    exclude: Option<TargetHandle>,
}

impl<'a> CameraProbe<'a> {
    /// Create a probe with the default configuration
    pub fn new(world: &'a PhysicsWorld) -> Self {
        Self::with_config(world, ProbeConfig::default())
    }

    /// Create a probe with a custom configuration
    pub fn with_config(world: &'a PhysicsWorld, config: ProbeConfig) -> Self {
        Self {
            world,
            config,
            exclude: None,
        }
    }

    /// Ignore the colliders of the followed body
    pub fn excluding(mut self, target: TargetHandle) -> Self {
        self.exclude = Some(target);
        self
    }
}

impl CollisionQuery for CameraProbe<'_> {
    fn obstruction(&self, origin: Vec3, direction: Vec3, desired_distance: f32) -> Obstruction {
        if !desired_distance.is_finite() || desired_distance <= 0.0 {
            return Obstruction::Clear;
        }
        let Some(direction) = direction.try_normalize() else {
            return Obstruction::Clear;
        };

        let mut filter = QueryFilter::default();
        if let Some(target) = self.exclude {
            filter = filter.exclude_rigid_body(target);
        }

        // Stop short of the surface so the camera sphere does not clip
        let ray_length = desired_distance + self.config.radius;
        let distance = self
            .world
            .cast_ray(origin, direction, ray_length, filter)
            .map_or(f32::INFINITY, |toi| {
                (toi - self.config.radius).max(self.config.min_distance)
            });
        let result = Obstruction::from_distance(distance);
        trace!(?origin, ?direction, desired_distance, ?result, "camera probe");
        result
    }
}
