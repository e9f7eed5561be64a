//! Vantage Physics - Scene queries for the camera rigs using rapier3d
//!
//! The scene holds static geometry the cameras must not clip into and
//! kinematic targets they follow. Nothing here is simulated dynamically:
//! stepping only carries targets to where they were moved and refreshes the
//! query structures.

mod collision;
mod target;

pub use collision::{CameraProbe, CollisionQuery, Obstruction, ProbeConfig};
pub use target::{TargetHandle, TargetSource};

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::prelude::*;

fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

/// Static geometry and followed targets
pub struct PhysicsWorld {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    islands: IslandManager,
    // Required by body removal and the pipeline even though no joints exist
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,

    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    ccd_solver: CCDSolver,
    queries: QueryPipeline,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            islands: IslandManager::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            params: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            queries: QueryPipeline::new(),
        }
    }

    /// Carry moved targets (and their colliders) to their new positions and
    /// refresh the query pipeline
    pub fn step(&mut self) {
        self.pipeline.step(
            &Vector::zeros(),
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.queries),
            &(),
            &(),
        );
    }

    /// Add an infinite floor at height `y`
    pub fn add_ground(&mut self, y: f32) -> ColliderHandle {
        let up = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(up)
            .translation(vector![0.0, y, 0.0])
            .build();
        self.colliders.insert(ground)
    }

    /// Add an axis-aligned box of static geometry
    pub fn add_wall(&mut self, half_extents: Vec3, center: Vec3) -> ColliderHandle {
        let wall = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(to_vector(center))
            .build();
        self.colliders.insert(wall)
    }

    /// Add a spherical target that cameras can follow
    pub fn add_target(&mut self, radius: f32, position: Vec3) -> TargetHandle {
        let body = RigidBodyBuilder::kinematic_position_based()
            .translation(to_vector(position))
            .build();
        let handle = self.bodies.insert(body);
        self.colliders
            .insert_with_parent(ColliderBuilder::ball(radius).build(), handle, &mut self.bodies);
        handle
    }

    /// Teleport a target
    ///
    /// Lookups see the new position at once; its collider follows on the
    /// next [`step`](Self::step).
    pub fn move_target(&mut self, target: TargetHandle, position: Vec3) {
        if let Some(body) = self.bodies.get_mut(target) {
            let translation = to_vector(position);
            body.set_translation(translation, true);
            body.set_next_kinematic_translation(translation);
        }
    }

    /// Remove a target and its collider; later lookups resolve to nothing
    pub fn remove_target(&mut self, target: TargetHandle) {
        let _ = self.bodies.remove(
            target,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Distance to the first solid hit along a ray, if any within `max_distance`
    ///
    /// `direction` must be normalized for the result to be a distance.
    pub fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<f32> {
        let ray = Ray::new(point![origin.x, origin.y, origin.z], to_vector(direction));
        self.queries
            .cast_ray(&self.bodies, &self.colliders, &ray, max_distance, true, filter)
            .map(|(_collider, toi)| toi)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
