//! Read-only lookup of followed objects

use glam::Vec3;
use rapier3d::prelude::RigidBodyHandle;

use crate::PhysicsWorld;

/// Handle to an object a camera may follow
///
/// The camera never owns the object; the handle may go stale at any time.
pub type TargetHandle = RigidBodyHandle;

/// Resolves followed objects to their current world position
pub trait TargetSource {
    /// Current position of the target, or `None` if it no longer exists
    fn target_position(&self, target: TargetHandle) -> Option<Vec3>;
}

impl TargetSource for PhysicsWorld {
    fn target_position(&self, target: TargetHandle) -> Option<Vec3> {
        self.bodies.get(target).map(|body| {
            let t = body.translation();
            Vec3::new(t.x, t.y, t.z)
        })
    }
}
