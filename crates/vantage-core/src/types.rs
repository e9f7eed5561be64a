//! Core types shared by the rigs

use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position and orientation of a pivot or camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Get the forward direction (negative Z in local space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Get the right direction (positive X in local space)
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Forward projected onto the ground plane
    pub fn flat_forward(&self) -> Vec3 {
        let forward = self.forward();
        Vec3::new(forward.x, 0.0, forward.z)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z)
    }

    /// Right projected onto the ground plane
    pub fn flat_right(&self) -> Vec3 {
        let right = self.right();
        Vec3::new(right.x, 0.0, right.z)
            .try_normalize()
            .unwrap_or(Vec3::X)
    }

    /// Transform a point from local space into world space
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    /// Rotate so that forward points at `target`
    ///
    /// Leaves the rotation untouched when `target` coincides with the
    /// position or lies straight along `up`.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let Some(back) = (self.position - target).try_normalize() else {
            return;
        };
        let Some(right) = up.cross(back).try_normalize() else {
            return;
        };
        let up = back.cross(right);

        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, up, back)).normalize();
    }

}
