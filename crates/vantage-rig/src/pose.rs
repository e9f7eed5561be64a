//! Final camera placement

use glam::{Quat, Vec3};
use vantage_core::Transform;

/// Point `distance` behind `anchor` along the backward axis of `rotation`
pub fn orbit_destination(anchor: Vec3, rotation: Quat, distance: f32) -> Vec3 {
    anchor + rotation * (Vec3::Z * distance)
}

/// A camera at `position` looking at `target`
pub fn aimed_at(position: Vec3, target: Vec3) -> Transform {
    let mut transform = Transform::from_position(position);
    transform.look_at(target, Vec3::Y);
    transform
}

/// World transform of a camera offset from its pivot, re-aimed at the pivot
pub fn pivot_camera(pivot: &Transform, local_offset: Vec3) -> Transform {
    let mut camera =
        Transform::from_position_rotation(pivot.transform_point(local_offset), pivot.rotation);
    camera.look_at(pivot.position, Vec3::Y);
    camera
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbit::OrbitAngles;

    #[test]
    fn test_orbit_destination_behind_anchor() {
        let anchor = Vec3::new(0.0, 1.5, 0.0);
        let destination = orbit_destination(anchor, Quat::IDENTITY, 5.0);
        assert_eq!(destination, Vec3::new(0.0, 1.5, 5.0));
    }

    #[test]
    fn test_orbit_destination_pitched_above() {
        let rotation = OrbitAngles::from_degrees(0.0, 30.0).rotation();
        let destination = orbit_destination(Vec3::ZERO, rotation, 4.0);
        assert!((destination.length() - 4.0).abs() < 1e-4);
        assert!((destination.y - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_aimed_at() {
        let camera = aimed_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        assert!((camera.forward() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_pivot_camera_faces_pivot() {
        let rotation = OrbitAngles::from_degrees(30.0, 45.0).rotation();
        let pivot = Transform::from_position_rotation(Vec3::new(3.0, 0.0, -2.0), rotation);
        let camera = pivot_camera(&pivot, Vec3::new(0.0, 0.0, 30.0));

        assert!(((camera.position - pivot.position).length() - 30.0).abs() < 1e-3);
        assert!(camera.position.y > 20.0);
        let to_pivot = (pivot.position - camera.position).normalize();
        assert!((camera.forward() - to_pivot).length() < 1e-4);
    }
}
