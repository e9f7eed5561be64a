//! Free-roam rig with panning, drag, edge scrolling, rotation and step zoom

use glam::{Vec2, Vec3};
use tracing::debug;
use vantage_core::{lerp_factor, Transform};

use super::arbitration::{self, DragPan, GroundFrame};
use super::integrator::{pan_factor, MotionIntegrator};
use super::RtsConfig;
use crate::error::ConfigError;
use crate::input::RigInput;
use crate::orbit::{OrbitAngles, OrbitLimits};
use crate::pose;
use crate::zoom::StepZoom;

/// Top-down camera rig roaming over a bounded ground area
///
/// The rig owns a pivot transform on the ground and a child camera offset
/// from it. Each tick translates the pivot, then turns it, then places the
/// camera and re-aims it at the pivot.
#[derive(Debug, Clone)]
pub struct RtsRig {
    config: RtsConfig,
    limits: OrbitLimits,
    /// Pivot on the ground; its rotation trails `orientation`
    pivot: Transform,
    /// Target orientation set by rotation input
    orientation: OrbitAngles,
    motion: MotionIntegrator,
    drag: DragPan,
    zoom: StepZoom,
    /// Camera position relative to the pivot, in pivot space
    camera_offset: Vec3,
    /// Camera world transform (computed each tick)
    camera: Transform,
    last_position: Vec3,
    horizontal_velocity: Vec3,
    cursor_locked: bool,
}

impl RtsRig {
    /// Activate a rig with its pivot at `position`
    pub fn new(config: RtsConfig, position: Vec3) -> Result<Self, ConfigError> {
        config.validate()?;

        let limits = OrbitLimits::pitch_only(config.min_pitch, config.max_pitch);
        let mut orientation = OrbitAngles::from_degrees(config.initial_yaw, config.initial_pitch);
        orientation.clamp(&limits);

        let zoom = StepZoom::new(
            config.camera_offset.length(),
            config.zoom_step,
            config.min_zoom,
            config.max_zoom,
        );
        let camera_offset = config.camera_offset.normalize() * zoom.target();

        let position = config.bounds.clamp(position);
        let pivot = Transform::from_position_rotation(position, orientation.rotation());
        let camera = pose::pivot_camera(&pivot, camera_offset);

        debug!(?position, zoom = zoom.target(), "free-roam rig activated");

        Ok(Self {
            config,
            limits,
            pivot,
            orientation,
            motion: MotionIntegrator::default(),
            drag: DragPan::default(),
            zoom,
            camera_offset,
            camera,
            last_position: position,
            horizontal_velocity: Vec3::ZERO,
            cursor_locked: false,
        })
    }

    /// Configuration
    pub fn config(&self) -> &RtsConfig {
        &self.config
    }

    /// Pivot transform
    pub fn pivot(&self) -> &Transform {
        &self.pivot
    }

    /// Camera world transform
    pub fn camera(&self) -> &Transform {
        &self.camera
    }

    /// Pan velocity
    pub fn velocity(&self) -> Vec3 {
        self.motion.velocity()
    }

    /// Inertial drag velocity
    pub fn drag_velocity(&self) -> Vec3 {
        self.drag.velocity()
    }

    /// Target yaw and pitch in radians
    pub fn orientation(&self) -> OrbitAngles {
        self.orientation
    }

    /// Zoom distance the camera is heading towards
    pub fn zoom_distance(&self) -> f32 {
        self.zoom.target()
    }

    /// Current camera distance from the pivot
    pub fn camera_distance(&self) -> f32 {
        self.camera_offset.length()
    }

    /// Observed ground-plane velocity of the pivot over the last tick
    pub fn horizontal_velocity(&self) -> Vec3 {
        self.horizontal_velocity
    }

    /// Whether the cursor should be locked for drag panning
    pub fn cursor_locked(&self) -> bool {
        self.cursor_locked
    }

    /// Move the pivot instantly, dropping all momentum
    pub fn teleport(&mut self, position: Vec3) {
        let position = self.config.bounds.clamp(position);
        self.pivot.position = position;
        self.last_position = position;
        self.motion.stop();
        self.drag = DragPan::default();
        self.horizontal_velocity = Vec3::ZERO;
        self.camera = pose::pivot_camera(&self.pivot, self.camera_offset);
    }

    /// Update the rig (call each frame)
    pub fn update(&mut self, input: &RigInput, dt: f32) {
        if input.right.pressed_this_frame {
            self.cursor_locked = true;
        }

        let frame = GroundFrame::of(&self.pivot);

        self.handle_rotation(input, dt);

        let intent = arbitration::resolve(input, &frame, &mut self.drag, &self.config, dt);

        self.zoom.apply_scroll(input.scroll);

        // Translate the pivot
        let factor = pan_factor(&self.config, self.zoom.normalized());
        let displacement =
            self.motion.integrate(intent.direction, factor, &self.config, dt) + intent.drag_displacement;
        self.pivot.position = self.config.bounds.clamp(self.pivot.position + displacement);

        // Ease the camera along its offset towards the zoom target
        let direction = self.camera_offset.try_normalize().unwrap_or(Vec3::Z);
        self.camera_offset = self.camera_offset.lerp(
            direction * self.zoom.target(),
            lerp_factor(self.config.zoom_damping, dt),
        );

        if dt > 0.0 {
            let moved = (self.pivot.position - self.last_position) / dt;
            self.horizontal_velocity = Vec3::new(moved.x, 0.0, moved.z);
        } else {
            self.horizontal_velocity = Vec3::ZERO;
        }
        self.last_position = self.pivot.position;

        // Turn after translating, then place the camera from the final pivot
        self.pivot.rotation = self.pivot.rotation.slerp(
            self.orientation.rotation(),
            lerp_factor(self.config.rotation_smooth, dt),
        );
        self.camera = pose::pivot_camera(&self.pivot, self.camera_offset);

        if !input.right.held {
            self.cursor_locked = false;
        }
    }

    /// Update the target orientation from held buttons and the look axis
    fn handle_rotation(&mut self, input: &RigInput, dt: f32) {
        let per_pixel = self.config.rotation_speed.to_radians();
        let pointer = if input.left.held {
            Vec2::new(input.pointer_delta.x, 0.0)
        } else if input.middle.held {
            // Dragging the pointer up tilts the view down
            Vec2::new(0.0, -input.pointer_delta.y)
        } else {
            Vec2::ZERO
        };
        let axis = input.look_axis * self.config.look_axis_rate.to_radians() * dt;

        let delta = pointer * per_pixel + axis;
        if delta != Vec2::ZERO {
            self.orientation.rotate(delta, &self.limits);
        }
    }
}
