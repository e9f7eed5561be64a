//! Resolves competing movement inputs into one intent per tick
//!
//! Precedence, in evaluation order:
//! 1. directional input sets the desired direction
//! 2. pointer drag adds an inertial displacement on top of any direction
//! 3. edge scrolling sets the direction when no button and no directional
//!    input is active

use glam::{Vec2, Vec3};
use tracing::trace;
use vantage_core::{lerp_factor, Transform};

use super::config::{EdgeScrollDirection, RtsConfig};
use crate::input::RigInput;

/// Camera-relative axes on the ground plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundFrame {
    pub right: Vec3,
    pub forward: Vec3,
}

impl GroundFrame {
    /// Yaw-only axes of a pivot
    pub fn of(pivot: &Transform) -> Self {
        Self {
            right: pivot.flat_right(),
            forward: pivot.flat_forward(),
        }
    }

    /// Map a 2D (right, forward) vector onto the ground plane
    pub fn project(&self, v: Vec2) -> Vec3 {
        self.right * v.x + self.forward * v.y
    }
}

/// Movement requested for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveIntent {
    /// Unit (or zero) direction fed to the motion integrator
    pub direction: Vec3,
    /// Displacement applied directly to the pivot this tick
    pub drag_displacement: Vec3,
}

/// Inertial pointer-drag panning
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragPan {
    velocity: Vec3,
}

impl DragPan {
    /// Current drag velocity
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Advance the drag by one tick and return this tick's displacement
    ///
    /// Dragging grabs the ground: moving the pointer right pans the view left.
    pub fn update(
        &mut self,
        input: &RigInput,
        frame: &GroundFrame,
        config: &RtsConfig,
        dt: f32,
    ) -> Vec3 {
        if !input.right.held {
            self.velocity = Vec3::ZERO;
            return Vec3::ZERO;
        }
        // The pointer delta on the press frame is relative to an unknown position
        if input.right.pressed_this_frame {
            return Vec3::ZERO;
        }

        let delta = axis_locked(input.pointer_delta);
        let drag = frame.right * -delta.x + frame.forward * delta.y;
        self.velocity += drag * config.drag_sensitivity;

        let displacement = self.velocity * dt;
        self.velocity = self
            .velocity
            .lerp(Vec3::ZERO, lerp_factor(config.drag_friction, dt));
        displacement
    }
}

/// Keep only the dominant axis of a pointer delta
fn axis_locked(delta: Vec2) -> Vec2 {
    if delta.x.abs() > delta.y.abs() {
        Vec2::new(delta.x, 0.0)
    } else {
        Vec2::new(0.0, delta.y)
    }
}

/// Direction requested by keys or stick, if any
fn directional(input: &RigInput, frame: &GroundFrame) -> Option<Vec3> {
    if !input.has_move_input() {
        return None;
    }
    Some(frame.project(input.move_axis).normalize_or_zero())
}

/// Direction requested by the pointer resting in an edge band, if edge
/// scrolling is allowed this tick
fn edge_scroll(input: &RigInput, frame: &GroundFrame, config: &RtsConfig) -> Option<Vec3> {
    if !config.enable_edge_scrolling || input.any_button_held() || input.has_move_input() {
        return None;
    }
    let size = input.screen_size;
    if size.x <= 0.0 || size.y <= 0.0 {
        return None;
    }

    let pos = input.pointer_position;
    let band = size * config.edge_tolerance;
    let mut screen = Vec2::ZERO;

    if pos.x < band.x {
        screen.x -= 1.0;
    } else if pos.x > size.x - band.x {
        screen.x += 1.0;
    }

    // Screen y grows downwards; the top edge is forward
    if pos.y < band.y {
        screen.y += 1.0;
    } else if pos.y > size.y - band.y {
        screen.y -= 1.0;
    }

    if config.edge_scroll_direction == EdgeScrollDirection::AwayFromEdge {
        screen = -screen;
    }

    Some(frame.project(screen).clamp_length_max(1.0))
}

/// Resolve this tick's movement intent
pub fn resolve(
    input: &RigInput,
    frame: &GroundFrame,
    drag: &mut DragPan,
    config: &RtsConfig,
    dt: f32,
) -> MoveIntent {
    let mut intent = MoveIntent::default();

    if let Some(direction) = directional(input, frame) {
        intent.direction = direction;
    }

    intent.drag_displacement = drag.update(input, frame, config, dt);

    if let Some(direction) = edge_scroll(input, frame, config) {
        intent.direction = direction;
    }

    trace!(?intent, "resolved move intent");
    intent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ButtonState;

    const DT: f32 = 0.016;

    fn frame() -> GroundFrame {
        GroundFrame::of(&Transform::default())
    }

    fn resolve_default(input: &RigInput) -> MoveIntent {
        resolve(input, &frame(), &mut DragPan::default(), &RtsConfig::default(), DT)
    }

    fn screen_input(pointer: Vec2) -> RigInput {
        RigInput {
            pointer_position: pointer,
            screen_size: Vec2::new(1000.0, 800.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_directional_is_camera_relative() {
        let input = RigInput {
            move_axis: Vec2::new(1.0, 1.0),
            ..Default::default()
        };
        let intent = resolve_default(&input);
        let expected = Vec3::new(1.0, 0.0, -1.0).normalize();
        assert!((intent.direction - expected).length() < 1e-6);
        assert_eq!(intent.drag_displacement, Vec3::ZERO);
    }

    #[test]
    fn test_no_input_no_intent() {
        let input = screen_input(Vec2::new(500.0, 400.0));
        let intent = resolve_default(&input);
        assert_eq!(intent, MoveIntent::default());
    }

    #[test]
    fn test_edge_scroll_toward_edge() {
        let config = RtsConfig::default();
        let mut drag = DragPan::default();

        let right_edge = screen_input(Vec2::new(990.0, 400.0));
        let intent = resolve(&right_edge, &frame(), &mut drag, &config, DT);
        assert_eq!(intent.direction, Vec3::X);

        let top_edge = screen_input(Vec2::new(500.0, 5.0));
        let intent = resolve(&top_edge, &frame(), &mut drag, &config, DT);
        assert_eq!(intent.direction, Vec3::NEG_Z);

        let bottom_left = screen_input(Vec2::new(1.0, 799.0));
        let intent = resolve(&bottom_left, &frame(), &mut drag, &config, DT);
        assert!((intent.direction.length() - 1.0).abs() < 1e-6);
        assert!(intent.direction.x < 0.0 && intent.direction.z > 0.0);
    }

    #[test]
    fn test_edge_scroll_away_from_edge() {
        let config = RtsConfig {
            edge_scroll_direction: EdgeScrollDirection::AwayFromEdge,
            ..Default::default()
        };
        let input = screen_input(Vec2::new(990.0, 400.0));
        let intent = resolve(&input, &frame(), &mut DragPan::default(), &config, DT);
        assert_eq!(intent.direction, Vec3::NEG_X);
    }

    #[test]
    fn test_edge_scroll_mutually_exclusive() {
        let config = RtsConfig::default();
        let at_edge = screen_input(Vec2::new(990.0, 400.0));

        let with_move = RigInput {
            move_axis: Vec2::new(0.0, 1.0),
            ..at_edge
        };
        let intent = resolve(&with_move, &frame(), &mut DragPan::default(), &config, DT);
        assert_eq!(intent.direction, Vec3::NEG_Z);

        for buttons in [
            (ButtonState::HELD, ButtonState::default(), ButtonState::default()),
            (ButtonState::default(), ButtonState::HELD, ButtonState::default()),
            (ButtonState::default(), ButtonState::default(), ButtonState::HELD),
            (ButtonState::default(), ButtonState::PRESSED, ButtonState::default()),
        ] {
            let input = RigInput {
                left: buttons.0,
                right: buttons.1,
                middle: buttons.2,
                ..at_edge
            };
            let intent = resolve(&input, &frame(), &mut DragPan::default(), &config, DT);
            assert_eq!(intent.direction, Vec3::ZERO);
        }

        let disabled = RtsConfig {
            enable_edge_scrolling: false,
            ..Default::default()
        };
        let intent = resolve(&at_edge, &frame(), &mut DragPan::default(), &disabled, DT);
        assert_eq!(intent.direction, Vec3::ZERO);
    }

    #[test]
    fn test_edge_scroll_needs_screen_size() {
        let input = RigInput::default();
        let intent = resolve_default(&input);
        assert_eq!(intent.direction, Vec3::ZERO);
    }

    #[test]
    fn test_drag_first_frame_suppressed() {
        let mut drag = DragPan::default();
        let input = RigInput {
            right: ButtonState::PRESSED,
            pointer_delta: Vec2::new(300.0, 0.0),
            ..Default::default()
        };
        let displacement = drag.update(&input, &frame(), &RtsConfig::default(), DT);
        assert_eq!(displacement, Vec3::ZERO);
        assert_eq!(drag.velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_drag_axis_locked_and_grabs_ground() {
        let config = RtsConfig {
            drag_friction: 0.0,
            ..Default::default()
        };
        let mut drag = DragPan::default();
        let input = RigInput {
            right: ButtonState::HELD,
            pointer_delta: Vec2::new(10.0, 4.0),
            ..Default::default()
        };
        let displacement = drag.update(&input, &frame(), &config, DT);

        // Only the dominant x axis survives, and the pivot moves against it
        assert_eq!(drag.velocity(), Vec3::new(-50.0, 0.0, 0.0));
        assert!((displacement - Vec3::new(-50.0 * DT, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_drag_inertia_decays_and_release_zeroes() {
        let config = RtsConfig {
            drag_friction: 10.0,
            ..Default::default()
        };
        let mut drag = DragPan::default();
        let moving = RigInput {
            right: ButtonState::HELD,
            pointer_delta: Vec2::new(0.0, 10.0),
            ..Default::default()
        };
        drag.update(&moving, &frame(), &config, DT);
        let after_move = drag.velocity().length();
        assert!(after_move > 0.0);

        let still = RigInput {
            right: ButtonState::HELD,
            ..Default::default()
        };
        let displacement = drag.update(&still, &frame(), &config, DT);
        assert!(displacement.length() > 0.0);
        assert!(drag.velocity().length() < after_move);

        let released = drag.update(&RigInput::default(), &frame(), &config, DT);
        assert_eq!(released, Vec3::ZERO);
        assert_eq!(drag.velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_drag_adds_to_direction() {
        let input = RigInput {
            right: ButtonState::HELD,
            move_axis: Vec2::new(0.0, 1.0),
            pointer_delta: Vec2::new(0.0, 5.0),
            ..Default::default()
        };
        let intent = resolve_default(&input);
        assert_eq!(intent.direction, Vec3::NEG_Z);
        assert!(intent.drag_displacement.z < 0.0);
    }
}
