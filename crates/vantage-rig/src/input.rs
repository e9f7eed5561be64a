//! Input sampling for the camera rigs
//!
//! Raw window events are folded into an [`InputHandler`], which produces one
//! immutable [`RigInput`] snapshot per tick. Rigs only ever see snapshots, so a
//! recorded sequence of snapshots replays deterministically.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Camera actions that can be triggered by keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Pan forward (W by default)
    MoveForward,
    /// Pan backward (S by default)
    MoveBackward,
    /// Pan left (A by default)
    MoveLeft,
    /// Pan right (D by default)
    MoveRight,
    /// Turn left (Q by default)
    RotateLeft,
    /// Turn right (E by default)
    RotateRight,
    /// Tilt towards the horizon (R by default)
    PitchUp,
    /// Tilt towards the ground (F by default)
    PitchDown,
    /// Step the zoom in (Page Up by default)
    ZoomIn,
    /// Step the zoom out (Page Down by default)
    ZoomOut,
}

/// State of a single button for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Button is down
    pub held: bool,
    /// Button went down during this tick
    pub pressed_this_frame: bool,
}

impl ButtonState {
    /// Button held since an earlier tick
    pub const HELD: ButtonState = ButtonState {
        held: true,
        pressed_this_frame: false,
    };

    /// Button went down this tick
    pub const PRESSED: ButtonState = ButtonState {
        held: true,
        pressed_this_frame: true,
    };
}

/// Everything a rig reads from the input devices during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RigInput {
    /// Left pointer button
    pub left: ButtonState,
    /// Right pointer button
    pub right: ButtonState,
    /// Middle pointer button
    pub middle: ButtonState,
    /// Pointer position in pixels, origin at the top-left corner
    pub pointer_position: Vec2,
    /// Pointer movement this tick in pixels (+y is down)
    pub pointer_delta: Vec2,
    /// Window size in pixels
    pub screen_size: Vec2,
    /// Directional movement (x = right, y = forward)
    pub move_axis: Vec2,
    /// Directional look / orbit (x = turn right, y = tilt down)
    pub look_axis: Vec2,
    /// Scroll this tick (positive pulls the camera out)
    pub scroll: f32,
}

impl RigInput {
    /// Whether any pointer button is held
    pub fn any_button_held(&self) -> bool {
        self.left.held || self.right.held || self.middle.held
    }

    /// Whether directional movement is requested
    pub fn has_move_input(&self) -> bool {
        self.move_axis.length_squared() > 0.0
    }
}

/// Maps physical keys to camera actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    /// Key to action mappings
    bindings: HashMap<KeyCode, InputAction>,
    /// Reverse lookup: action to all keys
    reverse: HashMap<InputAction, Vec<KeyCode>>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
            reverse: HashMap::new(),
        };

        // Default WASD bindings
        bindings.bind(KeyCode::KeyW, InputAction::MoveForward);
        bindings.bind(KeyCode::KeyS, InputAction::MoveBackward);
        bindings.bind(KeyCode::KeyA, InputAction::MoveLeft);
        bindings.bind(KeyCode::KeyD, InputAction::MoveRight);

        // Arrow keys as alternative
        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);
        bindings.bind(KeyCode::ArrowDown, InputAction::MoveBackward);
        bindings.bind(KeyCode::ArrowLeft, InputAction::MoveLeft);
        bindings.bind(KeyCode::ArrowRight, InputAction::MoveRight);

        // Orientation
        bindings.bind(KeyCode::KeyQ, InputAction::RotateLeft);
        bindings.bind(KeyCode::KeyE, InputAction::RotateRight);
        bindings.bind(KeyCode::KeyR, InputAction::PitchUp);
        bindings.bind(KeyCode::KeyF, InputAction::PitchDown);

        // Zoom
        bindings.bind(KeyCode::PageUp, InputAction::ZoomIn);
        bindings.bind(KeyCode::PageDown, InputAction::ZoomOut);

        bindings
    }
}

impl InputBindings {
    /// Create new input bindings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key to an action, replacing any previous binding of that key
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.unbind(key);
        self.bindings.insert(key, action);
        self.reverse.entry(action).or_default().push(key);
    }

    /// Unbind a key
    pub fn unbind(&mut self, key: KeyCode) {
        if let Some(action) = self.bindings.remove(&key) {
            if let Some(keys) = self.reverse.get_mut(&action) {
                keys.retain(|k| *k != key);
            }
        }
    }

    /// Get the action for a key, if any
    pub fn get_action(&self, key: KeyCode) -> Option<InputAction> {
        self.bindings.get(&key).copied()
    }

    /// All keys bound to an action
    pub fn keys_for(&self, action: InputAction) -> &[KeyCode] {
        self.reverse.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Folds raw window events into per-tick snapshots
#[derive(Debug)]
pub struct InputHandler {
    /// Input bindings
    pub bindings: InputBindings,
    /// Pointer delta multiplier
    pub mouse_sensitivity: f32,
    /// Invert the vertical pointer delta
    pub invert_y: bool,
    /// Actions currently held down
    held: HashSet<InputAction>,
    /// Snapshot under construction for the current tick
    frame: RigInput,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Create a new input handler with default bindings
    pub fn new() -> Self {
        Self {
            bindings: InputBindings::default(),
            mouse_sensitivity: 1.0,
            invert_y: false,
            held: HashSet::new(),
            frame: RigInput::default(),
        }
    }

    /// Handle a keyboard event
    pub fn handle_keyboard(&mut self, physical_key: PhysicalKey, element_state: ElementState) {
        let PhysicalKey::Code(key_code) = physical_key else {
            return;
        };
        let Some(action) = self.bindings.get_action(key_code) else {
            return;
        };

        match element_state {
            ElementState::Pressed => {
                let newly_pressed = self.held.insert(action);
                if newly_pressed {
                    match action {
                        InputAction::ZoomIn => self.frame.scroll -= 1.0,
                        InputAction::ZoomOut => self.frame.scroll += 1.0,
                        _ => {}
                    }
                }
            }
            ElementState::Released => {
                self.held.remove(&action);
            }
        }
    }

    /// Handle a mouse button event
    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let slot = match button {
            MouseButton::Left => &mut self.frame.left,
            MouseButton::Right => &mut self.frame.right,
            MouseButton::Middle => &mut self.frame.middle,
            _ => return,
        };

        match state {
            ElementState::Pressed => {
                if !slot.held {
                    slot.pressed_this_frame = true;
                }
                slot.held = true;
            }
            ElementState::Released => {
                slot.held = false;
            }
        }
    }

    /// Handle the cursor moving inside the window
    pub fn handle_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.frame.pointer_position = Vec2::new(position.x as f32, position.y as f32);
    }

    /// Handle raw mouse movement
    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) {
        let y_mult = if self.invert_y { -1.0 } else { 1.0 };
        self.frame.pointer_delta += Vec2::new(
            delta.0 as f32 * self.mouse_sensitivity,
            delta.1 as f32 * self.mouse_sensitivity * y_mult,
        );
    }

    /// Handle scroll wheel
    pub fn handle_scroll(&mut self, delta: MouseScrollDelta) {
        let scroll = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 120.0,
        };

        self.frame.scroll += scroll;
    }

    /// Handle the window being resized
    pub fn handle_resize(&mut self, size: PhysicalSize<u32>) {
        self.frame.screen_size = Vec2::new(size.width as f32, size.height as f32);
    }

    /// Check if an action is currently held
    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    /// Snapshot of everything gathered for the current tick
    pub fn snapshot(&self) -> RigInput {
        let axis = |positive: InputAction, negative: InputAction| {
            let mut value = 0.0;
            if self.is_held(positive) {
                value += 1.0;
            }
            if self.is_held(negative) {
                value -= 1.0;
            }
            value
        };

        RigInput {
            move_axis: Vec2::new(
                axis(InputAction::MoveRight, InputAction::MoveLeft),
                axis(InputAction::MoveForward, InputAction::MoveBackward),
            ),
            look_axis: Vec2::new(
                axis(InputAction::RotateRight, InputAction::RotateLeft),
                axis(InputAction::PitchDown, InputAction::PitchUp),
            ),
            ..self.frame
        }
    }

    /// Clear per-tick data (call after the rigs have consumed the snapshot)
    pub fn end_frame(&mut self) {
        self.frame.pointer_delta = Vec2::ZERO;
        self.frame.scroll = 0.0;
        self.frame.left.pressed_this_frame = false;
        self.frame.right.pressed_this_frame = false;
        self.frame.middle.pressed_this_frame = false;
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = InputBindings::default();
        assert_eq!(
            bindings.get_action(KeyCode::KeyW),
            Some(InputAction::MoveForward)
        );
        assert_eq!(
            bindings.keys_for(InputAction::MoveLeft),
            &[KeyCode::KeyA, KeyCode::ArrowLeft]
        );
    }

    #[test]
    fn test_rebind_replaces() {
        let mut bindings = InputBindings::default();
        bindings.bind(KeyCode::KeyW, InputAction::ZoomIn);
        assert_eq!(bindings.get_action(KeyCode::KeyW), Some(InputAction::ZoomIn));
        assert_eq!(
            bindings.keys_for(InputAction::MoveForward),
            &[KeyCode::ArrowUp]
        );

        bindings.unbind(KeyCode::KeyW);
        assert_eq!(bindings.get_action(KeyCode::KeyW), None);
    }

    #[test]
    fn test_move_axis_from_keys() {
        let mut handler = InputHandler::new();
        handler.handle_keyboard(PhysicalKey::Code(KeyCode::KeyW), ElementState::Pressed);
        handler.handle_keyboard(PhysicalKey::Code(KeyCode::KeyD), ElementState::Pressed);
        assert_eq!(handler.snapshot().move_axis, Vec2::new(1.0, 1.0));

        // Opposing keys cancel
        handler.handle_keyboard(PhysicalKey::Code(KeyCode::KeyA), ElementState::Pressed);
        assert_eq!(handler.snapshot().move_axis, Vec2::new(0.0, 1.0));

        handler.handle_keyboard(PhysicalKey::Code(KeyCode::KeyW), ElementState::Released);
        assert_eq!(handler.snapshot().move_axis, Vec2::ZERO);
    }

    #[test]
    fn test_button_edges() {
        let mut handler = InputHandler::new();
        handler.handle_mouse_button(MouseButton::Right, ElementState::Pressed);
        assert_eq!(handler.snapshot().right, ButtonState::PRESSED);

        handler.end_frame();
        assert_eq!(handler.snapshot().right, ButtonState::HELD);

        // Repeated press events while held are not new edges
        handler.handle_mouse_button(MouseButton::Right, ElementState::Pressed);
        assert_eq!(handler.snapshot().right, ButtonState::HELD);

        handler.handle_mouse_button(MouseButton::Right, ElementState::Released);
        assert_eq!(handler.snapshot().right, ButtonState::default());
    }

    #[test]
    fn test_frame_deltas_cleared() {
        let mut handler = InputHandler::new();
        handler.handle_mouse_motion((3.0, 4.0));
        handler.handle_mouse_motion((1.0, -1.0));
        handler.handle_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        handler.handle_cursor_moved(PhysicalPosition::new(10.0, 20.0));

        let input = handler.snapshot();
        assert_eq!(input.pointer_delta, Vec2::new(4.0, 3.0));
        assert_eq!(input.scroll, 1.0);

        handler.end_frame();
        let input = handler.snapshot();
        assert_eq!(input.pointer_delta, Vec2::ZERO);
        assert_eq!(input.scroll, 0.0);
        assert_eq!(input.pointer_position, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_zoom_keys_step_once() {
        let mut handler = InputHandler::new();
        handler.handle_keyboard(PhysicalKey::Code(KeyCode::PageDown), ElementState::Pressed);
        handler.handle_keyboard(PhysicalKey::Code(KeyCode::PageDown), ElementState::Pressed);
        assert_eq!(handler.snapshot().scroll, 1.0);
    }

    #[test]
    fn test_invert_y_and_pixel_scroll() {
        let mut handler = InputHandler::new();
        handler.invert_y = true;
        handler.handle_mouse_motion((0.0, 2.0));
        handler.handle_scroll(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -240.0)));

        let input = handler.snapshot();
        assert_eq!(input.pointer_delta, Vec2::new(0.0, -2.0));
        assert_eq!(input.scroll, -2.0);
    }
}
