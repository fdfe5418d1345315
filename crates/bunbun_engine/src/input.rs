use std::collections::HashSet;

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::services::InputService;

/// Input state fed from window events.
///
/// Clicks are edge-triggered: a key counts as clicked from the event that
/// pressed it until [`end_frame`](KeyboardState::end_frame).
#[derive(Debug, Default)]
pub struct KeyboardState {
    pressed: HashSet<KeyCode>,
    clicked: HashSet<KeyCode>,
    buttons: HashSet<MouseButton>,
    mouse: [f32; 2],
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_event(&mut self, key: KeyCode, is_pressed: bool) {
        if is_pressed {
            // key repeat must not click again
            if self.pressed.insert(key) {
                self.clicked.insert(key);
            }
        } else {
            self.pressed.remove(&key);
        }
    }

    pub fn button_event(&mut self, button: MouseButton, is_pressed: bool) {
        if is_pressed {
            self.buttons.insert(button);
        } else {
            self.buttons.remove(&button);
        }
    }

    pub fn cursor_moved(&mut self, x: f32, y: f32) {
        self.mouse = [x, y];
    }

    pub fn end_frame(&mut self) {
        self.clicked.clear();
    }

    /// Forget everything, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.pressed.clear();
        self.clicked.clear();
        self.buttons.clear();
    }
}

impl InputService for KeyboardState {
    fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    fn is_key_clicked(&self, key: KeyCode) -> bool {
        self.clicked.contains(&key)
    }

    fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    fn mouse_position(&self) -> [f32; 2] {
        self.mouse
    }
}

pub fn mousebutton_to_str(button: MouseButton) -> Option<&'static str> {
    use winit::event::MouseButton::*;
    Some(match button {
        Left => "mouseleft",
        Right => "mouseright",
        Middle => "mousemiddle",
        _ => return None,
    })
}

/// Names of the keys the game binds, for trace output.
pub fn keycode_to_str(key: KeyCode) -> Option<&'static str> {
    use winit::keyboard::KeyCode::*;
    Some(match key {
        KeyW => "w",
        KeyA => "a",
        KeyS => "s",
        KeyD => "d",
        ArrowUp => "up",
        ArrowDown => "down",
        ArrowLeft => "left",
        ArrowRight => "right",
        Space => "space",
        Enter => "enter",
        Escape => "escape",
        Digit2 => "2",
        Digit3 => "3",
        _ => return None,
    })
}
