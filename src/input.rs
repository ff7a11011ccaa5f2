//! Keyboard and mouse state sampled once per frame.
//!
//! Window and device events are folded into [`InputState`] as they arrive.
//! Press transitions are recorded at event time, so a key that goes down and
//! up again between two redraws still reports [`InputState::pressed`] once.
//! [`InputState::end_frame`] forgets them after the game logic ran.

use std::collections::HashSet;

use winit::{
    event::{DeviceEvent, ElementState, MouseButton, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// A physical input that can be held down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Key(KeyCode),
    Mouse(MouseButton),
}

impl From<KeyCode> for Button {
    fn from(key: KeyCode) -> Self {
        Button::Key(key)
    }
}

impl From<MouseButton> for Button {
    fn from(button: MouseButton) -> Self {
        Button::Mouse(button)
    }
}

#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Button>,
    /// Up-to-down transitions seen since the last `end_frame`.
    pressed_this_frame: HashSet<Button>,
    /// Unbounded virtual cursor built from raw mouse motion, so mouse look
    /// keeps working while the OS cursor is grabbed.
    cursor: (f64, f64),
    cursor_seen: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.set(Button::Key(key), event.state == ElementState::Pressed);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.set(Button::Mouse(*button), *state == ElementState::Pressed);
            }
            // Releases that happen while unfocused never reach us.
            WindowEvent::Focused(false) => self.held.clear(),
            _ => {}
        }
    }

    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.move_cursor(*dx, *dy);
        }
    }

    /// Key repeat does not count as a new press.
    pub fn press(&mut self, button: impl Into<Button>) {
        let button = button.into();
        if self.held.insert(button) {
            self.pressed_this_frame.insert(button);
        }
    }

    pub fn release(&mut self, button: impl Into<Button>) {
        self.held.remove(&button.into());
    }

    fn set(&mut self, button: Button, down: bool) {
        if down {
            self.press(button);
        } else {
            self.release(button);
        }
    }

    pub fn move_cursor(&mut self, dx: f64, dy: f64) {
        self.cursor.0 += dx;
        self.cursor.1 += dy;
        self.cursor_seen = true;
    }

    /// Current virtual cursor position, `None` until the mouse has moved once.
    pub fn cursor(&self) -> Option<(f64, f64)> {
        self.cursor_seen.then_some(self.cursor)
    }

    /// Level query: the button is held right now.
    pub fn is_down(&self, button: impl Into<Button>) -> bool {
        self.held.contains(&button.into())
    }

    /// Edge query: went down since the previous frame, even if already released.
    pub fn pressed(&self, button: impl Into<Button>) -> bool {
        self.pressed_this_frame.contains(&button.into())
    }

    pub fn any_pressed(&self, buttons: &[Button]) -> bool {
        buttons.iter().any(|b| self.pressed(*b))
    }

    /// Call once after all game logic for the frame ran.
    pub fn end_frame(&mut self) {
        self.pressed_this_frame.clear();
    }
}
