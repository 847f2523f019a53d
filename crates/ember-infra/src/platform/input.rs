// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provides translation from a concrete windowing backend (`winit`) to queue events.
//!
//! This module acts as an adapter layer, decoupling the rest of the engine from the
//! specific input event format of the `winit` crate. The translator is stateful: winit
//! reports modifier changes and cursor moves as separate events, while queue events
//! carry the modifier set on key events and the cursor position on button events.

use ember_core::event::{Event, EventQueue, Modifiers, MouseButton, QueueError};
use winit::event::{
    ElementState, Modifiers as WinitModifiers, MouseButton as WinitMouseButton,
    MouseScrollDelta, WindowEvent,
};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

/// Converts `winit` window events into [`Event`]s and posts them into an [`EventQueue`].
#[derive(Debug, Default)]
pub struct InputTranslator {
    modifiers: Modifiers,
    cursor_x: f32,
    cursor_y: f32,
}

impl InputTranslator {
    /// Creates a translator with no modifier held and the cursor at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the modifier set currently held.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Returns the last known cursor position.
    pub fn cursor_position(&self) -> (f32, f32) {
        (self.cursor_x, self.cursor_y)
    }

    /// Translates a `winit::event::WindowEvent` into an [`Event`].
    ///
    /// Modifier changes and cursor moves update the translator's state. Events that are
    /// not user input or window lifecycle (focus changes, redraws, ...) yield `None`.
    ///
    /// # Arguments
    ///
    /// * `event`: A reference to a `WindowEvent` from the `winit` library.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<Event> {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = map_modifiers(modifiers);
                None
            }
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => self.translate_key(key_event.physical_key, key_event.state, key_event.repeat),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_x = position.x as f32;
                self.cursor_y = position.y as f32;
                Some(Event::mouse_motion(self.cursor_x, self.cursor_y))
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = map_mouse_button(*button);
                Some(match state {
                    ElementState::Pressed => {
                        Event::mouse_button_down(self.cursor_x, self.cursor_y, button)
                    }
                    ElementState::Released => {
                        Event::mouse_button_up(self.cursor_x, self.cursor_y, button)
                    }
                })
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let (dx, dy): (f32, f32) = match delta {
                    MouseScrollDelta::LineDelta(x, y) => (*x, *y),
                    MouseScrollDelta::PixelDelta(pos) => (pos.x as f32, pos.y as f32),
                };
                if dx != 0.0 || dy != 0.0 {
                    Some(Event::mouse_wheel(dx, dy))
                } else {
                    None
                }
            }
            WindowEvent::Resized(size) => Some(Event::window_resize(size.width, size.height)),
            WindowEvent::CloseRequested => Some(Event::quit()),
            _ => None,
        }
    }

    /// Translates `event` and posts the result into `queue`.
    ///
    /// Returns `Ok(true)` if an event was queued and `Ok(false)` if `event` had no
    /// queue counterpart. A full queue is logged and reported; the event is dropped.
    pub fn forward(&mut self, event: &WindowEvent, queue: &EventQueue) -> Result<bool, QueueError> {
        let Some(translated) = self.translate(event) else {
            return Ok(false);
        };

        log::trace!("Input event: {:?}", translated);
        match queue.post(translated) {
            Ok(()) => Ok(true),
            Err(e) => {
                log::warn!("Dropping input event: {e}");
                Err(e)
            }
        }
    }

    /// (Internal) Builds a key event from the parts of a `winit::event::KeyEvent`.
    fn translate_key(
        &self,
        physical_key: PhysicalKey,
        state: ElementState,
        repeat: bool,
    ) -> Option<Event> {
        let PhysicalKey::Code(keycode) = physical_key else {
            return None;
        };
        let key_code = map_keycode_to_string(keycode);
        match state {
            ElementState::Pressed if !repeat => Some(Event::key_down(key_code, self.modifiers)),
            ElementState::Released => Some(Event::key_up(key_code, self.modifiers)),
            _ => None,
        }
    }
}

// --- Private Helper Functions ---

/// (Internal) Maps a `winit::keyboard::KeyCode` to a string representation.
fn map_keycode_to_string(keycode: KeyCode) -> String {
    format!("{keycode:?}")
}

/// (Internal) Maps a `winit::event::MouseButton` to the engine's `MouseButton` enum.
fn map_mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(id) => MouseButton::Other(id),
    }
}

/// (Internal) Maps winit's modifier state to the engine's `Modifiers` set.
fn map_modifiers(modifiers: &WinitModifiers) -> Modifiers {
    let state: ModifiersState = modifiers.state();
    let mut mapped = Modifiers::NONE;
    if state.shift_key() {
        mapped |= Modifiers::SHIFT;
    }
    if state.control_key() {
        mapped |= Modifiers::CONTROL;
    }
    if state.alt_key() {
        mapped |= Modifiers::ALT;
    }
    if state.super_key() {
        mapped |= Modifiers::SUPER;
    }
    mapped
}
