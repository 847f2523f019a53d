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

//! Defines the application event model: event types, payloads and input descriptors.

use std::any::Any;
use std::fmt;
use std::ops::Add;
use std::sync::Arc;

/// Identifies the category of an [`Event`].
///
/// The built-in types cover keyboard, mouse and window input. Applications derive
/// their own types by offsetting from [`EventType::USER_EVENT`]:
///
/// ```
/// use ember_core::EventType;
///
/// const SPAWN_ENEMY: EventType = EventType::user(0);
/// const LEVEL_CLEARED: EventType = EventType::user(1);
///
/// assert_eq!(EventType::USER_EVENT + 1, LEVEL_CLEARED);
/// assert_ne!(SPAWN_ENEMY, LEVEL_CLEARED);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct EventType(u32);

impl EventType {
    /// The reserved "no event" sentinel. Never posted, returned by an empty poll.
    pub const NO_EVENT: Self = Self(0);
    /// A keyboard key was pressed.
    pub const KEY_DOWN: Self = Self(1);
    /// A keyboard key was released.
    pub const KEY_UP: Self = Self(2);
    /// A mouse button was pressed.
    pub const MOUSE_BUTTON_DOWN: Self = Self(3);
    /// A mouse button was released.
    pub const MOUSE_BUTTON_UP: Self = Self(4);
    /// The mouse cursor moved.
    pub const MOUSE_MOTION: Self = Self(5);
    /// The mouse wheel was scrolled.
    pub const MOUSE_WHEEL: Self = Self(6);
    /// The window was resized.
    pub const WINDOW_RESIZE: Self = Self(7);
    /// The application was asked to quit.
    pub const QUIT: Self = Self(8);
    /// The first application-defined type. Custom types are `USER_EVENT + k`.
    pub const USER_EVENT: Self = Self(9);

    /// Creates an event type from its raw numeric value.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value of this type.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the application-defined type at `offset` from [`EventType::USER_EVENT`].
    pub const fn user(offset: u32) -> Self {
        Self(Self::USER_EVENT.0.saturating_add(offset))
    }

    /// Returns `true` for the [`EventType::NO_EVENT`] sentinel.
    pub const fn is_none(self) -> bool {
        self.0 == Self::NO_EVENT.0
    }

    /// Returns `true` if this is an application-defined type.
    pub const fn is_user(self) -> bool {
        self.0 >= Self::USER_EVENT.0
    }

    /// Returns the offset from [`EventType::USER_EVENT`] for application-defined types.
    pub const fn user_offset(self) -> Option<u32> {
        if self.is_user() {
            Some(self.0 - Self::USER_EVENT.0)
        } else {
            None
        }
    }
}

impl Add<u32> for EventType {
    type Output = Self;

    fn add(self, rhs: u32) -> Self::Output {
        Self(self.0.saturating_add(rhs))
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NO_EVENT => write!(f, "NoEvent"),
            Self::KEY_DOWN => write!(f, "KeyDown"),
            Self::KEY_UP => write!(f, "KeyUp"),
            Self::MOUSE_BUTTON_DOWN => write!(f, "MouseButtonDown"),
            Self::MOUSE_BUTTON_UP => write!(f, "MouseButtonUp"),
            Self::MOUSE_MOTION => write!(f, "MouseMotion"),
            Self::MOUSE_WHEEL => write!(f, "MouseWheel"),
            Self::WINDOW_RESIZE => write!(f, "WindowResize"),
            Self::QUIT => write!(f, "Quit"),
            Self::USER_EVENT => write!(f, "UserEvent"),
            other => write!(f, "UserEvent+{}", other.0 - Self::USER_EVENT.0),
        }
    }
}

/// The set of keyboard modifiers held while a key event occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    bits: u8,
}

impl Modifiers {
    /// No modifier held.
    pub const NONE: Self = Self { bits: 0 };
    /// Either shift key.
    pub const SHIFT: Self = Self { bits: 1 << 0 };
    /// Either control key.
    pub const CONTROL: Self = Self { bits: 1 << 1 };
    /// Either alt/option key.
    pub const ALT: Self = Self { bits: 1 << 2 };
    /// Either super/command/windows key.
    pub const SUPER: Self = Self { bits: 1 << 3 };

    /// Creates a modifier set from raw bits.
    pub const fn from_bits(bits: u8) -> Self {
        Self { bits }
    }

    /// Returns the raw bits.
    pub const fn bits(&self) -> u8 {
        self.bits
    }

    /// Combines two modifier sets.
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Checks if every modifier in `other` is held.
    pub const fn contains(&self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Checks if no modifier is held.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

/// A backend-agnostic mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// The left mouse button.
    Left,
    /// The right mouse button.
    Right,
    /// The middle mouse button.
    Middle,
    /// The back mouse button (typically on the side).
    Back,
    /// The forward mouse button (typically on the side).
    Forward,
    /// Another mouse button, identified by a numeric code.
    Other(u16),
}

impl MouseButton {
    /// Returns the conventional button index (0 = left, 1 = middle, 2 = right, ...).
    pub const fn index(self) -> u16 {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
            MouseButton::Back => 3,
            MouseButton::Forward => 4,
            MouseButton::Other(id) => id,
        }
    }
}

/// An opaque, type-erased value attached to an application-defined event.
///
/// Cloning is cheap (reference counted) and two payloads compare equal only if they
/// are the same allocation.
#[derive(Clone)]
pub struct UserPayload(Arc<dyn Any + Send + Sync>);

impl UserPayload {
    /// Wraps `value` into a payload.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Returns a reference to the inner value if it is of type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Returns `true` if the inner value is of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }
}

impl fmt::Debug for UserPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserPayload(..)")
    }
}

impl PartialEq for UserPayload {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// The payload of an [`Event`]. Its shape depends on the event's type.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EventData {
    /// No payload.
    #[default]
    None,
    /// A keyboard key and the modifiers held at the time.
    Key {
        /// A string representation of the physical key code.
        key_code: String,
        /// The modifiers held when the key changed state.
        modifiers: Modifiers,
    },
    /// A mouse button and the cursor position when it changed state.
    MouseButton {
        /// The x-coordinate of the cursor.
        x: f32,
        /// The y-coordinate of the cursor.
        y: f32,
        /// The button that changed state.
        button: MouseButton,
    },
    /// A new cursor position.
    MouseMotion {
        /// The new x-coordinate of the cursor.
        x: f32,
        /// The new y-coordinate of the cursor.
        y: f32,
    },
    /// A wheel scroll.
    MouseWheel {
        /// The horizontal scroll delta.
        delta_x: f32,
        /// The vertical scroll delta.
        delta_y: f32,
    },
    /// The new size of the window.
    Resize {
        /// The new width in physical pixels.
        width: u32,
        /// The new height in physical pixels.
        height: u32,
    },
    /// Application-defined data.
    User {
        /// A free-form numeric code.
        code: i64,
        /// An optional opaque value.
        payload: Option<UserPayload>,
    },
}

/// A single discrete occurrence: a type and its payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Event {
    /// The category of this event.
    pub kind: EventType,
    /// The payload, shaped by `kind`.
    pub data: EventData,
}

impl Event {
    /// Creates an event from a type and an arbitrary payload.
    pub fn new(kind: EventType, data: EventData) -> Self {
        Self { kind, data }
    }

    /// Returns the [`EventType::NO_EVENT`] sentinel.
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns `true` if this is the [`EventType::NO_EVENT`] sentinel.
    pub fn is_none(&self) -> bool {
        self.kind.is_none()
    }

    /// Creates a [`EventType::KEY_DOWN`] event.
    pub fn key_down(key_code: impl Into<String>, modifiers: Modifiers) -> Self {
        Self::new(
            EventType::KEY_DOWN,
            EventData::Key {
                key_code: key_code.into(),
                modifiers,
            },
        )
    }

    /// Creates a [`EventType::KEY_UP`] event.
    pub fn key_up(key_code: impl Into<String>, modifiers: Modifiers) -> Self {
        Self::new(
            EventType::KEY_UP,
            EventData::Key {
                key_code: key_code.into(),
                modifiers,
            },
        )
    }

    /// Creates a [`EventType::MOUSE_BUTTON_DOWN`] event.
    pub fn mouse_button_down(x: f32, y: f32, button: MouseButton) -> Self {
        Self::new(
            EventType::MOUSE_BUTTON_DOWN,
            EventData::MouseButton { x, y, button },
        )
    }

    /// Creates a [`EventType::MOUSE_BUTTON_UP`] event.
    pub fn mouse_button_up(x: f32, y: f32, button: MouseButton) -> Self {
        Self::new(
            EventType::MOUSE_BUTTON_UP,
            EventData::MouseButton { x, y, button },
        )
    }

    /// Creates a [`EventType::MOUSE_MOTION`] event.
    pub fn mouse_motion(x: f32, y: f32) -> Self {
        Self::new(EventType::MOUSE_MOTION, EventData::MouseMotion { x, y })
    }

    /// Creates a [`EventType::MOUSE_WHEEL`] event.
    pub fn mouse_wheel(delta_x: f32, delta_y: f32) -> Self {
        Self::new(
            EventType::MOUSE_WHEEL,
            EventData::MouseWheel { delta_x, delta_y },
        )
    }

    /// Creates a [`EventType::WINDOW_RESIZE`] event.
    pub fn window_resize(width: u32, height: u32) -> Self {
        Self::new(EventType::WINDOW_RESIZE, EventData::Resize { width, height })
    }

    /// Creates a [`EventType::QUIT`] event.
    pub fn quit() -> Self {
        Self::new(EventType::QUIT, EventData::None)
    }

    /// Creates an application-defined event carrying a numeric code.
    pub fn user(kind: EventType, code: i64) -> Self {
        Self::new(
            kind,
            EventData::User {
                code,
                payload: None,
            },
        )
    }

    /// Creates an application-defined event carrying a numeric code and an opaque value.
    pub fn user_with_payload<T: Any + Send + Sync>(kind: EventType, code: i64, value: T) -> Self {
        Self::new(
            kind,
            EventData::User {
                code,
                payload: Some(UserPayload::new(value)),
            },
        )
    }

    /// Returns the numeric code of an application-defined event.
    pub fn user_code(&self) -> Option<i64> {
        match self.data {
            EventData::User { code, .. } => Some(code),
            _ => None,
        }
    }
}
