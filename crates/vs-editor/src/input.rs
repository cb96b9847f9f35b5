//! Input abstraction layer.
//!
//! Normalizes host pointer and keyboard events into a unified
//! `InputEvent` consumed by the editor session.

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed. `shift` makes the click additive.
    PointerDown { x: f64, y: f64, shift: bool },

    /// Pointer moved.
    PointerMove { x: f64, y: f64 },

    /// Pointer released.
    PointerUp { x: f64, y: f64 },

    /// Keyboard shortcut.
    Key {
        key: String,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    },
}

impl InputEvent {
    pub fn from_key(key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> Self {
        Self::Key {
            key: key.to_string(),
            ctrl,
            shift,
            alt,
            meta,
        }
    }
}
