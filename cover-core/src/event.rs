//! Input events consumed by the interaction controller.

use serde::{Deserialize, Serialize};

/// A pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Screen X in view pixels.
    pub x: f32,
    /// Screen Y in view pixels.
    pub y: f32,
    /// Whether shift was held, extending the selection on click.
    pub shift: bool,
}

impl PointerEvent {
    /// Create a pointer event without modifiers.
    #[must_use]
    pub fn at(x: f32, y: f32) -> Self {
        Self { x, y, shift: false }
    }

    /// Mark shift as held.
    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct KeyModifiers {
    /// Shift key pressed.
    pub shift: bool,
    /// Control key pressed.
    pub ctrl: bool,
    /// Alt/Option key pressed.
    pub alt: bool,
    /// Meta/Command key pressed.
    pub meta: bool,
}

impl KeyModifiers {
    /// The platform command chord: Control on most systems, Command on mac.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }

    /// Modifiers with only the command chord active.
    #[must_use]
    pub fn cmd() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }

    /// Modifiers with command and shift active.
    #[must_use]
    pub fn cmd_shift() -> Self {
        Self {
            ctrl: true,
            shift: true,
            ..Self::default()
        }
    }
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    /// Delete key.
    Delete,
    /// Backspace key, treated like Delete.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Escape,
    /// A character key, lowercased.
    Char(char),
}
