//! Key press events delivered by hosts.

use std::time::Instant;

use selchord_config::PhysicalKey;

/// Modifier flags held during a key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        meta: false,
        alt: false,
        shift: false,
    };

    /// True when a command modifier (ctrl, meta or alt) is held.
    ///
    /// Shift is not a command modifier; a shifted letter still counts as a press.
    pub fn has_command(&self) -> bool {
        self.ctrl || self.meta || self.alt
    }
}

/// A single physical key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: PhysicalKey,
    pub modifiers: Modifiers,
    pub at: Instant,
}

impl KeyPress {
    /// Unmodified press of `key` at `at`.
    pub fn new(key: PhysicalKey, at: Instant) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
            at,
        }
    }

    /// Replace the modifier flags.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
