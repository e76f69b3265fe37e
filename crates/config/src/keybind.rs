//! Physical key and chord binding parsing.
//!
//! Responsibilities:
//! - Parse human-readable physical key tokens ("KeyJ", "j", "Digit1", "F5").
//! - Parse binding lists like `J=translate-japanese,C=translate-chinese`.
//! - Validate binding sets (one action per physical key).
//!
//! Does NOT handle:
//! - Translating terminal or platform key events (that's in the CLI crate).
//! - Runtime chord recognition (see the core crate).
//!
//! Invariants:
//! - Physical keys identify a keyboard position, so letter tokens are
//!   case-insensitive: `j`, `J` and `KeyJ` are the same key.
//! - A validated binding set never maps one physical key to two actions.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::types::ActionId;

/// Errors that can occur when parsing or validating bindings.
#[derive(Debug, Error, PartialEq)]
pub enum KeybindError {
    /// Invalid binding syntax
    #[error("Invalid binding syntax: '{spec}'. Expected format like 'J=translate-japanese'")]
    InvalidSyntax {
        /// The invalid binding string
        spec: String,
    },

    /// Unknown physical key name
    #[error("Unknown physical key: '{name}'. Expected a letter, digit, F1-F12, 'Space', or a code like 'KeyJ'")]
    UnknownKey {
        /// The unknown key name
        name: String,
    },

    /// Unknown action identifier
    #[error("Unknown action: '{name}'")]
    UnknownAction {
        /// The unknown action name
        name: String,
    },

    /// Two bindings share a physical key
    #[error("Conflicting bindings: '{key}' is assigned to both {action1} and {action2}")]
    Conflict {
        /// The conflicting key
        key: String,
        /// First action using this key
        action1: String,
        /// Second action using this key
        action2: String,
    },
}

/// A keyboard position, independent of layout and input language.
///
/// Displayed in the `KeyboardEvent.code` style (`KeyJ`, `Digit1`, `F5`, `Space`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PhysicalKey {
    /// Letter key position, always stored uppercase ('A'..='Z').
    Letter(char),
    /// Digit row key (0-9).
    Digit(u8),
    /// Function key F1-F12.
    F(u8),
    /// Space bar.
    Space,
}

impl PhysicalKey {
    /// Letter key at the given position, if `c` is an ASCII letter.
    pub fn letter(c: char) -> Option<Self> {
        c.is_ascii_alphabetic()
            .then(|| Self::Letter(c.to_ascii_uppercase()))
    }

    /// Short label used in user-facing hints ("JJ", "CC").
    pub fn label(&self) -> String {
        match self {
            Self::Letter(c) => c.to_string(),
            Self::Digit(d) => d.to_string(),
            Self::F(n) => format!("F{}", n),
            Self::Space => "Space".to_string(),
        }
    }
}

impl fmt::Display for PhysicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Letter(c) => write!(f, "Key{}", c),
            Self::Digit(d) => write!(f, "Digit{}", d),
            Self::F(n) => write!(f, "F{}", n),
            Self::Space => write!(f, "Space"),
        }
    }
}

impl FromStr for PhysicalKey {
    type Err = KeybindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_physical_key(s)
    }
}

impl Serialize for PhysicalKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PhysicalKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_physical_key(&s).map_err(serde::de::Error::custom)
    }
}

/// Parse a physical key token.
///
/// # Examples
///
/// ```
/// use selchord_config::keybind::{parse_physical_key, PhysicalKey};
///
/// assert_eq!(parse_physical_key("KeyJ").unwrap(), PhysicalKey::Letter('J'));
/// assert_eq!(parse_physical_key("j").unwrap(), PhysicalKey::Letter('J'));
/// assert_eq!(parse_physical_key("Digit1").unwrap(), PhysicalKey::Digit(1));
/// ```
pub fn parse_physical_key(token: &str) -> Result<PhysicalKey, KeybindError> {
    let token = token.trim();
    let unknown = || KeybindError::UnknownKey {
        name: token.to_string(),
    };

    let chars: Vec<char> = token.chars().collect();
    if chars.len() == 1 {
        let c = chars[0];
        if let Some(key) = PhysicalKey::letter(c) {
            return Ok(key);
        }
        if let Some(d) = c.to_digit(10) {
            return Ok(PhysicalKey::Digit(d as u8));
        }
        return Err(unknown());
    }

    let lower = token.to_ascii_lowercase();
    if lower == "space" {
        return Ok(PhysicalKey::Space);
    }

    if let Some(rest) = lower.strip_prefix("key") {
        let mut rest_chars = rest.chars();
        if let (Some(c), None) = (rest_chars.next(), rest_chars.next()) {
            return PhysicalKey::letter(c).ok_or_else(unknown);
        }
        return Err(unknown());
    }

    if let Some(rest) = lower.strip_prefix("digit")
        && let Ok(d) = rest.parse::<u8>()
        && d <= 9
    {
        return Ok(PhysicalKey::Digit(d));
    }

    if let Some(rest) = lower.strip_prefix('f')
        && let Ok(n) = rest.parse::<u8>()
        && (1..=12).contains(&n)
    {
        return Ok(PhysicalKey::F(n));
    }

    Err(unknown())
}

/// One `KEY=action` entry from a binding list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingSpec {
    /// The physical key that must be double-pressed.
    pub key: PhysicalKey,
    /// The action the chord triggers.
    pub action: ActionId,
}

impl fmt::Display for BindingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key.label(), self.action)
    }
}

/// Parse a comma-separated binding list like `J=translate-japanese,C=translate-chinese`.
///
/// The result is validated with [`validate_bindings`].
pub fn parse_bindings(list: &str) -> Result<Vec<BindingSpec>, KeybindError> {
    let mut specs = Vec::new();

    for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (key, action) = entry
            .split_once('=')
            .ok_or_else(|| KeybindError::InvalidSyntax {
                spec: entry.to_string(),
            })?;

        let key = parse_physical_key(key)?;
        let action = action.trim();
        let action = ActionId::from_str(action).map_err(|_| KeybindError::UnknownAction {
            name: action.to_string(),
        })?;

        specs.push(BindingSpec { key, action });
    }

    if specs.is_empty() {
        return Err(KeybindError::InvalidSyntax {
            spec: list.to_string(),
        });
    }

    validate_bindings(&specs)?;
    Ok(specs)
}

/// Check that no physical key is bound twice.
pub fn validate_bindings(specs: &[BindingSpec]) -> Result<(), KeybindError> {
    let mut key_to_action: HashMap<PhysicalKey, ActionId> = HashMap::new();

    for spec in specs {
        if let Some(existing) = key_to_action.get(&spec.key) {
            return Err(KeybindError::Conflict {
                key: spec.key.to_string(),
                action1: existing.to_string(),
                action2: spec.action.to_string(),
            });
        }
        key_to_action.insert(spec.key, spec.action);
    }

    Ok(())
}
