//! Validated key → action bindings for one detector.

use std::collections::BTreeMap;

use selchord_config::{ActionId, BindingSpec, PhysicalKey};
use thiserror::Error;

use crate::dispatch::HandlerRegistry;

/// Errors raised while assembling a detector's bindings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindingError {
    #[error("physical key {key} is bound more than once")]
    DuplicateKey { key: PhysicalKey },

    #[error("no handler registered for action '{action}'")]
    MissingHandler { action: ActionId },

    #[error("at least one binding is required")]
    Empty,
}

/// Unique key → action map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings {
    map: BTreeMap<PhysicalKey, ActionId>,
}

impl Bindings {
    /// Build from specs, rejecting duplicate keys.
    pub fn new(specs: impl IntoIterator<Item = BindingSpec>) -> Result<Self, BindingError> {
        let mut map = BTreeMap::new();
        for spec in specs {
            if map.insert(spec.key, spec.action).is_some() {
                return Err(BindingError::DuplicateKey { key: spec.key });
            }
        }
        if map.is_empty() {
            return Err(BindingError::Empty);
        }
        Ok(Self { map })
    }

    pub fn action_for(&self, key: PhysicalKey) -> Option<ActionId> {
        self.map.get(&key).copied()
    }

    pub fn contains(&self, key: PhysicalKey) -> bool {
        self.map.contains_key(&key)
    }

    /// Bound keys in key order.
    pub fn keys(&self) -> impl Iterator<Item = PhysicalKey> + '_ {
        self.map.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = BindingSpec> + '_ {
        self.map
            .iter()
            .map(|(&key, &action)| BindingSpec { key, action })
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Check that every bound action has a handler.
    pub fn ensure_handlers(&self, registry: &HandlerRegistry) -> Result<(), BindingError> {
        match self.map.values().find(|action| !registry.contains(**action)) {
            Some(&action) => Err(BindingError::MissingHandler { action }),
            None => Ok(()),
        }
    }
}
