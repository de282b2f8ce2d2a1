//! Keyboard sampling
//!
//! Raw key events flip entries in a map; the simulation reads it once per
//! frame. Entries never expire, so a key whose release was missed stays held.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Which keys are currently held, keyed by `KeyboardEvent.key`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyState {
    keys: HashMap<String, bool>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Any identifier is accepted.
    pub fn key_down(&mut self, key: &str) {
        self.set(key, true);
    }

    /// Record a key release
    pub fn key_up(&mut self, key: &str) {
        self.set(key, false);
    }

    fn set(&mut self, key: &str, held: bool) {
        match self.keys.get_mut(key) {
            Some(entry) => *entry = held,
            None => {
                self.keys.insert(key.to_string(), held);
            }
        }
    }

    /// True if the key was pressed and not released since
    pub fn is_held(&self, key: &str) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    /// Number of keys ever seen (held or not)
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
