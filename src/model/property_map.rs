//! PropertyStore — the key-value store behind every model instance.
//!
//! ## Change tracking
//!
//! Each entry remembers whether it was written after the store finished
//! initializing. Decoders flip `initialization_completed` off while they
//! assign wire fields and back on afterwards, so a freshly decoded model
//! reports no changes and every later setter call marks its key dirty.
//! With `return_only_changed_values` enabled, reads see only dirty
//! entries; serializing in that mode yields a minimal update payload.

use std::collections::HashMap;

use super::{FromValue, Model, Value};
use crate::{Error, Result};

/// Reserved store key holding unrecognized wire fields.
pub const ADDITIONAL_DATA_KEY: &str = "additionalData";

/// Unrecognized wire fields, kept verbatim for round-tripping.
pub type AdditionalData = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone)]
struct StoreEntry {
    value: Value,
    dirty: bool,
}

/// A map of property names to values, with change tracking.
#[derive(Debug, Clone)]
pub struct PropertyStore {
    values: HashMap<String, StoreEntry>,
    initialization_completed: bool,
    return_only_changed_values: bool,
}

impl Default for PropertyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyStore {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            initialization_completed: true,
            return_only_changed_values: false,
        }
    }

    // ========================================================================
    // Core contract
    // ========================================================================

    /// Look up a key. Never-set keys and keys holding `Null` both read as `None`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let entry = self.values.get(key)?;
        if self.return_only_changed_values && !entry.dirty {
            return None;
        }
        if entry.value.is_null() {
            return None;
        }
        Some(&entry.value)
    }

    /// Write a key. Fails only when the store cannot accept the key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        let key = key.into();
        if key.is_empty() {
            return Err(Error::StoreFault("property key cannot be empty".into()));
        }
        let entry = StoreEntry {
            value: value.into(),
            dirty: self.initialization_completed,
        };
        self.values.insert(key, entry);
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key).map(|entry| entry.value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of visible (non-null) entries.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visible entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().filter_map(|(key, entry)| {
            if self.return_only_changed_values && !entry.dirty {
                return None;
            }
            if entry.value.is_null() {
                return None;
            }
            Some((key.as_str(), &entry.value))
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(key, _)| key)
    }

    // ========================================================================
    // Change tracking
    // ========================================================================

    pub fn is_initialization_completed(&self) -> bool {
        self.initialization_completed
    }

    /// Completing initialization marks every current entry clean.
    pub fn set_initialization_completed(&mut self, completed: bool) {
        self.initialization_completed = completed;
        if completed {
            for entry in self.values.values_mut() {
                entry.dirty = false;
            }
        }
    }

    pub fn return_only_changed_values(&self) -> bool {
        self.return_only_changed_values
    }

    pub fn set_return_only_changed_values(&mut self, only_changed: bool) {
        self.return_only_changed_values = only_changed;
    }

    /// Keys written since initialization completed (including keys set to null).
    pub fn changed_keys(&self) -> impl Iterator<Item = &str> {
        self.values
            .iter()
            .filter(|(_, entry)| entry.dirty)
            .map(|(key, _)| key.as_str())
    }

    // ========================================================================
    // Typed access
    // ========================================================================

    /// Read a key as `T`. A stored value of another kind reads as `None`.
    pub fn get_as<T: FromValue>(&self, key: &str) -> Option<T> {
        let value = self.get(key)?;
        let typed = T::from_value(value);
        if typed.is_none() {
            tracing::warn!(
                key,
                stored = value.type_name(),
                expected = std::any::type_name::<T>(),
                "property kind mismatch"
            );
        }
        typed
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_list(&self, key: &str) -> Option<&[Value]> {
        self.get(key).and_then(Value::as_list)
    }

    pub fn get_model(&self, key: &str) -> Option<&dyn Model> {
        self.get(key).and_then(Value::as_model)
    }

    /// Read a nested model and require its concrete type to be `T`.
    pub fn get_model_as<T: Model>(&self, key: &str) -> Option<&T> {
        self.get_model(key)?.downcast_ref::<T>()
    }

    /// Read a collection of nested models. Null elements are skipped.
    pub fn get_models(&self, key: &str) -> Option<Vec<&dyn Model>> {
        self.get_list(key)?
            .iter()
            .filter(|item| !item.is_null())
            .map(Value::as_model)
            .collect()
    }

    // ========================================================================
    // Additional data
    // ========================================================================

    pub fn additional_data(&self) -> Option<&AdditionalData> {
        self.get(ADDITIONAL_DATA_KEY).and_then(Value::as_map)
    }

    /// Insert one unrecognized field, creating the map on first use.
    pub fn insert_additional(&mut self, key: impl Into<String>, value: serde_json::Value) -> Result<()> {
        let mut data = self
            .values
            .get(ADDITIONAL_DATA_KEY)
            .and_then(|entry| entry.value.as_map())
            .cloned()
            .unwrap_or_default();
        data.insert(key.into(), value);
        self.set(ADDITIONAL_DATA_KEY, Value::Map(data))
    }
}

/// Equality covers visible values only; null entries equal absent ones and
/// change-tracking state is ignored.
impl PartialEq for PropertyStore {
    fn eq(&self, other: &Self) -> bool {
        fn visible(store: &PropertyStore) -> HashMap<&str, &Value> {
            store
                .values
                .iter()
                .filter(|(_, entry)| !entry.value.is_null())
                .map(|(key, entry)| (key.as_str(), &entry.value))
                .collect()
        }
        visible(self) == visible(other)
    }
}
