//! Free-form attribute bags for player data and game messages
//!
//! Clients own the schema of these payloads (character sheets, chat fields,
//! dice results, ...). The server only ever reads a handful of well-known keys
//! and otherwise treats them as opaque JSON.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A string-keyed map of loosely-typed JSON values.
///
/// Merging is a shallow, key-wise overwrite: keys present in the patch replace
/// existing values, keys absent from the patch are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(Map<String, Value>);

impl Attributes {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build from an arbitrary JSON value.
    ///
    /// Anything other than an object (null, arrays, scalars) yields an empty
    /// bag, so malformed payloads degrade instead of failing.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the value under `key` if it is a JSON string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// JSON truthiness of the value under `key`.
    ///
    /// Missing, `null`, `false`, `0`, and `""` are falsy. Everything else,
    /// including empty arrays and objects, is truthy.
    pub fn is_truthy(&self, key: &str) -> bool {
        match self.0.get(key) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Drop every key in `keys`. Used to keep server-owned fields out of
    /// client-supplied payloads.
    pub fn without(mut self, keys: &[&str]) -> Self {
        for key in keys {
            self.0.remove(*key);
        }
        self
    }

    /// Shallow merge: every key of `patch` overwrites the key in `self`.
    pub fn merge(&mut self, patch: Attributes) {
        for (key, value) in patch.0 {
            self.0.insert(key, value);
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Attributes {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Attributes> for Value {
    fn from(attributes: Attributes) -> Self {
        Value::Object(attributes.0)
    }
}
