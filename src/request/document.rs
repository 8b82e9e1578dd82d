//! Request document wrapper over a JSON object.
//!
//! `RequestDocument` is the tagged-union boundary for heterogeneous request
//! payloads: values are `serde_json::Value` variants (string, list, nested
//! object, null) decided once at the edge, and downstream checks pattern-match
//! on the variant instead of doing runtime type tests.
//!
//! Validators never mutate a caller's document. Entry points clone the
//! inbound document into a working copy, apply normalization patches to it
//! only after the corresponding check succeeded, and return the normalized
//! copy on success.

use serde_json::{Map, Value};

/// An ordered key→value request payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestDocument {
    inner: Map<String, Value>,
}

impl RequestDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from a JSON value, rejecting non-objects.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(inner) => Some(Self { inner }),
            _ => None,
        }
    }

    /// Raw value lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    /// Whether the key is present at all (even with a null value).
    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// String value for a key, if the value is a string.
    pub fn string(&self, key: &str) -> Option<&str> {
        self.inner.get(key).and_then(Value::as_str)
    }

    /// List value for a key, if the value is an array.
    pub fn list(&self, key: &str) -> Option<&Vec<Value>> {
        self.inner.get(key).and_then(Value::as_array)
    }

    /// Nested document for a key, if the value is an object.
    pub fn object(&self, key: &str) -> Option<&Map<String, Value>> {
        self.inner.get(key).and_then(Value::as_object)
    }

    /// True when the key holds a non-blank string.
    pub fn has_text(&self, key: &str) -> bool {
        self.string(key).is_some_and(|s| !s.trim().is_empty())
    }

    /// True when the key is absent, null, or holds a blank string.
    ///
    /// This is the "not provided" guard most format validators sit behind.
    pub fn is_blank_text(&self, key: &str) -> bool {
        !self.has_text(key)
    }

    /// Set a key, used by orchestrators to apply normalization patches.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.inner.insert(key.into(), value);
    }

    /// Iterate over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.inner.keys()
    }

    /// View the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.inner
    }

    /// Consume into the underlying JSON object.
    pub fn into_map(self) -> Map<String, Value> {
        self.inner
    }
}

impl From<Map<String, Value>> for RequestDocument {
    fn from(inner: Map<String, Value>) -> Self {
        Self { inner }
    }
}

/// Whether an individual JSON value is a blank string.
///
/// Non-strings are not blank for this purpose; type mismatches are reported
/// by the type checks, not the blank checks.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}
