//! ViewModel - The joined structure a route's presentation layer consumes

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewModel {
    fields: Map<String, Value>,
}

impl ViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Deserialize one field into a typed value
    pub fn typed<T: DeserializeOwned>(&self, key: &str) -> Option<serde_json::Result<T>> {
        self.fields
            .get(key)
            .map(|value| serde_json::from_value(value.clone()))
    }

    /// Number of entries in an array or object field
    pub fn count(&self, key: &str) -> Option<usize> {
        match self.fields.get(key)? {
            Value::Array(items) => Some(items.len()),
            Value::Object(map) => Some(map.len()),
            _ => None,
        }
    }

    pub fn into_json(self) -> Value {
        Value::Object(self.fields)
    }
}
