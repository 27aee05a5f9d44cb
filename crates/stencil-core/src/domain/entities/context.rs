//! Render context value object.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::error::DomainError;

/// Data bound into both the path template and the content template.
///
/// A thin wrapper around a JSON value. The core never inspects it; the
/// template engine fails at execution time if a template references
/// something the context does not provide.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    value: Value,
}

impl RenderContext {
    /// Empty object context.
    pub fn new() -> Self {
        Self {
            value: Value::Object(Map::new()),
        }
    }

    /// Build a context from any serializable value.
    pub fn from_serialize<T: Serialize>(data: &T) -> Result<Self, DomainError> {
        serde_json::to_value(data)
            .map(Self::from)
            .map_err(|e| DomainError::InvalidContext(e.to_string()))
    }

    /// Return a new context with `key` set.
    ///
    /// Dotted keys (`service.name`) create nested objects. A non-object
    /// context is replaced by an object first.
    pub fn with_variable(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value.into());
        self
    }

    /// Set `key` in place. See [`RenderContext::with_variable`].
    pub fn insert(&mut self, key: &str, value: Value) {
        if !self.value.is_object() {
            self.value = Value::Object(Map::new());
        }

        let mut segments = key.split('.').peekable();
        let mut current = &mut self.value;
        while let Some(segment) = segments.next() {
            let Value::Object(map) = current else {
                unreachable!("every level is forced to an object before descending");
            };
            if segments.peek().is_none() {
                map.insert(segment.to_owned(), value);
                return;
            }
            let next = map
                .entry(segment.to_owned())
                .or_insert_with(|| Value::Object(Map::new()));
            if !next.is_object() {
                *next = Value::Object(Map::new());
            }
            current = next;
        }
    }

    /// Shallow-merge another object context into this one; `other` wins.
    pub fn merge(mut self, other: RenderContext) -> Self {
        match (&mut self.value, other.value) {
            (Value::Object(base), Value::Object(overlay)) => base.extend(overlay),
            (_, other) => self.value = other,
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        key.split('.')
            .try_fold(&self.value, |current, segment| current.get(segment))
    }

    pub fn as_value(&self) -> &Value {
        &self.value
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Value> for RenderContext {
    fn from(value: Value) -> Self {
        Self { value }
    }
}

impl Serialize for RenderContext {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}
