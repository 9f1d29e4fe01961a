//! Content documents returned by the content store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An opaque document from the content store.
///
/// The JSON is kept exactly as received; serializing a document yields the
/// same value. Accessors only read well-known system fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentDocument(Value);

impl ContentDocument {
    /// Wrap a raw JSON value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Document id (`_id`).
    pub fn id(&self) -> Option<&str> {
        self.0.get("_id").and_then(Value::as_str)
    }

    /// Document type (`_type`).
    pub fn doc_type(&self) -> Option<&str> {
        self.0.get("_type").and_then(Value::as_str)
    }

    /// Creation timestamp (`_createdAt`), when present and well-formed.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.0
            .get("_createdAt")
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Human title, if the document has one.
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    /// Borrow the raw JSON.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Take the raw JSON.
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for ContentDocument {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
