//! GROQ query construction.

use serde_json::{Map, Value};

/// A read query against the content store.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    /// GROQ query text.
    pub query: String,

    /// Query parameters, referenced as `$name` in the query.
    pub params: Map<String, Value>,

    /// Invalidation tags the result is filed under.
    pub tags: Vec<String>,
}

impl QueryRequest {
    /// Create a query without parameters or tags.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            params: Map::new(),
            tags: Vec::new(),
        }
    }

    /// Up to `limit` documents of `doc_type`, newest first.
    ///
    /// GROQ slices are end-exclusive, so `[0...limit]` yields at most `limit`.
    pub fn recent_documents(doc_type: &str, limit: usize) -> Self {
        Self::new(format!(
            "*[_type == $type] | order(_createdAt desc) [0...{limit}]"
        ))
        .with_param("type", doc_type)
    }

    /// Bind a query parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Attach invalidation tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// URL query pairs for the HTTP query API.
    ///
    /// Parameters are sent as `$name=<json>`.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.params.len() + 1);
        pairs.push(("query".to_string(), self.query.clone()));
        for (name, value) in &self.params {
            pairs.push((format!("${name}"), value.to_string()));
        }
        pairs
    }
}
