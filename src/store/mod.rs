pub mod memory;
pub mod rest;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use memory::MemoryStore;
pub use rest::RestStore;

/// A single document in a collection. `fields` is always a JSON object.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub fields: Value,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Value) -> Self {
        Self { id: id.into(), fields }
    }

    /// Deserialize the document fields into a typed model
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        serde_json::from_value(self.fields.clone())
            .map_err(|e| StoreError::Decode(format!("document '{}': {}", self.id, e)))
    }
}

/// Sort direction for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Narrow query contract: at most one equality filter and one order-by field.
/// This is all the hosted document API supports, and all this service needs.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub filter: Option<(String, Value)>,
    pub order_by: Option<(String, SortDirection)>,
}

impl ListQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter = Some((field.into(), value.into()));
        self
    }

    pub fn order_asc(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some((field.into(), SortDirection::Ascending));
        self
    }

    pub fn order_desc(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some((field.into(), SortDirection::Descending));
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document '{id}' not found in '{collection}'")]
    NotFound { collection: String, id: String },

    #[error("store unreachable: {0}")]
    Unavailable(String),

    #[error("store request failed: {0}")]
    Request(String),

    #[error("failed to decode store response: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}

/// Per-collection document persistence, backed by the hosted document
/// database in production and an in-memory fake in tests.
///
/// Single-document operations are atomic on the store side; there are no
/// multi-document transactions.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document by id. `Ok(None)` when absent.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// List documents, optionally filtered by one field equality and
    /// ordered by one field. Without an order-by, documents come back in
    /// store-insertion order.
    async fn list(&self, collection: &str, query: ListQuery) -> Result<Vec<Document>, StoreError>;

    /// Create or replace the document at `id`.
    async fn put(&self, collection: &str, id: &str, fields: Value) -> Result<(), StoreError>;

    /// Merge `fields` into an existing document. `NotFound` when absent.
    async fn update(&self, collection: &str, id: &str, fields: Value) -> Result<(), StoreError>;

    /// Delete the document at `id`. `NotFound` when absent.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// Merge the members of `patch` into `target` (both must be JSON objects).
/// Top-level merge only; nested objects are replaced wholesale.
pub(crate) fn merge_fields(target: &mut Value, patch: &Value) {
    if let (Value::Object(target), Value::Object(patch)) = (target, patch) {
        for (key, value) in patch {
            target.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_replaces_top_level_members_only() {
        let mut doc = json!({"title": "Elder Care", "meta": {"a": 1, "b": 2}});
        merge_fields(&mut doc, &json!({"meta": {"a": 3}, "is_active": false}));
        assert_eq!(doc["title"], "Elder Care");
        assert_eq!(doc["is_active"], false);
        // nested objects are not deep-merged
        assert_eq!(doc["meta"], json!({"a": 3}));
    }

    #[test]
    fn document_decode_reports_offending_id() {
        #[derive(serde::Deserialize, Debug)]
        struct Needs {
            #[allow(dead_code)]
            title: String,
        }
        let doc = Document::new("svc-1", json!({"nope": 1}));
        let err = doc.decode::<Needs>().unwrap_err();
        assert!(matches!(err, StoreError::Decode(ref msg) if msg.contains("svc-1")));
    }
}
