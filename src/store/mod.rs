//! Document store abstraction
//!
//! The pipeline only needs five capabilities from its document store, so the
//! trait exposes exactly those: find-one-by-field, insert-one, insert-many,
//! replace-one-by-id and set-field-by-id. `MongoStore` is the production
//! backend; `MemoryStore` mirrors its matching rules for tests.

pub mod error;
pub mod memory;
pub mod mongo;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use mongo::MongoStore;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Store-assigned document identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A document together with its identifier; `body` never contains `_id`
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub body: Value,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// First document whose `field` equals `value`.
    ///
    /// A `null` value also matches documents where the field is absent.
    async fn find_one_by_field(
        &self,
        field: &str,
        value: &Value,
    ) -> Result<Option<StoredDocument>, StoreError>;

    async fn insert_one(&self, document: Value) -> Result<DocumentId, StoreError>;

    /// Inserts every document; identifiers are returned in input order.
    async fn insert_many(&self, documents: Vec<Value>) -> Result<Vec<DocumentId>, StoreError>;

    async fn replace_one(&self, id: &DocumentId, document: Value) -> Result<(), StoreError>;

    /// Overwrites a single top-level field of an existing document
    async fn set_field(&self, id: &DocumentId, field: &str, value: Value)
        -> Result<(), StoreError>;

    fn name(&self) -> &str;
}

/// Result of `upsert_by_field`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created(DocumentId),
    Replaced(DocumentId),
}

/// Replaces the document whose `field` matches the payload's, or inserts it.
///
/// The lookup and the write are two separate store calls; two concurrent
/// upserts of the same key can both insert.
pub async fn upsert_by_field(
    store: &dyn DocumentStore,
    field: &str,
    document: Value,
) -> Result<UpsertOutcome, StoreError> {
    let key = document.get(field).cloned().unwrap_or(Value::Null);

    match store.find_one_by_field(field, &key).await? {
        Some(existing) => {
            debug!(id = %existing.id, %key, "Replacing existing document");
            store.replace_one(&existing.id, document).await?;
            Ok(UpsertOutcome::Replaced(existing.id))
        }
        None => {
            let id = store.insert_one(document).await?;
            debug!(id = %id, %key, "Inserted new document");
            Ok(UpsertOutcome::Created(id))
        }
    }
}

/// Human-readable JSON type name, used in diagnostics
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_upsert_creates_then_replaces() {
        let store = MemoryStore::new();

        let first = upsert_by_field(&store, "get", json!({ "get": "a", "v": 1 }))
            .await
            .unwrap();
        let UpsertOutcome::Created(id) = first else {
            panic!("expected Created, got {:?}", first);
        };

        let second = upsert_by_field(&store, "get", json!({ "get": "a", "v": 2 }))
            .await
            .unwrap();
        assert_eq!(second, UpsertOutcome::Replaced(id.clone()));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id).unwrap()["v"], 2);
    }

    #[tokio::test]
    async fn test_upsert_without_key_matches_keyless_documents() {
        let store = MemoryStore::new();

        upsert_by_field(&store, "get", json!({ "v": 1 })).await.unwrap();
        let outcome = upsert_by_field(&store, "get", json!({ "v": 2 })).await.unwrap();

        assert!(matches!(outcome, UpsertOutcome::Replaced(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_json_kind() {
        assert_eq!(json_kind(&json!(null)), "null");
        assert_eq!(json_kind(&json!("x")), "string");
        assert_eq!(json_kind(&json!(1.5)), "number");
        assert_eq!(json_kind(&json!([])), "array");
        assert_eq!(json_kind(&json!({})), "object");
    }

    #[test]
    fn test_document_id_display() {
        let id = DocumentId::new("65f0c0ffee");
        assert_eq!(id.to_string(), "65f0c0ffee");
        assert_eq!(serde_json::to_value(&id).unwrap(), json!("65f0c0ffee"));
    }
}
