//! MongoDB-backed document store
//!
//! Documents cross the trait boundary as `serde_json::Value`. They are
//! encoded to BSON through serde on the way in and rendered as relaxed
//! extended JSON on the way out, with `_id` split off into a `DocumentId`.

use super::{json_kind, DocumentId, DocumentStore, StoreError, StoredDocument};
use async_trait::async_trait;
use mongodb::bson::{self, oid::ObjectId, Bson, Document};
use mongodb::{Client, Collection};
use serde_json::Value;
use tracing::{debug, info};

pub struct MongoStore {
    collection: Collection<Document>,
}

impl MongoStore {
    /// Connects to `uri` and binds to `database.collection`
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|source| StoreError::Mongo {
                operation: "connect",
                source,
            })?;

        info!(database, collection, "Connected to MongoDB");

        Ok(Self {
            collection: client.database(database).collection(collection),
        })
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_one_by_field(
        &self,
        field: &str,
        value: &Value,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let mut filter = Document::new();
        filter.insert(field, bson::to_bson(value)?);

        let found = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(|source| StoreError::Mongo {
                operation: "find_one",
                source,
            })?;

        found.map(from_document).transpose()
    }

    async fn insert_one(&self, document: Value) -> Result<DocumentId, StoreError> {
        let result = self
            .collection
            .insert_one(to_document(document)?, None)
            .await
            .map_err(|source| StoreError::Mongo {
                operation: "insert_one",
                source,
            })?;

        Ok(id_from_bson(&result.inserted_id))
    }

    async fn insert_many(&self, documents: Vec<Value>) -> Result<Vec<DocumentId>, StoreError> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let documents = documents
            .into_iter()
            .map(to_document)
            .collect::<Result<Vec<_>, _>>()?;

        let result = self
            .collection
            .insert_many(documents, None)
            .await
            .map_err(|source| StoreError::Mongo {
                operation: "insert_many",
                source,
            })?;

        let mut ids: Vec<_> = result.inserted_ids.into_iter().collect();
        ids.sort_by_key(|(index, _)| *index);
        Ok(ids.iter().map(|(_, id)| id_from_bson(id)).collect())
    }

    async fn replace_one(&self, id: &DocumentId, document: Value) -> Result<(), StoreError> {
        let result = self
            .collection
            .replace_one(id_filter(id), to_document(document)?, None)
            .await
            .map_err(|source| StoreError::Mongo {
                operation: "replace_one",
                source,
            })?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound(id.clone()));
        }
        debug!(id = %id, modified = result.modified_count, "Replaced document");
        Ok(())
    }

    async fn set_field(
        &self,
        id: &DocumentId,
        field: &str,
        value: Value,
    ) -> Result<(), StoreError> {
        let mut fields = Document::new();
        fields.insert(field, bson::to_bson(&value)?);
        let mut update = Document::new();
        update.insert("$set", fields);

        let result = self
            .collection
            .update_one(id_filter(id), update, None)
            .await
            .map_err(|source| StoreError::Mongo {
                operation: "update_one",
                source,
            })?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound(id.clone()));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "mongodb"
    }
}

fn to_document(value: Value) -> Result<Document, StoreError> {
    if !value.is_object() {
        return Err(StoreError::NotADocument {
            kind: json_kind(&value),
        });
    }
    Ok(bson::to_document(&value)?)
}

fn from_document(mut document: Document) -> Result<StoredDocument, StoreError> {
    let id = document.remove("_id").ok_or(StoreError::MissingId)?;
    Ok(StoredDocument {
        id: id_from_bson(&id),
        body: Bson::Document(document).into_relaxed_extjson(),
    })
}

fn id_from_bson(id: &Bson) -> DocumentId {
    match id {
        Bson::ObjectId(oid) => DocumentId::new(oid.to_hex()),
        Bson::String(s) => DocumentId::new(s.clone()),
        other => DocumentId::new(other.to_string()),
    }
}

/// Filter selecting a document by identifier. Hex strings are treated as
/// ObjectIds, which is what the server assigns on insert.
fn id_filter(id: &DocumentId) -> Document {
    let mut filter = Document::new();
    match ObjectId::parse_str(id.as_str()) {
        Ok(oid) => filter.insert("_id", oid),
        Err(_) => filter.insert("_id", id.as_str()),
    };
    filter
}
