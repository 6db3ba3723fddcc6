use super::{json_kind, DocumentId, DocumentStore, StoreError, StoredDocument};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Mutex, MutexGuard};

/// In-process document store with MongoDB's equality-match semantics
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    documents: Vec<(DocumentId, Value)>,
    next_id: u64,
}

impl Inner {
    fn allocate(&mut self, document: Value) -> Result<DocumentId, StoreError> {
        if !document.is_object() {
            return Err(StoreError::NotADocument {
                kind: json_kind(&document),
            });
        }
        self.next_id += 1;
        let id = DocumentId::new(format!("mem-{:06}", self.next_id));
        self.documents.push((id.clone(), document));
        Ok(id)
    }

    fn position(&self, id: &DocumentId) -> Result<usize, StoreError> {
        self.documents
            .iter()
            .position(|(doc_id, _)| doc_id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &DocumentId) -> Option<Value> {
        self.lock()
            .documents
            .iter()
            .find(|(doc_id, _)| doc_id == id)
            .map(|(_, body)| body.clone())
    }

    /// Snapshot of every stored document in insertion order
    pub fn documents(&self) -> Vec<StoredDocument> {
        self.lock()
            .documents
            .iter()
            .map(|(id, body)| StoredDocument {
                id: id.clone(),
                body: body.clone(),
            })
            .collect()
    }

    pub fn count_matching(&self, field: &str, value: &Value) -> usize {
        self.lock()
            .documents
            .iter()
            .filter(|(_, body)| field_matches(body, field, value))
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn field_matches(body: &Value, field: &str, value: &Value) -> bool {
    match body.get(field) {
        Some(found) => found == value,
        None => value.is_null(),
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_one_by_field(
        &self,
        field: &str,
        value: &Value,
    ) -> Result<Option<StoredDocument>, StoreError> {
        Ok(self
            .lock()
            .documents
            .iter()
            .find(|(_, body)| field_matches(body, field, value))
            .map(|(id, body)| StoredDocument {
                id: id.clone(),
                body: body.clone(),
            }))
    }

    async fn insert_one(&self, document: Value) -> Result<DocumentId, StoreError> {
        self.lock().allocate(document)
    }

    async fn insert_many(&self, documents: Vec<Value>) -> Result<Vec<DocumentId>, StoreError> {
        let mut inner = self.lock();
        documents
            .into_iter()
            .map(|document| inner.allocate(document))
            .collect()
    }

    async fn replace_one(&self, id: &DocumentId, document: Value) -> Result<(), StoreError> {
        if !document.is_object() {
            return Err(StoreError::NotADocument {
                kind: json_kind(&document),
            });
        }
        let mut inner = self.lock();
        let idx = inner.position(id)?;
        inner.documents[idx].1 = document;
        Ok(())
    }

    async fn set_field(
        &self,
        id: &DocumentId,
        field: &str,
        value: Value,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let idx = inner.position(id)?;
        if let Some(body) = inner.documents[idx].1.as_object_mut() {
            body.insert(field.to_string(), value);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
