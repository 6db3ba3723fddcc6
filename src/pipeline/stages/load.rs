//! Load stage: scratch files into the document store
//!
//! Object payloads are upserted by their `get` field, so reloading the same
//! endpoint replaces the earlier document. List payloads have no key to
//! match on and every element is inserted again on each run.

use crate::model::GET_FIELD;
use crate::store::{json_kind, upsert_by_field, DocumentId, DocumentStore, StoreError, UpsertOutcome};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid JSON: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Store rejected {}: {source}", path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: StoreError,
    },
}

/// What happened to a single file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoadOutcome {
    /// List payload; every element inserted as its own document
    Inserted { count: usize },
    /// Object payload with no existing document for its `get`
    Created { id: DocumentId },
    /// Object payload that replaced the existing document for its `get`
    Replaced { id: DocumentId },
    /// Payload was neither a list nor an object
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadedFile {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: LoadOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    pub files: Vec<LoadedFile>,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, LoadOutcome::Skipped { .. }))
            .count()
    }
}

pub async fn load(store: &dyn DocumentStore, paths: &[PathBuf]) -> Result<LoadReport, LoadError> {
    let mut report = LoadReport::default();

    for path in paths {
        let outcome = load_file(store, path).await?;
        report.files.push(LoadedFile {
            path: path.clone(),
            outcome,
        });
    }

    info!(
        files = report.files.len(),
        skipped = report.skipped(),
        store = store.name(),
        "Load complete"
    );
    Ok(report)
}

async fn load_file(store: &dyn DocumentStore, path: &Path) -> Result<LoadOutcome, LoadError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let payload: Value =
        serde_json::from_str(&contents).map_err(|source| LoadError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;

    let store_err = |source: StoreError| LoadError::Store {
        path: path.to_path_buf(),
        source,
    };

    match payload {
        Value::Array(elements) => {
            let count = elements.len();
            if count > 0 {
                store.insert_many(elements).await.map_err(store_err)?;
            }
            info!(path = %path.display(), count, "Inserted list payload");
            Ok(LoadOutcome::Inserted { count })
        }
        Value::Object(_) => {
            match upsert_by_field(store, GET_FIELD, payload)
                .await
                .map_err(store_err)?
            {
                UpsertOutcome::Created(id) => {
                    info!(path = %path.display(), id = %id, "Inserted new document");
                    Ok(LoadOutcome::Created { id })
                }
                UpsertOutcome::Replaced(id) => {
                    info!(path = %path.display(), id = %id, "Replaced existing document");
                    Ok(LoadOutcome::Replaced { id })
                }
            }
        }
        other => {
            let reason = format!("expected a JSON object or array, found {}", json_kind(&other));
            warn!(path = %path.display(), %reason, "Invalid JSON structure, skipping file");
            Ok(LoadOutcome::Skipped { reason })
        }
    }
}
