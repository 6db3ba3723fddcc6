//! Transform stage: derive `contribution` on the stored top-scorers document
//!
//! The whole `response` array is read, updated in memory and written back in
//! a single set. Nothing guards against another writer touching the document
//! between the read and the write; such a change would be overwritten.

use crate::model::{ContributionOverflow, Dataset, StatsResponse, GET_FIELD, RESPONSE_FIELD};
use crate::store::{DocumentId, DocumentStore, StoreError};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Document {id} does not have the expected shape: {source}")]
    MalformedDocument {
        id: DocumentId,
        #[source]
        source: serde_json::Error,
    },

    #[error("Player {index} in document {id}: {source}")]
    ContributionOverflow {
        id: DocumentId,
        index: usize,
        #[source]
        source: ContributionOverflow,
    },

    #[error("Failed to encode updated response: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransformOutcome {
    /// No top-scorers document in the store; nothing was changed
    MissingDocument,
    Updated {
        document: DocumentId,
        players: usize,
        /// Contribution per transformed player, in `response` order
        contributions: Vec<i64>,
    },
}

pub async fn transform(store: &dyn DocumentStore) -> Result<TransformOutcome, TransformError> {
    let dataset = Dataset::TopScorers;
    let key = Value::String(dataset.endpoint().to_string());

    let Some(document) = store.find_one_by_field(GET_FIELD, &key).await? else {
        warn!(get = dataset.endpoint(), "No document found, nothing to transform");
        return Ok(TransformOutcome::MissingDocument);
    };

    let id = document.id;
    let mut stats: StatsResponse = serde_json::from_value(document.body)
        .map_err(|source| TransformError::MalformedDocument {
            id: id.clone(),
            source,
        })?;

    // Nothing is written unless every player computes cleanly
    let mut contributions = Vec::with_capacity(stats.response.len());
    for (index, player) in stats.response.iter_mut().enumerate() {
        let applied = player
            .apply_contribution()
            .map_err(|source| TransformError::ContributionOverflow {
                id: id.clone(),
                index,
                source,
            })?;
        match applied {
            Some(contribution) => contributions.push(contribution),
            None => debug!(index, "Player has no statistics, skipping"),
        }
    }

    let response = serde_json::to_value(&stats.response).map_err(TransformError::Encode)?;
    store.set_field(&id, RESPONSE_FIELD, response).await?;

    info!(
        id = %id,
        players = stats.response.len(),
        updated = contributions.len(),
        "Added contribution field"
    );

    Ok(TransformOutcome::Updated {
        document: id,
        players: stats.response.len(),
        contributions,
    })
}
