//! Errors raised while extracting data from the statistics API

use crate::model::Dataset;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during the extract stage
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent or its body could not be read
    #[error("Request for {dataset} failed: {source}")]
    Request {
        dataset: Dataset,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status
    #[error("API returned status {status} for {dataset}: {body}")]
    Status {
        dataset: Dataset,
        status: u16,
        body: String,
    },

    /// The response body is not valid JSON
    #[error("Response for {dataset} is not valid JSON: {source}")]
    InvalidJson {
        dataset: Dataset,
        #[source]
        source: serde_json::Error,
    },

    /// The payload could not be written to the scratch directory
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
