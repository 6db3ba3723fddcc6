use super::DocumentId;
use thiserror::Error;

/// Errors returned by document store backends
#[derive(Debug, Error)]
pub enum StoreError {
    /// Driver-level failure (connection, query, write)
    #[error("MongoDB {operation} failed: {source}")]
    Mongo {
        operation: &'static str,
        #[source]
        source: mongodb::error::Error,
    },

    /// JSON payload could not be converted to BSON
    #[error("Failed to encode document: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),

    /// Only JSON objects can be stored as documents
    #[error("Expected a JSON object, got {kind}")]
    NotADocument { kind: &'static str },

    /// A stored document came back without an identifier
    #[error("Stored document has no _id")]
    MissingId,

    /// No document has the given identifier
    #[error("No document with id {0}")]
    NotFound(DocumentId),
}
