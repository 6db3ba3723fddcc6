use std::path::PathBuf;
use thiserror::Error;

/// Errors from a single object upload
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Local file could not be read
    #[error("Failed to read {}: {message}", path.display())]
    ReadFile { path: PathBuf, message: String },

    /// The object store rejected or failed the upload
    #[error("Upload of s3://{bucket}/{key} failed: {message}")]
    Upload {
        bucket: String,
        key: String,
        message: String,
    },
}
