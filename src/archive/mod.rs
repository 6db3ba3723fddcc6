//! Object storage used by the archive stage

pub mod error;
pub mod memory;
pub mod s3;

pub use error::ArchiveError;
pub use memory::MemoryObjectStore;
pub use s3::S3ObjectStore;

use async_trait::async_trait;
use std::path::Path;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Uploads a local file, overwriting any existing object at `bucket/key`
    async fn upload_file(&self, path: &Path, bucket: &str, key: &str)
        -> Result<(), ArchiveError>;

    fn name(&self) -> &str;
}
