//! AWS S3 object store

use super::{ArchiveError, ObjectStore};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use std::path::Path;
use tracing::{debug, info};

const CREDENTIALS_PROVIDER: &str = "football-etl-env";

pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    /// Builds a client for `region`.
    ///
    /// Explicit static credentials are used when both halves are given;
    /// otherwise the default AWS provider chain resolves them.
    pub async fn connect(
        region: &str,
        access_key_id: Option<&str>,
        secret_access_key: Option<&str>,
    ) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()));

        if let (Some(key_id), Some(secret)) = (access_key_id, secret_access_key) {
            debug!("Using static S3 credentials from configuration");
            loader = loader.credentials_provider(Credentials::new(
                key_id,
                secret,
                None,
                None,
                CREDENTIALS_PROVIDER,
            ));
        }

        let sdk_config = loader.load().await;
        Self {
            client: Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn upload_file(
        &self,
        path: &Path,
        bucket: &str,
        key: &str,
    ) -> Result<(), ArchiveError> {
        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| ArchiveError::ReadFile {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type("application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| ArchiveError::Upload {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        info!(bucket, key, "Uploaded object");
        Ok(())
    }

    fn name(&self) -> &str {
        "s3"
    }
}
