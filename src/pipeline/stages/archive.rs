//! Archive stage: best-effort upload of the scratch files

use crate::archive::ObjectStore;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info};

/// A local file and the key it is archived under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveItem {
    pub path: PathBuf,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveFailure {
    pub key: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArchiveReport {
    pub bucket: String,
    pub uploaded: Vec<String>,
    pub failures: Vec<ArchiveFailure>,
}

impl ArchiveReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Uploads every item; a failed upload is recorded and the next one is
/// still attempted.
pub async fn archive(
    object_store: &dyn ObjectStore,
    bucket: &str,
    items: &[ArchiveItem],
) -> ArchiveReport {
    let mut report = ArchiveReport {
        bucket: bucket.to_string(),
        ..Default::default()
    };

    for item in items {
        match object_store.upload_file(&item.path, bucket, &item.key).await {
            Ok(()) => report.uploaded.push(item.key.clone()),
            Err(e) => {
                error!(bucket, key = %item.key, error = %e, "Failed to upload file");
                report.failures.push(ArchiveFailure {
                    key: item.key.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        bucket,
        uploaded = report.uploaded.len(),
        failed = report.failures.len(),
        "Archive complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::MemoryObjectStore;
    use tempfile::TempDir;

    fn items(dir: &TempDir) -> Vec<ArchiveItem> {
        ["top_scorers.json", "top_assists.json"]
            .iter()
            .map(|name| {
                let path = dir.path().join(name);
                std::fs::write(&path, format!("{{\"file\":\"{}\"}}", name)).unwrap();
                ArchiveItem {
                    path,
                    key: name.to_string(),
                }
            })
            .collect()
    }

    #[tokio::test]
    async fn test_uploads_all_items() {
        let dir = TempDir::new().unwrap();
        let store = MemoryObjectStore::new();

        let report = archive(&store, "footballstorages3", &items(&dir)).await;

        assert!(report.is_complete());
        assert_eq!(report.uploaded, vec!["top_scorers.json", "top_assists.json"]);
        assert!(store.object("footballstorages3", "top_assists.json").is_some());
    }

    #[tokio::test]
    async fn test_failure_does_not_block_next_upload() {
        let dir = TempDir::new().unwrap();
        let store = MemoryObjectStore::new().fail_key("top_scorers.json");

        let report = archive(&store, "footballstorages3", &items(&dir)).await;

        assert_eq!(store.attempts(), vec!["top_scorers.json", "top_assists.json"]);
        assert_eq!(report.uploaded, vec!["top_assists.json"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].key, "top_scorers.json");
        assert!(!report.is_complete());
    }

    #[tokio::test]
    async fn test_missing_local_file_is_reported() {
        let store = MemoryObjectStore::new();
        let items = vec![ArchiveItem {
            path: PathBuf::from("/nonexistent/top_scorers.json"),
            key: "top_scorers.json".to_string(),
        }];

        let report = archive(&store, "bucket", &items).await;
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].error.contains("Failed to read"));
    }
}
