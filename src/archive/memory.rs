use super::{ArchiveError, ObjectStore};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// In-process object store with per-key failure injection
pub struct MemoryObjectStore {
    objects: Mutex<BTreeMap<(String, String), Vec<u8>>>,
    failing_keys: Mutex<HashSet<String>>,
    attempts: Mutex<Vec<String>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(BTreeMap::new()),
            failing_keys: Mutex::new(HashSet::new()),
            attempts: Mutex::new(Vec::new()),
        }
    }

    /// Makes every upload to `key` fail
    pub fn fail_key(self, key: impl Into<String>) -> Self {
        lock(&self.failing_keys).insert(key.into());
        self
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        lock(&self.objects)
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.objects).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys of every upload attempt, successful or not, in order
    pub fn attempts(&self) -> Vec<String> {
        lock(&self.attempts).clone()
    }
}

impl Default for MemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload_file(
        &self,
        path: &Path,
        bucket: &str,
        key: &str,
    ) -> Result<(), ArchiveError> {
        lock(&self.attempts).push(key.to_string());

        if lock(&self.failing_keys).contains(key) {
            return Err(ArchiveError::Upload {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: "injected failure".to_string(),
            });
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ArchiveError::ReadFile {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        lock(&self.objects).insert((bucket.to_string(), key.to_string()), bytes);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
