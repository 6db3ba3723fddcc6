//! Pipeline context for managing dependencies

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::api::StatsSource;
use crate::archive::ObjectStore;
use crate::model::Dataset;
use crate::store::DocumentStore;

use super::stages::ArchiveItem;

/// Context that owns all long-lived pipeline dependencies
pub struct PipelineContext {
    pub source: Arc<dyn StatsSource>,
    pub store: Arc<dyn DocumentStore>,
    pub object_store: Arc<dyn ObjectStore>,

    /// Directory the extract stage writes into and later stages read from
    pub scratch_dir: PathBuf,

    /// Archive bucket
    pub bucket: String,
}

impl PipelineContext {
    pub fn new(
        source: Arc<dyn StatsSource>,
        store: Arc<dyn DocumentStore>,
        object_store: Arc<dyn ObjectStore>,
        scratch_dir: PathBuf,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            source,
            store,
            object_store,
            scratch_dir,
            bucket: bucket.into(),
        }
    }

    /// Scratch file of every dataset, in processing order
    pub fn dataset_paths(&self) -> Vec<PathBuf> {
        dataset_paths(&self.scratch_dir)
    }

    pub fn archive_items(&self) -> Vec<ArchiveItem> {
        archive_items(&self.scratch_dir)
    }
}

pub fn dataset_paths(scratch_dir: &Path) -> Vec<PathBuf> {
    Dataset::ALL
        .iter()
        .map(|dataset| scratch_dir.join(dataset.file_name()))
        .collect()
}

pub fn archive_items(scratch_dir: &Path) -> Vec<ArchiveItem> {
    Dataset::ALL
        .iter()
        .map(|dataset| ArchiveItem {
            path: scratch_dir.join(dataset.file_name()),
            key: dataset.object_key().to_string(),
        })
        .collect()
}
