//! Extract stage: API payloads to scratch files

use crate::api::{ExtractError, StatsSource};
use crate::model::Dataset;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedFile {
    pub dataset: Dataset,
    pub path: PathBuf,
    pub bytes: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractReport {
    pub files: Vec<ExtractedFile>,
}

/// Fetches every dataset and writes it, pretty-printed, to `scratch_dir`.
///
/// Existing files are overwritten. The first failure aborts the stage, so a
/// failed fetch of the second dataset leaves the first file already written.
pub async fn extract(
    source: &dyn StatsSource,
    scratch_dir: &Path,
) -> Result<ExtractReport, ExtractError> {
    tokio::fs::create_dir_all(scratch_dir)
        .await
        .map_err(|source| ExtractError::Io {
            path: scratch_dir.to_path_buf(),
            source,
        })?;

    let mut report = ExtractReport::default();

    for dataset in Dataset::ALL {
        let payload = source.fetch(dataset).await?;
        let path = scratch_dir.join(dataset.file_name());

        let contents = serde_json::to_string_pretty(&payload)
            .map_err(|source| ExtractError::InvalidJson { dataset, source })?;
        tokio::fs::write(&path, &contents)
            .await
            .map_err(|source| ExtractError::Io {
                path: path.clone(),
                source,
            })?;

        info!(dataset = %dataset, path = %path.display(), bytes = contents.len(), "Saved payload");
        report.files.push(ExtractedFile {
            dataset,
            path,
            bytes: contents.len(),
        });
    }

    Ok(report)
}
