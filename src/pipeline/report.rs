use super::stages::{ArchiveReport, ExtractReport, LoadReport, TransformOutcome};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Combined result of a full pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub extract: ExtractReport,
    pub load: LoadReport,
    pub transform: TransformOutcome,
    pub archive: ArchiveReport,
}

/// Result of a single stage invoked on its own
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "stage", content = "report", rename_all = "snake_case")]
pub enum StageReport {
    Extract(ExtractReport),
    Load(LoadReport),
    Transform(TransformOutcome),
    Archive(ArchiveReport),
}
