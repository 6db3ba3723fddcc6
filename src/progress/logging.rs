//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{error, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::RunStarted { stages } => {
                info!(stages, "Starting pipeline run");
            }
            ProgressEvent::StageStarted { stage } => {
                info!(stage = %stage, task = stage.task_id(), "Starting stage");
            }
            ProgressEvent::StageComplete { stage, duration } => {
                info!(
                    stage = %stage,
                    duration_ms = duration.as_millis(),
                    "Stage complete"
                );
            }
            ProgressEvent::StageFailed { stage, error } => {
                error!(stage = %stage, error = %error, "Stage failed");
            }
            ProgressEvent::ArchiveIncomplete { failed } => {
                warn!(failed, "Some files were not archived");
            }
            ProgressEvent::Completed { total_time } => {
                info!(total_time_ms = total_time.as_millis(), "Pipeline complete");
            }
        }
    }
}
