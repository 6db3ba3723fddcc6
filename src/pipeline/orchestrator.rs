use super::context::PipelineContext;
use super::report::RunReport;
use super::stage::Stage;
use super::stages::{self, ArchiveItem, ArchiveReport};
use crate::archive::ObjectStore;
use crate::progress::{ProgressEvent, ProgressHandler};
use anyhow::Result;
use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

pub struct PipelineOrchestrator {
    progress_handler: Option<Arc<dyn ProgressHandler>>,
}

impl PipelineOrchestrator {
    pub fn new(progress_handler: Option<Arc<dyn ProgressHandler>>) -> Self {
        Self { progress_handler }
    }

    /// Runs Extract, Load, Transform and Archive in order.
    ///
    /// The first three stages abort the run on error. Archive never fails
    /// the run; its upload failures are carried in the report.
    pub async fn run(&self, context: &PipelineContext) -> Result<RunReport> {
        let started_at = Utc::now();
        let start = Instant::now();
        info!(
            scratch_dir = %context.scratch_dir.display(),
            store = context.store.name(),
            source = context.source.name(),
            "Starting pipeline run"
        );
        self.emit(ProgressEvent::RunStarted {
            stages: Stage::ALL.len(),
        });

        let extract = self
            .run_stage(
                Stage::Extract,
                stages::extract(context.source.as_ref(), &context.scratch_dir),
            )
            .await?;

        let load = self
            .run_stage(
                Stage::Load,
                stages::load(context.store.as_ref(), &context.dataset_paths()),
            )
            .await?;

        let transform = self
            .run_stage(Stage::Transform, stages::transform(context.store.as_ref()))
            .await?;

        let archive = self
            .run_archive(
                context.object_store.as_ref(),
                &context.bucket,
                &context.archive_items(),
            )
            .await;

        let total_time = start.elapsed();
        self.emit(ProgressEvent::Completed { total_time });

        Ok(RunReport {
            started_at,
            duration_ms: total_time.as_millis() as u64,
            extract,
            load,
            transform,
            archive,
        })
    }

    /// Runs one fallible stage, emitting progress events around it and
    /// tagging any error with the stage's task id.
    pub async fn run_stage<T, E, F>(&self, stage: Stage, stage_future: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        self.emit(ProgressEvent::StageStarted { stage });
        let stage_start = Instant::now();

        match stage_future.await {
            Ok(output) => {
                self.emit(ProgressEvent::StageComplete {
                    stage,
                    duration: stage_start.elapsed(),
                });
                debug!("Stage {} complete", stage);
                Ok(output)
            }
            Err(e) => {
                self.emit(ProgressEvent::StageFailed {
                    stage,
                    error: e.to_string(),
                });
                Err(anyhow::Error::new(e).context(format!("Stage {} failed", stage.task_id())))
            }
        }
    }

    /// Runs the archive stage, which cannot fail as a whole
    pub async fn run_archive(
        &self,
        object_store: &dyn ObjectStore,
        bucket: &str,
        items: &[ArchiveItem],
    ) -> ArchiveReport {
        let stage = Stage::Archive;
        self.emit(ProgressEvent::StageStarted { stage });
        let stage_start = Instant::now();

        let report = stages::archive(object_store, bucket, items).await;

        if !report.is_complete() {
            self.emit(ProgressEvent::ArchiveIncomplete {
                failed: report.failures.len(),
            });
        }
        self.emit(ProgressEvent::StageComplete {
            stage,
            duration: stage_start.elapsed(),
        });
        report
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(handler) = &self.progress_handler {
            handler.on_progress(&event);
        }
    }
}
