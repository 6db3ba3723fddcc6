//! Command handlers: build the backends a command needs, run it, print the
//! report and map the result to an exit code.

use super::commands::{CliArgs, Commands};
use super::output::OutputFormatter;
use crate::api::ApiSportsClient;
use crate::archive::S3ObjectStore;
use crate::config::EtlConfig;
use crate::pipeline::context::{archive_items, dataset_paths};
use crate::pipeline::stages;
use crate::pipeline::{PipelineContext, PipelineOrchestrator, Stage, StageReport};
use crate::progress::LoggingHandler;
use crate::store::MongoStore;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::error;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_STAGE_FAILED: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

pub async fn handle(args: &CliArgs, mut config: EtlConfig) -> i32 {
    if let Some(dir) = &args.scratch_dir {
        config.scratch_dir = dir.clone();
    }

    if let Err(e) = config.validate() {
        error!("{}", e);
        eprintln!("Error: {}", e);
        return EXIT_CONFIG_ERROR;
    }

    let formatter = OutputFormatter::new(args.format.into());

    let output = match args.command {
        Commands::Config => formatter.format_config(&config),
        Commands::Run => match handle_run(&config).await {
            Ok(report) => formatter.format_run(&report),
            Err(e) => return report_failure(e),
        },
        Commands::Extract => stage_output(&formatter, handle_stage(Stage::Extract, &config).await),
        Commands::Load => stage_output(&formatter, handle_stage(Stage::Load, &config).await),
        Commands::Transform => {
            stage_output(&formatter, handle_stage(Stage::Transform, &config).await)
        }
        Commands::Archive => stage_output(&formatter, handle_stage(Stage::Archive, &config).await),
    };

    match output {
        Ok(text) => {
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
            EXIT_SUCCESS
        }
        Err(e) => report_failure(e),
    }
}

fn stage_output(formatter: &OutputFormatter, result: Result<StageReport>) -> Result<String> {
    formatter.format_stage(&result?)
}

fn report_failure(e: anyhow::Error) -> i32 {
    error!("{:#}", e);
    eprintln!("Error: {:#}", e);
    if e.downcast_ref::<crate::config::ConfigError>().is_some() {
        EXIT_CONFIG_ERROR
    } else {
        EXIT_STAGE_FAILED
    }
}

fn orchestrator() -> PipelineOrchestrator {
    PipelineOrchestrator::new(Some(Arc::new(LoggingHandler)))
}

async fn connect_store(config: &EtlConfig) -> Result<MongoStore> {
    MongoStore::connect(
        &config.mongo_uri,
        &config.mongo_database,
        &config.mongo_collection,
    )
    .await
    .context("Failed to connect to MongoDB")
}

async fn connect_object_store(config: &EtlConfig) -> S3ObjectStore {
    S3ObjectStore::connect(
        &config.aws_region,
        config.aws_access_key_id.as_deref(),
        config.aws_secret_access_key.as_deref(),
    )
    .await
}

pub async fn handle_run(config: &EtlConfig) -> Result<crate::pipeline::RunReport> {
    let source = ApiSportsClient::from_config(config)?;
    let store = connect_store(config).await?;
    let object_store = connect_object_store(config).await;

    let context = PipelineContext::new(
        Arc::new(source),
        Arc::new(store),
        Arc::new(object_store),
        config.scratch_dir.clone(),
        config.bucket.clone(),
    );

    orchestrator().run(&context).await
}

/// Runs a single stage, building only the backends it touches
pub async fn handle_stage(stage: Stage, config: &EtlConfig) -> Result<StageReport> {
    let orchestrator = orchestrator();

    let report = match stage {
        Stage::Extract => {
            let source = ApiSportsClient::from_config(config)?;
            StageReport::Extract(
                orchestrator
                    .run_stage(stage, stages::extract(&source, &config.scratch_dir))
                    .await?,
            )
        }
        Stage::Load => {
            let store = connect_store(config).await?;
            StageReport::Load(
                orchestrator
                    .run_stage(stage, stages::load(&store, &dataset_paths(&config.scratch_dir)))
                    .await?,
            )
        }
        Stage::Transform => {
            let store = connect_store(config).await?;
            StageReport::Transform(
                orchestrator
                    .run_stage(stage, stages::transform(&store))
                    .await?,
            )
        }
        Stage::Archive => {
            let object_store = connect_object_store(config).await;
            StageReport::Archive(
                orchestrator
                    .run_archive(
                        &object_store,
                        &config.bucket,
                        &archive_items(&config.scratch_dir),
                    )
                    .await,
            )
        }
    };

    Ok(report)
}
