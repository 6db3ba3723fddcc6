//! football-etl - daily football statistics pipeline
//!
//! Fetches top-scorer and top-assist statistics from the football API,
//! stores the raw payloads as JSON, upserts them into a document store,
//! derives a `contribution` (goals + assists) for every top scorer and
//! archives the JSON files to object storage.
//!
//! # Stages
//!
//! 1. **Extract** ([`pipeline::stages::extract`]): one GET per dataset,
//!    payload written to the scratch directory
//! 2. **Load** ([`pipeline::stages::load`]): upsert by `get` into the store
//! 3. **Transform** ([`pipeline::stages::transform`]): set `contribution` on
//!    the stored top scorers
//! 4. **Archive** ([`pipeline::stages::archive`]): best-effort upload of the
//!    scratch files
//!
//! Stages only share side effects, so each one can be scheduled on its own.
//! External systems sit behind traits ([`StatsSource`], [`DocumentStore`],
//! [`ObjectStore`]) with in-memory implementations for tests.
//!
//! # Example
//!
//! ```no_run
//! use football_etl::{EtlConfig, PipelineContext, PipelineOrchestrator};
//! use football_etl::api::ApiSportsClient;
//! use football_etl::archive::S3ObjectStore;
//! use football_etl::store::MongoStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = EtlConfig::default();
//! let context = PipelineContext::new(
//!     Arc::new(ApiSportsClient::from_config(&config)?),
//!     Arc::new(MongoStore::connect(&config.mongo_uri, "football_db", "my_collection").await?),
//!     Arc::new(S3ObjectStore::connect(&config.aws_region, None, None).await),
//!     config.scratch_dir.clone(),
//!     config.bucket.clone(),
//! );
//!
//! let report = PipelineOrchestrator::new(None).run(&context).await?;
//! println!("archived {} files", report.archive.uploaded.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod archive;
pub mod cli;
pub mod config;
pub mod model;
pub mod pipeline;
pub mod progress;
pub mod store;
pub mod util;

pub use api::{ApiSportsClient, ExtractError, StatsSource};
pub use archive::{ArchiveError, ObjectStore};
pub use config::{ConfigError, EtlConfig};
pub use model::{ContributionOverflow, Dataset, Goals, PlayerEntry, Statistic, StatsResponse};
pub use pipeline::{PipelineContext, PipelineOrchestrator, RunReport, Stage, StageReport};
pub use store::{DocumentId, DocumentStore, StoreError, StoredDocument};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "football-etl");
    }
}
