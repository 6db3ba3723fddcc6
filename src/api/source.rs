use super::error::ExtractError;
use crate::model::Dataset;
use async_trait::async_trait;
use serde_json::Value;

/// Anything that can produce the raw JSON payload of a dataset
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch(&self, dataset: Dataset) -> Result<Value, ExtractError>;

    fn name(&self) -> &str;
}
