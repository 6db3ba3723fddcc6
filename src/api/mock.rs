use super::error::ExtractError;
use super::source::StatsSource;
use crate::model::Dataset;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

/// In-process `StatsSource` that replays queued payloads per dataset
pub struct MockStatsSource {
    responses: Mutex<HashMap<Dataset, VecDeque<MockPayload>>>,
    requests: Mutex<Vec<Dataset>>,
}

#[derive(Debug)]
pub enum MockPayload {
    Json(Value),
    /// Raw body that is parsed like an HTTP response would be
    Raw(String),
}

impl MockStatsSource {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_payload(self, dataset: Dataset, payload: Value) -> Self {
        self.add_payload(dataset, MockPayload::Json(payload));
        self
    }

    pub fn with_raw_body(self, dataset: Dataset, body: impl Into<String>) -> Self {
        self.add_payload(dataset, MockPayload::Raw(body.into()));
        self
    }

    pub fn add_payload(&self, dataset: Dataset, payload: MockPayload) {
        lock(&self.responses)
            .entry(dataset)
            .or_default()
            .push_back(payload);
    }

    /// Datasets requested so far, in order
    pub fn requests(&self) -> Vec<Dataset> {
        lock(&self.requests).clone()
    }
}

impl Default for MockStatsSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatsSource for MockStatsSource {
    async fn fetch(&self, dataset: Dataset) -> Result<Value, ExtractError> {
        lock(&self.requests).push(dataset);

        let payload = lock(&self.responses)
            .get_mut(&dataset)
            .and_then(VecDeque::pop_front);

        match payload {
            Some(MockPayload::Json(value)) => Ok(value),
            Some(MockPayload::Raw(body)) => serde_json::from_str(&body)
                .map_err(|source| ExtractError::InvalidJson { dataset, source }),
            None => Err(ExtractError::Status {
                dataset,
                status: 404,
                body: "no mock payload queued".to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
