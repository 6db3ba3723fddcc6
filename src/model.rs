//! Datasets fetched from the football API and the typed shape of their payloads
//!
//! The API returns envelopes of the form `{ get, parameters, response: [...] }`.
//! Only the pieces the pipeline interprets are typed; everything else is kept
//! in flattened maps so that a document read through these types and written
//! back loses nothing.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;
use thiserror::Error;

/// Field every API envelope uses to identify the endpoint that produced it
pub const GET_FIELD: &str = "get";

/// Field holding the per-player records inside an envelope
pub const RESPONSE_FIELD: &str = "response";

/// One of the two datasets the pipeline moves around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    TopScorers,
    TopAssists,
}

impl Dataset {
    /// Datasets in the order every stage processes them
    pub const ALL: [Dataset; 2] = [Dataset::TopScorers, Dataset::TopAssists];

    /// API path, which is also the `get` value of the stored envelope
    pub fn endpoint(self) -> &'static str {
        match self {
            Dataset::TopScorers => "players/topscorers",
            Dataset::TopAssists => "players/topassists",
        }
    }

    /// File name inside the scratch directory
    pub fn file_name(self) -> &'static str {
        match self {
            Dataset::TopScorers => "top_scorers.json",
            Dataset::TopAssists => "top_assists.json",
        }
    }

    /// Object key used when archiving
    pub fn object_key(self) -> &'static str {
        self.file_name()
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

/// API envelope as stored in the document collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub get: String,
    pub response: Vec<PlayerEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One element of `response`: a player and their per-competition statistics
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerEntry {
    #[serde(default)]
    pub statistics: Vec<Statistic>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlayerEntry {
    /// Sets `contribution` on the first statistics entry and returns it.
    ///
    /// Returns `Ok(None)` when the player carries no statistics at all. On
    /// overflow the entry is left untouched.
    pub fn apply_contribution(&mut self) -> Result<Option<i64>, ContributionOverflow> {
        let Some(stats) = self.statistics.first_mut() else {
            return Ok(None);
        };
        let contribution = stats.goals.contribution()?;
        stats.contribution = Some(contribution);
        Ok(Some(contribution))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Statistic {
    #[serde(default)]
    pub goals: Goals,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contribution: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Goal counters; the API reports missing values as `null`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Goals {
    #[serde(default, deserialize_with = "deserialize_count")]
    pub total: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub assists: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Goals {
    pub fn new(total: Option<i64>, assists: Option<i64>) -> Self {
        Self {
            total,
            assists,
            extra: Map::new(),
        }
    }

    /// Goals plus assists, treating absent values as zero
    pub fn contribution(&self) -> Result<i64, ContributionOverflow> {
        let total = self.total.unwrap_or(0);
        let assists = self.assists.unwrap_or(0);
        total
            .checked_add(assists)
            .ok_or(ContributionOverflow { total, assists })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("contribution of {total} goals and {assists} assists overflows")]
pub struct ContributionOverflow {
    pub total: i64,
    pub assists: i64,
}

/// Reads a counter that may have been stored as an integral float (`10.0`)
fn deserialize_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Some(n) = number.as_i64() {
        return Ok(Some(n));
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Ok(Some(f as i64))
        }
        _ => Err(de::Error::custom(format!(
            "expected a whole number, found {}",
            number
        ))),
    }
}
