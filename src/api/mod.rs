//! Statistics API access used by the extract stage

pub mod client;
pub mod error;
pub mod mock;
pub mod source;

pub use client::ApiSportsClient;
pub use error::ExtractError;
pub use mock::{MockPayload, MockStatsSource};
pub use source::StatsSource;
