//! HTTP client for the API-Football statistics service
//!
//! Each dataset is one authenticated GET against `{base_url}/{endpoint}` with
//! the season and league as query parameters. Authentication uses the
//! RapidAPI-style `x-rapidapi-host` / `x-rapidapi-key` header pair.

use super::error::ExtractError;
use super::source::StatsSource;
use crate::config::EtlConfig;
use crate::model::Dataset;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info};

const HOST_HEADER: &str = "x-rapidapi-host";
const KEY_HEADER: &str = "x-rapidapi-key";

/// Longest slice of an error body kept in `ExtractError::Status`
const MAX_ERROR_BODY: usize = 512;

pub struct ApiSportsClient {
    /// Base URL without trailing slash, e.g. `https://v3.football.api-sports.io`
    base_url: String,

    /// Value sent in the host header
    host: String,

    api_key: String,
    season: u16,
    league: u32,
    http_client: Client,
}

impl ApiSportsClient {
    pub fn new(
        base_url: impl Into<String>,
        host: impl Into<String>,
        api_key: impl Into<String>,
        season: u16,
        league: u32,
    ) -> Result<Self, ExtractError> {
        let http_client = Client::builder().build().map_err(ExtractError::Client)?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            host: host.into(),
            api_key: api_key.into(),
            season,
            league,
            http_client,
        })
    }

    /// Builds a client from configuration; the API key must be present.
    pub fn from_config(config: &EtlConfig) -> anyhow::Result<Self> {
        let api_key = config.require_api_key()?;
        let client = Self::new(
            config.api_base_url(),
            config.api_host.clone(),
            api_key,
            config.season,
            config.league,
        )?;
        Ok(client)
    }

    /// Full request URL for a dataset
    pub fn request_url(&self, dataset: Dataset) -> String {
        format!(
            "{}/{}?season={}&league={}",
            self.base_url,
            dataset.endpoint(),
            self.season,
            self.league
        )
    }
}

impl fmt::Debug for ApiSportsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSportsClient")
            .field("base_url", &self.base_url)
            .field("host", &self.host)
            .field("api_key", &"<redacted>")
            .field("season", &self.season)
            .field("league", &self.league)
            .finish()
    }
}

#[async_trait]
impl StatsSource for ApiSportsClient {
    async fn fetch(&self, dataset: Dataset) -> Result<Value, ExtractError> {
        let url = self.request_url(dataset);
        let start = Instant::now();
        debug!(dataset = %dataset, url = %url, "Requesting statistics");

        let response = self
            .http_client
            .get(&url)
            .header(HOST_HEADER, &self.host)
            .header(KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|source| ExtractError::Request { dataset, source })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ExtractError::Request { dataset, source })?;

        if !status.is_success() {
            return Err(ExtractError::Status {
                dataset,
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        let payload = serde_json::from_str(&body)
            .map_err(|source| ExtractError::InvalidJson { dataset, source })?;

        info!(
            dataset = %dataset,
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Fetched statistics"
        );
        Ok(payload)
    }

    fn name(&self) -> &str {
        "api-sports"
    }
}

fn truncate(body: &str, max: usize) -> String {
    match body.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves one canned HTTP/1.1 response on a local port.
    ///
    /// Returns the base URL and a handle resolving to the raw request head.
    async fn serve_once(status_line: &'static str, body: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
            String::from_utf8_lossy(&request).to_string()
        });

        (format!("http://{}", addr), handle)
    }

    fn local_client(base_url: &str) -> ApiSportsClient {
        ApiSportsClient::new(base_url, "v3.football.api-sports.io", "k123", 2021, 61).unwrap()
    }

    fn client() -> ApiSportsClient {
        ApiSportsClient::new(
            "https://v3.football.api-sports.io/",
            "v3.football.api-sports.io",
            "secret-key",
            2021,
            61,
        )
        .unwrap()
    }

    #[test]
    fn test_request_url() {
        let client = client();
        assert_eq!(
            client.request_url(Dataset::TopScorers),
            "https://v3.football.api-sports.io/players/topscorers?season=2021&league=61"
        );
        assert_eq!(
            client.request_url(Dataset::TopAssists),
            "https://v3.football.api-sports.io/players/topassists?season=2021&league=61"
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let debug_str = format!("{:?}", client());
        assert!(debug_str.contains("ApiSportsClient"));
        assert!(!debug_str.contains("secret-key"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("ééééé", 2), "éé...");
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_request_error() {
        let client = ApiSportsClient::new("http://127.0.0.1:1", "localhost", "key", 2021, 61)
            .unwrap();

        let err = client.fetch(Dataset::TopScorers).await.unwrap_err();
        assert!(matches!(
            err,
            ExtractError::Request {
                dataset: Dataset::TopScorers,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_fetch_sends_query_and_auth_headers() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"get":"players/topscorers","response":[{"player":{"name":"Mbappé"}}]}"#.to_string(),
        )
        .await;

        let payload = local_client(&base_url)
            .fetch(Dataset::TopScorers)
            .await
            .unwrap();

        assert_eq!(payload["get"], "players/topscorers");
        assert_eq!(payload["response"][0]["player"]["name"], "Mbappé");

        let request = server.await.unwrap();
        assert!(
            request.starts_with("GET /players/topscorers?season=2021&league=61 HTTP/1.1\r\n"),
            "unexpected request line: {}",
            request
        );
        let head = request.to_lowercase();
        assert!(head.contains("x-rapidapi-host: v3.football.api-sports.io\r\n"));
        assert!(head.contains("x-rapidapi-key: k123\r\n"));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let (base_url, server) = serve_once(
            "500 Internal Server Error",
            r#"{"message":"upstream unavailable"}"#.to_string(),
        )
        .await;

        let err = local_client(&base_url)
            .fetch(Dataset::TopAssists)
            .await
            .unwrap_err();
        server.await.unwrap();

        assert!(err
            .to_string()
            .starts_with("API returned status 500 for players/topassists"));
        match err {
            ExtractError::Status {
                dataset,
                status,
                body,
            } => {
                assert_eq!(dataset, Dataset::TopAssists);
                assert_eq!(status, 500);
                assert!(body.contains("upstream unavailable"));
            }
            other => panic!("expected Status, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_truncates_long_error_body() {
        let (base_url, server) = serve_once("429 Too Many Requests", "x".repeat(2000)).await;

        let err = local_client(&base_url)
            .fetch(Dataset::TopScorers)
            .await
            .unwrap_err();
        server.await.unwrap();

        match err {
            ExtractError::Status { status, body, .. } => {
                assert_eq!(status, 429);
                assert_eq!(body.len(), MAX_ERROR_BODY + "...".len());
            }
            other => panic!("expected Status, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_success_with_non_json_body() {
        let (base_url, server) =
            serve_once("200 OK", "<html>maintenance</html>".to_string()).await;

        let err = local_client(&base_url)
            .fetch(Dataset::TopScorers)
            .await
            .unwrap_err();
        server.await.unwrap();

        assert!(matches!(
            err,
            ExtractError::InvalidJson {
                dataset: Dataset::TopScorers,
                ..
            }
        ));
    }
}
