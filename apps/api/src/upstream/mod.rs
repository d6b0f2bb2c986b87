/// Upstream client: the single point of entry for calls to the profile API.
///
/// Route handlers depend on the [`ProfileSource`] trait, never on `reqwest`
/// directly; `AppState` carries an `Arc<dyn ProfileSource>` so tests can swap in
/// a fake.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::directory::DirectoryEntry;
use crate::genome::raw::RawProfileDocument;

pub const USER_AGENT: &str = "Torre-Radar/1.0";
/// Minimum page size asked of the search endpoint. Hits without a username are
/// dropped after the fact, so the page is larger than what callers keep.
pub const SEARCH_PAGE_SIZE: usize = 10;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("profile not found")]
    NotFound,

    #[error("upstream rate limit exceeded")]
    RateLimited,

    #[error("upstream responded with status {0}")]
    Status(u16),

    #[error("upstream request timed out")]
    Timeout,

    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("failed to decode upstream response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout
        } else if e.is_decode() {
            UpstreamError::Decode(e.to_string())
        } else {
            UpstreamError::Http(e)
        }
    }
}

/// Where raw profile documents come from.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_profile(&self, username: &str) -> Result<RawProfileDocument, UpstreamError>;

    async fn search_people(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<DirectoryEntry>, UpstreamError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Value>,
}

#[derive(Clone)]
pub struct GenomeClient {
    client: Client,
    base_url: String,
}

impl GenomeClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(UpstreamError::Http)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn check_status(status: StatusCode) -> Result<(), UpstreamError> {
        match status {
            s if s.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(UpstreamError::NotFound),
            StatusCode::TOO_MANY_REQUESTS => Err(UpstreamError::RateLimited),
            s => Err(UpstreamError::Status(s.as_u16())),
        }
    }
}

#[async_trait]
impl ProfileSource for GenomeClient {
    async fn fetch_profile(&self, username: &str) -> Result<RawProfileDocument, UpstreamError> {
        let url = format!("{}/genome/bios/{username}", self.base_url);
        debug!("Fetching profile from {url}");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;
        Self::check_status(response.status())?;

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| UpstreamError::Decode(e.to_string()))
    }

    async fn search_people(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<DirectoryEntry>, UpstreamError> {
        let url = format!("{}/people/search", self.base_url);
        debug!("Searching people for '{query}'");

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .json(&search_request(query, limit))
            .send()
            .await?;
        Self::check_status(response.status())?;

        let body = response.text().await?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| UpstreamError::Decode(e.to_string()))?;

        Ok(usable_hits(&parsed.results, limit))
    }
}

fn search_request(query: &str, limit: usize) -> Value {
    json!({
        "query": query,
        "limit": limit.max(SEARCH_PAGE_SIZE),
        "offset": 0,
        "filters": { "name": query, "username": query }
    })
}

/// First `limit` hits that carry a username or public id.
fn usable_hits(results: &[Value], limit: usize) -> Vec<DirectoryEntry> {
    results
        .iter()
        .filter_map(DirectoryEntry::from_search_result)
        .take(limit)
        .collect()
}
