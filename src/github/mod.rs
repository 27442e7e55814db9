//! GitHub user search adapter.
//!
//! Declares the record and response shapes of `GET /search/users`, the
//! [`UserSearchApi`] seam consumed by the search controller, and the
//! response classification shared by [`GithubClient`].

pub mod client;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SearchError, ServiceError};
use crate::search::cancel::CancelToken;
use crate::selection::Record;

pub use client::{ClientConfig, GithubClient};

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const GITHUB_JSON: &str = "application/vnd.github+json";
pub const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubUser {
    pub id: u64,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
}

impl Record for GithubUser {
    fn id(&self) -> u64 {
        self.id
    }

    fn with_id(&self, id: u64) -> Self {
        Self { id, ..self.clone() }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    #[serde(default)]
    pub items: Vec<GithubUser>,
}

/// The remote side of a user search.
///
/// Recognized failures come back as [`SearchError::Service`]. When `cancel`
/// fires before the call settles the result must be [`SearchError::Cancelled`],
/// never a network error.
#[async_trait]
pub trait UserSearchApi: Send + Sync {
    async fn search_users(
        &self,
        query: &str,
        cancel: &CancelToken,
    ) -> Result<SearchResponse, SearchError>;
}

pub fn search_url(base_url: &str, query: &str) -> String {
    format!(
        "{}/search/users?q={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(query)
    )
}

/// Parse `x-ratelimit-reset` (unix seconds).
pub fn parse_rate_limit_reset(raw: &str) -> Option<DateTime<Utc>> {
    let secs = raw.trim().parse::<i64>().ok()?;
    DateTime::from_timestamp(secs, 0)
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Message of a 422 response: the body's `message`, else the fixed string.
pub fn validation_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
}

pub fn decode_search_body(body: &[u8]) -> Result<SearchResponse, ServiceError> {
    serde_json::from_slice(body).map_err(|e| ServiceError::network(Some(e.to_string())))
}
