//! reqwest-backed [`UserSearchApi`] implementation.

use async_trait::async_trait;
use reqwest::{Client, header};
use tracing::{debug, warn};

use super::{
    DEFAULT_API_BASE_URL, GITHUB_JSON, RATE_LIMIT_RESET_HEADER, SearchResponse, UserSearchApi,
    decode_search_body, parse_rate_limit_reset, search_url, validation_message,
};
use crate::error::{SearchError, ServiceError};
use crate::search::cancel::CancelToken;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// HTTP client for `GET /search/users`.
///
/// ```rust,no_run
/// use gh_user_search::github::{ClientConfig, GithubClient, UserSearchApi};
/// use gh_user_search::search::cancel::CancelSource;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GithubClient::new(ClientConfig::default())?;
/// let source = CancelSource::new();
/// let response = client.search_users("octocat", &source.token()).await?;
/// println!("{} users", response.total_count);
/// # Ok(())
/// # }
/// ```
pub struct GithubClient {
    config: ClientConfig,
    http: Client,
}

impl GithubClient {
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().user_agent(config.user_agent.clone()).build()?;
        Ok(Self { config, http })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    async fn fetch(&self, query: &str) -> Result<SearchResponse, ServiceError> {
        let url = search_url(&self.config.base_url, query);
        debug!(%url, "GET search/users");
        let response = self
            .http
            .get(&url)
            .header(header::ACCEPT, GITHUB_JSON)
            .send()
            .await
            .map_err(|e| ServiceError::network(Some(e.to_string())))?;

        let status = response.status().as_u16();
        match status {
            403 => {
                let reset_at = response
                    .headers()
                    .get(RATE_LIMIT_RESET_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(parse_rate_limit_reset);
                Err(ServiceError::rate_limited(reset_at))
            }
            422 => {
                let body = response.bytes().await.unwrap_or_default();
                Err(ServiceError::validation(validation_message(&body)))
            }
            s if !(200..300).contains(&s) => Err(ServiceError::server(s)),
            _ => {
                let body = response
                    .bytes()
                    .await
                    .map_err(|e| ServiceError::network(Some(e.to_string())))?;
                decode_search_body(&body)
            }
        }
    }
}

#[async_trait]
impl UserSearchApi for GithubClient {
    async fn search_users(
        &self,
        query: &str,
        cancel: &CancelToken,
    ) -> Result<SearchResponse, SearchError> {
        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(SearchError::Cancelled),
            outcome = self.fetch(query) => outcome,
        };
        match outcome {
            // A failure racing our own cancellation is reported as cancellation.
            Err(_) if cancel.is_cancelled() => Err(SearchError::Cancelled),
            Err(e) => {
                warn!(kind = e.kind.as_str(), status = ?e.status, "search failed: {}", e.message);
                Err(SearchError::Service(e))
            }
            Ok(resp) => Ok(resp),
        }
    }
}
