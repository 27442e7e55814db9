//! Debounced, cancelable remote user search.
//!
//! [`SearchController`] owns one [`SearchState`] and is driven from a single
//! thread: [`SearchController::set_query`] on every query edit and
//! [`SearchController::poll`] once per event-loop tick. Requests run on the
//! tokio runtime; their outcomes travel back over a channel tagged with the
//! generation of the query that issued them, and anything not belonging to
//! the current generation is dropped.

pub mod cancel;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::{ErrorKind, SearchError, ServiceError};
use crate::github::{GithubUser, SearchResponse, UserSearchApi};
use cancel::CancelSource;

pub const DEFAULT_MIN_QUERY_LENGTH: usize = 2;
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub min_query_length: usize,
    pub debounce: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_length: DEFAULT_MIN_QUERY_LENGTH,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl SearchConfig {
    /// Whether `query` is long enough to be sent.
    pub fn accepts(&self, query: &str) -> bool {
        !query.is_empty() && query.trim().chars().count() >= self.min_query_length
    }
}

/// Display-ready view of the latest search.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchState {
    /// Replaced by a new allocation whenever a new result list arrives.
    pub users: Arc<Vec<GithubUser>>,
    pub total_count: u64,
    pub loading: bool,
    pub error_kind: ErrorKind,
    pub error_message: Option<String>,
    pub is_empty: bool,
    pub is_rate_limited: bool,
    pub rate_limit_reset_at: Option<DateTime<Utc>>,
}

impl SearchState {
    /// Defaults, carrying the sticky rate-limit memory over from `self`.
    fn reset(&self) -> Self {
        Self {
            is_rate_limited: self.is_rate_limited,
            rate_limit_reset_at: self.rate_limit_reset_at,
            ..Self::default()
        }
    }

    fn begin_loading(&mut self) {
        self.loading = true;
        self.error_kind = ErrorKind::None;
        self.error_message = None;
        self.is_empty = false;
    }

    fn apply_success(&mut self, response: SearchResponse) {
        self.loading = false;
        self.is_empty = response.items.is_empty();
        self.users = Arc::new(response.items);
        self.total_count = response.total_count;
        self.error_kind = ErrorKind::None;
        self.error_message = None;
    }

    fn apply_failure(&mut self, error: ServiceError) {
        self.loading = false;
        self.error_kind = error.kind;
        self.error_message = Some(error.message);
        self.is_rate_limited = error.kind == ErrorKind::RateLimit;
        self.rate_limit_reset_at = error.rate_limit_reset_at;
    }

    fn apply_transport_failure(&mut self, detail: Option<String>) {
        let error = ServiceError::network(detail);
        self.loading = false;
        self.error_kind = error.kind;
        self.error_message = Some(error.message);
    }
}

struct Completion {
    generation: u64,
    outcome: Result<SearchResponse, SearchError>,
}

pub struct SearchController {
    api: Arc<dyn UserSearchApi>,
    config: SearchConfig,
    runtime: Handle,
    query: String,
    state: SearchState,
    generation: u64,
    pending: Option<CancelSource>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl SearchController {
    /// Must be called from within a tokio runtime.
    pub fn new(api: Arc<dyn UserSearchApi>, config: SearchConfig) -> Self {
        Self::with_runtime(api, config, Handle::current())
    }

    pub fn with_runtime(api: Arc<dyn UserSearchApi>, config: SearchConfig, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            config,
            runtime,
            query: String::new(),
            state: SearchState::default(),
            generation: 0,
            pending: None,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Make `query` the current query.
    pub fn set_query(&mut self, query: &str) {
        if query == self.query {
            return;
        }
        self.query = query.to_string();
        self.cancel_pending();
        self.generation += 1;

        if !self.config.accepts(query) {
            self.state = self.state.reset();
            return;
        }

        self.state.begin_loading();
        let source = CancelSource::new();
        let token = source.token();
        self.pending = Some(source);

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let generation = self.generation;
        let debounce = self.config.debounce;
        let query = self.query.clone();
        debug!(generation, %query, "search scheduled");

        self.runtime.spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(debounce) => {}
            }
            debug!(generation, %query, "search issued");
            let outcome = api.search_users(&query, &token).await;
            if token.is_cancelled() {
                debug!(generation, "search superseded");
                return;
            }
            let _ = tx.send(Completion { generation, outcome });
        });
    }

    /// Apply finished searches. Returns whether the state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.rx.try_recv() {
            changed |= self.apply(completion);
        }
        changed
    }

    fn apply(&mut self, completion: Completion) -> bool {
        if completion.generation != self.generation {
            debug!(
                generation = completion.generation,
                current = self.generation,
                "dropping stale search outcome"
            );
            return false;
        }
        self.pending = None;
        match completion.outcome {
            Ok(response) => {
                debug!(total = response.total_count, items = response.items.len(), "search succeeded");
                self.state.apply_success(response);
            }
            Err(SearchError::Cancelled) => return false,
            Err(SearchError::Service(error)) => self.state.apply_failure(error),
            Err(SearchError::Transport(detail)) => {
                warn!(detail = ?detail, "search transport failed");
                self.state.apply_transport_failure(detail);
            }
        }
        true
    }

    fn cancel_pending(&mut self) {
        if let Some(source) = self.pending.take() {
            source.cancel();
        }
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
