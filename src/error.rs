//! Error types for the remote search adapter.
//!
//! Recognized failures are carried as [`ServiceError`] values; the
//! [`SearchError`] wrapper adds the two outcomes the transport cannot
//! classify itself: caller cancellation and unexpected transport faults.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::messages;

/// Failure category of a search request, as shown to the user.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    #[default]
    None,
    Network,
    RateLimit,
    Validation,
    Unknown,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::None => "NONE",
            ErrorKind::Network => "NETWORK",
            ErrorKind::RateLimit => "RATE_LIMIT",
            ErrorKind::Validation => "VALIDATION",
            ErrorKind::Unknown => "UNKNOWN",
        }
    }
}

/// A classified failure returned by the search endpoint (or its transport).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ServiceError {
    pub kind: ErrorKind,
    pub message: String,
    /// HTTP status, when the server answered at all.
    pub status: Option<u16>,
    pub rate_limit_reset_at: Option<DateTime<Utc>>,
}

impl ServiceError {
    pub fn rate_limited(reset_at: Option<DateTime<Utc>>) -> Self {
        Self {
            kind: ErrorKind::RateLimit,
            message: messages::RATE_LIMIT.to_string(),
            status: Some(403),
            rate_limit_reset_at: reset_at,
        }
    }

    pub fn validation(message: Option<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: message.unwrap_or_else(|| messages::VALIDATION.to_string()),
            status: Some(422),
            rate_limit_reset_at: None,
        }
    }

    pub fn server(status: u16) -> Self {
        Self {
            kind: ErrorKind::Unknown,
            message: messages::server_error(status),
            status: Some(status),
            rate_limit_reset_at: None,
        }
    }

    /// Network failure; `detail` is the underlying error text when there is one.
    pub fn network(detail: Option<String>) -> Self {
        Self {
            kind: ErrorKind::Network,
            message: detail
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| messages::NETWORK.to_string()),
            status: None,
            rate_limit_reset_at: None,
        }
    }
}

/// Error surface of [`crate::github::UserSearchApi::search_users`].
#[derive(Debug, Error)]
pub enum SearchError {
    /// The caller cancelled the request; never displayed.
    #[error("search cancelled")]
    Cancelled,
    #[error(transparent)]
    Service(#[from] ServiceError),
    /// The transport failed in a way it did not classify.
    #[error("{}", .0.as_deref().unwrap_or(messages::NETWORK))]
    Transport(Option<String>),
}

impl SearchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SearchError::Cancelled)
    }
}
