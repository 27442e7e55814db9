//! Library crate for gh-user-search.
//!
//! This crate exposes the building blocks of the TUI:
//! - GitHub user search adapter (`github`)
//! - Debounced, cancelable search controller (`search`)
//! - Selection and bulk-edit store over the results (`selection`)
//! - Error types and user-visible messages (`error`, `messages`)
//! - Application state, config and event loop (`app`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `gh-user-search` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod error;
pub mod github;
pub mod messages;
pub mod search;
pub mod selection;
pub mod ui;

pub use error::{ErrorKind, SearchError, ServiceError};
pub use search::{SearchConfig, SearchController, SearchState};
pub use selection::{Record, SelectionStore};
