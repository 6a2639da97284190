//! Error kinds for the search boundary (spec §7).
//!
//! The oracle and hash/mixer primitives are pure integer arithmetic and
//! have no recoverable error modes; only request validation and
//! cancellation produce errors here.

use thiserror::Error;

/// Errors surfaced by [`crate::search::search`].
#[derive(Debug, Error, Eq, PartialEq)]
pub enum SearchError {
    /// The request failed validation before any work started.
    #[error("invalid search request: {0}")]
    InvalidRequest(String),
}
