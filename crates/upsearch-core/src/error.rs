//! Error types for upsearch-core

use thiserror::Error;
use upsearch_upstream::FetchError;

/// Errors raised while executing a search
#[derive(Error, Debug)]
pub enum QueryError {
    /// The account selector did not resolve to usable account ids
    #[error("Invalid account selected: {selector}")]
    InvalidAccount { selector: String },

    /// An upstream fetch failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A fetch task was cancelled or panicked
    #[error("Fetch task failed: {message}")]
    Task { message: String },
}

impl QueryError {
    /// Stable message shown to API callers; details stay in the logs
    pub fn client_message(&self) -> &'static str {
        match self {
            QueryError::InvalidAccount { .. } => "Invalid account selected",
            QueryError::Fetch(_) | QueryError::Task { .. } => "Failed to process the request",
        }
    }
}
