//! Error types for upsearch-upstream

use thiserror::Error;

/// Errors raised while fetching transactions from the Up Bank API
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure from the HTTP client
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Failed to retrieve data: account {account_id} returned HTTP {status}")]
    RetrievalFailed { account_id: String, status: u16 },

    /// The response body did not contain an array of transactions
    #[error("Invalid data structure in response for account {account_id}")]
    InvalidStructure { account_id: String },
}
