//! Error types for upsearch-api

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(std::io::Error),
}
