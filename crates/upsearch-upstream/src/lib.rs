//! Up Bank API client for upsearch
//!
//! Fetches per-account transaction listings over HTTPS and exposes
//! them behind the [`TransactionSource`] trait so the query layer can
//! be driven without a network.

use async_trait::async_trait;
use std::sync::Arc;

pub mod client;
pub mod error;
pub mod models;

pub use client::UpBankClient;
pub use error::FetchError;

// Re-export commonly used types
pub use models::{
    FetchWindow, MoneyAmount, Relationship, ResourceRef, TransactionAttributes,
    TransactionRecord, TransactionRelationships,
};

// ==================== Source Trait ====================

/// Source reference type
pub type SourceRef = Arc<dyn TransactionSource>;

/// Trait for transaction providers
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// List transactions for one account within a settlement window
    async fn list_transactions(
        &self,
        account_id: &str,
        window: &FetchWindow,
    ) -> Result<Vec<TransactionRecord>, FetchError>;
}
