//! Core query logic for upsearch
//!
//! Resolves account selectors, fans out per-account fetches, filters
//! the combined results, and projects them into the response shape.

pub mod error;
pub mod filter;
pub mod models;

use std::sync::Arc;
use tokio::task::JoinSet;
use upsearch_config::AccountEntry;

pub use error::QueryError;
pub use filter::TransactionFilter;
pub use models::{
    project_transaction, FilterCriteria, ProjectedAttributes, TransactionProjection,
    UNKNOWN_CATEGORY,
};

// Re-export the source seam so callers can supply their own implementation
pub use upsearch_upstream::{
    FetchError, FetchWindow, MoneyAmount, Relationship, ResourceRef, SourceRef,
    TransactionAttributes, TransactionRecord, TransactionRelationships, TransactionSource,
};

/// Selector that fans out to every configured account; the same
/// constant config validation reserves
pub use upsearch_config::ALL_ACCOUNTS;

// ==================== Account Directory ====================

/// Maps configured selector names to Up Bank account ids
#[derive(Debug, Clone, Default)]
pub struct AccountDirectory {
    entries: Vec<AccountEntry>,
}

impl AccountDirectory {
    /// Build a directory from configured accounts, preserving order
    pub fn new(accounts: &[AccountEntry]) -> Self {
        Self {
            entries: accounts.to_vec(),
        }
    }

    /// Selector names in configuration order
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    /// Resolve a selector to the account ids it covers
    ///
    /// "ALL" expands to every configured id, in configuration order.
    /// Unknown selectors and empty ids fail resolution, so no upstream
    /// call is ever made for them.
    pub fn resolve(&self, selector: &str) -> Result<Vec<String>, QueryError> {
        let ids: Vec<String> = if selector == ALL_ACCOUNTS {
            self.entries.iter().map(|e| e.id.clone()).collect()
        } else {
            let id = self
                .entries
                .iter()
                .find(|e| e.name == selector)
                .map(|e| e.id.clone())
                .unwrap_or_default();
            vec![id]
        };

        if ids.iter().any(|id| id.is_empty()) {
            log::warn!("Account selector {:?} did not resolve", selector);
            return Err(QueryError::InvalidAccount {
                selector: selector.to_string(),
            });
        }

        Ok(ids)
    }
}

// ==================== Query Service ====================

/// Executes searches against a transaction source
pub struct QueryService {
    directory: AccountDirectory,
    source: SourceRef,
}

impl QueryService {
    pub fn new(directory: AccountDirectory, source: SourceRef) -> Self {
        Self { directory, source }
    }

    /// Run a search: resolve the selector, fetch every account in
    /// parallel, then filter and project the combined results
    ///
    /// Results keep configuration order across accounts and upstream
    /// order within each account. The first fetch failure fails the
    /// whole search; no partial data is returned.
    pub async fn search(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<TransactionProjection>, QueryError> {
        let account_ids = self.directory.resolve(&criteria.account)?;
        let window = FetchWindow::new(criteria.start_date, criteria.end_date);
        let filter = TransactionFilter::from_criteria(criteria);

        log::info!(
            "Searching {} account(s) for selector {:?}",
            account_ids.len(),
            criteria.account
        );

        let mut tasks: JoinSet<(usize, Result<Vec<TransactionRecord>, FetchError>)> =
            JoinSet::new();
        for (index, account_id) in account_ids.iter().enumerate() {
            let source = Arc::clone(&self.source);
            let account_id = account_id.clone();
            let window = window.clone();
            tasks.spawn(async move {
                (index, source.list_transactions(&account_id, &window).await)
            });
        }

        // Collect pages back into launch order; the early return on a
        // failed fetch drops the set and aborts the remaining tasks
        let mut pages: Vec<Vec<TransactionRecord>> = vec![Vec::new(); account_ids.len()];
        while let Some(joined) = tasks.join_next().await {
            let (index, result) = joined.map_err(|e| QueryError::Task {
                message: e.to_string(),
            })?;
            pages[index] = result?;
        }

        let mut projections = Vec::new();
        for page in pages {
            for record in page {
                if filter.matches(&record) {
                    projections.push(models::project_transaction(record));
                }
            }
        }

        log::debug!("Search matched {} transaction(s)", projections.len());
        Ok(projections)
    }
}
