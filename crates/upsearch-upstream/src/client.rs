//! HTTP client for the Up Bank API

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client as HttpClient;
use upsearch_config::UpstreamConfig;

use crate::error::FetchError;
use crate::models::{FetchWindow, TransactionRecord};
use crate::TransactionSource;

/// Base URL of the production Up Bank API
pub const DEFAULT_BASE_URL: &str = "https://api.up.com.au/api/v1";

/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Client for the Up Bank transactions endpoint
///
/// Fetches a single page of up to `page_size` transactions per
/// account; following `links.next` for older pages is not implemented.
#[derive(Debug, Clone)]
pub struct UpBankClient {
    http_client: HttpClient,
    base_url: String,
    token: String,
    page_size: u32,
}

impl UpBankClient {
    /// Create a new client against the production API
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client with a custom base URL (useful for testing)
    pub fn with_base_url(token: String, base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
            token,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Create a client from upstream settings
    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: config.base_url.clone(),
            token: config.bearer_token(),
            page_size: config.page_size,
        }
    }

    fn transactions_url(&self, account_id: &str) -> String {
        format!("{}/accounts/{}/transactions", self.base_url, account_id)
    }

    fn query_params(&self, window: &FetchWindow) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(since) = window.since_param() {
            params.push(("filter[since]", since));
        }
        if let Some(until) = window.until_param() {
            params.push(("filter[until]", until));
        }
        params.push(("page[size]", self.page_size.to_string()));
        params
    }
}

#[async_trait]
impl TransactionSource for UpBankClient {
    async fn list_transactions(
        &self,
        account_id: &str,
        window: &FetchWindow,
    ) -> Result<Vec<TransactionRecord>, FetchError> {
        let url = self.transactions_url(account_id);
        let params = self.query_params(window);

        log::debug!("Fetching transactions for account {} from {}", account_id, url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, "application/json")
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!(
                "Upstream rejected transaction listing for account {}: HTTP {}",
                account_id,
                status.as_u16()
            );
            log::debug!("Rejection body for account {}: {}", account_id, body);
            return Err(FetchError::RetrievalFailed {
                account_id: account_id.to_string(),
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        extract_records(account_id, body)
    }
}

/// Pull the transaction array out of a listing response body
fn extract_records(
    account_id: &str,
    mut body: serde_json::Value,
) -> Result<Vec<TransactionRecord>, FetchError> {
    match body.get_mut("data") {
        Some(data) if data.is_array() => serde_json::from_value(data.take()).map_err(|e| {
            log::error!("Malformed transaction record for account {}: {}", account_id, e);
            FetchError::InvalidStructure {
                account_id: account_id.to_string(),
            }
        }),
        _ => Err(FetchError::InvalidStructure {
            account_id: account_id.to_string(),
        }),
    }
}
