//! HTTP API server for transaction search
//!
//! Routes:
//! - POST /api/search: filtered transaction search
//! - GET /api/accounts: configured account names
//! - GET /api/health: health check

pub mod error;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use upsearch_config::Config;
use upsearch_core::QueryService;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<QueryService>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::accounts::api_accounts;
    use routes::search::api_search;

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/accounts", get(api_accounts))
        .route("/api/search", post(api_search))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until the process is
/// stopped.
pub async fn start_server(config: Config, service: Arc<QueryService>) -> Result<(), ApiError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { service, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| ApiError::Bind {
            addr: addr.clone(),
            source: e,
        })?;

    log::info!("Starting upsearch server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - POST /api/search (Transaction search)");
    log::info!("  - GET  /api/accounts (Configured account names)");
    log::info!("  - GET  /api/health (Health check)");

    axum::serve(listener, router).await.map_err(ApiError::Serve)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use upsearch_config::AccountEntry;
    use upsearch_core::{
        AccountDirectory, FetchError, FetchWindow, MoneyAmount, TransactionAttributes,
        TransactionRecord, TransactionRelationships, TransactionSource,
    };

    /// Source that serves the same canned page for every account, or
    /// fails every fetch with the given status
    struct StubSource {
        records: Vec<TransactionRecord>,
        fail_with: Option<u16>,
    }

    #[async_trait]
    impl TransactionSource for StubSource {
        async fn list_transactions(
            &self,
            account_id: &str,
            _window: &FetchWindow,
        ) -> Result<Vec<TransactionRecord>, FetchError> {
            match self.fail_with {
                Some(status) => Err(FetchError::RetrievalFailed {
                    account_id: account_id.to_string(),
                    status,
                }),
                None => Ok(self.records.clone()),
            }
        }
    }

    fn record(id: &str, description: &str) -> TransactionRecord {
        TransactionRecord {
            id: id.to_string(),
            attributes: TransactionAttributes {
                description: description.to_string(),
                amount: MoneyAmount {
                    currency_code: "AUD".to_string(),
                    value: "-45.80".to_string(),
                    value_in_base_units: -4580,
                },
                settled_at: Some("2024-01-15T09:30:00+10:00".to_string()),
                category: None,
                account: None,
            },
            relationships: TransactionRelationships::default(),
        }
    }

    fn test_router(source: StubSource) -> Router {
        let config = Config {
            accounts: vec![
                AccountEntry {
                    name: "GROCERIES".to_string(),
                    id: "acc-groceries".to_string(),
                },
                AccountEntry {
                    name: "RENT".to_string(),
                    id: "acc-rent".to_string(),
                },
            ],
            ..Config::default()
        };
        let directory = AccountDirectory::new(&config.accounts);
        let service = Arc::new(QueryService::new(directory, Arc::new(source)));
        create_router(AppState { service, config })
    }

    fn source_with(records: Vec<TransactionRecord>) -> StubSource {
        StubSource {
            records,
            fail_with: None,
        }
    }

    fn failing_source(status: u16) -> StubSource {
        StubSource {
            records: Vec::new(),
            fail_with: Some(status),
        }
    }

    async fn get_request(router: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    async fn post_search(router: Router, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/search")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn search_body(account: &str) -> String {
        json!({
            "startDate": "2024-01-01",
            "endDate": "2024-01-31",
            "account": account
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = get_request(test_router(source_with(Vec::new())), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"OK");
    }

    #[tokio::test]
    async fn test_accounts_lists_configured_names() {
        let (status, body) =
            get_request(test_router(source_with(Vec::new())), "/api/accounts").await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({ "data": ["GROCERIES", "RENT"] }));
    }

    #[tokio::test]
    async fn test_search_rejects_unparseable_body() {
        let router = test_router(source_with(Vec::new()));
        let (status, value) = post_search(router, "definitely not json").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(value, json!({ "error": "Failed to process request" }));
    }

    #[tokio::test]
    async fn test_search_rejects_non_utf8_body() {
        let router = test_router(source_with(Vec::new()));
        let request = Request::builder()
            .method("POST")
            .uri("/api/search")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(vec![0xff, 0xfe, 0x7b]))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, json!({ "error": "Failed to process request" }));
    }

    #[tokio::test]
    async fn test_search_requires_all_fields() {
        let router = test_router(source_with(Vec::new()));
        let body = json!({ "startDate": "2024-01-01", "endDate": "2024-01-31" }).to_string();
        let (status, value) = post_search(router, &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value, json!({ "error": "Missing required fields" }));
    }

    #[tokio::test]
    async fn test_search_rejects_empty_required_field() {
        let router = test_router(source_with(Vec::new()));
        let body = json!({
            "startDate": "",
            "endDate": "2024-01-31",
            "account": "ALL"
        })
        .to_string();
        let (status, value) = post_search(router, &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value, json!({ "error": "Missing required fields" }));
    }

    #[tokio::test]
    async fn test_search_reports_unknown_account_in_200() {
        let router = test_router(source_with(Vec::new()));
        let (status, value) = post_search(router, &search_body("MYSTERY")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value, json!({ "error": "Invalid account selected" }));
    }

    #[tokio::test]
    async fn test_search_reports_bad_date_in_200() {
        let router = test_router(source_with(Vec::new()));
        let body = json!({
            "startDate": "January 1st",
            "endDate": "2024-01-31",
            "account": "ALL"
        })
        .to_string();
        let (status, value) = post_search(router, &body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value, json!({ "error": "Failed to process the request" }));
    }

    #[tokio::test]
    async fn test_search_reports_upstream_failure_in_200() {
        let router = test_router(failing_source(503));
        let (status, value) = post_search(router, &search_body("GROCERIES")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value, json!({ "error": "Failed to process the request" }));
    }

    #[tokio::test]
    async fn test_search_returns_projected_data() {
        let router = test_router(source_with(vec![record("txn-1", "Coles")]));
        let (status, value) = post_search(router, &search_body("GROCERIES")).await;
        assert_eq!(status, StatusCode::OK);

        let data = value["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["id"], "txn-1");
        assert_eq!(data[0]["attributes"]["description"], "Coles");
        assert_eq!(data[0]["attributes"]["amount"]["currencyCode"], "AUD");
        assert_eq!(data[0]["relationships"]["category"]["data"]["id"], "Unknown");
    }

    #[tokio::test]
    async fn test_search_all_combines_accounts() {
        // The stub serves the same page for each account, so "ALL"
        // over two accounts doubles it
        let router = test_router(source_with(vec![record("txn-1", "Coles")]));
        let (status, value) = post_search(router, &search_body("ALL")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_search_applies_description_filter() {
        let router = test_router(source_with(vec![
            record("txn-1", "Coles"),
            record("txn-2", "Uber Trip"),
        ]));
        let body = json!({
            "startDate": "2024-01-01",
            "endDate": "2024-01-31",
            "account": "GROCERIES",
            "description": "uber"
        })
        .to_string();
        let (status, value) = post_search(router, &body).await;
        assert_eq!(status, StatusCode::OK);

        let data = value["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["id"], "txn-2");
    }
}
