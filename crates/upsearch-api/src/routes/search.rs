//! Transaction search endpoint

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use upsearch_core::FilterCriteria;

use crate::AppState;

/// Search request body
///
/// startDate, endDate and account are required; the rest are optional
/// filters. The required strings default to empty when missing so the
/// handler can answer with a 400 instead of a deserialization error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub min_amount: Option<Decimal>,
    #[serde(default)]
    pub max_amount: Option<Decimal>,
}

impl SearchRequest {
    fn missing_required_fields(&self) -> bool {
        self.start_date.is_empty() || self.end_date.is_empty() || self.account.is_empty()
    }

    fn into_criteria(self) -> Result<FilterCriteria, chrono::ParseError> {
        let start_date = NaiveDate::parse_from_str(&self.start_date, "%Y-%m-%d")?;
        let end_date = NaiveDate::parse_from_str(&self.end_date, "%Y-%m-%d")?;
        Ok(FilterCriteria {
            account: self.account,
            start_date: Some(start_date),
            end_date: Some(end_date),
            description: self.description,
            category: self.category,
            min_amount: self.min_amount,
            max_amount: self.max_amount,
        })
    }
}

/// POST /api/search
///
/// The body is taken as raw bytes so any malformed payload, non-UTF-8
/// included, maps to the 500 error envelope rather than an extractor
/// rejection. Failures after validation are reported inside a 200
/// response with an error field; existing clients read that shape.
pub async fn api_search(
    state: axum::extract::State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let request: SearchRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            log::warn!("Unreadable search request body: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to process request" })),
            );
        }
    };

    if request.missing_required_fields() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing required fields" })),
        );
    }

    let criteria = match request.into_criteria() {
        Ok(criteria) => criteria,
        Err(e) => {
            log::warn!("Rejected search request with a bad date: {}", e);
            return (
                StatusCode::OK,
                Json(json!({ "error": "Failed to process the request" })),
            );
        }
    };

    match state.service.search(&criteria).await {
        Ok(transactions) => (StatusCode::OK, Json(json!({ "data": transactions }))),
        Err(e) => {
            log::error!("Search failed: {}", e);
            (StatusCode::OK, Json(json!({ "error": e.client_message() })))
        }
    }
}
