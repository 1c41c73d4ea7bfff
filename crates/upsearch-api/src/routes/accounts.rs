//! Account listing endpoint

use axum::Json;
use serde_json::{json, Value};

use crate::AppState;

/// GET /api/accounts
///
/// Lists the configured account selector names in configuration
/// order. These are the values the search endpoint accepts alongside
/// "ALL".
pub async fn api_accounts(state: axum::extract::State<AppState>) -> Json<Value> {
    let names = state.config.account_names();
    Json(json!({ "data": names }))
}
