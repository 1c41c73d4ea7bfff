//! Wire types for the Up Bank transactions endpoint
//!
//! Only the fields the search projection needs are modeled; everything
//! else in the API payload is ignored during deserialization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Settlement-date window applied to a transactions listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchWindow {
    /// Inclusive start date; expands to T00:00:00Z
    pub since: Option<NaiveDate>,
    /// Inclusive end date; expands to T23:59:59Z
    pub until: Option<NaiveDate>,
}

impl FetchWindow {
    pub fn new(since: Option<NaiveDate>, until: Option<NaiveDate>) -> Self {
        Self { since, until }
    }

    /// RFC 3339 value for the filter[since] query parameter
    pub fn since_param(&self) -> Option<String> {
        self.since.map(|d| format!("{}T00:00:00Z", d))
    }

    /// RFC 3339 value for the filter[until] query parameter
    pub fn until_param(&self) -> Option<String> {
        self.until.map(|d| format!("{}T23:59:59Z", d))
    }
}

/// A single transaction resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: String,
    pub attributes: TransactionAttributes,
    #[serde(default)]
    pub relationships: TransactionRelationships,
}

impl TransactionRecord {
    /// Category id assigned to the transaction, if any
    pub fn category_id(&self) -> Option<&str> {
        self.relationships
            .category
            .as_ref()
            .and_then(|r| r.data.as_ref())
            .map(|d| d.id.as_str())
    }

    /// Parent category id, if any
    pub fn parent_category_id(&self) -> Option<&str> {
        self.relationships
            .parent_category
            .as_ref()
            .and_then(|r| r.data.as_ref())
            .map(|d| d.id.as_str())
    }
}

/// Transaction attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionAttributes {
    pub description: String,
    pub amount: MoneyAmount,
    /// Settlement timestamp; null while the transaction is held
    #[serde(default)]
    pub settled_at: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub account: Option<String>,
}

/// Monetary amount as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyAmount {
    pub currency_code: String,
    /// Signed decimal string, e.g. "-12.50"
    pub value: String,
    pub value_in_base_units: i64,
}

/// Category links attached to a transaction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRelationships {
    #[serde(default)]
    pub category: Option<Relationship>,
    #[serde(default)]
    pub parent_category: Option<Relationship>,
}

/// A single relationship; data is null when no category is assigned
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<ResourceRef>,
}

/// Reference to a related resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRef {
    pub id: String,
}
