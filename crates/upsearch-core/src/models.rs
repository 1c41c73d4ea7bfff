//! Query criteria and the trimmed transaction projection

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use upsearch_upstream::{MoneyAmount, TransactionRecord};

/// Category id reported when a transaction has none assigned
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Everything a search request can constrain
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Account selector: "ALL" or a configured account name
    pub account: String,
    /// Inclusive settlement window start
    pub start_date: Option<NaiveDate>,
    /// Inclusive settlement window end
    pub end_date: Option<NaiveDate>,
    /// Description fragment; case and whitespace are ignored
    pub description: Option<String>,
    /// Comma-separated category ids
    pub category: Option<String>,
    /// Lower bound on the transaction amount
    pub min_amount: Option<Decimal>,
    /// Upper bound on the transaction amount
    pub max_amount: Option<Decimal>,
}

/// Trimmed transaction shape returned to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionProjection {
    pub id: String,
    pub attributes: ProjectedAttributes,
    pub relationships: ProjectedRelationships,
}

/// Attributes carried through from the upstream record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedAttributes {
    pub description: String,
    pub amount: MoneyAmount,
    pub settled_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectedRelationships {
    pub category: ProjectedCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectedCategory {
    pub data: CategoryRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: String,
}

/// Project a full transaction record down to the response shape
///
/// An absent or empty category id is reported as "Unknown".
pub fn project_transaction(record: TransactionRecord) -> TransactionProjection {
    let category_id = record
        .category_id()
        .filter(|id| !id.is_empty())
        .unwrap_or(UNKNOWN_CATEGORY)
        .to_string();

    TransactionProjection {
        id: record.id,
        attributes: ProjectedAttributes {
            description: record.attributes.description,
            amount: record.attributes.amount,
            settled_at: record.attributes.settled_at,
            category: record.attributes.category,
            account: record.attributes.account,
        },
        relationships: ProjectedRelationships {
            category: ProjectedCategory {
                data: CategoryRef { id: category_id },
            },
        },
    }
}
