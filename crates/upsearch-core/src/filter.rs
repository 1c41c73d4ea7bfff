//! Transaction matching predicates
//!
//! All three predicates are optional; a transaction must satisfy every
//! one that is present.

use rust_decimal::Decimal;
use upsearch_upstream::TransactionRecord;

use crate::models::FilterCriteria;

/// Compiled form of the optional filter criteria
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    description: Option<String>,
    categories: Option<Vec<String>>,
    min_amount: Option<Decimal>,
    max_amount: Option<Decimal>,
}

impl TransactionFilter {
    /// Build a filter from search criteria
    ///
    /// The category filter is split on commas here. A present filter
    /// whose segments are all empty keeps an empty target set and
    /// matches no transaction at all.
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        let description = criteria.description.as_ref().map(|d| normalize(d));
        let categories = criteria.category.as_ref().map(|c| {
            c.split(',')
                .filter(|segment| !segment.is_empty())
                .map(|segment| segment.to_string())
                .collect()
        });

        Self {
            description,
            categories,
            min_amount: criteria.min_amount,
            max_amount: criteria.max_amount,
        }
    }

    /// Check whether a transaction passes every present predicate
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        self.matches_description(record)
            && self.matches_category(record)
            && self.matches_amount(record)
    }

    fn matches_description(&self, record: &TransactionRecord) -> bool {
        match &self.description {
            Some(needle) => normalize(&record.attributes.description).contains(needle.as_str()),
            None => true,
        }
    }

    /// A transaction matches when its category or parent category id
    /// is in the target set
    fn matches_category(&self, record: &TransactionRecord) -> bool {
        match &self.categories {
            Some(targets) => {
                let matches_id =
                    |id: &str| targets.iter().any(|target| target == id);
                record.category_id().map_or(false, matches_id)
                    || record.parent_category_id().map_or(false, matches_id)
            }
            None => true,
        }
    }

    fn matches_amount(&self, record: &TransactionRecord) -> bool {
        let value = match record.attributes.amount.value.parse::<Decimal>() {
            Ok(value) => value,
            // An unparseable amount is never filtered out
            Err(_) => return true,
        };

        self.min_amount.map_or(true, |min| value >= min)
            && self.max_amount.map_or(true, |max| value <= max)
    }
}

/// Strip all whitespace and lowercase for description comparison
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}
