//! Route handlers organized by resource
//!
//! - routes::search: filtered transaction search
//! - routes::accounts: configured account names

pub mod accounts;
pub mod search;
