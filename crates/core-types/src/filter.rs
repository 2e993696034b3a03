use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The sentinel account name that disables account filtering.
pub const ALL_ACCOUNTS: &str = "All";

/// An inclusive date range as entered by the user.
///
/// Bounds are kept as raw strings; an empty bound is open-ended. A bound that
/// does not parse matches no record at all.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    #[serde(rename = "startDate")]
    pub start: String,
    #[serde(rename = "endDate")]
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(start.format("%Y-%m-%d").to_string(), end.format("%Y-%m-%d").to_string())
    }
}

/// Restricts records to a single account, or lets every account through.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccountFilter {
    #[default]
    All,
    Named(String),
}

impl AccountFilter {
    pub fn matches(&self, account: &str) -> bool {
        match self {
            AccountFilter::All => true,
            AccountFilter::Named(name) => name == account,
        }
    }
}

impl From<&str> for AccountFilter {
    fn from(name: &str) -> Self {
        if name == ALL_ACCOUNTS {
            AccountFilter::All
        } else {
            AccountFilter::Named(name.to_string())
        }
    }
}

impl From<Option<&str>> for AccountFilter {
    fn from(name: Option<&str>) -> Self {
        name.map(AccountFilter::from).unwrap_or_default()
    }
}
