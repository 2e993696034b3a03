use thiserror::Error;

/// Reasons a single record field could not be interpreted.
///
/// These never escape an aggregator: the affected record is skipped for the
/// computation that needed the value and the error is logged at debug level.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Unparseable date: '{0}'")]
    InvalidDate(String),

    #[error("Unparseable time of day: '{0}'")]
    InvalidTime(String),

    #[error("Unparseable duration: '{0}'")]
    InvalidDuration(String),
}
