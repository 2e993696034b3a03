//! # Journal Core Types
//!
//! The shared vocabulary of the workspace: journal records, their enums and the
//! filter parameters every report is computed against. This crate has no logic
//! beyond constructors and small predicates.

pub mod enums;
pub mod error;
pub mod filter;
pub mod record;

// Re-export the core types to provide a clean public API.
pub use enums::{Direction, RecordKind, TradeStatus};
pub use error::CoreError;
pub use filter::{ALL_ACCOUNTS, AccountFilter, DateRange};
pub use record::TradeRecord;
