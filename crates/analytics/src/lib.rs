//! # Trade Journal Analytics Engine
//!
//! This crate turns the raw, append-only list of journal records into the
//! aggregate statistics and chart-ready series consumed by every report view.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of storage,
//!   rendering or any other external system.
//! - **Stateless Calculation:** The `AnalyticsEngine` keeps no state between calls.
//!   Each call filters the records it is given and recomputes from scratch.
//! - **Graceful Degradation:** Nothing here fails. A record whose date, time or
//!   duration cannot be parsed is left out of the computation that needed the
//!   value and reported through `tracing` at debug level.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: The facade combining filtering with every aggregator.
//! - `RecordFilter`: Date range, account and strategy narrowing.
//! - `PerformanceReport`: The canonical performance summary.
//! - `JitterSource`: The injectable randomness behind the scatter series.

// Declare the modules that constitute this crate.
pub mod balance;
pub mod breakdown;
pub mod calendar;
pub mod engine;
pub mod error;
pub mod filter;
pub mod format;
pub mod parsers;
pub mod report;
pub mod scatter;

// Re-export the key components to create a clean, public-facing API.
pub use breakdown::DirectionBreakdown;
pub use calendar::{DaySummary, MonthSummary, WeekSummary};
pub use engine::{AnalyticsEngine, longest_streak};
pub use error::AnalyticsError;
pub use filter::RecordFilter;
pub use report::{
    AccountSummary, DailyPerformance, DashboardReport, MonthlyPl, OutcomeShares, PerformanceReport,
    ScatterPoint,
};
pub use scatter::{JitterSource, NoJitter, UniformJitter};
