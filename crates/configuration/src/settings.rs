use crate::error::ConfigError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::fmt::Write;

/// The root configuration structure for the journal.
///
/// Every section may be omitted from `config.toml`; the defaults reproduce the
/// behaviour of a freshly installed journal.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub journal: JournalSettings,
    #[serde(default)]
    pub charts: ChartSettings,
    #[serde(default)]
    pub defaults: DefaultLabels,
}

/// Account-level settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct JournalSettings {
    /// The fixed baseline every account balance is computed from.
    pub starting_balance: Decimal,
    /// ISO code used when formatting currency amounts (e.g., "USD").
    pub currency: String,
}

/// Parameters for the chart-ready series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Maximum absolute jitter, in hours, added to time-of-day scatter points.
    pub time_jitter_hours: f64,
    /// Maximum absolute jitter, in minutes, added to duration scatter points.
    pub duration_jitter_minutes: f64,
    /// `chrono` format string for the daily performance labels.
    pub daily_label_format: String,
}

/// Labels reported as "most used" when there is nothing to count.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DefaultLabels {
    pub strategy: String,
    pub pair: String,
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            starting_balance: dec!(100000),
            currency: "USD".to_string(),
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            time_jitter_hours: 0.15,
            duration_jitter_minutes: 0.5,
            daily_label_format: "%d-%b-%y".to_string(),
        }
    }
}

impl Default for DefaultLabels {
    fn default() -> Self {
        Self {
            strategy: "Strategy 1".to_string(),
            pair: "XAUUSD".to_string(),
        }
    }
}

impl Config {
    /// Rejects settings that would make the reports meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.journal.starting_balance.is_sign_negative() {
            return Err(ConfigError::ValidationError(
                "journal.starting_balance must not be negative".to_string(),
            ));
        }
        if !is_jitter_amplitude(self.charts.time_jitter_hours) {
            return Err(ConfigError::ValidationError(
                "charts.time_jitter_hours must be a finite, non-negative number".to_string(),
            ));
        }
        if !is_jitter_amplitude(self.charts.duration_jitter_minutes) {
            return Err(ConfigError::ValidationError(
                "charts.duration_jitter_minutes must be a finite, non-negative number".to_string(),
            ));
        }
        // Time specifiers such as `%H` parse fine but fail when applied to a bare date.
        let mut sample = String::new();
        if write!(sample, "{}", NaiveDate::MIN.format(&self.charts.daily_label_format)).is_err() {
            return Err(ConfigError::ValidationError(format!(
                "charts.daily_label_format `{}` is not a usable date format",
                self.charts.daily_label_format
            )));
        }
        if self.journal.currency.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "journal.currency must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_jitter_amplitude(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
