use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The canonical performance summary of a set of trades.
///
/// This struct is the main output of the `AnalyticsEngine` and is what every
/// report view renders its statistics from. Every field has a defined value for
/// an empty input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    // I. Trade Counts
    pub total_trades: usize,
    pub total_wins: usize,
    pub total_losses: usize,
    pub total_breakevens: usize,
    pub total_open: usize,
    pub long_trades: usize,
    pub short_trades: usize,

    // II. Outcome Quality
    pub win_rate_pct: Decimal,
    pub average_win: Decimal,
    pub largest_win: Decimal,
    /// Positive magnitude.
    pub average_loss: Decimal,
    /// Positive magnitude.
    pub largest_loss: Decimal,
    pub longest_win_streak: usize,
    pub longest_loss_streak: usize,

    // III. Profitability (net of fees)
    pub total_pl: Decimal,
    pub average_pl: Decimal,
    pub gross_profit: Decimal,
    pub gross_loss: Decimal,
    pub profit_factor: Option<Decimal>, // Option<> because it is undefined when GrossLoss is 0
    pub payoff_ratio: Option<Decimal>, // Option<> because avg_loss can be 0

    // IV. Risk and Drawdown
    /// Largest peak-to-trough decline of the equity curve, as an amount.
    pub max_drawdown: Decimal,
    /// The same decline as a percentage of the peak. Zero or negative.
    pub max_drawdown_pct: Decimal,

    // V. Time-Based Metrics
    #[serde(with = "humantime_serde")]
    pub average_time_in_trade: Duration,
}

impl PerformanceReport {
    /// Creates a new, zeroed-out PerformanceReport.
    /// This is also the report of an empty trade list.
    pub fn new() -> Self {
        Self {
            total_trades: 0,
            total_wins: 0,
            total_losses: 0,
            total_breakevens: 0,
            total_open: 0,
            long_trades: 0,
            short_trades: 0,
            win_rate_pct: Decimal::ZERO,
            average_win: Decimal::ZERO,
            largest_win: Decimal::ZERO,
            average_loss: Decimal::ZERO,
            largest_loss: Decimal::ZERO,
            longest_win_streak: 0,
            longest_loss_streak: 0,
            total_pl: Decimal::ZERO,
            average_pl: Decimal::ZERO,
            gross_profit: Decimal::ZERO,
            gross_loss: Decimal::ZERO,
            profit_factor: None,
            payoff_ratio: None,
            max_drawdown: Decimal::ZERO,
            max_drawdown_pct: Decimal::ZERO,
            average_time_in_trade: Duration::ZERO,
        }
    }

    /// Share of each closed outcome in the total trade count, in percent.
    pub fn outcome_shares(&self) -> OutcomeShares {
        let share = |count: usize| {
            if self.total_trades == 0 {
                Decimal::ZERO
            } else {
                Decimal::from(count) / Decimal::from(self.total_trades) * Decimal::ONE_HUNDRED
            }
        };

        OutcomeShares {
            win_pct: share(self.total_wins),
            loss_pct: share(self.total_losses),
            breakeven_pct: share(self.total_breakevens),
        }
    }
}

impl Default for PerformanceReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Win / loss / breakeven shares of a trade set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeShares {
    pub win_pct: Decimal,
    pub loss_pct: Decimal,
    pub breakeven_pct: Decimal,
}

/// Capital view of an account: starting point, cash movements and trading result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub starting_balance: Decimal,
    pub current_balance: Decimal,
    pub total_deposits: Decimal,
    /// Positive magnitude.
    pub total_withdrawals: Decimal,
    /// Net trading result, fees deducted.
    pub trading_pl: Decimal,
    /// `current_balance - starting_balance`.
    pub total_gain_loss: Decimal,
    /// `total_gain_loss` relative to the starting balance, in percent.
    pub change_pct: Decimal,
}

/// Gains and losses (as positive magnitudes) collected for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPl {
    pub gain: Decimal,
    pub loss: Decimal,
}

impl MonthlyPl {
    pub fn net(&self) -> Decimal {
        self.gain - self.loss
    }
}

/// Net performance per trading day, as parallel label / value arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPerformance {
    pub labels: Vec<String>,
    pub totals: Vec<Decimal>,
}

/// One point of a distributional chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    /// Net P&L of the trade.
    pub y: Decimal,
}

/// Every dashboard view, computed in one pass over the same filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub summary: PerformanceReport,
    pub account: AccountSummary,
    pub monthly_pl: IndexMap<String, MonthlyPl>,
    pub daily: DailyPerformance,
    pub strategy_breakdown: IndexMap<String, Decimal>,
    pub pair_breakdown: IndexMap<String, usize>,
    pub most_used_strategy: String,
    pub most_used_pair: String,
}
