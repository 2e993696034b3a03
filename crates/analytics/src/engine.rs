use crate::balance;
use crate::breakdown::{self, DirectionBreakdown};
use crate::calendar::{self, DaySummary, MonthSummary, WeekSummary};
use crate::filter::{RecordFilter, chronological};
use crate::parsers::parse_duration;
use crate::report::{
    AccountSummary, DailyPerformance, DashboardReport, MonthlyPl, PerformanceReport, ScatterPoint,
};
use crate::scatter::{self, JitterSource};
use chrono::NaiveDate;
use configuration::Config;
use core_types::{AccountFilter, Direction, TradeRecord, TradeStatus};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::time::Duration;

/// A stateless calculator for deriving performance analytics from journal records.
///
/// The engine only holds settings. Every call receives the full record list,
/// filters it, and recomputes from scratch; input records are never mutated.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    config: Config,
}

impl AnalyticsEngine {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The main entry point for the performance summary.
    ///
    /// # Arguments
    ///
    /// * `records` - The complete record list; cash movements are ignored.
    /// * `filter` - Date range, account and strategy narrowing.
    pub fn summary(&self, records: &[TradeRecord], filter: &RecordFilter) -> PerformanceReport {
        let trades = filter.trades(records);
        self.summarize(&trades)
    }

    /// Computes the summary over an already filtered, trade-only selection.
    pub fn summarize(&self, trades: &[&TradeRecord]) -> PerformanceReport {
        let mut report = PerformanceReport::new();

        if trades.is_empty() {
            // No trades: every count, rate and extremum stays at zero.
            return report;
        }

        self.calculate_counts(trades, &mut report);
        self.calculate_profitability(trades, &mut report);

        let ordered: Vec<&TradeRecord> = chronological(trades).into_iter().map(|(_, t)| t).collect();
        self.calculate_streaks(&ordered, &mut report);
        self.calculate_drawdown(&ordered, &mut report);
        self.calculate_time_metrics(trades, &mut report);

        report
    }

    /// Calculates outcome and direction counts.
    fn calculate_counts(&self, trades: &[&TradeRecord], report: &mut PerformanceReport) {
        report.total_trades = trades.len();

        for trade in trades {
            match trade.status {
                TradeStatus::Win => report.total_wins += 1,
                TradeStatus::Loss => report.total_losses += 1,
                TradeStatus::Breakeven => report.total_breakevens += 1,
                TradeStatus::Open => report.total_open += 1,
                TradeStatus::None => {
                    tracing::debug!(id = %trade.id, "Trade without a status counted in totals only")
                }
            }
            match trade.direction {
                Direction::Long => report.long_trades += 1,
                Direction::Short => report.short_trades += 1,
                Direction::None => {}
            }
        }
    }

    /// Calculates all profitability-related metrics.
    fn calculate_profitability(&self, trades: &[&TradeRecord], report: &mut PerformanceReport) {
        let mut win_sum = Decimal::ZERO;
        let mut loss_sum = Decimal::ZERO;
        let mut largest_win: Option<Decimal> = None;
        let mut largest_loss: Option<Decimal> = None;

        for trade in trades {
            let pnl = trade.net_pl();
            report.total_pl += pnl;

            if pnl.is_sign_positive() && !pnl.is_zero() {
                report.gross_profit += pnl;
            } else {
                report.gross_loss += pnl.abs();
            }

            match trade.status {
                TradeStatus::Win => {
                    win_sum += trade.gain_loss;
                    largest_win = Some(largest_win.map_or(trade.gain_loss, |w| w.max(trade.gain_loss)));
                }
                TradeStatus::Loss => {
                    loss_sum += trade.gain_loss;
                    largest_loss = Some(largest_loss.map_or(trade.gain_loss, |l| l.min(trade.gain_loss)));
                }
                _ => {}
            }
        }

        // --- Ratios ---
        let total = Decimal::from(report.total_trades);
        report.win_rate_pct = Decimal::from(report.total_wins) / total * Decimal::ONE_HUNDRED;
        report.average_pl = report.total_pl / total;

        if report.total_wins > 0 {
            report.average_win = win_sum / Decimal::from(report.total_wins);
            report.largest_win = largest_win.unwrap_or_default();
        }

        if report.total_losses > 0 {
            report.average_loss = (loss_sum / Decimal::from(report.total_losses)).abs();
            report.largest_loss = largest_loss.unwrap_or_default().abs();
        }

        if report.gross_loss > Decimal::ZERO {
            report.profit_factor = Some(report.gross_profit / report.gross_loss);
        }

        if report.average_loss > Decimal::ZERO {
            report.payoff_ratio = Some(report.average_win / report.average_loss);
        }
    }

    /// Longest runs of consecutive wins and losses in chronological order.
    fn calculate_streaks(&self, ordered: &[&TradeRecord], report: &mut PerformanceReport) {
        let statuses: Vec<TradeStatus> = ordered.iter().map(|t| t.status).collect();
        report.longest_win_streak = longest_streak(&statuses, TradeStatus::Win);
        report.longest_loss_streak = longest_streak(&statuses, TradeStatus::Loss);
    }

    /// Calculates maximum drawdown from the equity curve.
    ///
    /// The curve starts at the configured starting balance and moves by each
    /// trade's net P&L in chronological order.
    fn calculate_drawdown(&self, ordered: &[&TradeRecord], report: &mut PerformanceReport) {
        let mut equity = self.config.journal.starting_balance;
        let mut peak_equity = equity;
        let mut max_drawdown = Decimal::ZERO;
        let mut max_drawdown_pct = Decimal::ZERO;

        for trade in ordered {
            equity += trade.net_pl();
            if equity > peak_equity {
                peak_equity = equity;
            }

            let drawdown = peak_equity - equity;
            if drawdown > max_drawdown {
                max_drawdown = drawdown;
            }
            if peak_equity > Decimal::ZERO {
                let pct = drawdown / peak_equity * Decimal::ONE_HUNDRED;
                if pct > max_drawdown_pct {
                    max_drawdown_pct = pct;
                }
            }
        }

        report.max_drawdown = -max_drawdown;
        report.max_drawdown_pct = -max_drawdown_pct;
    }

    /// Calculates time-based metrics.
    fn calculate_time_metrics(&self, trades: &[&TradeRecord], report: &mut PerformanceReport) {
        let durations: Vec<Duration> = trades
            .iter()
            .filter(|t| !t.duration.trim().is_empty())
            .filter_map(|t| {
                parse_duration(&t.duration)
                    .inspect_err(|e| tracing::debug!(id = %t.id, "Duration ignored: {}", e))
                    .ok()
            })
            .collect();

        if durations.is_empty() {
            return;
        }

        let total_secs: u64 = durations.iter().map(Duration::as_secs).sum();
        report.average_time_in_trade = Duration::from_secs(total_secs / durations.len() as u64);
    }

    // ==============================================================================
    // Balance & P&L
    // ==============================================================================

    /// Current balance of an account over every date on record.
    pub fn account_balance(&self, records: &[TradeRecord], account: &AccountFilter) -> Decimal {
        let selected = RecordFilter::new().with_account(account.clone()).apply(records);
        balance::account_balance(&selected, self.config.journal.starting_balance)
    }

    /// Account summary for the filter's account. The date range does not apply.
    pub fn account_summary(&self, records: &[TradeRecord], filter: &RecordFilter) -> AccountSummary {
        let selected = filter.account_only().apply(records);
        balance::account_summary(&selected, self.config.journal.starting_balance)
    }

    /// Running balance per date for the filter's account. The date range does not apply.
    pub fn balance_curve(&self, records: &[TradeRecord], filter: &RecordFilter) -> Vec<(NaiveDate, Decimal)> {
        let selected = filter.account_only().apply(records);
        balance::balance_curve(&selected, self.config.journal.starting_balance)
    }

    pub fn monthly_pl(&self, records: &[TradeRecord], filter: &RecordFilter) -> IndexMap<String, MonthlyPl> {
        balance::monthly_pl(&filter.trades(records))
    }

    pub fn daily_performance(&self, records: &[TradeRecord], filter: &RecordFilter) -> DailyPerformance {
        balance::daily_performance(&filter.trades(records), &self.config.charts.daily_label_format)
    }

    // ==============================================================================
    // Breakdowns
    // ==============================================================================

    pub fn strategy_breakdown(&self, records: &[TradeRecord], filter: &RecordFilter) -> IndexMap<String, Decimal> {
        breakdown::strategy_breakdown(&filter.trades(records))
    }

    pub fn pair_breakdown(&self, records: &[TradeRecord], filter: &RecordFilter) -> IndexMap<String, usize> {
        breakdown::pair_breakdown(&filter.trades(records))
    }

    pub fn direction_breakdown(&self, records: &[TradeRecord], filter: &RecordFilter) -> DirectionBreakdown {
        breakdown::direction_breakdown(&filter.trades(records))
    }

    pub fn most_used_strategy(&self, records: &[TradeRecord], filter: &RecordFilter) -> String {
        let usage = breakdown::strategy_usage(&filter.trades(records));
        breakdown::most_used(&usage, &self.config.defaults.strategy)
    }

    pub fn most_used_pair(&self, records: &[TradeRecord], filter: &RecordFilter) -> String {
        let pairs = breakdown::pair_breakdown(&filter.trades(records));
        breakdown::most_used(&pairs, &self.config.defaults.pair)
    }

    // ==============================================================================
    // Scatter Series
    // ==============================================================================

    pub fn time_of_day_series<J: JitterSource + ?Sized>(
        &self,
        records: &[TradeRecord],
        filter: &RecordFilter,
        jitter: &mut J,
    ) -> Vec<ScatterPoint> {
        scatter::time_of_day_series(&filter.trades(records), jitter, self.config.charts.time_jitter_hours)
    }

    pub fn duration_series<J: JitterSource + ?Sized>(
        &self,
        records: &[TradeRecord],
        filter: &RecordFilter,
        jitter: &mut J,
    ) -> Vec<ScatterPoint> {
        scatter::duration_series(&filter.trades(records), jitter, self.config.charts.duration_jitter_minutes)
    }

    // ==============================================================================
    // Calendar
    // ==============================================================================

    pub fn calendar_days(&self, records: &[TradeRecord], filter: &RecordFilter, year: i32, month: u32) -> Vec<DaySummary> {
        calendar::month_days(&filter.trades(records), year, month)
    }

    pub fn week_summaries(&self, records: &[TradeRecord], filter: &RecordFilter, year: i32, month: u32) -> Vec<WeekSummary> {
        calendar::week_summaries(&filter.trades(records), year, month)
    }

    pub fn month_summary(&self, records: &[TradeRecord], filter: &RecordFilter, year: i32, month: u32) -> MonthSummary {
        calendar::month_summary(&filter.trades(records), year, month)
    }

    /// Computes every dashboard view for one filter.
    pub fn dashboard(&self, records: &[TradeRecord], filter: &RecordFilter) -> DashboardReport {
        let trades = filter.trades(records);
        let pair_breakdown = breakdown::pair_breakdown(&trades);

        DashboardReport {
            summary: self.summarize(&trades),
            account: self.account_summary(records, filter),
            monthly_pl: balance::monthly_pl(&trades),
            daily: balance::daily_performance(&trades, &self.config.charts.daily_label_format),
            strategy_breakdown: breakdown::strategy_breakdown(&trades),
            most_used_strategy: breakdown::most_used(
                &breakdown::strategy_usage(&trades),
                &self.config.defaults.strategy,
            ),
            most_used_pair: breakdown::most_used(&pair_breakdown, &self.config.defaults.pair),
            pair_breakdown,
        }
    }
}

/// Length of the longest run of `target` in `statuses`. Any other status,
/// `Breakeven` and `Open` included, ends the run.
pub fn longest_streak(statuses: &[TradeStatus], target: TradeStatus) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for status in statuses {
        if *status == target {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn trade(date: &str, status: TradeStatus, gain_loss: Decimal, fees: Decimal) -> TradeRecord {
        TradeRecord {
            date: date.to_string(),
            status,
            direction: Direction::Long,
            gain_loss,
            fees,
            ..TradeRecord::default()
        }
    }

    fn engine_with_start(start: Decimal) -> AnalyticsEngine {
        let mut config = Config::default();
        config.journal.starting_balance = start;
        AnalyticsEngine::new(config)
    }

    #[test]
    fn streaks_reset_on_any_other_status() {
        use TradeStatus::*;
        let statuses = [Win, Win, Loss, Win, Win, Win];
        assert_eq!(longest_streak(&statuses, Win), 3);
        assert_eq!(longest_streak(&statuses, Loss), 1);

        let interrupted = [Win, Breakeven, Win, Open, Win];
        assert_eq!(longest_streak(&interrupted, Win), 1);
        assert_eq!(longest_streak(&[], Win), 0);
    }

    #[test]
    fn streaks_follow_dates_not_input_order() {
        let records = vec![
            trade("2025-01-03", TradeStatus::Win, dec!(10), dec!(0)),
            trade("2025-01-01", TradeStatus::Win, dec!(10), dec!(0)),
            trade("2025-01-02", TradeStatus::Loss, dec!(-10), dec!(0)),
            trade("2025-01-04", TradeStatus::Win, dec!(10), dec!(0)),
        ];
        let report = AnalyticsEngine::default().summary(&records, &RecordFilter::new());
        // Chronologically: Win, Loss, Win, Win.
        assert_eq!(report.longest_win_streak, 2);
        assert_eq!(report.longest_loss_streak, 1);
    }

    #[test]
    fn drawdown_from_peak_of_equity_curve() {
        let records = vec![
            trade("2025-01-01", TradeStatus::Win, dec!(1000), dec!(0)),
            trade("2025-01-02", TradeStatus::Loss, dec!(-500), dec!(0)),
            trade("2025-01-03", TradeStatus::Loss, dec!(-500), dec!(0)),
            trade("2025-01-04", TradeStatus::Win, dec!(2000), dec!(0)),
        ];
        let report = engine_with_start(dec!(10000)).summary(&records, &RecordFilter::new());
        // Peak 11000, trough 10000.
        assert_eq!(report.max_drawdown, dec!(-1000));
        assert_eq!(report.max_drawdown_pct.round_dp(4), dec!(-9.0909));
    }

    #[test]
    fn only_gains_means_no_drawdown() {
        let records = vec![trade("2025-01-01", TradeStatus::Win, dec!(10), dec!(1))];
        let report = AnalyticsEngine::default().summary(&records, &RecordFilter::new());
        assert_eq!(report.max_drawdown_pct, Decimal::ZERO);
    }

    #[test]
    fn extremes_are_positive_magnitudes() {
        let records = vec![
            trade("2025-01-01", TradeStatus::Win, dec!(300), dec!(0)),
            trade("2025-01-02", TradeStatus::Win, dec!(100), dec!(0)),
            trade("2025-01-03", TradeStatus::Loss, dec!(-80), dec!(0)),
            trade("2025-01-04", TradeStatus::Loss, dec!(-20), dec!(0)),
        ];
        let report = AnalyticsEngine::default().summary(&records, &RecordFilter::new());
        assert_eq!(report.average_win, dec!(200));
        assert_eq!(report.largest_win, dec!(300));
        assert_eq!(report.average_loss, dec!(50));
        assert_eq!(report.largest_loss, dec!(80));
        assert_eq!(report.payoff_ratio, Some(dec!(4)));
        assert_eq!(report.profit_factor, Some(dec!(4)));
    }

    #[test]
    fn average_time_ignores_open_and_malformed_durations() {
        let mut a = trade("2025-01-01", TradeStatus::Win, dec!(1), dec!(0));
        a.duration = "0:10:00".to_string();
        let mut b = trade("2025-01-02", TradeStatus::Win, dec!(1), dec!(0));
        b.duration = "0:26:00".to_string();
        let mut c = trade("2025-01-03", TradeStatus::Open, dec!(0), dec!(0));
        c.duration = "soon".to_string();
        let d = trade("2025-01-04", TradeStatus::Open, dec!(0), dec!(0));

        let report = AnalyticsEngine::default().summary(&[a, b, c, d], &RecordFilter::new());
        assert_eq!(report.average_time_in_trade, Duration::from_secs(18 * 60));
    }

    #[test]
    fn unparseable_dates_still_count() {
        let records = vec![
            trade("garbage", TradeStatus::Loss, dec!(-10), dec!(0)),
            trade("2025-01-01", TradeStatus::Win, dec!(10), dec!(0)),
        ];
        let report = AnalyticsEngine::default().summary(&records, &RecordFilter::new());
        assert_eq!(report.total_trades, 2);
        assert_eq!(report.total_losses, 1);
        // The undated loss cannot be placed on the timeline.
        assert_eq!(report.longest_loss_streak, 0);
    }

    #[test]
    fn account_balance_ignores_date_range() {
        let records = vec![
            TradeRecord::deposit("A", "2024-01-01", dec!(500)),
            trade("2025-06-01", TradeStatus::Win, dec!(100), dec!(0)),
        ];
        let engine = engine_with_start(dec!(1000));
        let filter = RecordFilter::new().with_date_range(core_types::DateRange::new("2025-01-01", "2025-12-31"));
        assert_eq!(engine.account_summary(&records, &filter).current_balance, dec!(1600));
        assert_eq!(engine.account_balance(&records, &AccountFilter::All), dec!(1600));
    }
}
