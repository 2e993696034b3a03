use analytics::{AnalyticsEngine, NoJitter, RecordFilter};
use configuration::Config;
use core_types::{AccountFilter, DateRange, Direction, TradeRecord, TradeStatus};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn create_test_trade(
    account: &str,
    date: &str,
    status: TradeStatus,
    gain_loss: Decimal,
    fees: Decimal,
) -> TradeRecord {
    TradeRecord {
        account: account.to_string(),
        date: date.to_string(),
        strategy: "Strategy 1".to_string(),
        pair: "XAUUSD".to_string(),
        direction: Direction::Short,
        status,
        gain_loss,
        fees,
        ..TradeRecord::new_trade(account, date)
    }
}

fn journal() -> Vec<TradeRecord> {
    vec![
        TradeRecord::deposit("Account 1", "2025-02-01", dec!(5000)),
        create_test_trade("Account 1", "2025-03-03", TradeStatus::Win, dec!(582), dec!(4)),
        create_test_trade("Account 2", "2025-03-20", TradeStatus::Loss, dec!(-218), dec!(3)),
        create_test_trade("Account 1", "2025-04-02", TradeStatus::Breakeven, dec!(0), dec!(1.5)),
        create_test_trade("Account 2", "2025-04-11", TradeStatus::Win, dec!(1895), dec!(6)),
        TradeRecord::withdrawal("Account 2", "2025-04-15", dec!(1754)),
        create_test_trade("Account 1", "2025-05-07", TradeStatus::Loss, dec!(-1000), dec!(5)),
        create_test_trade("Account 1", "2025-05-30", TradeStatus::Open, dec!(0), dec!(0)),
    ]
}

#[test]
fn two_trade_scenario() {
    let records = vec![
        create_test_trade("A", "2025-01-01", TradeStatus::Win, dec!(100), dec!(2)),
        create_test_trade("A", "2025-01-02", TradeStatus::Loss, dec!(-50), dec!(1)),
    ];

    let report = AnalyticsEngine::default().summary(&records, &RecordFilter::new());

    assert_eq!(report.total_trades, 2);
    assert_eq!(report.total_wins, 1);
    assert_eq!(report.total_losses, 1);
    assert_eq!(report.win_rate_pct, dec!(50));
    assert_eq!(report.total_pl, dec!(47));
    assert_eq!(report.average_pl, dec!(23.5));
}

#[test]
fn empty_input_is_all_zeroes() {
    let engine = AnalyticsEngine::default();
    let report = engine.summary(&[], &RecordFilter::new());

    assert_eq!(report.total_trades, 0);
    assert_eq!(report.total_wins + report.total_losses + report.total_open, 0);
    assert_eq!(report.win_rate_pct, Decimal::ZERO);
    assert_eq!(report.average_win, Decimal::ZERO);
    assert_eq!(report.average_loss, Decimal::ZERO);
    assert_eq!(report.average_pl, Decimal::ZERO);
    assert_eq!(report.max_drawdown_pct, Decimal::ZERO);
    assert_eq!(report.profit_factor, None);

    let dashboard = engine.dashboard(&[], &RecordFilter::new());
    assert_eq!(dashboard.most_used_strategy, "Strategy 1");
    assert_eq!(dashboard.most_used_pair, "XAUUSD");
    assert!(dashboard.monthly_pl.is_empty());
    assert!(dashboard.daily.labels.is_empty());
}

#[test]
fn outcome_counts_add_up_and_win_rate_is_bounded() {
    let records = journal();
    let report = AnalyticsEngine::default().summary(&records, &RecordFilter::new());

    assert_eq!(
        report.total_wins + report.total_losses + report.total_breakevens + report.total_open,
        report.total_trades
    );
    assert_eq!(report.total_trades, 6);
    assert_eq!(report.short_trades, 6);
    assert!(report.win_rate_pct >= Decimal::ZERO && report.win_rate_pct <= dec!(100));
}

#[test]
fn buckets_add_up_to_total_pl() {
    let records = journal();
    let engine = AnalyticsEngine::default();
    let filter = RecordFilter::new();

    let total_pl = engine.summary(&records, &filter).total_pl;
    let monthly: Decimal = engine.monthly_pl(&records, &filter).values().map(|m| m.net()).sum();
    let daily: Decimal = engine.daily_performance(&records, &filter).totals.iter().sum();

    assert_eq!(total_pl, dec!(1239.5));
    assert_eq!(monthly, total_pl);
    assert_eq!(daily, total_pl);
}

#[test]
fn balance_is_filter_order_independent() {
    let records = journal();
    let engine = AnalyticsEngine::default();

    let filtered = engine.account_balance(&records, &AccountFilter::from("Account 2"));
    let pre_filtered: Vec<TradeRecord> =
        records.iter().filter(|r| r.account == "Account 2").cloned().collect();
    let unfiltered = engine.account_balance(&pre_filtered, &AccountFilter::All);

    assert_eq!(filtered, unfiltered);
    assert_eq!(filtered, dec!(100000) - dec!(221) + dec!(1889) - dec!(1754));
}

#[test]
fn full_date_range_round_trip() {
    let records = journal();
    let filter = RecordFilter::new().with_date_range(DateRange::new("2025-02-01", "2025-05-30"));

    let selected: Vec<TradeRecord> = filter.apply(&records).into_iter().cloned().collect();
    assert_eq!(selected, records);
}

#[test]
fn strategy_filter_narrows_trades_only() {
    let mut records = journal();
    records[1].strategy = "Breakout".to_string();
    let engine = AnalyticsEngine::default();
    let filter = RecordFilter::new().with_strategy("Breakout");

    let report = engine.summary(&records, &filter);
    assert_eq!(report.total_trades, 1);
    assert_eq!(report.total_pl, dec!(578));

    // Cash movements survive, so the account summary still sees them.
    let account = engine.account_summary(&records, &filter.clone().with_account("Account 1"));
    assert_eq!(account.total_deposits, dec!(5000));
}

#[test]
fn scatter_scenarios_without_jitter() {
    let mut trade = create_test_trade("A", "2025-01-01", TradeStatus::Win, dec!(50), dec!(0));
    trade.entry_time = "2:30:00 PM".to_string();
    trade.duration = "1:15:30".to_string();
    let records = vec![trade];

    let engine = AnalyticsEngine::new(Config::default());
    let times = engine.time_of_day_series(&records, &RecordFilter::new(), &mut NoJitter);
    let durations = engine.duration_series(&records, &RecordFilter::new(), &mut NoJitter);

    assert_eq!(times[0].x, 14.5);
    assert!((durations[0].x - 75.5).abs() < 1e-9);
    assert_eq!(durations[0].y, dec!(50));
}

#[test]
fn dashboard_breakdowns() {
    let records = journal();
    let dashboard = AnalyticsEngine::default().dashboard(&records, &RecordFilter::new().with_account("Account 1"));

    assert_eq!(dashboard.summary.total_trades, 4);
    assert_eq!(dashboard.pair_breakdown["XAUUSD"], 4);
    assert_eq!(dashboard.strategy_breakdown["Strategy 1"], dec!(-428.5));
    assert_eq!(dashboard.account.total_deposits, dec!(5000));
    let months: Vec<&str> = dashboard.monthly_pl.keys().map(String::as_str).collect();
    assert_eq!(months, vec!["Mar 2025", "Apr 2025", "May 2025"]);
}
