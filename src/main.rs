use analytics::format::{format_currency, format_hms, format_percentage};
use analytics::{AnalyticsEngine, JitterSource, NoJitter, RecordFilter, UniformJitter};
use anyhow::Context;
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::Table;
use configuration::{load_config, load_config_from};
use core_types::{AccountFilter, DateRange, TradeRecord};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// The main entry point for the trade journal reports.
fn main() -> anyhow::Result<()> {
    // Load JOURNAL_* overrides from a .env file, if there is one.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    let records = load_records(&cli.records)?;
    tracing::info!("Loaded {} records from {}", records.len(), cli.records.display());

    let engine = AnalyticsEngine::new(config);
    let filter = cli.record_filter();

    // Execute the appropriate command
    match cli.command {
        Commands::Summary => print_summary(&engine, &records, &filter),
        Commands::Breakdown => print_breakdown(&engine, &records, &filter),
        Commands::Calendar(args) => print_calendar(&engine, &records, &filter, args),
        Commands::Scatter(args) => print_scatter(&engine, &records, &filter, args),
        Commands::Dashboard => {
            let dashboard = engine.dashboard(&records, &filter);
            println!("{}", serde_json::to_string_pretty(&dashboard)?);
        }
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Performance reports for a personal trading journal.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file holding the journal records.
    #[arg(long, global = true, default_value = "records.json")]
    records: PathBuf,

    /// Configuration file to use instead of `config.toml`.
    #[arg(long, global = true)]
    config: Option<String>,

    /// First date to include (format: YYYY-MM-DD).
    #[arg(long, global = true)]
    from: Option<String>,

    /// Last date to include (format: YYYY-MM-DD).
    #[arg(long, global = true)]
    to: Option<String>,

    /// Account to report on; "All" includes every account.
    #[arg(long, global = true, default_value = "All")]
    account: String,

    /// Restrict trades to a single strategy.
    #[arg(long, global = true)]
    strategy: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trade statistics and the account summary.
    Summary,
    /// P&L per strategy, direction and month; trade count per pair.
    Breakdown,
    /// Day-by-day results for one month.
    Calendar(CalendarArgs),
    /// Points for the time-of-day or duration scatter charts.
    Scatter(ScatterArgs),
    /// Every dashboard view as JSON.
    Dashboard,
}

#[derive(Parser)]
struct CalendarArgs {
    /// Defaults to the current year.
    #[arg(long)]
    year: Option<i32>,

    /// 1-12. Defaults to the current month.
    #[arg(long)]
    month: Option<u32>,
}

#[derive(Parser)]
struct ScatterArgs {
    #[arg(long, value_enum, default_value_t = Axis::Time)]
    axis: Axis,

    /// Print exact positions.
    #[arg(long)]
    no_jitter: bool,

    /// Seed for reproducible jitter.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Axis {
    Time,
    Duration,
}

impl Cli {
    fn record_filter(&self) -> RecordFilter {
        let mut filter = RecordFilter::new().with_account(AccountFilter::from(self.account.as_str()));
        if self.from.is_some() || self.to.is_some() {
            filter = filter.with_date_range(DateRange::new(
                self.from.clone().unwrap_or_default(),
                self.to.clone().unwrap_or_default(),
            ));
        }
        if let Some(strategy) = &self.strategy {
            filter = filter.with_strategy(strategy.clone());
        }
        filter
    }
}

fn load_records(path: &Path) -> anyhow::Result<Vec<TradeRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read records from {}", path.display()))?;
    let records = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid record list", path.display()))?;
    Ok(records)
}

// ==============================================================================
// Report Printing
// ==============================================================================

fn print_summary(engine: &AnalyticsEngine, records: &[TradeRecord], filter: &RecordFilter) {
    let currency = engine.config().journal.currency.as_str();
    let account = engine.account_summary(records, filter);
    let stats = engine.summary(records, filter);
    let shares = stats.outcome_shares();

    let mut table = Table::new();
    table.set_header(vec!["Summary", ""]);
    table.add_row(vec!["Starting Balance".to_string(), format_currency(account.starting_balance, currency)]);
    table.add_row(vec!["Current Balance".to_string(), format_currency(account.current_balance, currency)]);
    table.add_row(vec!["Total Gain / Loss".to_string(), format_currency(account.total_gain_loss, currency)]);
    table.add_row(vec!["% Change".to_string(), format_percentage(account.change_pct)]);
    table.add_row(vec!["Total Deposit".to_string(), format_currency(account.total_deposits, currency)]);
    table.add_row(vec!["Total Withdrawal".to_string(), format_currency(account.total_withdrawals, currency)]);
    println!("{table}");

    let mut table = Table::new();
    table.set_header(vec!["Statistics", ""]);
    table.add_row(vec!["No. of Trades".to_string(), stats.total_trades.to_string()]);
    table.add_row(vec!["No. of Wins".to_string(), stats.total_wins.to_string()]);
    table.add_row(vec!["No. of Losses".to_string(), stats.total_losses.to_string()]);
    table.add_row(vec!["No. of Breakevens".to_string(), stats.total_breakevens.to_string()]);
    table.add_row(vec!["No. of Open".to_string(), stats.total_open.to_string()]);
    table.add_row(vec!["No. Long Trades".to_string(), stats.long_trades.to_string()]);
    table.add_row(vec!["No. Short Trades".to_string(), stats.short_trades.to_string()]);
    table.add_row(vec!["Win Rate".to_string(), format_percentage(stats.win_rate_pct)]);
    table.add_row(vec![
        "Wins / Losses / Breakevens".to_string(),
        format!(
            "{} / {} / {}",
            format_percentage(shares.win_pct),
            format_percentage(shares.loss_pct),
            format_percentage(shares.breakeven_pct)
        ),
    ]);
    table.add_row(vec!["Avg. Win".to_string(), format_currency(stats.average_win, currency)]);
    table.add_row(vec!["Largest Win".to_string(), format_currency(stats.largest_win, currency)]);
    table.add_row(vec!["Longest Win Streak".to_string(), stats.longest_win_streak.to_string()]);
    table.add_row(vec!["Avg. Loss".to_string(), format_currency(stats.average_loss, currency)]);
    table.add_row(vec!["Largest Loss".to_string(), format_currency(stats.largest_loss, currency)]);
    table.add_row(vec!["Longest Lose Streak".to_string(), stats.longest_loss_streak.to_string()]);
    table.add_row(vec!["Max. Drawdown".to_string(), format_percentage(stats.max_drawdown_pct)]);
    table.add_row(vec!["Total P/L".to_string(), format_currency(stats.total_pl, currency)]);
    table.add_row(vec!["Average P/L".to_string(), format_currency(stats.average_pl, currency)]);
    table.add_row(vec!["Avg. Time in Trades".to_string(), format_hms(stats.average_time_in_trade)]);
    println!("{table}");
}

fn print_breakdown(engine: &AnalyticsEngine, records: &[TradeRecord], filter: &RecordFilter) {
    let currency = engine.config().journal.currency.as_str();

    let mut table = Table::new();
    table.set_header(vec!["Strategy", "Net P/L"]);
    for (strategy, pl) in engine.strategy_breakdown(records, filter) {
        table.add_row(vec![strategy, format_currency(pl, currency)]);
    }
    println!("{table}");
    println!("Most used strategy: {}", engine.most_used_strategy(records, filter));

    let mut table = Table::new();
    table.set_header(vec!["Pair", "Trades"]);
    for (pair, count) in engine.pair_breakdown(records, filter) {
        table.add_row(vec![pair, count.to_string()]);
    }
    println!("{table}");
    println!("Most used pair: {}", engine.most_used_pair(records, filter));

    let directions = engine.direction_breakdown(records, filter);
    let mut table = Table::new();
    table.set_header(vec!["Direction", "Net P/L"]);
    table.add_row(vec!["Long".to_string(), format_currency(directions.long, currency)]);
    table.add_row(vec!["Short".to_string(), format_currency(directions.short, currency)]);
    println!("{table}");

    let mut table = Table::new();
    table.set_header(vec!["Month", "Gain", "Loss"]);
    for (month, pl) in engine.monthly_pl(records, filter) {
        table.add_row(vec![month, format_currency(pl.gain, currency), format_currency(pl.loss, currency)]);
    }
    println!("{table}");
}

fn print_calendar(engine: &AnalyticsEngine, records: &[TradeRecord], filter: &RecordFilter, args: CalendarArgs) {
    let currency = engine.config().journal.currency.as_str();
    let today = Local::now().date_naive();
    let year = args.year.unwrap_or(today.year());
    let month = args.month.unwrap_or(today.month());

    let days = engine.calendar_days(records, filter, year, month);
    if days.is_empty() {
        tracing::warn!("{}-{} is not a valid month", year, month);
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Trades", "Net P/L", "Win Rate"]);
    for day in days.iter().filter(|d| d.trade_count > 0) {
        table.add_row(vec![
            day.date.format("%a %d %b").to_string(),
            day.trade_count.to_string(),
            format_currency(day.total_pl, currency),
            format_percentage(day.win_rate_pct),
        ]);
    }
    println!("{table}");

    let mut table = Table::new();
    table.set_header(vec!["Week", "Net P/L", "Days"]);
    for week in engine.week_summaries(records, filter, year, month) {
        table.add_row(vec![
            format!("Week {}", week.week_number),
            format_currency(week.total_pl, currency),
            week.days.to_string(),
        ]);
    }
    println!("{table}");

    let summary = engine.month_summary(records, filter, year, month);
    println!(
        "Monthly P/L: {} over {} trading days",
        format_currency(summary.total_pl, currency),
        summary.trading_days
    );
}

fn print_scatter(engine: &AnalyticsEngine, records: &[TradeRecord], filter: &RecordFilter, args: ScatterArgs) {
    let mut jitter: Box<dyn JitterSource> = match (args.no_jitter, args.seed) {
        (true, _) => Box::new(NoJitter),
        (false, Some(seed)) => Box::new(UniformJitter::with_rng(StdRng::seed_from_u64(seed))),
        (false, None) => Box::new(UniformJitter::new()),
    };

    let (header, points) = match args.axis {
        Axis::Time => ("Hour", engine.time_of_day_series(records, filter, jitter.as_mut())),
        Axis::Duration => ("Minutes", engine.duration_series(records, filter, jitter.as_mut())),
    };

    let mut table = Table::new();
    table.set_header(vec![header, "Net P/L"]);
    for point in points {
        table.add_row(vec![format!("{:.3}", point.x), point.y.to_string()]);
    }
    println!("{table}");
}
