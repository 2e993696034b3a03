//! Account balance and period-bucketed P&L.

use crate::filter::chronological;
use crate::parsers::parse_date;
use crate::report::{AccountSummary, DailyPerformance, MonthlyPl};
use chrono::NaiveDate;
use core_types::{RecordKind, TradeRecord};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Label format of the monthly buckets, e.g. "Mar 2025".
pub const MONTH_LABEL_FORMAT: &str = "%b %Y";

/// How much a record moves the account balance.
fn balance_effect(record: &TradeRecord) -> Decimal {
    match record.kind {
        RecordKind::Trade => record.net_pl(),
        RecordKind::Deposit => record.gain_loss,
        RecordKind::Withdrawal => -record.gain_loss.abs(),
    }
}

/// Adds `amount` to `total`, leaving the record out if the sum would overflow.
fn accumulate(total: &mut Decimal, amount: Decimal, record: &TradeRecord) {
    match total.checked_add(amount) {
        Some(sum) => *total = sum,
        None => tracing::debug!(id = %record.id, "Record left out of balance: amount overflows"),
    }
}

/// Starting balance plus deposits, minus withdrawals, plus net trading result.
///
/// `records` should be account-filtered but not date-filtered.
pub fn account_balance(records: &[&TradeRecord], starting_balance: Decimal) -> Decimal {
    let mut balance = starting_balance;
    for record in records {
        accumulate(&mut balance, balance_effect(record), record);
    }
    balance
}

pub fn account_summary(records: &[&TradeRecord], starting_balance: Decimal) -> AccountSummary {
    let mut total_deposits = Decimal::ZERO;
    let mut total_withdrawals = Decimal::ZERO;
    let mut trading_pl = Decimal::ZERO;

    for record in records {
        match record.kind {
            RecordKind::Trade => accumulate(&mut trading_pl, record.net_pl(), record),
            RecordKind::Deposit => accumulate(&mut total_deposits, record.gain_loss, record),
            RecordKind::Withdrawal => accumulate(&mut total_withdrawals, record.gain_loss.abs(), record),
        }
    }

    let current_balance = account_balance(records, starting_balance);
    let total_gain_loss = current_balance.saturating_sub(starting_balance);
    let change_pct = total_gain_loss
        .checked_div(starting_balance)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO);

    AccountSummary {
        starting_balance,
        current_balance,
        total_deposits,
        total_withdrawals,
        trading_pl,
        total_gain_loss,
        change_pct,
    }
}

/// End-of-day balance for every date that has activity, ascending.
pub fn balance_curve(records: &[&TradeRecord], starting_balance: Decimal) -> Vec<(NaiveDate, Decimal)> {
    let mut curve: Vec<(NaiveDate, Decimal)> = Vec::new();
    let mut balance = starting_balance;

    for (date, record) in chronological(records) {
        accumulate(&mut balance, balance_effect(record), record);
        match curve.last_mut() {
            Some((last, value)) if *last == date => *value = balance,
            _ => curve.push((date, balance)),
        }
    }

    curve
}

/// Buckets trades by calendar month, keeping gains and losses apart.
///
/// Months appear in the order they are first seen, not in calendar order.
pub fn monthly_pl(trades: &[&TradeRecord]) -> IndexMap<String, MonthlyPl> {
    let mut months: IndexMap<String, MonthlyPl> = IndexMap::new();

    for trade in trades.iter().filter(|r| r.is_trade()) {
        let date = match parse_date(&trade.date) {
            Ok(date) => date,
            Err(e) => {
                tracing::debug!(id = %trade.id, "Trade left out of monthly P&L: {}", e);
                continue;
            }
        };

        let bucket = months.entry(date.format(MONTH_LABEL_FORMAT).to_string()).or_default();
        let pl = trade.net_pl();
        if pl > Decimal::ZERO {
            bucket.gain += pl;
        } else {
            bucket.loss += pl.abs();
        }
    }

    months
}

/// Net P&L per trading day, sorted ascending by date.
pub fn daily_performance(trades: &[&TradeRecord], label_format: &str) -> DailyPerformance {
    let mut days: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();

    for trade in trades.iter().filter(|r| r.is_trade()) {
        match parse_date(&trade.date) {
            Ok(date) => *days.entry(date).or_default() += trade.net_pl(),
            Err(e) => tracing::debug!(id = %trade.id, "Trade left out of daily P&L: {}", e),
        }
    }

    let (labels, totals) = days
        .into_iter()
        .map(|(date, total)| (day_label(date, label_format), total))
        .unzip();

    DailyPerformance { labels, totals }
}

/// Formats `date` with `label_format`, falling back to ISO dates when the
/// format cannot be applied to a date.
fn day_label(date: NaiveDate, label_format: &str) -> String {
    let mut label = String::new();
    if write!(label, "{}", date.format(label_format)).is_err() {
        tracing::debug!(label_format, "Daily label format rejected; using ISO dates");
        return date.format("%Y-%m-%d").to_string();
    }
    label
}
