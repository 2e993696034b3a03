//! Per-day and per-month statistics backing the trading calendar.

use crate::parsers::parse_date;
use chrono::{Datelike, NaiveDate};
use core_types::{TradeRecord, TradeStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub trade_count: usize,
    pub total_pl: Decimal,
    pub win_rate_pct: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub total_pl: Decimal,
    /// Number of distinct dates with at least one trade.
    pub trading_days: usize,
}

/// One row of the Monday-first month grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSummary {
    /// 1-based position of the week within the month grid.
    pub week_number: usize,
    pub total_pl: Decimal,
    /// Days of the month falling in this week; the first and last week may be partial.
    pub days: usize,
}

#[derive(Default)]
struct DayAccumulator {
    trades: usize,
    wins: usize,
    total_pl: Decimal,
}

/// One summary for every calendar day of `year`/`month`, including days
/// without trades. An invalid month yields an empty list.
pub fn month_days(trades: &[&TradeRecord], year: i32, month: u32) -> Vec<DaySummary> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let mut by_day: HashMap<NaiveDate, DayAccumulator> = HashMap::new();
    for (date, trade) in dated_trades_in_month(trades, year, month) {
        let day = by_day.entry(date).or_default();
        day.trades += 1;
        day.total_pl += trade.net_pl();
        if trade.status == TradeStatus::Win {
            day.wins += 1;
        }
    }

    first
        .iter_days()
        .take_while(|d| d.month() == month)
        .map(|date| {
            let day = by_day.remove(&date).unwrap_or_default();
            let win_rate_pct = if day.trades == 0 {
                Decimal::ZERO
            } else {
                Decimal::from(day.wins) / Decimal::from(day.trades) * Decimal::ONE_HUNDRED
            };
            DaySummary {
                date,
                trade_count: day.trades,
                total_pl: day.total_pl,
                win_rate_pct,
            }
        })
        .collect()
}

/// Lays the month out in Monday-first weeks and totals each one.
pub fn week_summaries(trades: &[&TradeRecord], year: i32, month: u32) -> Vec<WeekSummary> {
    let days = month_days(trades, year, month);
    let Some(first) = days.first() else {
        return Vec::new();
    };
    let leading_blanks = first.date.weekday().num_days_from_monday() as usize;

    let mut weeks: Vec<WeekSummary> = Vec::new();
    for (index, day) in days.iter().enumerate() {
        let week_number = (leading_blanks + index) / 7 + 1;
        if weeks.last().is_none_or(|w| w.week_number != week_number) {
            weeks.push(WeekSummary {
                week_number,
                ..WeekSummary::default()
            });
        }
        if let Some(week) = weeks.last_mut() {
            week.total_pl += day.total_pl;
            week.days += 1;
        }
    }
    weeks
}

pub fn month_summary(trades: &[&TradeRecord], year: i32, month: u32) -> MonthSummary {
    let mut summary = MonthSummary::default();
    let mut days = BTreeSet::new();

    for (date, trade) in dated_trades_in_month(trades, year, month) {
        summary.total_pl += trade.net_pl();
        days.insert(date);
    }

    summary.trading_days = days.len();
    summary
}

fn dated_trades_in_month<'a>(
    trades: &'a [&'a TradeRecord],
    year: i32,
    month: u32,
) -> impl Iterator<Item = (NaiveDate, &'a TradeRecord)> + 'a {
    trades
        .iter()
        .filter(|r| r.is_trade())
        .filter_map(|r| parse_date(&r.date).ok().map(|date| (date, *r)))
        .filter(move |(date, _)| date.year() == year && date.month() == month)
}
