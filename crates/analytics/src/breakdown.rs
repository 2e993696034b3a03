//! Grouping of trades by a categorical attribute.

use core_types::{Direction, TradeRecord};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Net P&L per strategy, in first-seen order.
pub fn strategy_breakdown(trades: &[&TradeRecord]) -> IndexMap<String, Decimal> {
    let mut breakdown: IndexMap<String, Decimal> = IndexMap::new();
    for trade in trades.iter().filter(|r| r.is_trade()) {
        *breakdown.entry(trade.strategy.clone()).or_default() += trade.net_pl();
    }
    breakdown
}

/// Number of trades per strategy, in first-seen order.
pub fn strategy_usage(trades: &[&TradeRecord]) -> IndexMap<String, usize> {
    count_by(trades, |r| &r.strategy)
}

/// Number of trades per instrument pair, in first-seen order.
pub fn pair_breakdown(trades: &[&TradeRecord]) -> IndexMap<String, usize> {
    count_by(trades, |r| &r.pair)
}

fn count_by<F>(trades: &[&TradeRecord], label: F) -> IndexMap<String, usize>
where
    F: Fn(&TradeRecord) -> &String,
{
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for trade in trades.iter().filter(|r| r.is_trade()) {
        *counts.entry(label(*trade).clone()).or_default() += 1;
    }
    counts
}

/// The label with the highest count. On a tie the label seen first wins; an
/// empty breakdown yields `fallback`.
pub fn most_used(counts: &IndexMap<String, usize>, fallback: &str) -> String {
    let mut best: Option<(&String, usize)> = None;
    for (label, &count) in counts {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label.clone())
        .unwrap_or_else(|| fallback.to_string())
}

/// Net P&L split by trade direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionBreakdown {
    pub long: Decimal,
    pub short: Decimal,
}

pub fn direction_breakdown(trades: &[&TradeRecord]) -> DirectionBreakdown {
    let mut breakdown = DirectionBreakdown::default();
    for trade in trades.iter().filter(|r| r.is_trade()) {
        match trade.direction {
            Direction::Long => breakdown.long += trade.net_pl(),
            Direction::Short => breakdown.short += trade.net_pl(),
            Direction::None => {}
        }
    }
    breakdown
}
