use crate::parsers::parse_date;
use chrono::NaiveDate;
use core_types::{AccountFilter, DateRange, RecordKind, TradeRecord};
use serde::{Deserialize, Serialize};

/// The narrowing applied to the record list before any aggregation runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordFilter {
    pub date_range: Option<DateRange>,
    pub account: AccountFilter,
    /// Restricts trades to one strategy. Cash movements are never affected.
    pub strategy: Option<String>,
}

/// A date range with its bounds parsed once up front.
enum Bounds {
    Open,
    Closed {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    /// A bound failed to parse, so nothing can be in range.
    Unsatisfiable,
}

impl Bounds {
    fn from_range(range: Option<&DateRange>) -> Self {
        let Some(range) = range else {
            return Bounds::Open;
        };

        let parse_bound = |raw: &str| -> Result<Option<NaiveDate>, ()> {
            if raw.trim().is_empty() {
                return Ok(None);
            }
            parse_date(raw).map(Some).map_err(|e| {
                tracing::debug!("Date range bound rejected: {}", e);
            })
        };

        match (parse_bound(&range.start), parse_bound(&range.end)) {
            (Ok(start), Ok(end)) => Bounds::Closed { start, end },
            _ => Bounds::Unsatisfiable,
        }
    }

    fn contains(&self, record: &TradeRecord) -> bool {
        let (start, end) = match self {
            Bounds::Open => return true,
            Bounds::Unsatisfiable => return false,
            Bounds::Closed { start, end } => (start, end),
        };

        let Ok(date) = parse_date(&record.date) else {
            tracing::debug!(id = %record.id, date = %record.date, "Record excluded: unparseable date");
            return false;
        };

        start.is_none_or(|s| date >= s) && end.is_none_or(|e| date <= e)
    }
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn with_account(mut self, account: impl Into<AccountFilter>) -> Self {
        self.account = account.into();
        self
    }

    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }

    /// The same filter without its date range. Balances are computed over every
    /// date of the selected account.
    pub fn account_only(&self) -> Self {
        Self {
            date_range: None,
            account: self.account.clone(),
            strategy: None,
        }
    }

    /// Returns the records passing the filter, in their original order.
    pub fn apply<'a>(&self, records: &'a [TradeRecord]) -> Vec<&'a TradeRecord> {
        let bounds = Bounds::from_range(self.date_range.as_ref());

        records
            .iter()
            .filter(|r| self.account.matches(&r.account))
            .filter(|r| self.matches_strategy(r))
            .filter(|r| bounds.contains(r))
            .collect()
    }

    /// Like [`RecordFilter::apply`], keeping only records of the given kind.
    pub fn apply_kind<'a>(&self, records: &'a [TradeRecord], kind: RecordKind) -> Vec<&'a TradeRecord> {
        let mut selected = self.apply(records);
        selected.retain(|r| r.kind == kind);
        selected
    }

    /// Shorthand for the trade-only pre-filter used by most aggregators.
    pub fn trades<'a>(&self, records: &'a [TradeRecord]) -> Vec<&'a TradeRecord> {
        self.apply_kind(records, RecordKind::Trade)
    }

    fn matches_strategy(&self, record: &TradeRecord) -> bool {
        match &self.strategy {
            Some(strategy) if record.is_trade() => &record.strategy == strategy,
            _ => true,
        }
    }
}

/// Orders records chronologically by date. Ties keep their original order and
/// records with an unparseable date are dropped.
pub fn chronological<'a>(records: &[&'a TradeRecord]) -> Vec<(NaiveDate, &'a TradeRecord)> {
    let mut dated: Vec<(NaiveDate, &'a TradeRecord)> = records
        .iter()
        .filter_map(|r| match parse_date(&r.date) {
            Ok(date) => Some((date, *r)),
            Err(e) => {
                tracing::debug!(id = %r.id, "Record left out of chronological ordering: {}", e);
                None
            }
        })
        .collect();

    // `sort_by_key` is stable, which is what keeps same-day trades in entry order.
    dated.sort_by_key(|(date, _)| *date);
    dated
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn trade(id: &str, account: &str, date: &str, strategy: &str) -> TradeRecord {
        TradeRecord {
            id: id.to_string(),
            account: account.to_string(),
            date: date.to_string(),
            strategy: strategy.to_string(),
            ..TradeRecord::default()
        }
    }

    fn ids(records: &[&TradeRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    fn sample() -> Vec<TradeRecord> {
        vec![
            trade("1", "A", "2025-03-10", "Breakout"),
            trade("2", "B", "2025-01-05", "Scalp"),
            TradeRecord::deposit("A", "2025-02-01", dec!(5000)),
            trade("4", "A", "not a date", "Breakout"),
            trade("5", "A", "2025-12-31", "Scalp"),
        ]
    }

    #[test]
    fn empty_filter_keeps_everything_in_order() {
        let records = sample();
        let selected = RecordFilter::new().apply(&records);
        assert_eq!(selected.len(), records.len());
        assert_eq!(selected[3].id, "4");
    }

    #[test]
    fn date_range_is_inclusive_and_drops_bad_dates() {
        let records = sample();
        let filter = RecordFilter::new().with_date_range(DateRange::new("2025-01-05", "2025-03-10"));
        let selected = filter.trades(&records);
        assert_eq!(ids(&selected), vec!["1", "2"]);
    }

    #[test]
    fn open_ended_bounds() {
        let records = sample();
        let filter = RecordFilter::new().with_date_range(DateRange::new("2025-03-01", ""));
        assert_eq!(ids(&filter.trades(&records)), vec!["1", "5"]);
    }

    #[test]
    fn malformed_bound_matches_nothing() {
        let records = sample();
        let filter = RecordFilter::new().with_date_range(DateRange::new("01-01-2025x", "2025-12-31"));
        assert!(filter.apply(&records).is_empty());
    }

    #[test]
    fn account_and_strategy_filters() {
        let records = sample();
        let filter = RecordFilter::new().with_account("A").with_strategy("Breakout");
        let selected = filter.apply(&records);
        // The deposit passes the strategy filter.
        assert_eq!(selected.len(), 3);
        assert!(selected.iter().all(|r| r.account == "A"));
        assert_eq!(filter.apply_kind(&records, RecordKind::Deposit).len(), 1);
    }

    #[test]
    fn unknown_account_yields_empty_selection() {
        let records = sample();
        assert!(RecordFilter::new().with_account("Nope").apply(&records).is_empty());
    }

    #[test]
    fn chronological_order_is_stable() {
        let records = vec![
            trade("a", "A", "2025-02-01", ""),
            trade("b", "A", "2025-01-01", ""),
            trade("c", "A", "2025-02-01", ""),
            trade("d", "A", "garbage", ""),
        ];
        let refs: Vec<&TradeRecord> = records.iter().collect();
        let ordered: Vec<&str> = chronological(&refs).iter().map(|(_, r)| r.id.as_str()).collect();
        assert_eq!(ordered, vec!["b", "a", "c"]);
    }
}
