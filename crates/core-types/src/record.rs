use crate::enums::{Direction, RecordKind, TradeStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single journal entry: a trade, a deposit or a withdrawal.
///
/// Records are immutable once handed to the analytics layer. Editing or
/// deleting happens upstream and produces a new record list.
///
/// Trade-only fields (`strategy`, `pair`, sizing, prices, times) are empty or
/// zero on deposits and withdrawals. `gain_loss` is the gross result for a
/// trade and the signed cash amount for a cash movement (withdrawals negative).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TradeRecord {
    pub id: String,
    pub account: String,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    /// Entry date for trades, booking date for cash movements.
    pub date: String,
    pub strategy: String,
    pub pair: String,
    pub direction: Direction,
    pub lot_size: Decimal,
    pub leverage: Decimal,
    pub risk_ratio: Decimal,
    /// Either `h:mm:ss AM/PM` or `HH:mm:ss`.
    pub entry_time: String,
    pub entry_point: Decimal,
    pub take_profit: Decimal,
    pub stop_loss: Decimal,
    pub exit_date: String,
    pub exit_time: String,
    pub exit_point: Decimal,
    /// Elapsed time as `H:MM:SS`, empty while the trade is open.
    pub duration: String,
    pub status: TradeStatus,
    pub fees: Decimal,
    pub gain_loss: Decimal,
    pub notes: String,
}

impl Default for TradeRecord {
    fn default() -> Self {
        Self {
            id: String::new(),
            account: String::new(),
            kind: RecordKind::Trade,
            date: String::new(),
            strategy: String::new(),
            pair: String::new(),
            direction: Direction::None,
            lot_size: Decimal::ZERO,
            leverage: Decimal::ZERO,
            risk_ratio: Decimal::ZERO,
            entry_time: String::new(),
            entry_point: Decimal::ZERO,
            take_profit: Decimal::ZERO,
            stop_loss: Decimal::ZERO,
            exit_date: String::new(),
            exit_time: String::new(),
            exit_point: Decimal::ZERO,
            duration: String::new(),
            status: TradeStatus::None,
            fees: Decimal::ZERO,
            gain_loss: Decimal::ZERO,
            notes: String::new(),
        }
    }
}

impl TradeRecord {
    /// Creates a new open trade with a fresh id.
    pub fn new_trade(account: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            account: account.into(),
            kind: RecordKind::Trade,
            date: date.into(),
            status: TradeStatus::Open,
            ..Self::default()
        }
    }

    /// Synthesizes a deposit event. The amount is stored as a positive value.
    pub fn deposit(account: impl Into<String>, date: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            account: account.into(),
            kind: RecordKind::Deposit,
            date: date.into(),
            gain_loss: amount.abs(),
            ..Self::default()
        }
    }

    /// Synthesizes a withdrawal event. The amount is stored as a negative value.
    pub fn withdrawal(account: impl Into<String>, date: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            account: account.into(),
            kind: RecordKind::Withdrawal,
            date: date.into(),
            gain_loss: -amount.abs(),
            ..Self::default()
        }
    }

    pub fn is_trade(&self) -> bool {
        self.kind == RecordKind::Trade
    }

    /// The net effect of the record after fees.
    pub fn net_pl(&self) -> Decimal {
        self.gain_loss - self.fees
    }
}
