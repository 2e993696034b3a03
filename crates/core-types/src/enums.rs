use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a journal record represents. Decides which aggregators see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RecordKind {
    #[default]
    Trade,
    Deposit,
    Withdrawal,
}

impl RecordKind {
    /// Deposits and withdrawals move capital without being trades.
    pub fn is_cash_movement(&self) -> bool {
        matches!(self, RecordKind::Deposit | RecordKind::Withdrawal)
    }
}

/// The side of a trade. `None` is only valid on cash movements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
    #[default]
    #[serde(rename = "")]
    None,
}

/// The outcome of a trade. `None` is reserved for deposits and withdrawals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TradeStatus {
    Open,
    Win,
    Loss,
    Breakeven,
    #[default]
    #[serde(rename = "")]
    None,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecordKind::Trade => "Trade",
            RecordKind::Deposit => "Deposit",
            RecordKind::Withdrawal => "Withdrawal",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Long => "Long",
            Direction::Short => "Short",
            Direction::None => "",
        };
        f.write_str(s)
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TradeStatus::Open => "Open",
            TradeStatus::Win => "Win",
            TradeStatus::Loss => "Loss",
            TradeStatus::Breakeven => "Breakeven",
            TradeStatus::None => "",
        };
        f.write_str(s)
    }
}

impl FromStr for RecordKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trade" => Ok(RecordKind::Trade),
            "deposit" => Ok(RecordKind::Deposit),
            "withdrawal" | "withdraw" => Ok(RecordKind::Withdrawal),
            other => Err(CoreError::InvalidInput("record kind".to_string(), other.to_string())),
        }
    }
}

impl FromStr for Direction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long" => Ok(Direction::Long),
            "short" => Ok(Direction::Short),
            "" => Ok(Direction::None),
            other => Err(CoreError::InvalidInput("direction".to_string(), other.to_string())),
        }
    }
}

impl FromStr for TradeStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(TradeStatus::Open),
            "win" => Ok(TradeStatus::Win),
            "loss" => Ok(TradeStatus::Loss),
            "breakeven" => Ok(TradeStatus::Breakeven),
            "" => Ok(TradeStatus::None),
            other => Err(CoreError::InvalidInput("trade status".to_string(), other.to_string())),
        }
    }
}
