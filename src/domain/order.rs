//! Trade sides, amount denominations, and pre-dispatch amount validation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Which side of an outcome a position or request is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Yes,
    No,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Yes => Side::No,
            Side::No => Side::Yes,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Yes => write!(f, "YES"),
            Side::No => write!(f, "NO"),
        }
    }
}

/// Direction of a trade request as the backend understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeSide {
    BuyYes,
    SellYes,
    BuyNo,
    SellNo,
}

impl TradeSide {
    /// The outcome side this trade touches.
    pub fn side(self) -> Side {
        match self {
            TradeSide::BuyYes | TradeSide::SellYes => Side::Yes,
            TradeSide::BuyNo | TradeSide::SellNo => Side::No,
        }
    }

    pub fn is_buy(self) -> bool {
        matches!(self, TradeSide::BuyYes | TradeSide::BuyNo)
    }

    /// The trade that opens a position on `side`.
    pub fn buy(side: Side) -> Self {
        match side {
            Side::Yes => TradeSide::BuyYes,
            Side::No => TradeSide::BuyNo,
        }
    }

    /// The trade that liquidates a position held on `side`.
    pub fn sell(side: Side) -> Self {
        match side {
            Side::Yes => TradeSide::SellYes,
            Side::No => TradeSide::SellNo,
        }
    }
}

/// Denomination of a requested amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmountType {
    /// Spend/receive a coin amount; the backend solves for shares.
    Coin,
    /// Trade an exact share quantity.
    Shares,
}

/// Validate a requested amount before any network dispatch.
///
/// Coin amounts must be positive integers and, when a balance is known, must
/// not exceed it. Share amounts must be positive. Failures here never reach
/// the network.
pub fn validate_amount(
    amount_type: AmountType,
    amount: Decimal,
    balance: Option<Decimal>,
) -> Result<(), ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NotPositive { amount });
    }
    if amount_type == AmountType::Coin {
        if !amount.fract().is_zero() {
            return Err(ValidationError::NotInteger { amount });
        }
        if let Some(balance) = balance {
            if amount > balance {
                return Err(ValidationError::OverBalance { amount, balance });
            }
        }
    }
    Ok(())
}
