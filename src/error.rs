use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::{Conflict, OutcomeId};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Amount validation failures, caught before any network dispatch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("amount must be positive, got {amount}")]
    NotPositive { amount: Decimal },

    #[error("coin amounts must be whole numbers, got {amount}")]
    NotInteger { amount: Decimal },

    #[error("amount {amount} exceeds available balance {balance}")]
    OverBalance { amount: Decimal, balance: Decimal },
}

/// Authentication failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("log in to place trades")]
    LoginRequired,

    #[error("request rejected with status {status}")]
    Denied { status: u16 },
}

/// Bundle responses violating the backend contract. Fatal for that quote.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BundleContractError {
    #[error("bundle response carried no components")]
    EmptyComponents,

    #[error("bundle response included the excluded target option {option}")]
    TargetInComponents { option: String },

    #[error("bundle totalShares {total} != sum of component shares {summed}")]
    ShareMismatch { total: Decimal, summed: Decimal },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Blocked by the conflict guard before dispatch, or by the backend on a
    /// race the guard could not see.
    #[error("{0}")]
    Conflict(Conflict),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    BundleContract(#[from] BundleContractError),

    /// Backend rejected the request; the message is already translated for
    /// display where a known pattern matched.
    #[error("backend rejected the request ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("unknown outcome {outcome} for this market")]
    UnknownOutcome { outcome: OutcomeId },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Map a raw backend rejection message to a friendlier one when it matches a
/// known pattern. Backend conflict races arrive as plain strings.
pub fn translate_backend_message(message: &str) -> String {
    let lowered = message.to_lowercase();
    if lowered.contains("opposite side") || lowered.contains("opposing position") {
        "You already hold the opposite side of this outcome. Close that position first.".to_string()
    } else {
        message.to_string()
    }
}
