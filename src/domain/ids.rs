//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        ///
        /// The inner String is private to ensure all construction goes through
        /// the defined constructors.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new id from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

string_id!(
    /// Platform question/market identifier - newtype for type safety.
    MarketId
);

string_id!(
    /// AMM instance identifier (an option market or an exclusive market).
    AmmId
);

string_id!(
    /// Selectable option identifier on a question.
    OptionId
);

string_id!(
    /// Outcome identifier.
    ///
    /// Exclusive markets assign their own outcome ids; per-option AMMs address
    /// outcomes by the option id, so [`OutcomeId::from_option`] bridges the two.
    OutcomeId
);

string_id!(
    /// Backend-assigned position identifier.
    PositionId
);

string_id!(
    /// Backend-assigned trade identifier.
    TradeId
);

impl OutcomeId {
    /// Outcome key for a per-option AMM, which is keyed by its option id.
    pub fn from_option(option: &OptionId) -> Self {
        Self::new(option.as_str())
    }
}

impl OptionId {
    /// Option key back out of a per-option outcome id.
    pub fn from_outcome(outcome: &OutcomeId) -> Self {
        Self::new(outcome.as_str())
    }
}
