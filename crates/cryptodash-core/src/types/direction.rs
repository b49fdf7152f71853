//! Trade direction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a trade: long profits from rising prices, short from falling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeDirection {
    #[default]
    Long,
    Short,
}

impl TradeDirection {
    /// Build from an `is_long` flag.
    pub fn from_is_long(is_long: bool) -> Self {
        if is_long {
            TradeDirection::Long
        } else {
            TradeDirection::Short
        }
    }

    pub fn is_long(&self) -> bool {
        matches!(self, TradeDirection::Long)
    }

    /// Sign of a favourable price move (+1 for long, -1 for short).
    pub fn sign(&self) -> Decimal {
        match self {
            TradeDirection::Long => Decimal::ONE,
            TradeDirection::Short => -Decimal::ONE,
        }
    }
}

impl std::fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeDirection::Long => write!(f, "LONG"),
            TradeDirection::Short => write!(f, "SHORT"),
        }
    }
}
