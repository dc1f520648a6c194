//! Salary amounts.
//!
//! Amounts arrive as JSON numbers or as strings that may not be numeric.
//! [`parse_money`] is the lenient reading used for reporting, where anything
//! that is not a number counts as zero. Request validation uses the strict
//! [`MoneyInput::to_decimal`] instead.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Fractional digits kept for monetary values.
pub const MONEY_SCALE: u32 = 2;

/// A salary value as it was supplied, before any interpretation.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MoneyInput {
    Amount(Decimal),
    Text(String),
    #[default]
    Missing,
}

impl MoneyInput {
    /// Strict reading: `None` unless the value is a number or numeric text.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            MoneyInput::Amount(value) => Some(*value),
            MoneyInput::Text(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Decimal::from_str(trimmed).ok()
                }
            }
            MoneyInput::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            MoneyInput::Missing => true,
            MoneyInput::Text(raw) => raw.trim().is_empty(),
            MoneyInput::Amount(_) => false,
        }
    }
}

impl From<Decimal> for MoneyInput {
    fn from(value: Decimal) -> Self {
        MoneyInput::Amount(value)
    }
}

impl From<&str> for MoneyInput {
    fn from(value: &str) -> Self {
        MoneyInput::Text(value.to_string())
    }
}

/// Lenient reading used by aggregations: non-numeric input counts as zero.
pub fn parse_money(value: &MoneyInput) -> Decimal {
    value.to_decimal().unwrap_or(Decimal::ZERO)
}

/// Total of `values`, pinned at the representable bounds instead of overflowing.
pub fn sum_money(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, |total, value| total.saturating_add(value))
}

/// Round to cents, halves away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}
