//! Turning raw numeric input into [`Money`].
//!
//! None of these fail. Anything that is not a finite, non-negative number
//! becomes zero.

use core::str::FromStr;

use bloomdesk_core::Money;
use rust_decimal::prelude::*;

/// Sanitize a raw float (e.g. a numeric form field that may be empty).
pub fn from_f64(value: Option<f64>) -> Money {
    match value {
        Some(v) if v.is_finite() => Decimal::from_f64(v).map(Money::clamped).unwrap_or(Money::ZERO),
        _ => Money::ZERO,
    }
}

/// Sanitize an already-decimal amount (negatives become zero).
pub fn from_decimal(value: Decimal) -> Money {
    Money::clamped(value)
}

/// Sanitize free text typed into an amount field.
///
/// Accepts surrounding whitespace, a leading `+`, thousands separators
/// (`,` or `_`) and scientific notation.
pub fn parse(text: &str) -> Money {
    let trimmed = text.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let cleaned: String = unsigned.chars().filter(|c| !matches!(c, ',' | '_')).collect();
    if cleaned.is_empty() {
        return Money::ZERO;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map(Money::clamped)
        .unwrap_or(Money::ZERO)
}

/// Round to the nearest whole currency unit, ties away from zero.
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
