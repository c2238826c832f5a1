//! Non-negative monetary amounts.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value_object::ValueObject;

/// A non-negative amount in the shop's single currency.
///
/// The inner value can never be negative: the constructor clamps. Arithmetic
/// saturates instead of panicking, and subtraction floors at zero.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Clamp negatives to zero.
    pub fn clamped(amount: Decimal) -> Self {
        if amount.is_sign_negative() {
            Self::ZERO
        } else {
            // Normalizing drops trailing zeros so equal amounts compare and
            // serialize identically (`100.0` vs `100`).
            Self(amount.normalize())
        }
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn saturating_add(self, other: Money) -> Money {
        Money::clamped(self.0.saturating_add(other.0))
    }

    /// `max(0, self - other)`.
    pub fn saturating_sub(self, other: Money) -> Money {
        Money::clamped(self.0.saturating_sub(other.0))
    }
}

impl From<u32> for Money {
    fn from(value: u32) -> Self {
        Money(Decimal::from(value))
    }
}

impl From<u64> for Money {
    fn from(value: u64) -> Self {
        Money(Decimal::from(value))
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Money::clamped)
    }
}
