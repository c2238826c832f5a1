//! Coupon discount calculation.

use rust_decimal::Decimal;

use bloomdesk_catalog::{Coupon, CouponKind};
use bloomdesk_core::Money;

use crate::policy::DiscountCap;
use crate::sanitize::round_currency;

const PERCENT: Decimal = Decimal::ONE_HUNDRED;

/// Discount under the default policy (uncapped).
///
/// - no coupon or inactive coupon: 0
/// - `percentage`: `round(subtotal * value / 100)`, with `value` capped at 100
/// - `fixed-amount`: `round(value)`, even when it exceeds the subtotal
/// - unrecognized kind: 0
pub fn discount(subtotal: Money, coupon: Option<&Coupon>) -> Money {
    DiscountCalculator::default().discount(subtotal, coupon)
}

/// Maps a subtotal and an optional coupon to a discount amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscountCalculator {
    cap: DiscountCap,
}

impl DiscountCalculator {
    pub fn new(cap: DiscountCap) -> Self {
        Self { cap }
    }

    pub fn discount(&self, subtotal: Money, coupon: Option<&Coupon>) -> Money {
        let Some(coupon) = coupon.filter(|c| c.is_applicable()) else {
            return Money::ZERO;
        };

        let value = Money::clamped(coupon.value).amount();
        let raw = match coupon.kind {
            // Above 100% a larger subtotal would lower the total due.
            CouponKind::Percentage => subtotal.amount().saturating_mul(value.min(PERCENT)) / PERCENT,
            CouponKind::FixedAmount => value,
            CouponKind::Unrecognized => {
                tracing::debug!(code = %coupon.code, "coupon kind unrecognized, no discount");
                return Money::ZERO;
            }
        };
        let discount = Money::clamped(round_currency(raw));

        match self.cap {
            DiscountCap::Uncapped => discount,
            DiscountCap::ClampToSubtotal => discount.min(subtotal),
        }
    }
}
