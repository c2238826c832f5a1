use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bloomdesk_core::{CouponId, Entity};

/// Discount rule carried by a coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CouponKind {
    /// `value` is a percentage of the subtotal.
    Percentage,
    /// `value` is an absolute amount.
    #[serde(alias = "fixed")]
    FixedAmount,
    /// Any discriminator the backend sends that we do not know.
    #[serde(other)]
    Unrecognized,
}

impl CouponKind {
    pub fn is_recognized(self) -> bool {
        !matches!(self, CouponKind::Unrecognized)
    }
}

/// A coupon resolved by code lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: CouponId,
    pub code: String,
    #[serde(rename = "discountType", alias = "kind")]
    pub kind: CouponKind,
    /// Percentage points or an absolute amount depending on `kind`. Not
    /// validated here; pricing sanitizes negatives to zero.
    #[serde(rename = "discountValue", alias = "value", default)]
    pub value: Decimal,
    #[serde(rename = "isActive", alias = "active")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Coupon {
    /// Inactive coupons contribute no discount.
    pub fn is_applicable(&self) -> bool {
        self.active
    }
}

impl Entity for Coupon {
    type Id = CouponId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
