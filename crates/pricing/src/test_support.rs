use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use bloomdesk_catalog::{Coupon, CouponKind, ShippingMethod};
use bloomdesk_core::{CouponId, Money, ShippingMethodId};

pub fn coupon(kind: CouponKind, value: i64) -> Coupon {
    Coupon {
        id: CouponId::new(),
        code: "TEST".to_string(),
        kind,
        value: Decimal::from(value),
        active: true,
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
    }
}

pub fn percentage(value: i64) -> Coupon {
    coupon(CouponKind::Percentage, value)
}

pub fn fixed(value: i64) -> Coupon {
    coupon(CouponKind::FixedAmount, value)
}

pub fn shipping(cost: i64) -> ShippingMethod {
    ShippingMethod {
        id: ShippingMethodId::new(),
        name: "Courier".to_string(),
        cost: Decimal::from(cost),
    }
}

pub fn money(value: u64) -> Money {
    Money::from(value)
}
