//! Catalog models consumed by order pricing.
//!
//! Coupons and shipping methods are owned by the backend and arrive here
//! already resolved (coupon lookup by code, shipping method listing). This
//! crate only models them; it performs no IO.

pub mod coupon;
pub mod shipping;

pub use coupon::{Coupon, CouponKind};
pub use shipping::ShippingMethod;
