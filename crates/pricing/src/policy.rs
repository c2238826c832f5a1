//! Pricing policy knobs, configurable from the environment.
//!
//! Defaults reproduce the shop's long-standing behavior: over-discounting is
//! allowed and unknown coupon kinds silently discount nothing.

use core::str::FromStr;

use bloomdesk_catalog::Coupon;
use bloomdesk_core::{DomainError, DomainResult};

/// Env var selecting [`DiscountCap`] (`uncapped` | `clamp`).
pub const DISCOUNT_CAP_ENV: &str = "BLOOMDESK_DISCOUNT_CAP";
/// Env var selecting [`UnrecognizedKind`] (`zero` | `reject`).
pub const UNRECOGNIZED_KIND_ENV: &str = "BLOOMDESK_UNRECOGNIZED_COUPON_KIND";

/// Whether a discount may exceed the subtotal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiscountCap {
    /// A fixed-amount coupon larger than the subtotal discounts its full value
    /// (total due still floors at zero).
    #[default]
    Uncapped,
    ClampToSubtotal,
}

impl FromStr for DiscountCap {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uncapped" | "none" => Ok(DiscountCap::Uncapped),
            "clamp" | "clamp-to-subtotal" | "subtotal" => Ok(DiscountCap::ClampToSubtotal),
            other => Err(DomainError::validation(format!("unknown discount cap: {other}"))),
        }
    }
}

/// What to do with a coupon whose kind is unrecognized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnrecognizedKind {
    /// Accept the coupon; it discounts nothing.
    #[default]
    ZeroDiscount,
    /// Refuse to attach the coupon to a draft.
    Reject,
}

impl FromStr for UnrecognizedKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" | "ignore" => Ok(UnrecognizedKind::ZeroDiscount),
            "reject" | "fail" => Ok(UnrecognizedKind::Reject),
            other => Err(DomainError::validation(format!(
                "unknown unrecognized-coupon-kind policy: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PricingPolicy {
    pub discount_cap: DiscountCap,
    pub unrecognized_kind: UnrecognizedKind,
}

impl PricingPolicy {
    /// Read the policy from process environment variables.
    ///
    /// Unset variables use the default; unparsable values are logged and
    /// also fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            discount_cap: read_setting(&lookup, DISCOUNT_CAP_ENV),
            unrecognized_kind: read_setting(&lookup, UNRECOGNIZED_KIND_ENV),
        }
    }

    /// Check whether a coupon may be attached to a draft under this policy.
    pub fn admit_coupon(&self, coupon: &Coupon) -> DomainResult<()> {
        if !coupon.kind.is_recognized() && self.unrecognized_kind == UnrecognizedKind::Reject {
            tracing::warn!(code = %coupon.code, "rejecting coupon with unrecognized kind");
            return Err(DomainError::validation(format!(
                "coupon {} has an unrecognized discount kind",
                coupon.code
            )));
        }
        Ok(())
    }
}

fn read_setting<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> T
where
    T: FromStr<Err = DomainError> + Default,
{
    match lookup(key) {
        None => T::default(),
        Some(raw) => raw.parse().unwrap_or_else(|err| {
            tracing::warn!(key, value = %raw, error = %err, "ignoring invalid pricing setting");
            T::default()
        }),
    }
}
