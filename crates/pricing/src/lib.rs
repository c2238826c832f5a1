//! Order pricing: discount, total due and cash balance.
//!
//! Everything here is pure and total. Malformed numbers are sanitized to zero
//! rather than reported, so a partially filled order form always has a
//! displayable price.
//!
//! The recompute chain runs in a fixed order:
//!
//! ```text
//! subtotal + coupon ──► discount ──► total due ──► balance
//!            shipping ─────────────────┘      tendered ─┘
//! ```

pub mod aggregator;
pub mod balance;
pub mod discount;
pub mod policy;
pub mod sanitize;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregator::{Pricing, PricingAggregator, PricingInputs, Recompute};
pub use balance::{BalanceReconciler, balance, reconcile};
pub use discount::{DiscountCalculator, discount};
pub use policy::{DiscountCap, PricingPolicy, UnrecognizedKind};
