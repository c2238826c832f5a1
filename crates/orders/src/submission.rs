//! Snapshot handed to the external order-creation endpoint.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use bloomdesk_core::{CouponId, Money, ShippingMethodId};
use bloomdesk_pricing::{Pricing, PricingInputs};

/// Request body for order creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    pub subtotal: Money,
    pub discount: Money,
    pub total_due: Money,
    pub amount_tendered: Money,
    pub balance: Money,
    pub coupon_id: Option<CouponId>,
    pub shipping_method_id: Option<ShippingMethodId>,
}

impl OrderSubmission {
    pub fn new(pricing: &Pricing, inputs: &PricingInputs) -> Self {
        Self {
            subtotal: pricing.subtotal,
            discount: pricing.discount,
            total_due: pricing.total_due,
            amount_tendered: pricing.amount_tendered,
            balance: pricing.balance,
            coupon_id: inputs.coupon.as_ref().map(|c| c.id),
            shipping_method_id: inputs.shipping.as_ref().map(|s| s.id),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The order service refused the order (e.g. validation on its side).
    #[error("order rejected: {0}")]
    Rejected(String),

    /// The order service could not be reached.
    #[error("order service unavailable: {0}")]
    Unavailable(String),
}

/// The order-creation endpoint.
///
/// Implementations perform the network call; retries are theirs to decide.
pub trait OrderSubmitter {
    fn submit(&self, submission: &OrderSubmission) -> Result<(), SubmitError>;
}

impl<F> OrderSubmitter for F
where
    F: Fn(&OrderSubmission) -> Result<(), SubmitError>,
{
    fn submit(&self, submission: &OrderSubmission) -> Result<(), SubmitError> {
        self(submission)
    }
}
