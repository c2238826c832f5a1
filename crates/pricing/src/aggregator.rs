//! The recompute chain: discount, then total due, then balance.

use serde::Serialize;

use bloomdesk_catalog::{Coupon, ShippingMethod};
use bloomdesk_core::{Money, ValueObject};

use crate::balance::{BalanceReconciler, balance};
use crate::discount::DiscountCalculator;
use crate::policy::PricingPolicy;

/// Everything the chain reads. All amounts are already sanitized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PricingInputs {
    pub subtotal: Money,
    pub coupon: Option<Coupon>,
    pub shipping: Option<ShippingMethod>,
    pub amount_tendered: Money,
}

impl PricingInputs {
    /// Zero when no shipping method is selected.
    pub fn shipping_cost(&self) -> Money {
        self.shipping.as_ref().map(ShippingMethod::cost).unwrap_or_default()
    }
}

/// A consistent pricing breakdown.
///
/// Produced in one piece by the aggregator, so a reader never sees a discount
/// from one run next to a balance from another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub subtotal: Money,
    pub discount: Money,
    pub shipping_cost: Money,
    pub total_due: Money,
    pub amount_tendered: Money,
    pub balance: Money,
}

impl ValueObject for Pricing {}

/// Outcome of [`PricingAggregator::recompute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    /// Inputs or outputs identical to the previous run; nothing written.
    Unchanged,
    Changed(Pricing),
}

/// Orchestrates the pricing chain for one order draft.
#[derive(Debug, Clone, Default)]
pub struct PricingAggregator {
    calculator: DiscountCalculator,
    reconciler: BalanceReconciler,
    last_inputs: Option<PricingInputs>,
    current: Pricing,
}

impl PricingAggregator {
    pub fn new(policy: &PricingPolicy) -> Self {
        Self {
            calculator: DiscountCalculator::new(policy.discount_cap),
            ..Self::default()
        }
    }

    /// Pure pipeline: compute a full breakdown from scratch.
    pub fn compute(&self, inputs: &PricingInputs) -> Pricing {
        let (discount, shipping_cost, total_due) = self.price(inputs);
        Pricing {
            subtotal: inputs.subtotal,
            discount,
            shipping_cost,
            total_due,
            amount_tendered: inputs.amount_tendered,
            balance: balance(total_due, inputs.amount_tendered),
        }
    }

    /// Re-run the chain against new inputs, memoizing the previous run.
    ///
    /// The stored breakdown is replaced in a single assignment after all three
    /// steps have run.
    pub fn recompute(&mut self, inputs: &PricingInputs) -> Recompute {
        if self.last_inputs.as_ref() == Some(inputs) {
            return Recompute::Unchanged;
        }

        let (discount, shipping_cost, total_due) = self.price(inputs);
        let balance = self
            .reconciler
            .observe(total_due, inputs.amount_tendered)
            .unwrap_or_else(|| self.reconciler.balance());

        let next = Pricing {
            subtotal: inputs.subtotal,
            discount,
            shipping_cost,
            total_due,
            amount_tendered: inputs.amount_tendered,
            balance,
        };
        self.last_inputs = Some(inputs.clone());

        if next == self.current {
            return Recompute::Unchanged;
        }
        tracing::debug!(
            subtotal = %next.subtotal,
            discount = %next.discount,
            shipping = %next.shipping_cost,
            total_due = %next.total_due,
            balance = %next.balance,
            "pricing recomputed"
        );
        self.current = next;
        Recompute::Changed(next)
    }

    pub fn current(&self) -> Pricing {
        self.current
    }

    /// Steps 1 and 2: discount, then `max(0, subtotal - discount + shipping)`.
    fn price(&self, inputs: &PricingInputs) -> (Money, Money, Money) {
        let discount = self.calculator.discount(inputs.subtotal, inputs.coupon.as_ref());
        let shipping_cost = inputs.shipping_cost();
        let total_due = inputs
            .subtotal
            .saturating_add(shipping_cost)
            .saturating_sub(discount);
        (discount, shipping_cost, total_due)
    }
}
