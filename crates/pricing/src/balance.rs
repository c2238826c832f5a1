//! Cash balance reconciliation.

use bloomdesk_core::Money;

/// `max(0, total_due - amount_tendered)`.
pub fn balance(total_due: Money, amount_tendered: Money) -> Money {
    total_due.saturating_sub(amount_tendered)
}

/// [`balance`] with missing inputs read as zero.
pub fn reconcile(total_due: Option<Money>, amount_tendered: Option<Money>) -> Money {
    balance(total_due.unwrap_or_default(), amount_tendered.unwrap_or_default())
}

/// Keeps a balance in step with two observed inputs.
///
/// The reconciler only writes when total due or amount tendered actually
/// changed since the last observation. It never feeds back into its inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceReconciler {
    observed: Option<(Money, Money)>,
    balance: Money,
}

impl BalanceReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe the current inputs.
    ///
    /// Returns the new balance when it had to be recomputed, `None` when the
    /// inputs are the same as last time.
    pub fn observe(&mut self, total_due: Money, amount_tendered: Money) -> Option<Money> {
        let inputs = (total_due, amount_tendered);
        if self.observed == Some(inputs) {
            return None;
        }
        self.observed = Some(inputs);
        self.balance = balance(total_due, amount_tendered);
        Some(self.balance)
    }

    pub fn balance(&self) -> Money {
        self.balance
    }
}
