//! The order form's state holder.
//!
//! Field-change notifications from the UI land here, are sanitized, turned
//! into draft commands and executed synchronously. Subscribers are notified
//! only after the draft has applied the edit and re-priced, so they never see
//! a half-updated breakdown.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use bloomdesk_catalog::{Coupon, ShippingMethod};
use bloomdesk_core::{Aggregate, AggregateRoot, DomainError, DomainResult, OrderDraftId};
use bloomdesk_events::{Event, EventBus, InMemoryEventBus, Subscription, execute};
use bloomdesk_pricing::{Pricing, PricingPolicy, sanitize};

use crate::draft::{DraftCommand, DraftEvent, DraftStatus, OrderDraft};
use crate::submission::{OrderSubmission, OrderSubmitter, SubmitError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// A raw field edit as reported by the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    Subtotal(Option<f64>),
    Coupon(Option<Coupon>),
    Shipping(Option<ShippingMethod>),
    AmountTendered(Option<f64>),
    AmountTenderedText(String),
}

/// Notification published after each applied edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftUpdate {
    pub draft_id: OrderDraftId,
    pub version: u64,
    pub event_type: &'static str,
    pub status: DraftStatus,
    pub pricing: Pricing,
}

/// Exclusive owner of one order draft for the lifetime of a form.
#[derive(Debug)]
pub struct FormSession {
    draft: OrderDraft,
    updates: InMemoryEventBus<DraftUpdate>,
}

impl FormSession {
    /// Open an empty form with a fresh draft id.
    pub fn open(policy: PricingPolicy) -> Self {
        Self::with_id(OrderDraftId::new(), policy)
    }

    pub fn with_id(id: OrderDraftId, policy: PricingPolicy) -> Self {
        tracing::debug!(draft_id = %id, "order form opened");
        Self {
            draft: OrderDraft::empty(id, policy),
            updates: InMemoryEventBus::new(),
        }
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn status(&self) -> DraftStatus {
        self.draft.status()
    }

    pub fn pricing(&self) -> Pricing {
        self.draft.pricing()
    }

    /// Watch for completed edits. Drop the subscription to stop watching.
    pub fn subscribe(&self) -> Subscription<DraftUpdate> {
        self.updates.subscribe()
    }

    pub fn set_subtotal(&mut self, subtotal: f64) -> DomainResult<()> {
        self.on_field_changed(FieldChange::Subtotal(Some(subtotal)))
    }

    pub fn set_subtotal_decimal(&mut self, subtotal: Decimal) -> DomainResult<()> {
        self.dispatch(DraftCommand::SetSubtotal(sanitize::from_decimal(subtotal)))
    }

    pub fn select_coupon(&mut self, coupon: Option<Coupon>) -> DomainResult<()> {
        self.on_field_changed(FieldChange::Coupon(coupon))
    }

    pub fn select_shipping(&mut self, method: Option<ShippingMethod>) -> DomainResult<()> {
        self.on_field_changed(FieldChange::Shipping(method))
    }

    pub fn set_amount_tendered(&mut self, amount: f64) -> DomainResult<()> {
        self.on_field_changed(FieldChange::AmountTendered(Some(amount)))
    }

    pub fn set_amount_tendered_text(&mut self, text: &str) -> DomainResult<()> {
        self.on_field_changed(FieldChange::AmountTenderedText(text.to_string()))
    }

    /// Single entry point for form edits.
    pub fn on_field_changed(&mut self, change: FieldChange) -> DomainResult<()> {
        let command = match change {
            FieldChange::Subtotal(raw) => DraftCommand::SetSubtotal(sanitize::from_f64(raw)),
            FieldChange::Coupon(coupon) => DraftCommand::SelectCoupon(coupon),
            FieldChange::Shipping(method) => DraftCommand::SelectShipping(method),
            FieldChange::AmountTendered(raw) => {
                DraftCommand::SetAmountTendered(sanitize::from_f64(raw))
            }
            FieldChange::AmountTenderedText(text) => {
                DraftCommand::SetAmountTendered(sanitize::parse(&text))
            }
        };
        self.dispatch(command)
    }

    /// Hand the draft to the order-creation endpoint.
    ///
    /// On failure the draft stays ready for submit so the caller may retry.
    pub fn submit(&mut self, submitter: &impl OrderSubmitter) -> Result<OrderSubmission, SessionError> {
        let events = self.draft.handle(&DraftCommand::Submit)?;
        let submission = events
            .iter()
            .find_map(|e| match e {
                DraftEvent::DraftSubmitted { submission } => Some(submission.clone()),
                _ => None,
            })
            .ok_or_else(|| DomainError::invariant("submit produced no submission"))?;

        if let Err(err) = submitter.submit(&submission) {
            tracing::warn!(draft_id = %self.draft.id_typed(), error = %err, "order submission failed");
            return Err(err.into());
        }

        self.apply_all(&events);
        tracing::info!(
            draft_id = %self.draft.id_typed(),
            total_due = %submission.total_due,
            "order draft submitted"
        );
        Ok(submission)
    }

    pub fn cancel(&mut self) -> DomainResult<()> {
        self.dispatch(DraftCommand::Cancel)?;
        tracing::info!(draft_id = %self.draft.id_typed(), "order draft cancelled");
        Ok(())
    }

    fn dispatch(&mut self, command: DraftCommand) -> DomainResult<()> {
        let events = execute(&mut self.draft, &command)?;
        self.publish(&events);
        Ok(())
    }

    fn apply_all(&mut self, events: &[DraftEvent]) {
        for event in events {
            self.draft.apply(event);
        }
        self.publish(events);
    }

    /// One notification per command, after all of its events are applied.
    fn publish(&self, events: &[DraftEvent]) {
        let Some(last) = events.last() else {
            return;
        };
        let update = DraftUpdate {
            draft_id: self.draft.id_typed(),
            version: self.draft.version(),
            event_type: last.event_type(),
            status: self.draft.status(),
            pricing: self.draft.pricing(),
        };
        if let Err(err) = self.updates.publish(update) {
            tracing::warn!(error = ?err, "failed to notify draft subscribers");
        }
    }
}
