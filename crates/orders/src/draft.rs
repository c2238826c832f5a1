use serde::{Deserialize, Serialize};

use bloomdesk_catalog::{Coupon, ShippingMethod};
use bloomdesk_core::{Aggregate, AggregateRoot, DomainError, Money, OrderDraftId};
use bloomdesk_events::Event;
use bloomdesk_pricing::{Pricing, PricingAggregator, PricingInputs, PricingPolicy};

use crate::submission::OrderSubmission;

/// Order draft lifecycle.
///
/// `Empty -> Editing <-> ReadyForSubmit -> Submitted | Cancelled`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    Empty,
    Editing,
    ReadyForSubmit,
    Submitted,
    Cancelled,
}

impl DraftStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, DraftStatus::Submitted | DraftStatus::Cancelled)
    }
}

/// Aggregate root: OrderDraft.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    id: OrderDraftId,
    policy: PricingPolicy,
    inputs: PricingInputs,
    pricing: PricingAggregator,
    status: DraftStatus,
    version: u64,
}

impl OrderDraft {
    /// A freshly opened, empty order form.
    pub fn empty(id: OrderDraftId, policy: PricingPolicy) -> Self {
        Self {
            id,
            policy,
            inputs: PricingInputs::default(),
            pricing: PricingAggregator::new(&policy),
            status: DraftStatus::Empty,
            version: 0,
        }
    }

    pub fn id_typed(&self) -> OrderDraftId {
        self.id
    }

    pub fn status(&self) -> DraftStatus {
        self.status
    }

    pub fn inputs(&self) -> &PricingInputs {
        &self.inputs
    }

    pub fn coupon(&self) -> Option<&Coupon> {
        self.inputs.coupon.as_ref()
    }

    pub fn shipping(&self) -> Option<&ShippingMethod> {
        self.inputs.shipping.as_ref()
    }

    pub fn pricing(&self) -> Pricing {
        self.pricing.current()
    }

    pub fn is_modifiable(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Submission needs a positive subtotal.
    pub fn can_submit(&self) -> bool {
        self.status == DraftStatus::ReadyForSubmit
    }

    pub fn snapshot(&self) -> OrderSubmission {
        OrderSubmission::new(&self.pricing.current(), &self.inputs)
    }
}

impl AggregateRoot for OrderDraft {
    type Id = OrderDraftId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftCommand {
    SetSubtotal(Money),
    SelectCoupon(Option<Coupon>),
    SelectShipping(Option<ShippingMethod>),
    SetAmountTendered(Money),
    Submit,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DraftEvent {
    SubtotalChanged { subtotal: Money },
    CouponSelected { coupon: Coupon },
    CouponCleared,
    ShippingSelected { method: ShippingMethod },
    ShippingCleared,
    AmountTenderedChanged { amount: Money },
    DraftSubmitted { submission: OrderSubmission },
    DraftCancelled,
}

impl Event for DraftEvent {
    fn event_type(&self) -> &'static str {
        match self {
            DraftEvent::SubtotalChanged { .. } => "orders.draft.subtotal_changed",
            DraftEvent::CouponSelected { .. } => "orders.draft.coupon_selected",
            DraftEvent::CouponCleared => "orders.draft.coupon_cleared",
            DraftEvent::ShippingSelected { .. } => "orders.draft.shipping_selected",
            DraftEvent::ShippingCleared => "orders.draft.shipping_cleared",
            DraftEvent::AmountTenderedChanged { .. } => "orders.draft.amount_tendered_changed",
            DraftEvent::DraftSubmitted { .. } => "orders.draft.submitted",
            DraftEvent::DraftCancelled => "orders.draft.cancelled",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}

impl Aggregate for OrderDraft {
    type Command = DraftCommand;
    type Event = DraftEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            DraftEvent::SubtotalChanged { subtotal } => self.inputs.subtotal = *subtotal,
            DraftEvent::CouponSelected { coupon } => self.inputs.coupon = Some(coupon.clone()),
            DraftEvent::CouponCleared => self.inputs.coupon = None,
            DraftEvent::ShippingSelected { method } => self.inputs.shipping = Some(method.clone()),
            DraftEvent::ShippingCleared => self.inputs.shipping = None,
            DraftEvent::AmountTenderedChanged { amount } => self.inputs.amount_tendered = *amount,
            DraftEvent::DraftSubmitted { .. } => self.status = DraftStatus::Submitted,
            DraftEvent::DraftCancelled => self.status = DraftStatus::Cancelled,
        }

        if !self.status.is_terminal() {
            // Every field edit re-runs the whole chain before anything can read it.
            self.pricing.recompute(&self.inputs);
            self.status = if self.inputs.subtotal.is_zero() {
                DraftStatus::Editing
            } else {
                DraftStatus::ReadyForSubmit
            };
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        if !self.is_modifiable() {
            return Err(DomainError::invariant(format!(
                "cannot change an order draft once it is {}",
                self.terminal_state_name()
            )));
        }

        match command {
            DraftCommand::SetSubtotal(subtotal) => Ok(self.handle_set_subtotal(*subtotal)),
            DraftCommand::SelectCoupon(coupon) => self.handle_select_coupon(coupon.as_ref()),
            DraftCommand::SelectShipping(method) => Ok(self.handle_select_shipping(method.as_ref())),
            DraftCommand::SetAmountTendered(amount) => Ok(self.handle_set_amount_tendered(*amount)),
            DraftCommand::Submit => self.handle_submit(),
            DraftCommand::Cancel => Ok(vec![DraftEvent::DraftCancelled]),
        }
    }
}

impl OrderDraft {
    fn terminal_state_name(&self) -> &'static str {
        match self.status {
            DraftStatus::Submitted => "submitted",
            _ => "cancelled",
        }
    }

    fn handle_set_subtotal(&self, subtotal: Money) -> Vec<DraftEvent> {
        if self.inputs.subtotal == subtotal {
            return Vec::new();
        }
        vec![DraftEvent::SubtotalChanged { subtotal }]
    }

    fn handle_select_coupon(&self, coupon: Option<&Coupon>) -> Result<Vec<DraftEvent>, DomainError> {
        if self.inputs.coupon.as_ref() == coupon {
            return Ok(Vec::new());
        }
        match coupon {
            Some(coupon) => {
                self.policy.admit_coupon(coupon)?;
                Ok(vec![DraftEvent::CouponSelected {
                    coupon: coupon.clone(),
                }])
            }
            None => Ok(vec![DraftEvent::CouponCleared]),
        }
    }

    fn handle_select_shipping(&self, method: Option<&ShippingMethod>) -> Vec<DraftEvent> {
        if self.inputs.shipping.as_ref() == method {
            return Vec::new();
        }
        match method {
            Some(method) => vec![DraftEvent::ShippingSelected {
                method: method.clone(),
            }],
            None => vec![DraftEvent::ShippingCleared],
        }
    }

    fn handle_set_amount_tendered(&self, amount: Money) -> Vec<DraftEvent> {
        if self.inputs.amount_tendered == amount {
            return Vec::new();
        }
        vec![DraftEvent::AmountTenderedChanged { amount }]
    }

    fn handle_submit(&self) -> Result<Vec<DraftEvent>, DomainError> {
        if !self.can_submit() {
            return Err(DomainError::validation(
                "cannot submit an order draft without a positive subtotal",
            ));
        }
        Ok(vec![DraftEvent::DraftSubmitted {
            submission: self.snapshot(),
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloomdesk_catalog::CouponKind;
    use bloomdesk_core::{CouponId, ShippingMethodId};
    use bloomdesk_events::execute;
    use bloomdesk_pricing::UnrecognizedKind;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn test_draft() -> OrderDraft {
        OrderDraft::empty(OrderDraftId::new(), PricingPolicy::default())
    }

    fn money(value: u64) -> Money {
        Money::from(value)
    }

    fn coupon(kind: CouponKind, value: i64) -> Coupon {
        Coupon {
            id: CouponId::new(),
            code: "ROSES".to_string(),
            kind,
            value: Decimal::from(value),
            active: true,
            created_at: Utc::now(),
        }
    }

    fn courier(cost: i64) -> ShippingMethod {
        ShippingMethod {
            id: ShippingMethodId::new(),
            name: "Courier".to_string(),
            cost: Decimal::from(cost),
        }
    }

    #[test]
    fn new_draft_is_empty_and_priced_at_zero() {
        let draft = test_draft();
        assert_eq!(draft.status(), DraftStatus::Empty);
        assert_eq!(draft.version(), 0);
        assert_eq!(draft.pricing(), Pricing::default());
    }

    #[test]
    fn positive_subtotal_makes_draft_ready() {
        let mut draft = test_draft();
        execute(&mut draft, &DraftCommand::SetSubtotal(money(1000))).unwrap();
        assert_eq!(draft.status(), DraftStatus::ReadyForSubmit);
        assert_eq!(draft.pricing().total_due, money(1000));
    }

    #[test]
    fn first_edit_with_positive_subtotal_skips_editing() {
        let mut draft = test_draft();
        assert_eq!(draft.status(), DraftStatus::Empty);
        execute(&mut draft, &DraftCommand::SetSubtotal(money(250))).unwrap();
        // Status is derived from the subtotal after each edit, so there is
        // no intermediate Editing step.
        assert_eq!(draft.status(), DraftStatus::ReadyForSubmit);
        assert_eq!(draft.version(), 1);
    }

    #[test]
    fn edits_without_subtotal_keep_draft_editing() {
        let mut draft = test_draft();
        execute(&mut draft, &DraftCommand::SelectShipping(Some(courier(50)))).unwrap();
        assert_eq!(draft.status(), DraftStatus::Editing);
        assert_eq!(draft.pricing().total_due, money(50));
    }

    #[test]
    fn dropping_subtotal_to_zero_returns_to_editing() {
        let mut draft = test_draft();
        execute(&mut draft, &DraftCommand::SetSubtotal(money(1000))).unwrap();
        execute(&mut draft, &DraftCommand::SetSubtotal(Money::ZERO)).unwrap();
        assert_eq!(draft.status(), DraftStatus::Editing);
    }

    #[test]
    fn unchanged_values_emit_no_events() {
        let mut draft = test_draft();
        let c = coupon(CouponKind::Percentage, 10);
        execute(&mut draft, &DraftCommand::SetSubtotal(money(1000))).unwrap();
        execute(&mut draft, &DraftCommand::SelectCoupon(Some(c.clone()))).unwrap();
        let version = draft.version();

        assert!(draft.handle(&DraftCommand::SetSubtotal(money(1000))).unwrap().is_empty());
        assert!(draft.handle(&DraftCommand::SelectCoupon(Some(c))).unwrap().is_empty());
        assert!(draft.handle(&DraftCommand::SelectShipping(None)).unwrap().is_empty());
        assert!(draft.handle(&DraftCommand::SetAmountTendered(Money::ZERO)).unwrap().is_empty());
        assert_eq!(draft.version(), version);
    }

    #[test]
    fn every_edit_recomputes_the_full_chain() {
        let mut draft = test_draft();
        execute(&mut draft, &DraftCommand::SetSubtotal(money(1000))).unwrap();
        execute(&mut draft, &DraftCommand::SetAmountTendered(money(500))).unwrap();
        assert_eq!(draft.pricing().balance, money(500));

        execute(
            &mut draft,
            &DraftCommand::SelectCoupon(Some(coupon(CouponKind::Percentage, 10))),
        )
        .unwrap();
        let p = draft.pricing();
        assert_eq!(p.discount, money(100));
        assert_eq!(p.total_due, money(900));
        assert_eq!(p.balance, money(400));

        execute(&mut draft, &DraftCommand::SelectShipping(Some(courier(50)))).unwrap();
        let p = draft.pricing();
        assert_eq!(p.total_due, money(950));
        assert_eq!(p.balance, money(450));

        execute(&mut draft, &DraftCommand::SelectCoupon(None)).unwrap();
        let p = draft.pricing();
        assert_eq!(p.discount, Money::ZERO);
        assert_eq!(p.total_due, money(1050));
        assert_eq!(p.balance, money(550));
    }

    #[test]
    fn edit_order_does_not_change_final_pricing() {
        let c = coupon(CouponKind::FixedAmount, 150);
        let s = courier(30);

        let mut a = test_draft();
        execute(&mut a, &DraftCommand::SetSubtotal(money(1000))).unwrap();
        execute(&mut a, &DraftCommand::SelectCoupon(Some(c.clone()))).unwrap();
        execute(&mut a, &DraftCommand::SelectShipping(Some(s.clone()))).unwrap();
        execute(&mut a, &DraftCommand::SetAmountTendered(money(200))).unwrap();

        let mut b = test_draft();
        execute(&mut b, &DraftCommand::SetAmountTendered(money(200))).unwrap();
        execute(&mut b, &DraftCommand::SelectShipping(Some(s))).unwrap();
        execute(&mut b, &DraftCommand::SelectCoupon(Some(c))).unwrap();
        execute(&mut b, &DraftCommand::SetSubtotal(money(1000))).unwrap();

        assert_eq!(a.pricing(), b.pricing());
        assert_eq!(a.pricing().total_due, money(880));
        assert_eq!(a.pricing().balance, money(680));
    }

    #[test]
    fn reject_policy_refuses_unrecognized_coupon_without_mutating() {
        let policy = PricingPolicy {
            unrecognized_kind: UnrecognizedKind::Reject,
            ..PricingPolicy::default()
        };
        let mut draft = OrderDraft::empty(OrderDraftId::new(), policy);
        execute(&mut draft, &DraftCommand::SetSubtotal(money(1000))).unwrap();
        let before = draft.pricing();

        let err = execute(
            &mut draft,
            &DraftCommand::SelectCoupon(Some(coupon(CouponKind::Unrecognized, 10))),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(draft.coupon().is_none());
        assert_eq!(draft.pricing(), before);
    }

    #[test]
    fn default_policy_accepts_unrecognized_coupon_with_zero_discount() {
        let mut draft = test_draft();
        execute(&mut draft, &DraftCommand::SetSubtotal(money(1000))).unwrap();
        execute(
            &mut draft,
            &DraftCommand::SelectCoupon(Some(coupon(CouponKind::Unrecognized, 10))),
        )
        .unwrap();
        assert!(draft.coupon().is_some());
        assert_eq!(draft.pricing().discount, Money::ZERO);
    }

    #[test]
    fn cannot_submit_without_positive_subtotal() {
        let draft = test_draft();
        let err = draft.handle(&DraftCommand::Submit).unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("positive subtotal") => {}
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn submit_snapshots_pricing_and_selection() {
        let mut draft = test_draft();
        let c = coupon(CouponKind::Percentage, 10);
        let s = courier(50);
        execute(&mut draft, &DraftCommand::SetSubtotal(money(1000))).unwrap();
        execute(&mut draft, &DraftCommand::SelectCoupon(Some(c.clone()))).unwrap();
        execute(&mut draft, &DraftCommand::SelectShipping(Some(s.clone()))).unwrap();
        execute(&mut draft, &DraftCommand::SetAmountTendered(money(700))).unwrap();

        let events = execute(&mut draft, &DraftCommand::Submit).unwrap();
        match &events[..] {
            [DraftEvent::DraftSubmitted { submission }] => {
                assert_eq!(submission.subtotal, money(1000));
                assert_eq!(submission.discount, money(100));
                assert_eq!(submission.total_due, money(950));
                assert_eq!(submission.amount_tendered, money(700));
                assert_eq!(submission.balance, money(250));
                assert_eq!(submission.coupon_id, Some(c.id));
                assert_eq!(submission.shipping_method_id, Some(s.id));
            }
            other => panic!("Expected a single DraftSubmitted event, got {other:?}"),
        }
        assert_eq!(draft.status(), DraftStatus::Submitted);
    }

    #[test]
    fn terminal_drafts_reject_further_edits() {
        let mut draft = test_draft();
        assert!(draft.is_modifiable());
        execute(&mut draft, &DraftCommand::Cancel).unwrap();
        assert_eq!(draft.status(), DraftStatus::Cancelled);
        assert!(!draft.is_modifiable());

        let err = draft.handle(&DraftCommand::SetSubtotal(money(10))).unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) if msg.contains("cancelled") => {}
            other => panic!("Expected InvariantViolation, got {other:?}"),
        }
        assert!(draft.handle(&DraftCommand::Cancel).is_err());
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let mut draft = test_draft();
        execute(&mut draft, &DraftCommand::SetSubtotal(money(1000))).unwrap();
        let version = draft.version();
        let pricing = draft.pricing();

        let cmd = DraftCommand::SelectCoupon(Some(coupon(CouponKind::FixedAmount, 100)));
        let events1 = draft.handle(&cmd).unwrap();
        let events2 = draft.handle(&cmd).unwrap();

        assert_eq!(events1, events2);
        assert_eq!(draft.version(), version);
        assert_eq!(draft.pricing(), pricing);
        assert!(draft.coupon().is_none());
    }

    #[test]
    fn event_types_are_namespaced() {
        let e = DraftEvent::CouponCleared;
        assert_eq!(e.event_type(), "orders.draft.coupon_cleared");
        assert_eq!(Event::version(&e), 1);
    }
}
