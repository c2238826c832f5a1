/// A domain event.
///
/// Events are immutable facts about what happened to an aggregate, named with
/// a stable dotted identifier so observers can route on them.
pub trait Event: Clone + core::fmt::Debug {
    /// Stable event name/type identifier (e.g. "orders.draft.coupon_selected").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;
}
