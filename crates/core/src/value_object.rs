//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attribute values.
/// `Money` and the computed pricing breakdown are value objects; coupons and
/// shipping methods are entities.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
