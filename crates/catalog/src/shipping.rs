use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bloomdesk_core::{Entity, Money, ShippingMethodId};

/// A delivery option with a flat cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingMethod {
    pub id: ShippingMethodId,
    pub name: String,
    #[serde(default)]
    pub cost: Decimal,
}

impl ShippingMethod {
    /// Cost as a non-negative amount; a negative cost from the backend counts as free.
    pub fn cost(&self) -> Money {
        Money::clamped(self.cost)
    }
}

impl Entity for ShippingMethod {
    type Id = ShippingMethodId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
