//! Pricing
//!
//! Pure, deterministic pricing over cart state and the static fee
//! tables. Recomputed from current contents on every call; nothing here
//! is cached.

use serde::{Deserialize, Serialize};

use crate::{
    cart::CartLine,
    delivery::{DeliveryArea, DeliverySpeed},
    discounts::multi_buy_discount,
};

/// A priced breakdown of a cart, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Sum of price times quantity across all lines.
    pub subtotal: u64,

    /// Multi-buy discount, never greater than `subtotal`.
    pub discount: u64,

    /// Flat fee of the selected delivery area, 0 when none is selected.
    pub delivery_fee: u64,

    /// Priority surcharge, 0 for standard delivery.
    pub priority_fee: u64,

    /// `subtotal - discount + delivery_fee + priority_fee`.
    pub total: u64,
}

/// Price the given cart lines against the delivery selections.
///
/// Checkout is blocked elsewhere when no area is selected; an absent
/// area prices as a zero delivery fee.
#[must_use]
pub fn quote(lines: &[CartLine], area: Option<&DeliveryArea>, speed: DeliverySpeed) -> Quote {
    let subtotal: u64 = lines.iter().map(CartLine::line_total).sum();
    let discount = multi_buy_discount(lines).min(subtotal);
    let delivery_fee = area.map_or(0, |area| area.fee);
    let priority_fee = speed.surcharge();

    Quote {
        subtotal,
        discount,
        delivery_fee,
        priority_fee,
        total: (subtotal - discount)
            .saturating_add(delivery_fee)
            .saturating_add(priority_fee),
    }
}
