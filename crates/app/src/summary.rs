//! Order summary
//!
//! Checkout arithmetic shown at the cart page: subtotal, coupon discount,
//! delivery fee and the grand total. Orders at or above the free-delivery
//! threshold ship free; smaller orders pay a flat fee.

use theka_core::cart::Cart;

/// Order total at or above which delivery is free, in minor units.
pub const FREE_DELIVERY_THRESHOLD: u64 = 300_00;

/// Flat delivery fee below the threshold, in minor units.
pub const DELIVERY_FEE: u64 = 40_00;

/// The amounts that make up a checkout total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSummary {
    /// Sum of line totals at current unit prices.
    pub subtotal: u64,
    /// Applied coupon discount.
    pub discount: u64,
    /// Delivery fee for this order.
    pub delivery_fee: u64,
    /// Subtotal minus discount plus delivery fee, floored at zero.
    pub total: u64,
}

impl OrderSummary {
    /// Computes the summary for a cart.
    #[must_use]
    pub fn compute(cart: &Cart) -> Self {
        let subtotal = cart.total_amount();
        let discount = cart.discount();

        let delivery_fee = if subtotal >= FREE_DELIVERY_THRESHOLD {
            0
        } else {
            DELIVERY_FEE
        };

        Self {
            subtotal,
            discount,
            delivery_fee,
            total: subtotal.saturating_sub(discount).saturating_add(delivery_fee),
        }
    }

    /// How much more the customer must add for free delivery, when the
    /// order does not yet qualify.
    #[must_use]
    pub fn free_delivery_shortfall(&self) -> Option<u64> {
        if self.delivery_fee == 0 {
            None
        } else {
            Some(FREE_DELIVERY_THRESHOLD - self.subtotal)
        }
    }
}
