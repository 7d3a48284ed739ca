//! Coupons
//!
//! Static reference data: a coupon is a code, a discount (percentage or
//! fixed amount) and a minimum qualifying order total. The book is fixed at
//! construction and never mutated at runtime.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::pricing::{self, PricingError};

/// Errors raised when validating or applying a coupon.
#[derive(Debug, Error)]
pub enum CouponError {
    /// The code is not in the coupon book.
    #[error("unknown coupon code `{code}`")]
    Unknown {
        /// The (normalized) code that was looked up.
        code: String,
    },

    /// The order total does not reach the coupon's minimum.
    #[error("order total {total} is below the coupon minimum {required}")]
    BelowMinimum {
        /// Minimum qualifying order total.
        required: u64,
        /// The order total that was checked.
        total: u64,
    },

    /// Discount arithmetic failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// The discount a coupon grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponValue {
    /// A percentage of the order total.
    Percentage(u8),
    /// A flat amount in minor units.
    Fixed(u64),
}

/// A single coupon: code, discount and minimum order threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coupon {
    code: String,
    value: CouponValue,
    min_order: u64,
}

impl Coupon {
    /// Creates a percentage coupon. The code is normalized to uppercase.
    #[must_use]
    pub fn percentage(code: &str, percent: u8, min_order: u64) -> Self {
        Self {
            code: code.to_uppercase(),
            value: CouponValue::Percentage(percent),
            min_order,
        }
    }

    /// Creates a fixed-amount coupon. The code is normalized to uppercase.
    #[must_use]
    pub fn fixed(code: &str, amount: u64, min_order: u64) -> Self {
        Self {
            code: code.to_uppercase(),
            value: CouponValue::Fixed(amount),
            min_order,
        }
    }

    /// The normalized coupon code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The discount this coupon grants.
    pub fn value(&self) -> CouponValue {
        self.value
    }

    /// The minimum qualifying order total in minor units.
    pub fn min_order(&self) -> u64 {
        self.min_order
    }

    /// Calculates the discount this coupon grants on an order total.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::BelowMinimum`] when `total` does not reach the
    /// coupon's minimum order, or a [`PricingError`] if the percentage
    /// arithmetic fails.
    pub fn discount_for(&self, total: u64) -> Result<u64, CouponError> {
        if total < self.min_order {
            return Err(CouponError::BelowMinimum {
                required: self.min_order,
                total,
            });
        }

        match self.value {
            CouponValue::Percentage(percent) => Ok(pricing::percentage_of(total, percent)?),
            CouponValue::Fixed(amount) => Ok(amount),
        }
    }
}

/// The coupon book: a read-only, case-normalized code lookup.
#[derive(Debug, Clone, Default)]
pub struct CouponBook {
    coupons: FxHashMap<String, Coupon>,
}

impl CouponBook {
    /// Builds a book from the given coupons.
    #[must_use]
    pub fn new(coupons: impl IntoIterator<Item = Coupon>) -> Self {
        Self {
            coupons: coupons
                .into_iter()
                .map(|coupon| (coupon.code.clone(), coupon))
                .collect(),
        }
    }

    /// The storefront's built-in coupons.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new([
            Coupon::percentage("BROCODE10", 10, 500_00),
            Coupon::fixed("NEW50", 50_00, 200_00),
            Coupon::percentage("WEEKEND20", 20, 300_00),
        ])
    }

    /// Looks up a coupon by code, ignoring case.
    pub fn find(&self, code: &str) -> Option<&Coupon> {
        self.coupons.get(&code.to_uppercase())
    }
}
