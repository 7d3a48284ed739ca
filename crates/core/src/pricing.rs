//! Pricing
//!
//! All amounts in this crate are integer minor units (paise). Percentage
//! arithmetic goes through [`rust_decimal`] and rounds half away from zero
//! to the nearest minor unit; that is the single rounding rule used
//! everywhere a discount is computed.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

/// Errors specific to price arithmetic.
#[derive(Debug, Error)]
pub enum PricingError {
    /// A percentage calculation overflowed or could not be represented.
    #[error("percentage calculation overflowed or was not representable")]
    PercentConversion,
}

/// Calculates `percent` of a minor-unit amount, rounded half away from zero.
///
/// # Errors
///
/// Returns [`PricingError::PercentConversion`] when the intermediate decimal
/// arithmetic overflows or the result does not fit back into minor units.
pub fn percentage_of(amount: u64, percent: u8) -> Result<u64, PricingError> {
    let amount = Decimal::from(amount);
    let percent = Decimal::from(percent);

    let Some(applied) = amount.checked_mul(percent) else {
        return Err(PricingError::PercentConversion);
    };

    let Some(fraction) = applied.checked_div(Decimal::ONE_HUNDRED) else {
        return Err(PricingError::PercentConversion);
    };

    fraction
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(PricingError::PercentConversion)
}

/// Formats a minor-unit amount as a rupee string, e.g. `50` or `50.50`.
#[must_use]
pub fn format_amount(minor: u64) -> String {
    let rupees = minor / 100;
    let paise = minor % 100;

    if paise == 0 {
        format!("{rupees}")
    } else {
        format!("{rupees}.{paise:02}")
    }
}
