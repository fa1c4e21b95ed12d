//! Common utility functions for invoice calculations.
//!
//! This module provides shared decimal arithmetic used by the totals engine,
//! the per-item due-now derivation and the display layer.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

/// One hundred, the divisor for every percentage on an invoice.
pub const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded up to 0.01 (away from zero), which
/// matches how rupee and paisa amounts are printed on an invoice.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use bill_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(45.999)), dec!(46.00));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `percent` percent of `base`, unrounded.
///
/// The computation is `base * percent / 100`. It never panics: if the
/// product does not fit in a [`Decimal`] the term is treated as zero and a
/// warning is logged, so a derived field shows 0 until the input is fixed.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use bill_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(1266838), dec!(9)), dec!(114015.42));
/// assert_eq!(percent_of(dec!(1266838), dec!(50)), dec!(633419));
/// ```
pub fn percent_of(
    base: Decimal,
    percent: Decimal,
) -> Decimal {
    match base
        .checked_mul(percent)
        .and_then(|product| product.checked_div(HUNDRED))
    {
        Some(value) => value.normalize(),
        None => {
            warn!(%base, %percent, "percentage overflowed; treating as zero");
            Decimal::ZERO
        }
    }
}

/// Adds two decimals, saturating to zero on overflow.
///
/// Used wherever the totals engine sums user-entered amounts, so that an
/// absurd input produces a zero-valued derived field instead of a panic.
pub fn checked_sum(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    a.checked_add(b).unwrap_or_else(|| {
        warn!(%a, %b, "sum overflowed; treating as zero");
        Decimal::ZERO
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        let result = round_half_up(dec!(123.454));

        assert_eq!(result, dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        let result = round_half_up(dec!(0.125));

        assert_eq!(result, dec!(0.13));
    }

    #[test]
    fn round_half_up_carries_into_rupees() {
        let result = round_half_up(dec!(999999.999));

        assert_eq!(result, dec!(1000000.00));
    }

    #[test]
    fn round_half_up_handles_zero() {
        assert_eq!(round_half_up(Decimal::ZERO), dec!(0.00));
    }

    // =========================================================================
    // percent_of tests
    // =========================================================================

    #[test]
    fn percent_of_keeps_full_precision() {
        let result = percent_of(dec!(10.01), dec!(9));

        assert_eq!(result, dec!(0.9009)); // not rounded to paisa
    }

    #[test]
    fn percent_of_zero_percent_is_zero() {
        assert_eq!(percent_of(dec!(5000), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn percent_of_hundred_percent_is_identity() {
        assert_eq!(percent_of(dec!(1266838), dec!(100)), dec!(1266838));
    }

    #[test]
    fn percent_of_overflow_saturates_to_zero() {
        let result = percent_of(Decimal::MAX, dec!(50));

        assert_eq!(result, Decimal::ZERO);
    }

    // =========================================================================
    // checked_sum tests
    // =========================================================================

    #[test]
    fn checked_sum_adds_normally() {
        assert_eq!(checked_sum(dec!(100), dec!(250)), dec!(350));
    }

    #[test]
    fn checked_sum_overflow_saturates_to_zero() {
        assert_eq!(checked_sum(Decimal::MAX, Decimal::MAX), Decimal::ZERO);
    }
}
