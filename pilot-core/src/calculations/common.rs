//! Money helpers shared by the calculation modules.
//!
//! Calculations keep full decimal precision; [`round_half_up`] is applied
//! only where figures are presented.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use pilot_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(428.325)), dec!(428.33));
/// assert_eq!(round_half_up(dec!(-428.325)), dec!(-428.33));
/// assert_eq!(round_half_up(dec!(2104.389166)), dec!(2104.39));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two values.
///
/// ```
/// use rust_decimal_macros::dec;
/// use pilot_core::calculations::common::max;
///
/// assert_eq!(max(dec!(-1200), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Converts a percentage (`20.5`) to a multiplier (`0.205`).
pub fn percent_factor(pct: Decimal) -> Decimal {
    pct / Decimal::ONE_HUNDRED
}

/// Converts a variation percentage (`-10`) to a growth factor (`0.9`).
pub fn variation_factor(pct: Decimal) -> Decimal {
    Decimal::ONE + percent_factor(pct)
}

/// Divides `numerator` by `denominator`, substituting 0 when the
/// denominator is zero or negative or the quotient does not fit a
/// `Decimal`.
///
/// A returned 0 means "undefined", not a literal zero ratio.
///
/// ```
/// use rust_decimal_macros::dec;
/// use pilot_core::calculations::common::ratio_or_zero;
///
/// assert_eq!(ratio_or_zero(dec!(100000), dec!(40000)), dec!(2.5));
/// assert_eq!(ratio_or_zero(dec!(100000), dec!(0)), dec!(0));
/// ```
pub fn ratio_or_zero(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    if denominator > Decimal::ZERO {
        numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    }
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
        assert_eq!(round_half_up(dec!(6547.334)), dec!(6547.33));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(6547.335)), dec!(6547.34));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        assert_eq!(round_half_up(dec!(-0.125)), dec!(-0.13));
    }

    #[test]
    fn round_half_up_handles_long_fractions() {
        let monthly = dec!(25252.67) / dec!(12);

        assert_eq!(round_half_up(monthly), dec!(2104.39));
    }

    // =========================================================================
    // max tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(21230), dec!(0)), dec!(21230));
    }

    #[test]
    fn max_clamps_negative_to_zero() {
        assert_eq!(max(dec!(-500), Decimal::ZERO), Decimal::ZERO);
    }

    // =========================================================================
    // percent / ratio tests
    // =========================================================================

    #[test]
    fn percent_factor_divides_by_one_hundred() {
        assert_eq!(percent_factor(dec!(20.5)), dec!(0.205));
    }

    #[test]
    fn variation_factor_handles_negative_variation() {
        assert_eq!(variation_factor(dec!(-10)), dec!(0.9));
        assert_eq!(variation_factor(dec!(0)), Decimal::ONE);
    }

    #[test]
    fn ratio_or_zero_substitutes_zero_for_negative_denominator() {
        assert_eq!(ratio_or_zero(dec!(10), dec!(-2)), Decimal::ZERO);
    }

    #[test]
    fn ratio_or_zero_substitutes_zero_on_overflow() {
        assert_eq!(
            ratio_or_zero(dec!(10000000), dec!(0.0000000000000000000001)),
            Decimal::ZERO
        );
    }
}
