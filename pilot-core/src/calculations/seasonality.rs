//! Linear allocation of annual figures over the twelve months.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::common::round_half_up;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeasonalityError {
    #[error("seasonality weight for month {month} is negative: {weight}")]
    NegativeWeight { month: usize, weight: Decimal },

    #[error("seasonality weights sum to zero")]
    ZeroTotalWeight,
}

/// Equal weight for every month.
pub fn uniform() -> [Decimal; 12] {
    [Decimal::ONE; 12]
}

/// Splits `annual` across months in proportion to `weights`.
///
/// Every month is rounded to cents except the last month with a positive
/// weight, which takes the remainder, so the months always add up to
/// `annual` and zero-weight months get nothing.
///
/// # Errors
///
/// Returns [`SeasonalityError`] if any weight is negative or all are zero.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use pilot_core::calculations::seasonality::{allocate, uniform};
///
/// let months = allocate(dec!(1000), &uniform()).unwrap();
///
/// assert_eq!(months[0], dec!(83.33));
/// assert_eq!(months[11], dec!(83.37));
/// assert_eq!(months.iter().copied().sum::<rust_decimal::Decimal>(), dec!(1000));
/// ```
pub fn allocate(
    annual: Decimal,
    weights: &[Decimal; 12],
) -> Result<[Decimal; 12], SeasonalityError> {
    for (index, weight) in weights.iter().enumerate() {
        if *weight < Decimal::ZERO {
            return Err(SeasonalityError::NegativeWeight {
                month: index + 1,
                weight: *weight,
            });
        }
    }

    let total_weight: Decimal = weights.iter().copied().sum();
    if total_weight.is_zero() {
        return Err(SeasonalityError::ZeroTotalWeight);
    }

    let last = weights
        .iter()
        .rposition(|weight| *weight > Decimal::ZERO)
        .ok_or(SeasonalityError::ZeroTotalWeight)?;

    let mut months = [Decimal::ZERO; 12];
    let mut allocated = Decimal::ZERO;
    for (index, (month, weight)) in months.iter_mut().zip(weights.iter()).enumerate() {
        if index != last {
            *month = round_half_up(annual * *weight / total_weight);
            allocated += *month;
        }
    }
    months[last] = annual - allocated;

    Ok(months)
}
