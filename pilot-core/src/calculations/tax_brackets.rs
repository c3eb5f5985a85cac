//! Progressive (marginal-rate) tax computation.
//!
//! Each bracket taxes only the slice of the base that falls inside it.
//! With the Belgian 2025 scale (25 % up to 15,820, 40 % up to 27,920, ...)
//! a base of 20,000 pays `15,820 × 25 % + 4,180 × 40 % = 5,627`.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use pilot_core::TaxBracket;
//! use pilot_core::calculations::compute_tax;
//!
//! let brackets = vec![
//!     TaxBracket { lower_bound: dec!(0), upper_bound: Some(dec!(15820)), rate: dec!(25), order: 1 },
//!     TaxBracket { lower_bound: dec!(15820), upper_bound: Some(dec!(27920)), rate: dec!(40), order: 2 },
//!     TaxBracket { lower_bound: dec!(27920), upper_bound: Some(dec!(48320)), rate: dec!(45), order: 3 },
//!     TaxBracket { lower_bound: dec!(48320), upper_bound: None, rate: dec!(50), order: 4 },
//! ];
//!
//! assert_eq!(compute_tax(dec!(20000), &brackets), dec!(5627));
//! ```

use rust_decimal::Decimal;

use crate::TaxBracket;
use crate::calculations::common::percent_factor;

/// Walks a bracket table in `lower_bound` order.
///
/// The table is not validated here; see [`crate::BracketSchedule`] for
/// configuration-time checks. Tax stays non-decreasing in the base for
/// any table with non-negative rates.
#[derive(Debug, Clone)]
pub struct TaxBracketCalculator<'a> {
    brackets: Vec<&'a TaxBracket>,
}

impl<'a> TaxBracketCalculator<'a> {
    pub fn new(brackets: &'a [TaxBracket]) -> Self {
        let mut brackets: Vec<&TaxBracket> = brackets.iter().collect();
        brackets.sort_by(|a, b| a.lower_bound.cmp(&b.lower_bound));
        Self { brackets }
    }

    /// Tax due on `taxable_base`; 0 for a non-positive base or an empty table.
    pub fn compute_tax(
        &self,
        taxable_base: Decimal,
    ) -> Decimal {
        if taxable_base <= Decimal::ZERO || self.brackets.is_empty() {
            return Decimal::ZERO;
        }

        let mut remaining = taxable_base;
        let mut tax = Decimal::ZERO;

        for bracket in &self.brackets {
            if remaining <= Decimal::ZERO {
                break;
            }

            let taxable_in_bracket = match bracket.width() {
                Some(width) => remaining.min(width),
                None => remaining,
            };

            if taxable_in_bracket > Decimal::ZERO {
                tax += taxable_in_bracket * percent_factor(bracket.rate);
                remaining -= taxable_in_bracket;
            }
        }

        tax
    }
}

/// Tax due on `taxable_base` under `brackets`.
pub fn compute_tax(
    taxable_base: Decimal,
    brackets: &[TaxBracket],
) -> Decimal {
    TaxBracketCalculator::new(brackets).compute_tax(taxable_base)
}
