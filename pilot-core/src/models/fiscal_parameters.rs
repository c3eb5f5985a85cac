use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tax_bracket::{BracketSchedule, BracketScheduleError, TaxBracket};

/// Errors raised when fiscal settings are validated at load time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FiscalParametersError {
    #[error("social contribution rate must be between 0 and 100, got {0}")]
    InvalidSocialContributionRate(Decimal),

    #[error("municipal surcharge rate must be between 0 and 100, got {0}")]
    InvalidMunicipalSurchargeRate(Decimal),

    #[error("base exempt allowance must be non-negative, got {0}")]
    InvalidBaseExemptAllowance(Decimal),

    #[error("allowance per child must be non-negative, got {0}")]
    InvalidAllowancePerChild(Decimal),

    #[error("invalid tax brackets: {0}")]
    Brackets(#[from] BracketScheduleError),
}

/// Fiscal settings consumed by every projection.
///
/// Rates are percentages. The values are passed explicitly into each
/// calculation and never read from ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalParameters {
    pub social_contribution_rate: Decimal,
    pub municipal_surcharge_rate: Decimal,
    pub dependent_children_count: u32,
    pub base_exempt_allowance: Decimal,
    pub allowance_per_child: Decimal,
    pub brackets: Vec<TaxBracket>,
}

impl FiscalParameters {
    /// Tax-free allowance: the base allowance plus one supplement per
    /// dependent child.
    pub fn exempt_allowance(&self) -> Decimal {
        self.base_exempt_allowance
            + self.allowance_per_child * Decimal::from(self.dependent_children_count)
    }

    /// Checks rates, allowances and the bracket table.
    ///
    /// # Errors
    ///
    /// Returns the first [`FiscalParametersError`] found.
    pub fn validate(&self) -> Result<(), FiscalParametersError> {
        self.check_scalars()?;
        BracketSchedule::new(self.brackets.clone())?;
        Ok(())
    }

    /// Validates and returns the parameters with brackets in canonical
    /// `lower_bound` order.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use pilot_core::{FiscalParameters, TaxBracket};
    ///
    /// let fiscal = FiscalParameters {
    ///     social_contribution_rate: dec!(20.5),
    ///     municipal_surcharge_rate: dec!(7),
    ///     dependent_children_count: 2,
    ///     base_exempt_allowance: dec!(10570),
    ///     allowance_per_child: dec!(1850),
    ///     brackets: vec![
    ///         TaxBracket { lower_bound: dec!(15820), upper_bound: None, rate: dec!(40), order: 2 },
    ///         TaxBracket { lower_bound: dec!(0), upper_bound: Some(dec!(15820)), rate: dec!(25), order: 1 },
    ///     ],
    /// }
    /// .validated()
    /// .unwrap();
    ///
    /// assert_eq!(fiscal.brackets[0].order, 1);
    /// assert_eq!(fiscal.exempt_allowance(), dec!(14270));
    /// ```
    pub fn validated(mut self) -> Result<Self, FiscalParametersError> {
        self.check_scalars()?;
        let schedule = BracketSchedule::new(std::mem::take(&mut self.brackets))?;
        self.brackets = schedule.into_brackets();
        Ok(self)
    }

    fn check_scalars(&self) -> Result<(), FiscalParametersError> {
        if !is_percentage(self.social_contribution_rate) {
            return Err(FiscalParametersError::InvalidSocialContributionRate(
                self.social_contribution_rate,
            ));
        }
        if !is_percentage(self.municipal_surcharge_rate) {
            return Err(FiscalParametersError::InvalidMunicipalSurchargeRate(
                self.municipal_surcharge_rate,
            ));
        }
        if self.base_exempt_allowance < Decimal::ZERO {
            return Err(FiscalParametersError::InvalidBaseExemptAllowance(
                self.base_exempt_allowance,
            ));
        }
        if self.allowance_per_child < Decimal::ZERO {
            return Err(FiscalParametersError::InvalidAllowancePerChild(
                self.allowance_per_child,
            ));
        }
        Ok(())
    }
}

fn is_percentage(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::ONE_HUNDRED
}
