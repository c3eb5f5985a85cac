//! Income statement projection.
//!
//! # Pipeline
//!
//! | Step | Figure |
//! |------|--------|
//! | 1    | Cost coefficient: revenue / goods purchased (0 without purchases) |
//! | 2    | Gross profit: revenue - goods purchased |
//! | 3    | Net before social contributions: gross profit - expenses |
//! | 4    | Social contributions: step 3 × rate, nothing on a loss |
//! | 5    | Net before tax: step 3 - step 4 |
//! | 6    | Exempt allowance: base + per-child supplement |
//! | 7    | Taxable base: step 5 - step 6, minimum 0 |
//! | 8    | Base tax: progressive brackets on step 7 |
//! | 9    | Municipal surcharge: step 8 × rate |
//! | 10   | Total tax: step 8 + step 9 |
//! | 11   | Net result: step 5 - step 10 |
//! | 12   | Compensation: net result per year and per month |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use pilot_core::{FiscalParameters, TaxBracket};
//! use pilot_core::calculations::{FinancialPlanProjector, round_half_up};
//!
//! let fiscal = FiscalParameters {
//!     social_contribution_rate: dec!(20.5),
//!     municipal_surcharge_rate: dec!(7),
//!     dependent_children_count: 0,
//!     base_exempt_allowance: dec!(10570),
//!     allowance_per_child: dec!(1850),
//!     brackets: vec![
//!         TaxBracket { lower_bound: dec!(0), upper_bound: Some(dec!(15820)), rate: dec!(25), order: 1 },
//!         TaxBracket { lower_bound: dec!(15820), upper_bound: Some(dec!(27920)), rate: dec!(40), order: 2 },
//!         TaxBracket { lower_bound: dec!(27920), upper_bound: Some(dec!(48320)), rate: dec!(45), order: 3 },
//!         TaxBracket { lower_bound: dec!(48320), upper_bound: None, rate: dec!(50), order: 4 },
//!     ],
//! };
//!
//! let plan = FinancialPlanProjector::new(&fiscal).project(dec!(100000), dec!(40000), dec!(20000));
//!
//! assert_eq!(plan.taxable_base, dec!(21230));
//! assert_eq!(plan.total_tax, dec!(6547.33));
//! assert_eq!(round_half_up(plan.net_result), dec!(25252.67));
//! ```

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::calculations::common::{max, percent_factor, ratio_or_zero};
use crate::calculations::tax_brackets::compute_tax;
use crate::{FinancialPlanData, FiscalParameters, PlanInputs};

const MONTHS_PER_YEAR: u32 = 12;

/// Derives a [`FinancialPlanData`] from aggregates and fiscal settings.
#[derive(Debug, Clone, Copy)]
pub struct FinancialPlanProjector<'a> {
    fiscal: &'a FiscalParameters,
}

impl<'a> FinancialPlanProjector<'a> {
    pub fn new(fiscal: &'a FiscalParameters) -> Self {
        Self { fiscal }
    }

    pub fn fiscal(&self) -> &'a FiscalParameters {
        self.fiscal
    }

    /// Projects a plan from a total expense figure.
    ///
    /// The resulting `expenses_by_category` is empty.
    pub fn project(
        &self,
        revenue: Decimal,
        goods_purchased: Decimal,
        expenses: Decimal,
    ) -> FinancialPlanData {
        self.project_parts(revenue, goods_purchased, expenses, BTreeMap::new())
    }

    /// Projects a plan whose expense total is the sum of `expenses_by_category`.
    pub fn project_with_categories(
        &self,
        revenue: Decimal,
        goods_purchased: Decimal,
        expenses_by_category: BTreeMap<String, Decimal>,
    ) -> FinancialPlanData {
        let total = expenses_by_category.values().copied().sum();
        self.project_parts(revenue, goods_purchased, total, expenses_by_category)
    }

    /// Projects aggregated ledger figures.
    pub fn project_inputs(
        &self,
        inputs: &PlanInputs,
    ) -> FinancialPlanData {
        self.project_with_categories(
            inputs.revenue,
            inputs.goods_purchased,
            inputs.expenses_by_category.clone(),
        )
    }

    /// Runs the pipeline with an explicit total and breakdown. The caller
    /// keeps the two consistent.
    pub(crate) fn project_parts(
        &self,
        revenue: Decimal,
        goods_purchased: Decimal,
        total_expenses: Decimal,
        expenses_by_category: BTreeMap<String, Decimal>,
    ) -> FinancialPlanData {
        let cost_coefficient = ratio_or_zero(revenue, goods_purchased);
        let gross_profit = revenue - goods_purchased;
        let net_before_social = gross_profit - total_expenses;
        let social_contributions = self.social_contributions(net_before_social);
        let net_before_tax = net_before_social - social_contributions;
        let exempt_allowance = self.fiscal.exempt_allowance();
        let taxable_base = self.taxable_base(net_before_tax, exempt_allowance);
        let base_tax = compute_tax(taxable_base, &self.fiscal.brackets);
        let municipal_tax = self.municipal_tax(base_tax);
        let total_tax = base_tax + municipal_tax;
        let net_result = net_before_tax - total_tax;

        FinancialPlanData {
            revenue,
            goods_purchased,
            cost_coefficient,
            gross_profit,
            total_expenses,
            expenses_by_category,
            net_before_social,
            social_contributions,
            net_before_tax,
            exempt_allowance,
            taxable_base,
            base_tax,
            municipal_tax,
            total_tax,
            net_result,
            annual_compensation: net_result,
            monthly_compensation: net_result / Decimal::from(MONTHS_PER_YEAR),
        }
    }

    /// No contribution is due on a loss.
    fn social_contributions(
        &self,
        net_before_social: Decimal,
    ) -> Decimal {
        if net_before_social > Decimal::ZERO {
            net_before_social * percent_factor(self.fiscal.social_contribution_rate)
        } else {
            Decimal::ZERO
        }
    }

    /// No refund is modelled: the base never goes below zero.
    fn taxable_base(
        &self,
        net_before_tax: Decimal,
        exempt_allowance: Decimal,
    ) -> Decimal {
        max(net_before_tax - exempt_allowance, Decimal::ZERO)
    }

    fn municipal_tax(
        &self,
        base_tax: Decimal,
    ) -> Decimal {
        base_tax * percent_factor(self.fiscal.municipal_surcharge_rate)
    }
}
