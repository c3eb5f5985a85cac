//! Plain-text rendering of projections for the terminal.
//!
//! Amounts are rounded half-up to cents here and nowhere earlier.

use std::fmt;

use pilot_core::calculations::round_half_up;
use pilot_core::{FinancialPlanData, SimulationScenario, StressTestResult};
use rust_decimal::Decimal;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn line(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    amount: Decimal,
) -> fmt::Result {
    writeln!(f, "{label:<34}{:>14}", round_half_up(amount))
}

/// Income statement of one plan.
pub struct PlanReport<'a>(pub &'a FinancialPlanData);

impl fmt::Display for PlanReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let plan = self.0;
        line(f, "Revenue", plan.revenue)?;
        line(f, "Goods purchased", plan.goods_purchased)?;
        if plan.cost_coefficient.is_zero() {
            writeln!(f, "{:<34}{:>14}", "Cost coefficient", "n/a")?;
        } else {
            line(f, "Cost coefficient", plan.cost_coefficient)?;
        }
        line(f, "Gross profit", plan.gross_profit)?;
        for (category, amount) in &plan.expenses_by_category {
            line(f, &format!("  {category}"), *amount)?;
        }
        line(f, "Total expenses", plan.total_expenses)?;
        line(f, "Net before social contributions", plan.net_before_social)?;
        line(f, "Social contributions", plan.social_contributions)?;
        line(f, "Net before tax", plan.net_before_tax)?;
        line(f, "Exempt allowance", plan.exempt_allowance)?;
        line(f, "Taxable base", plan.taxable_base)?;
        line(f, "Base tax", plan.base_tax)?;
        line(f, "Municipal surcharge", plan.municipal_tax)?;
        line(f, "Total tax", plan.total_tax)?;
        line(f, "Net result", plan.net_result)?;
        line(f, "Monthly compensation", plan.monthly_compensation)
    }
}

pub struct ScenarioReport<'a>(pub &'a SimulationScenario);

impl fmt::Display for ScenarioReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let scenario = self.0;
        writeln!(f, "Scenario: {}", scenario.label)?;
        if let Some(target) = scenario.target_net_result {
            line(f, "Target net result", target)?;
        }
        line(f, "Required revenue", scenario.revenue)?;
        line(f, "Goods purchased", scenario.goods_purchased)?;
        line(f, "Expenses", scenario.expenses)?;
        line(f, "Net before social contributions", scenario.net_before_social)?;
        line(f, "Social contributions", scenario.social_contributions)?;
        line(f, "Total tax", scenario.total_tax)?;
        line(f, "Net result", scenario.net_result)?;
        if !scenario.converged {
            writeln!(f, "warning: target not reached within the search range")?;
        }
        Ok(())
    }
}

pub struct StressReport<'a>(pub &'a StressTestResult);

impl fmt::Display for StressReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let result = self.0;
        writeln!(
            f,
            "{:<34}{:>14}{:>14}{:>14}{:>10}",
            "Indicator", "Baseline", "Stressed", "Delta", "Delta %"
        )?;
        for delta in &result.deltas {
            writeln!(
                f,
                "{:<34}{:>14}{:>14}{:>14}{:>10}",
                delta.indicator.label(),
                round_half_up(delta.baseline),
                round_half_up(delta.stressed),
                round_half_up(delta.delta_absolute),
                round_half_up(delta.delta_percent),
            )?;
        }
        if result.is_net_result_negative {
            writeln!(f, "alert: net result is negative")?;
        }
        if result.is_cash_at_risk {
            writeln!(f, "alert: cash at risk")?;
        }
        Ok(())
    }
}

pub struct MonthlyReport<'a>(pub &'a [Decimal; 12]);

impl fmt::Display for MonthlyReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (name, amount) in MONTH_NAMES.iter().zip(self.0.iter()) {
            line(f, name, *amount)?;
        }
        line(f, "Total", self.0.iter().copied().sum())
    }
}
