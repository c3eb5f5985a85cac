//! Revenue search for a target net result.
//!
//! Net result is non-decreasing in revenue whenever the cost coefficient
//! is above 1 (or undefined), because gross profit, net before tax and the
//! taxable base all grow with revenue and bracket tax is non-decreasing and
//! convex in its base. Bisection relies on that; a loss-making coefficient
//! (between 0 and 1) breaks it, and the outcome then reports
//! `converged = false`.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::financial_plan::FinancialPlanProjector;
use crate::{FiscalParameters, SimulationScenario, SolverOutcome};

/// Upper end of the revenue search interval. Tunable through
/// [`ScenarioSolver::with_ceiling`].
pub const DEFAULT_REVENUE_CEILING: i64 = 10_000_000;

/// Bisection steps before giving up. 100 halvings of the default ceiling
/// reach far below one cent.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Bisection over revenue in `[0, ceiling]`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use pilot_core::{FiscalParameters, TaxBracket};
/// use pilot_core::calculations::ScenarioSolver;
///
/// let fiscal = FiscalParameters {
///     social_contribution_rate: dec!(20.5),
///     municipal_surcharge_rate: dec!(7),
///     dependent_children_count: 0,
///     base_exempt_allowance: dec!(10570),
///     allowance_per_child: dec!(1850),
///     brackets: vec![
///         TaxBracket { lower_bound: dec!(0), upper_bound: Some(dec!(15820)), rate: dec!(25), order: 1 },
///         TaxBracket { lower_bound: dec!(15820), upper_bound: None, rate: dec!(40), order: 2 },
///     ],
/// };
///
/// let solver = ScenarioSolver::new(&fiscal);
/// let outcome = solver.break_even(dec!(2.5), dec!(20000));
///
/// assert!(outcome.converged);
/// assert!(outcome.net_result.abs() < dec!(1));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ScenarioSolver<'a> {
    projector: FinancialPlanProjector<'a>,
    ceiling: Decimal,
    max_iterations: u32,
}

impl<'a> ScenarioSolver<'a> {
    pub fn new(fiscal: &'a FiscalParameters) -> Self {
        Self {
            projector: FinancialPlanProjector::new(fiscal),
            ceiling: Decimal::from(DEFAULT_REVENUE_CEILING),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_ceiling(
        mut self,
        ceiling: Decimal,
    ) -> Self {
        self.ceiling = ceiling;
        self
    }

    pub fn with_max_iterations(
        mut self,
        max_iterations: u32,
    ) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Best-effort revenue producing `target_net` for the given coefficient
    /// and expenses. Never fails; see [`ScenarioSolver::solve`] for the
    /// convergence flag.
    pub fn solve_revenue_for_target(
        &self,
        target_net: Decimal,
        cost_coefficient: Decimal,
        expenses: Decimal,
    ) -> Decimal {
        self.solve(target_net, cost_coefficient, expenses).revenue
    }

    /// Bisects until the net result is within one monetary unit of
    /// `target_net` or the iteration budget runs out.
    pub fn solve(
        &self,
        target_net: Decimal,
        cost_coefficient: Decimal,
        expenses: Decimal,
    ) -> SolverOutcome {
        let mut low = Decimal::ZERO;
        let mut high = self.ceiling;

        for iteration in 1..=self.max_iterations {
            let mid = (low + high) / Decimal::TWO;
            let Some(net_result) = self.net_result_at(mid, cost_coefficient, expenses) else {
                high = mid;
                continue;
            };

            if within_epsilon(net_result, target_net) {
                debug!(%target_net, revenue = %mid, iteration, "revenue search converged");
                return SolverOutcome {
                    revenue: mid,
                    net_result,
                    iterations: iteration,
                    converged: true,
                };
            }

            if net_result < target_net {
                low = mid;
            } else {
                high = mid;
            }
        }

        let midpoint = (low + high) / Decimal::TWO;
        let (revenue, net_result) = [midpoint, low]
            .into_iter()
            .find_map(|revenue| {
                self.net_result_at(revenue, cost_coefficient, expenses)
                    .map(|net_result| (revenue, net_result))
            })
            .unwrap_or_else(|| {
                let plan = self.projector.project(Decimal::ZERO, Decimal::ZERO, expenses);
                (Decimal::ZERO, plan.net_result)
            });
        let converged = within_epsilon(net_result, target_net);
        if !converged {
            warn!(
                %target_net,
                %revenue,
                %net_result,
                iterations = self.max_iterations,
                "revenue search did not reach target"
            );
        }

        SolverOutcome {
            revenue,
            net_result,
            iterations: self.max_iterations,
            converged,
        }
    }

    /// Revenue at which the net result is zero (seuil de rentabilité).
    pub fn break_even(
        &self,
        cost_coefficient: Decimal,
        expenses: Decimal,
    ) -> SolverOutcome {
        self.solve(Decimal::ZERO, cost_coefficient, expenses)
    }

    /// Solves for `target_net` and describes the resulting plan.
    pub fn scenario(
        &self,
        label: impl Into<String>,
        target_net: Decimal,
        cost_coefficient: Decimal,
        expenses: Decimal,
    ) -> SimulationScenario {
        let outcome = self.solve(target_net, cost_coefficient, expenses);
        let mut scenario =
            self.scenario_at_revenue(label, outcome.revenue, cost_coefficient, expenses);
        scenario.target_net_result = Some(target_net);
        scenario.converged = outcome.converged;
        scenario
    }

    /// Describes the plan at a given revenue, without solving.
    pub fn scenario_at_revenue(
        &self,
        label: impl Into<String>,
        revenue: Decimal,
        cost_coefficient: Decimal,
        expenses: Decimal,
    ) -> SimulationScenario {
        let goods_purchased =
            implied_purchases(revenue, cost_coefficient).unwrap_or_else(purchase_limit);
        let plan = self.projector.project(revenue, goods_purchased, expenses);

        SimulationScenario {
            label: label.into(),
            target_net_result: None,
            revenue: plan.revenue,
            goods_purchased: plan.goods_purchased,
            expenses: plan.total_expenses,
            net_before_social: plan.net_before_social,
            social_contributions: plan.social_contributions,
            total_tax: plan.total_tax,
            net_result: plan.net_result,
            converged: true,
        }
    }

    /// `None` when the purchases implied by `revenue` are too large to
    /// project.
    fn net_result_at(
        &self,
        revenue: Decimal,
        cost_coefficient: Decimal,
        expenses: Decimal,
    ) -> Option<Decimal> {
        let goods_purchased = implied_purchases(revenue, cost_coefficient)?;
        Some(
            self.projector
                .project(revenue, goods_purchased, expenses)
                .net_result,
        )
    }
}

/// Largest purchase figure handed to the projector. Leaves headroom for
/// the subtractions of the pipeline.
fn purchase_limit() -> Decimal {
    Decimal::MAX / Decimal::from(4)
}

/// Purchases at `revenue` for `cost_coefficient`; 0 when the coefficient is
/// undefined, `None` when they exceed [`purchase_limit`].
fn implied_purchases(
    revenue: Decimal,
    cost_coefficient: Decimal,
) -> Option<Decimal> {
    if cost_coefficient <= Decimal::ZERO {
        return Some(Decimal::ZERO);
    }
    revenue
        .checked_div(cost_coefficient)
        .filter(|goods| goods.abs() <= purchase_limit())
}

fn within_epsilon(
    net_result: Decimal,
    target_net: Decimal,
) -> bool {
    (net_result - target_net).abs() < Decimal::ONE
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::TaxBracket;

    fn test_fiscal() -> FiscalParameters {
        FiscalParameters {
            social_contribution_rate: dec!(20.5),
            municipal_surcharge_rate: dec!(7),
            dependent_children_count: 0,
            base_exempt_allowance: dec!(10570),
            allowance_per_child: dec!(1850),
            brackets: vec![
                TaxBracket {
                    lower_bound: dec!(0),
                    upper_bound: Some(dec!(15820)),
                    rate: dec!(25),
                    order: 1,
                },
                TaxBracket {
                    lower_bound: dec!(15820),
                    upper_bound: Some(dec!(27920)),
                    rate: dec!(40),
                    order: 2,
                },
                TaxBracket {
                    lower_bound: dec!(27920),
                    upper_bound: Some(dec!(48320)),
                    rate: dec!(45),
                    order: 3,
                },
                TaxBracket {
                    lower_bound: dec!(48320),
                    upper_bound: None,
                    rate: dec!(50),
                    order: 4,
                },
            ],
        }
    }

    #[test]
    fn solved_revenue_reproduces_target() {
        let fiscal = test_fiscal();
        let solver = ScenarioSolver::new(&fiscal);
        let projector = FinancialPlanProjector::new(&fiscal);
        let coefficient = dec!(2.5);
        let expenses = dec!(20000);

        for target in [dec!(0), dec!(10000), dec!(50000)] {
            let revenue = solver.solve_revenue_for_target(target, coefficient, expenses);
            let plan = projector.project(revenue, revenue / coefficient, expenses);

            assert!(
                (plan.net_result - target).abs() < Decimal::ONE,
                "target {target}: got {} at revenue {revenue}",
                plan.net_result
            );
        }
    }

    #[test]
    fn break_even_covers_expenses_with_margin() {
        let fiscal = test_fiscal();
        let outcome = ScenarioSolver::new(&fiscal).break_even(dec!(2.5), dec!(20000));

        // Gross margin is 60% of revenue; 20000 / 0.6 = 33333.33
        assert!(outcome.converged);
        assert!((outcome.revenue - dec!(33333.33)).abs() < dec!(3));
    }

    #[test]
    fn reference_plan_is_recovered() {
        let fiscal = test_fiscal();
        let outcome = ScenarioSolver::new(&fiscal).solve(dec!(25252.67), dec!(2.5), dec!(20000));

        assert!(outcome.converged);
        assert!((outcome.revenue - dec!(100000)).abs() < dec!(5));
    }

    #[test]
    fn unreachable_target_is_reported() {
        let fiscal = test_fiscal();
        let outcome = ScenarioSolver::new(&fiscal)
            .with_ceiling(dec!(1000))
            .solve(dec!(50000), dec!(2.5), dec!(0));

        assert!(!outcome.converged);
        assert_eq!(outcome.iterations, DEFAULT_MAX_ITERATIONS);
        assert!(outcome.revenue > dec!(999) && outcome.revenue <= dec!(1000));
    }

    #[test]
    fn loss_making_coefficient_does_not_converge() {
        let fiscal = test_fiscal();
        let outcome = ScenarioSolver::new(&fiscal).solve(dec!(10000), dec!(0.5), dec!(1000));

        assert!(!outcome.converged);
        assert!(outcome.net_result < dec!(10000));
    }

    #[test]
    fn tiny_coefficient_is_reported_not_reached() {
        let fiscal = test_fiscal();
        let coefficient = dec!(0.0000000000000000000001);

        let outcome = ScenarioSolver::new(&fiscal).solve(dec!(0), coefficient, dec!(100));

        assert!(!outcome.converged);
        assert!(outcome.revenue >= Decimal::ZERO && outcome.revenue <= dec!(10000000));
        assert!(outcome.net_result < Decimal::ZERO);
    }

    #[test]
    fn tiny_coefficient_scenario_caps_purchases() {
        let fiscal = test_fiscal();
        let coefficient = dec!(0.0000000000000000000001);

        let scenario =
            ScenarioSolver::new(&fiscal).scenario_at_revenue("overstock", dec!(5000000), coefficient, dec!(100));

        assert_eq!(scenario.goods_purchased, purchase_limit());
        assert!(scenario.net_result < Decimal::ZERO);
    }

    #[test]
    fn zero_coefficient_means_no_purchases() {
        let fiscal = test_fiscal();
        let scenario =
            ScenarioSolver::new(&fiscal).scenario_at_revenue("no stock", dec!(50000), dec!(0), dec!(0));

        assert_eq!(scenario.goods_purchased, Decimal::ZERO);
        assert_eq!(scenario.net_before_social, dec!(50000));
    }

    #[test]
    fn zero_iteration_budget_returns_interval_midpoint() {
        let fiscal = test_fiscal();
        let outcome = ScenarioSolver::new(&fiscal)
            .with_max_iterations(0)
            .solve(dec!(0), dec!(2.5), dec!(20000));

        assert_eq!(outcome.revenue, dec!(5000000));
        assert_eq!(outcome.iterations, 0);
        assert!(!outcome.converged);
    }

    #[test]
    fn scenario_records_target_and_plan() {
        let fiscal = test_fiscal();
        let scenario =
            ScenarioSolver::new(&fiscal).scenario("Objectif", dec!(10000), dec!(2.5), dec!(20000));

        assert_eq!(scenario.label, "Objectif");
        assert_eq!(scenario.target_net_result, Some(dec!(10000)));
        assert!(scenario.converged);
        assert_eq!(scenario.expenses, dec!(20000));
        assert_eq!(scenario.goods_purchased, scenario.revenue / dec!(2.5));
        assert!((scenario.net_result - dec!(10000)).abs() < Decimal::ONE);
    }
}
