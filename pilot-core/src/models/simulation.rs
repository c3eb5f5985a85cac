use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of a revenue search for a target net result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverOutcome {
    /// Midpoint of the final search interval.
    pub revenue: Decimal,
    /// Net result obtained at `revenue`.
    pub net_result: Decimal,
    /// Bisection steps performed.
    pub iterations: u32,
    /// Whether `net_result` landed within one monetary unit of the target.
    pub converged: bool,
}

/// A named what-if scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationScenario {
    pub label: String,
    /// `None` when the scenario was evaluated at a given revenue rather
    /// than solved for a target.
    pub target_net_result: Option<Decimal>,
    pub revenue: Decimal,
    pub goods_purchased: Decimal,
    pub expenses: Decimal,
    pub net_before_social: Decimal,
    pub social_contributions: Decimal,
    pub total_tax: Decimal,
    pub net_result: Decimal,
    pub converged: bool,
}
