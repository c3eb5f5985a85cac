//! Pure calculation modules of the planning engine.
//!
//! Nothing here performs I/O or reads global state: fiscal settings are
//! passed into every calculator explicitly.

pub mod common;
pub mod financial_plan;
pub mod ledger;
pub mod pricing;
pub mod scenario_solver;
pub mod seasonality;
pub mod tax_brackets;

pub use common::round_half_up;
pub use financial_plan::FinancialPlanProjector;
pub use scenario_solver::{DEFAULT_MAX_ITERATIONS, DEFAULT_REVENUE_CEILING, ScenarioSolver};
pub use seasonality::SeasonalityError;
pub use stress_test::StressTestProjector;
pub use tax_brackets::{TaxBracketCalculator, compute_tax};
