mod financial_plan;
mod fiscal_parameters;
mod ledger;
mod product;
mod simulation;
mod tax_bracket;

pub use financial_plan::FinancialPlanData;
pub use fiscal_parameters::{FiscalParameters, FiscalParametersError};
pub use ledger::{EntryKind, LedgerEntry, PlanInputs, PlanMode, SalesChannel};
pub use product::{ChannelMargin, PriceTiers, ProductCost};
pub use simulation::{SimulationScenario, SolverOutcome};
pub use stress_test::{
    Indicator, IndicatorDelta, StressTestError, StressTestParameters, StressTestResult,
};
pub use tax_bracket::{BracketSchedule, BracketScheduleError, TaxBracket};
