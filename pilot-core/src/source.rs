use thiserror::Error;

use crate::models::{FiscalParameters, FiscalParametersError, PlanInputs, PlanMode};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Invalid fiscal parameters: {0}")]
    InvalidFiscalParameters(#[from] FiscalParametersError),

    #[error("Invalid data: {0}")]
    Invalid(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Supplies the figures a projection needs.
///
/// Implemented by the surrounding data layer; calculators never fetch
/// anything themselves.
pub trait PlanSource: Send + Sync {
    /// Validated fiscal settings for `year`.
    fn fiscal_parameters(
        &self,
        year: i32,
    ) -> Result<FiscalParameters, SourceError>;

    /// Aggregated sales, purchases and expenses for `year` and `mode`.
    fn plan_inputs(
        &self,
        year: i32,
        mode: PlanMode,
    ) -> Result<PlanInputs, SourceError>;
}
