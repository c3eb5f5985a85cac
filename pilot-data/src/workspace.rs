use std::fs;
use std::path::{Path, PathBuf};

use pilot_core::calculations::ledger::aggregate;
use pilot_core::{FiscalParameters, LedgerEntry, PlanInputs, PlanMode, PlanSource, SourceError};
use tracing::{debug, warn};

use crate::bracket_loader::{BracketLoaderError, TaxBracketLoader};
use crate::ledger_loader::{self, LedgerLoaderError};
use crate::settings::{FiscalSettings, SettingsError};

pub const FISCAL_FILE: &str = "fiscal.toml";
pub const BRACKETS_FILE: &str = "brackets.csv";
pub const LEDGER_FILE: &str = "ledger.csv";

/// A directory holding the files that feed a projection:
///
/// | File           | Content |
/// |----------------|---------|
/// | `fiscal.toml`  | fiscal settings for one year |
/// | `brackets.csv` | tax bracket table |
/// | `ledger.csv`   | sales, purchases and expenses journal |
#[derive(Debug, Clone)]
pub struct FileWorkspace {
    root: PathBuf,
}

impl FileWorkspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every journal line, in file order.
    pub fn ledger(&self) -> Result<Vec<LedgerEntry>, SourceError> {
        let text = self.read(LEDGER_FILE)?;
        let entries = ledger_loader::load_from_str(&text).map_err(ledger_error)?;
        debug!(entries = entries.len(), root = %self.root.display(), "loaded ledger");
        Ok(entries)
    }

    fn read(
        &self,
        name: &str,
    ) -> Result<String, SourceError> {
        let path = self.root.join(name);
        fs::read_to_string(&path).map_err(|e| SourceError::Io(format!("{}: {e}", path.display())))
    }
}

impl PlanSource for FileWorkspace {
    fn fiscal_parameters(
        &self,
        year: i32,
    ) -> Result<FiscalParameters, SourceError> {
        let settings = FiscalSettings::parse(&self.read(FISCAL_FILE)?).map_err(settings_error)?;
        if settings.year != year {
            return Err(SourceError::NotFound(format!(
                "fiscal settings for {year} (workspace holds {})",
                settings.year
            )));
        }

        let schedule =
            TaxBracketLoader::load(self.read(BRACKETS_FILE)?.as_bytes()).map_err(bracket_error)?;

        settings.into_parameters(schedule).map_err(settings_error)
    }

    fn plan_inputs(
        &self,
        year: i32,
        mode: PlanMode,
    ) -> Result<PlanInputs, SourceError> {
        let inputs = aggregate(&self.ledger()?, year, mode);
        if inputs.entry_count == 0 {
            warn!(year, %mode, "no ledger entries for this year and mode");
        }
        Ok(inputs)
    }
}

fn settings_error(err: SettingsError) -> SourceError {
    match err {
        SettingsError::InvalidParameters(inner) => SourceError::InvalidFiscalParameters(inner),
        other => SourceError::Invalid(format!("{FISCAL_FILE}: {other}")),
    }
}

fn bracket_error(err: BracketLoaderError) -> SourceError {
    SourceError::Invalid(format!("{BRACKETS_FILE}: {err}"))
}

fn ledger_error(err: LedgerLoaderError) -> SourceError {
    SourceError::Invalid(format!("{LEDGER_FILE}: {err}"))
}
