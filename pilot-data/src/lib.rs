pub mod bracket_loader;
pub mod ledger_loader;
pub mod report;
pub mod settings;
pub mod workspace;

pub use bracket_loader::{BracketLoaderError, TaxBracketLoader, TaxBracketRecord};
pub use ledger_loader::LedgerLoaderError;
pub use settings::{FiscalSettings, SettingsError};
pub use workspace::FileWorkspace;
