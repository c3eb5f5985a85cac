pub mod calculations;
pub mod models;
pub mod source;

pub use models::*;
pub use source::{PlanSource, SourceError};
