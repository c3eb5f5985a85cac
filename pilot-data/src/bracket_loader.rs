use std::io::Read;

use pilot_core::{BracketSchedule, BracketScheduleError, TaxBracket};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading a tax bracket table.
#[derive(Debug, Error)]
pub enum BracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid bracket table: {0}")]
    InvalidSchedule(#[from] BracketScheduleError),
}

impl From<csv::Error> for BracketLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the tax brackets CSV file.
///
/// - `order`: position of the bracket in the scale (1 = lowest)
/// - `lower_bound`: income at which the bracket starts
/// - `upper_bound`: income at which it ends (empty for the unbounded top bracket)
/// - `rate`: marginal rate as a percentage (e.g. 25 for 25 %)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxBracketRecord {
    pub order: i32,
    pub lower_bound: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl From<&TaxBracketRecord> for TaxBracket {
    fn from(record: &TaxBracketRecord) -> Self {
        TaxBracket {
            lower_bound: record.lower_bound,
            upper_bound: record.upper_bound,
            rate: record.rate,
            order: record.order,
        }
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for the tax bracket table.
///
/// Validation happens here, at configuration-load time, so calculators can
/// trust the table they receive.
pub struct TaxBracketLoader;

impl TaxBracketLoader {
    /// Parse bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a byte slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxBracketRecord>, BracketLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TaxBracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse and validate a bracket table.
    pub fn load<R: Read>(reader: R) -> Result<BracketSchedule, BracketLoaderError> {
        let records = Self::parse(reader)?;
        let schedule = BracketSchedule::new(records.iter().map(TaxBracket::from).collect())?;
        debug!(brackets = schedule.brackets().len(), "loaded tax bracket table");
        Ok(schedule)
    }
}
