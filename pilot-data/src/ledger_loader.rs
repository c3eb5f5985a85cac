//! CSV loader for the sales, purchases and expenses journal.
//!
//! ## CSV Format
//!
//! Headers are matched by name; column order does not matter.
//!
//! | Column     | Required | Type    | Notes |
//! |------------|----------|---------|-------|
//! | `date`     | yes      | date    | `YYYY-MM-DD` |
//! | `mode`     | yes      | string  | `budget`, `actual` (or `reel`) |
//! | `kind`     | yes      | string  | `sale`, `purchase`, `expense` |
//! | `category` | expenses | string  | e.g. `rent`; ignored for other kinds |
//! | `channel`  | sales    | string  | `btc`, `btb`, `distributor` |
//! | `amount`   | yes      | decimal | negative for credit notes |
//!
//! ### Example
//!
//! ```csv
//! date,mode,kind,category,channel,amount
//! 2025-01-15,budget,sale,,btc,60000
//! 2025-02-01,budget,purchase,,,40000
//! 2025-01-01,budget,expense,rent,,12000
//! ```

use std::io::Read;

use chrono::NaiveDate;
use pilot_core::{EntryKind, LedgerEntry, PlanMode, SalesChannel};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    mode: String,
    kind: String,
    category: Option<String>,
    channel: Option<String>,
    amount: Decimal,
}

/// Errors that can occur while loading journal lines.
///
/// Row numbers are 1-based and do not count the header.
#[derive(Debug, Error)]
pub enum LedgerLoaderError {
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("unrecognised mode '{value}' on row {row}")]
    InvalidMode { value: String, row: usize },

    #[error("unrecognised entry kind '{value}' on row {row}")]
    InvalidKind { value: String, row: usize },

    #[error("unrecognised sales channel '{value}' on row {row}")]
    InvalidChannel { value: String, row: usize },

    #[error("sale on row {row} has no channel")]
    MissingChannel { row: usize },

    #[error("expense on row {row} has no category")]
    MissingCategory { row: usize },
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<LedgerEntry, LedgerLoaderError> {
    let mode = PlanMode::parse(&row.mode).ok_or_else(|| LedgerLoaderError::InvalidMode {
        value: row.mode.clone(),
        row: row_number,
    })?;

    let kind = match row.kind.trim().to_lowercase().as_str() {
        "sale" => {
            let code =
                non_blank(row.channel).ok_or(LedgerLoaderError::MissingChannel { row: row_number })?;
            let channel =
                SalesChannel::parse(&code).ok_or(LedgerLoaderError::InvalidChannel {
                    value: code,
                    row: row_number,
                })?;
            EntryKind::Sale { channel }
        }
        "purchase" => EntryKind::Purchase,
        "expense" => {
            let category = non_blank(row.category)
                .ok_or(LedgerLoaderError::MissingCategory { row: row_number })?;
            EntryKind::Expense { category }
        }
        _ => {
            return Err(LedgerLoaderError::InvalidKind {
                value: row.kind,
                row: row_number,
            });
        }
    };

    Ok(LedgerEntry {
        date: row.date,
        mode,
        kind,
        amount: row.amount,
    })
}

/// Parse journal lines from any reader. Rows are returned in file order.
///
/// # Errors
///
/// * [`LedgerLoaderError::Parse`] if the CSV is structurally invalid or a
///   field cannot be deserialised.
/// * One of the other variants if a row carries an unknown code or lacks
///   the channel or category its kind requires.
pub fn load<R: Read>(reader: R) -> Result<Vec<LedgerEntry>, LedgerLoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(index, row)| convert_row(row?, index + 1))
        .collect()
}

/// Convenience over [`load`] for in-memory text.
pub fn load_from_str(input: &str) -> Result<Vec<LedgerEntry>, LedgerLoaderError> {
    load(input.as_bytes())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const HEADER: &str = "date,mode,kind,category,channel,amount\n";

    fn csv(rows: &str) -> String {
        format!("{HEADER}{rows}")
    }

    #[test]
    fn loads_each_kind() {
        let input = csv(
            "2025-01-15,budget,sale,,btc,60000\n\
             2025-02-01,budget,purchase,,,40000\n\
             2025-01-01,reel,expense,rent,,12000.50\n",
        );

        let entries = load_from_str(&input).expect("valid journal");

        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries[0],
            LedgerEntry {
                date: NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date"),
                mode: PlanMode::Budget,
                kind: EntryKind::Sale {
                    channel: SalesChannel::Btc
                },
                amount: dec!(60000),
            }
        );
        assert_eq!(entries[1].kind, EntryKind::Purchase);
        assert_eq!(entries[2].mode, PlanMode::Actual);
        assert_eq!(
            entries[2].kind,
            EntryKind::Expense {
                category: "rent".to_string()
            }
        );
        assert_eq!(entries[2].amount, dec!(12000.50));
    }

    #[test]
    fn sale_without_channel_is_rejected() {
        let input = csv("2025-01-15,budget,sale,,,100\n");

        let err = load_from_str(&input).expect_err("channel is required");

        assert!(matches!(err, LedgerLoaderError::MissingChannel { row: 1 }));
    }

    #[test]
    fn expense_without_category_is_rejected() {
        let input = csv("2025-01-15,budget,purchase,,,100\n2025-01-15,budget,expense,,,100\n");

        let err = load_from_str(&input).expect_err("category is required");

        assert!(matches!(err, LedgerLoaderError::MissingCategory { row: 2 }));
    }

    #[test]
    fn unknown_mode_is_reported_with_row() {
        let input = csv("2025-01-15,forecast,purchase,,,100\n");

        let err = load_from_str(&input).expect_err("unknown mode");

        match err {
            LedgerLoaderError::InvalidMode { value, row } => {
                assert_eq!(value, "forecast");
                assert_eq!(row, 1);
            }
            other => panic!("expected InvalidMode, got {other:?}"),
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let input = csv("2025-01-15,budget,investment,,,100\n");

        let err = load_from_str(&input).expect_err("unknown kind");

        assert!(matches!(err, LedgerLoaderError::InvalidKind { row: 1, .. }));
    }

    #[test]
    fn unknown_channel_is_rejected() {
        let input = csv("2025-01-15,budget,sale,,market,100\n");

        let err = load_from_str(&input).expect_err("unknown channel");

        assert!(matches!(err, LedgerLoaderError::InvalidChannel { row: 1, .. }));
    }

    #[test]
    fn bad_date_is_a_parse_error() {
        let input = csv("15/01/2025,budget,purchase,,,100\n");

        let err = load_from_str(&input).expect_err("bad date");

        assert!(matches!(err, LedgerLoaderError::Parse(_)));
    }

    #[test]
    fn header_only_gives_empty_journal() {
        let entries = load_from_str(HEADER).expect("valid journal");

        assert!(entries.is_empty());
    }
}
