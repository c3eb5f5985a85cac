//! Reduction of journal lines to plan inputs.

use chrono::Datelike;
use rust_decimal::Decimal;
use tracing::debug;

use crate::{EntryKind, LedgerEntry, PlanInputs, PlanMode};

/// Sums the entries dated in `year` and recorded under `mode`.
///
/// Negative amounts (credit notes, refunds) reduce their total.
pub fn aggregate(
    entries: &[LedgerEntry],
    year: i32,
    mode: PlanMode,
) -> PlanInputs {
    let mut inputs = PlanInputs::empty(year, mode);

    for entry in entries
        .iter()
        .filter(|e| e.mode == mode && e.date.year() == year)
    {
        inputs.entry_count += 1;
        match &entry.kind {
            EntryKind::Sale { channel } => {
                inputs.revenue += entry.amount;
                *inputs
                    .revenue_by_channel
                    .entry(*channel)
                    .or_insert(Decimal::ZERO) += entry.amount;
            }
            EntryKind::Purchase => {
                inputs.goods_purchased += entry.amount;
            }
            EntryKind::Expense { category } => {
                *inputs
                    .expenses_by_category
                    .entry(category.clone())
                    .or_insert(Decimal::ZERO) += entry.amount;
            }
        }
    }

    debug!(year, %mode, matched = inputs.entry_count, total = entries.len(), "aggregated ledger");
    inputs
}
