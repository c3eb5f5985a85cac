use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Income statement derived from revenue, purchases and expenses.
///
/// Every field is recomputed by [`crate::calculations::FinancialPlanProjector`];
/// none is independently mutable in a meaningful way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialPlanData {
    /// Chiffre d'affaires.
    pub revenue: Decimal,
    pub goods_purchased: Decimal,
    /// Revenue divided by goods purchased; 0 when there are no purchases.
    pub cost_coefficient: Decimal,
    pub gross_profit: Decimal,
    pub total_expenses: Decimal,
    pub expenses_by_category: BTreeMap<String, Decimal>,
    pub net_before_social: Decimal,
    pub social_contributions: Decimal,
    pub net_before_tax: Decimal,
    pub exempt_allowance: Decimal,
    pub taxable_base: Decimal,
    pub base_tax: Decimal,
    pub municipal_tax: Decimal,
    pub total_tax: Decimal,
    pub net_result: Decimal,
    pub annual_compensation: Decimal,
    pub monthly_compensation: Decimal,
}
