use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Forecast (budget) versus recorded (réel) figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanMode {
    Budget,
    Actual,
}

impl PlanMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Actual => "actual",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "budget" => Some(Self::Budget),
            "actual" | "reel" | "réel" => Some(Self::Actual),
            _ => None,
        }
    }
}

impl fmt::Display for PlanMode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sales channel, each with its own price tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SalesChannel {
    /// Direct to consumer.
    Btc,
    /// Business to business.
    Btb,
    Distributor,
}

impl SalesChannel {
    pub const ALL: [SalesChannel; 3] = [Self::Btc, Self::Btb, Self::Distributor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Btc => "btc",
            Self::Btb => "btb",
            Self::Distributor => "distributor",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "btc" => Some(Self::Btc),
            "btb" => Some(Self::Btb),
            "distributor" | "distributeur" => Some(Self::Distributor),
            _ => None,
        }
    }
}

impl fmt::Display for SalesChannel {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Sale { channel: SalesChannel },
    Purchase,
    Expense { category: String },
}

/// One line of the sales, purchases and expenses journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub date: NaiveDate,
    pub mode: PlanMode,
    pub kind: EntryKind,
    pub amount: Decimal,
}

/// Aggregated figures for one year and mode, ready for projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanInputs {
    pub year: i32,
    pub mode: PlanMode,
    pub revenue: Decimal,
    pub revenue_by_channel: BTreeMap<SalesChannel, Decimal>,
    pub goods_purchased: Decimal,
    pub expenses_by_category: BTreeMap<String, Decimal>,
    /// Journal lines aggregated into these figures.
    pub entry_count: usize,
}

impl PlanInputs {
    /// Inputs with every figure at zero.
    pub fn empty(
        year: i32,
        mode: PlanMode,
    ) -> Self {
        Self {
            year,
            mode,
            revenue: Decimal::ZERO,
            revenue_by_channel: BTreeMap::new(),
            goods_purchased: Decimal::ZERO,
            expenses_by_category: BTreeMap::new(),
            entry_count: 0,
        }
    }

    pub fn total_expenses(&self) -> Decimal {
        self.expenses_by_category.values().copied().sum()
    }
}
