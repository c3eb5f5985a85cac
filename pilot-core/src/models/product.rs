use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ledger::SalesChannel;

/// Per-unit cost of a finished product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductCost {
    /// Recipe ingredients for one unit.
    pub ingredients: Decimal,
    /// Packaging for one unit.
    pub packaging: Decimal,
}

impl ProductCost {
    pub fn unit_cost(&self) -> Decimal {
        self.ingredients + self.packaging
    }
}

/// Selling price of one unit on each channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceTiers {
    pub btc: Decimal,
    pub btb: Decimal,
    pub distributor: Decimal,
}

impl PriceTiers {
    pub fn price(
        &self,
        channel: SalesChannel,
    ) -> Decimal {
        match channel {
            SalesChannel::Btc => self.btc,
            SalesChannel::Btb => self.btb,
            SalesChannel::Distributor => self.distributor,
        }
    }
}

/// Margin of one product on one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMargin {
    pub channel: SalesChannel,
    pub price: Decimal,
    pub margin: Decimal,
    /// Margin as a percentage of price; 0 when the price is 0.
    pub margin_rate: Decimal,
    /// Price divided by unit cost; 0 when the cost is 0.
    pub coefficient: Decimal,
}
