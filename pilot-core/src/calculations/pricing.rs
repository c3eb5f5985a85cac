//! Unit margins and coefficients per sales channel.

use rust_decimal::Decimal;

use crate::calculations::common::ratio_or_zero;
use crate::{ChannelMargin, PriceTiers, ProductCost, SalesChannel};

/// Margin, margin rate and coefficient of `cost` on every channel.
///
/// ```
/// use rust_decimal_macros::dec;
/// use pilot_core::{PriceTiers, ProductCost, SalesChannel};
/// use pilot_core::calculations::pricing::margins;
///
/// let cost = ProductCost { ingredients: dec!(1.60), packaging: dec!(0.40) };
/// let prices = PriceTiers { btc: dec!(6), btb: dec!(4.5), distributor: dec!(3.6) };
///
/// let btc = margins(&cost, &prices)[0];
/// assert_eq!(btc.channel, SalesChannel::Btc);
/// assert_eq!(btc.margin, dec!(4));
/// assert_eq!(btc.coefficient, dec!(3));
/// ```
pub fn margins(
    cost: &ProductCost,
    prices: &PriceTiers,
) -> Vec<ChannelMargin> {
    SalesChannel::ALL
        .iter()
        .map(|channel| channel_margin(cost, prices.price(*channel), *channel))
        .collect()
}

fn channel_margin(
    cost: &ProductCost,
    price: Decimal,
    channel: SalesChannel,
) -> ChannelMargin {
    let unit_cost = cost.unit_cost();
    let margin = price - unit_cost;

    ChannelMargin {
        channel,
        price,
        margin,
        margin_rate: ratio_or_zero(margin, price) * Decimal::ONE_HUNDRED,
        coefficient: ratio_or_zero(price, unit_cost),
    }
}
