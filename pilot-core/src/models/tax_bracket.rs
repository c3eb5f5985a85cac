use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::tax_brackets::compute_tax;

/// A contiguous income range taxed at a single marginal rate.
///
/// `rate` is a percentage (`25` means 25 %). An `upper_bound` of `None`
/// marks the unbounded top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
    pub order: i32,
}

impl TaxBracket {
    /// Width of the bracket, or `None` for the unbounded top bracket.
    pub fn width(&self) -> Option<Decimal> {
        self.upper_bound.map(|upper| upper - self.lower_bound)
    }
}

/// Configuration errors detected when a bracket table is validated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketScheduleError {
    /// A rate outside 0..=100 percent.
    #[error("bracket {order} has rate {rate}, expected a percentage between 0 and 100")]
    InvalidRate { order: i32, rate: Decimal },

    /// The first bracket starts below zero.
    #[error("bracket {order} starts at negative bound {lower_bound}")]
    NegativeLowerBound { order: i32, lower_bound: Decimal },

    /// `upper_bound` is not strictly above `lower_bound`.
    #[error("bracket {order} has upper bound {upper_bound} not above lower bound {lower_bound}")]
    InvertedBounds {
        order: i32,
        lower_bound: Decimal,
        upper_bound: Decimal,
    },

    /// Sorting by `lower_bound` does not give strictly increasing `order`.
    #[error("bracket {order} starting at {lower_bound} is out of order")]
    OrderMismatch { order: i32, lower_bound: Decimal },

    /// Two neighbouring brackets leave part of the income range uncovered.
    #[error("gap between {from} and {to}")]
    Gap { from: Decimal, to: Decimal },

    /// Two neighbouring brackets cover the same income.
    #[error("brackets overlap at {at}")]
    Overlap { at: Decimal },

    /// An unbounded bracket is followed by another bracket.
    #[error("unbounded bracket {order} is not the last one")]
    UnboundedNotLast { order: i32 },

    /// The highest bracket has an upper bound.
    #[error("top bracket {order} must be unbounded")]
    MissingUnboundedTop { order: i32 },
}

/// A bracket table that has passed configuration-time validation.
///
/// Brackets are held sorted by `lower_bound`, which is the canonical
/// ordering; `order` has been checked to agree with it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BracketSchedule {
    brackets: Vec<TaxBracket>,
}

impl BracketSchedule {
    /// Validates and sorts a bracket table.
    ///
    /// An empty table is accepted and taxes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`BracketScheduleError`] describing the first violation found
    /// after sorting by `lower_bound`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use pilot_core::{BracketSchedule, BracketScheduleError, TaxBracket};
    ///
    /// let brackets = vec![
    ///     TaxBracket { lower_bound: dec!(0), upper_bound: Some(dec!(15820)), rate: dec!(25), order: 1 },
    ///     TaxBracket { lower_bound: dec!(16000), upper_bound: None, rate: dec!(40), order: 2 },
    /// ];
    ///
    /// assert_eq!(
    ///     BracketSchedule::new(brackets),
    ///     Err(BracketScheduleError::Gap { from: dec!(15820), to: dec!(16000) })
    /// );
    /// ```
    pub fn new(mut brackets: Vec<TaxBracket>) -> Result<Self, BracketScheduleError> {
        brackets.sort_by(|a, b| a.lower_bound.cmp(&b.lower_bound));

        for bracket in &brackets {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE_HUNDRED {
                return Err(BracketScheduleError::InvalidRate {
                    order: bracket.order,
                    rate: bracket.rate,
                });
            }
            if let Some(upper_bound) = bracket.upper_bound {
                if upper_bound <= bracket.lower_bound {
                    return Err(BracketScheduleError::InvertedBounds {
                        order: bracket.order,
                        lower_bound: bracket.lower_bound,
                        upper_bound,
                    });
                }
            }
        }

        if let Some(first) = brackets.first() {
            if first.lower_bound < Decimal::ZERO {
                return Err(BracketScheduleError::NegativeLowerBound {
                    order: first.order,
                    lower_bound: first.lower_bound,
                });
            }
        }

        for pair in brackets.windows(2) {
            let (previous, current) = (&pair[0], &pair[1]);

            if current.order <= previous.order {
                return Err(BracketScheduleError::OrderMismatch {
                    order: current.order,
                    lower_bound: current.lower_bound,
                });
            }

            match previous.upper_bound {
                None => {
                    return Err(BracketScheduleError::UnboundedNotLast {
                        order: previous.order,
                    });
                }
                Some(upper) if upper < current.lower_bound => {
                    return Err(BracketScheduleError::Gap {
                        from: upper,
                        to: current.lower_bound,
                    });
                }
                Some(upper) if upper > current.lower_bound => {
                    return Err(BracketScheduleError::Overlap {
                        at: current.lower_bound,
                    });
                }
                Some(_) => {}
            }
        }

        if let Some(last) = brackets.last() {
            if last.upper_bound.is_some() {
                return Err(BracketScheduleError::MissingUnboundedTop { order: last.order });
            }
        }

        Ok(Self { brackets })
    }

    /// Brackets sorted by `lower_bound`.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    /// Progressive tax due on `taxable_base`.
    pub fn compute_tax(&self, taxable_base: Decimal) -> Decimal {
        compute_tax(taxable_base, &self.brackets)
    }

    pub fn into_brackets(self) -> Vec<TaxBracket> {
        self.brackets
    }
}
