//! Percentage shares for rendering a backend breakdown as bars.
//!
//! The backend already rounds each category; this module only turns the
//! contributions into display percentages that add up to exactly 100.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use carbon_core::breakdown::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// One category's slice of a breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    pub category: String,
    pub value: Decimal,
    /// Percentage of the breakdown sum, two decimal places.
    pub percent: Decimal,
}

/// Converts a breakdown into percentage shares, in category order.
///
/// Negative contributions are treated as zero. When everything is zero each
/// share is zero. Otherwise the percentages sum to exactly 100; the rounding
/// remainder goes to the largest share.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use rust_decimal_macros::dec;
/// use carbon_core::breakdown::shares;
///
/// let breakdown = BTreeMap::from([
///     ("diet".to_string(), dec!(200)),
///     ("transport".to_string(), dec!(50)),
///     ("consumption".to_string(), dec!(250)),
/// ]);
///
/// let percents: Vec<_> = shares(&breakdown).into_iter().map(|s| s.percent).collect();
/// assert_eq!(percents, vec![dec!(50), dec!(40), dec!(10)]);
/// ```
pub fn shares(breakdown: &BTreeMap<String, Decimal>) -> Vec<Share> {
    let clamped = |v: &Decimal| (*v).max(Decimal::ZERO);
    let sum: Decimal = breakdown.values().map(clamped).sum();

    let mut result: Vec<Share> = breakdown
        .iter()
        .map(|(category, value)| Share {
            category: category.clone(),
            value: *value,
            percent: if sum.is_zero() {
                Decimal::ZERO
            } else {
                round_half_up(clamped(value) * Decimal::ONE_HUNDRED / sum)
            },
        })
        .collect();

    if sum.is_zero() {
        return result;
    }

    let allotted: Decimal = result.iter().map(|s| s.percent).sum();
    let remainder = Decimal::ONE_HUNDRED - allotted;
    if !remainder.is_zero() {
        if let Some(largest) = result.iter_mut().max_by(|a, b| a.percent.cmp(&b.percent)) {
            largest.percent += remainder;
        }
    }

    result
}
