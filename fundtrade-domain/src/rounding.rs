//! Decimal rounding points
//!
//! Money, weights and proportional shares are rounded at separate, explicit
//! points with round-half-up (midpoint away from zero):
//!
//! | Quantity          | Scale |
//! |-------------------|-------|
//! | Money / trades    | 2     |
//! | Weights           | 6     |
//! | Proportional share| 10    |

use rust_decimal::{Decimal, RoundingStrategy};

/// Scale of every monetary output
pub const MONEY_SCALE: u32 = 2;

/// Scale of projected and current weights
pub const WEIGHT_SCALE: u32 = 6;

/// Scale of proportional shares and normalized model weights
pub const SHARE_SCALE: u32 = 10;

/// Round half-up to `scale` digits and pad to exactly that scale.
///
/// A zero result is always positive zero.
///
/// ```
/// # use fundtrade_domain::rounding::round_half_up;
/// # use rust_decimal_macros::dec;
/// assert_eq!(round_half_up(dec!(2.345), 2).to_string(), "2.35");
/// assert_eq!(round_half_up(dec!(-2.345), 2).to_string(), "-2.35");
/// assert_eq!(round_half_up(dec!(100), 2).to_string(), "100.00");
/// ```
pub fn round_half_up(value: Decimal, scale: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(scale);
    rounded
}

/// Snap a monetary amount to 2 decimals
pub fn money(value: Decimal) -> Decimal {
    round_half_up(value, MONEY_SCALE)
}

/// Divide and round half-up to `scale`.
///
/// A zero divisor (or an overflowing quotient) yields zero.
pub fn div_half_up(numerator: Decimal, denominator: Decimal, scale: u32) -> Decimal {
    numerator
        .checked_div(denominator)
        .map(|quotient| round_half_up(quotient, scale))
        .unwrap_or(Decimal::ZERO)
}

/// Position value as a fraction of gross portfolio value, at weight scale.
///
/// Zero when the gross portfolio value is not positive.
pub fn weight_of(value: Decimal, gross_portfolio_value: Decimal) -> Decimal {
    if gross_portfolio_value > Decimal::ZERO {
        div_half_up(value, gross_portfolio_value, WEIGHT_SCALE)
    } else {
        Decimal::ZERO
    }
}
