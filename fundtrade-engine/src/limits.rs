//! Limit-clamping post-pass
//!
//! Runs after every mode. Projects each position's post-trade weight,
//! classifies it against the position's soft and hard limits and clamps buys
//! that would cross the hard limit.
//!
//! Sells are never clamped: selling only reduces exposure.

use fundtrade_domain::rounding::{money, weight_of};
use fundtrade_domain::{FundTransactionInput, LimitStatus, PositionSnapshot, TradeCalculation};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

/// A clamped buy targets this far below the hard limit
pub const HARD_LIMIT_MARGIN: Decimal = dec!(0.0001);

/// Apply limits to raw trades, pairing them with positions by index.
pub fn apply_limits(input: &FundTransactionInput, raw_trades: &[Decimal]) -> Vec<TradeCalculation> {
    input
        .positions
        .iter()
        .zip(raw_trades)
        .map(|(position, trade_amount)| apply_limit_to_trade(input, position, *trade_amount))
        .collect()
}

/// Classify and, for hard-limit buys, clamp a single trade.
pub fn apply_limit_to_trade(
    input: &FundTransactionInput,
    position: &PositionSnapshot,
    trade_amount: Decimal,
) -> TradeCalculation {
    let gross = input.gross_portfolio_value;
    let mut trade_amount = money(trade_amount);
    let mut projected_weight = weight_of(position.market_value + trade_amount, gross);

    let limit_status = match input.limits_for(&position.isin) {
        None => LimitStatus::Ok,
        Some(limits) if projected_weight > limits.hard_limit => {
            if trade_amount > Decimal::ZERO {
                let max_allowed_value = gross * (limits.hard_limit - HARD_LIMIT_MARGIN);
                let clamped = money((max_allowed_value - position.market_value).max(Decimal::ZERO));

                debug!(
                    isin = %position.isin,
                    raw = %trade_amount,
                    clamped = %clamped,
                    hard_limit = %limits.hard_limit,
                    "Buy clamped at hard limit"
                );

                trade_amount = clamped;
                projected_weight = weight_of(position.market_value + trade_amount, gross);
            }
            LimitStatus::HardLimitExceeded
        },
        Some(limits) if projected_weight > limits.soft_limit => LimitStatus::SoftLimitExceeded,
        Some(_) => LimitStatus::Ok,
    };

    TradeCalculation {
        isin: position.isin.clone(),
        trade_amount,
        projected_weight,
        limit_status,
    }
}

// =============================================================================
// Tests
// =============================================================================
