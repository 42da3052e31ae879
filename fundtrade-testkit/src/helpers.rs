//! Fixture builders and assertions.

use fundtrade_domain::{
    FundCalculationResult, FundTransactionInput, ModelWeight, PositionLimits, PositionSnapshot,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::Result;

/// Positions from `(isin, market value)` pairs, in order.
pub fn positions(entries: &[(&str, Decimal)]) -> Vec<PositionSnapshot> {
    entries
        .iter()
        .map(|(isin, market_value)| PositionSnapshot::new(*isin, *market_value))
        .collect()
}

/// Model weights from `(isin, weight)` pairs, in order.
pub fn weights(entries: &[(&str, Decimal)]) -> Vec<ModelWeight> {
    entries
        .iter()
        .map(|(isin, weight)| ModelWeight::new(*isin, *weight))
        .collect()
}

/// Soft and hard limit pair
pub fn limits(soft: Decimal, hard: Decimal) -> PositionLimits {
    PositionLimits::new(soft, hard)
}

/// The reference TUV100 fund used across scenarios.
///
/// Gross value 1,000,000, cash buffer 50,000, no liabilities, minimum trade
/// 5,000. Net investable is therefore 950,000. Positions, weights and free
/// cash are left for the test to set.
pub fn standard_input() -> FundTransactionInput {
    FundTransactionInput::new("TUV100")
        .with_gross_portfolio_value(dec!(1000000))
        .with_cash_buffer(dec!(50000))
        .with_liabilities(Decimal::ZERO)
        .with_min_transaction_threshold(dec!(5000))
}

/// Signed sum of every trade in a result
pub fn total_trade_amount(result: &FundCalculationResult) -> Decimal {
    result.trades.iter().map(|t| t.trade_amount).sum()
}

/// Fail unless `actual` is within `tolerance` of `expected`.
pub fn ensure_close(actual: Decimal, expected: Decimal, tolerance: Decimal) -> Result<()> {
    anyhow::ensure!(
        (actual - expected).abs() <= tolerance,
        "expected {} within {} of {}",
        actual,
        tolerance,
        expected
    );
    Ok(())
}
