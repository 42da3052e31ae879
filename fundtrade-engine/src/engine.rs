//! Trade Calculation Engine
//!
//! Pure decision logic: a portfolio snapshot and a mode in, a per-instrument
//! trade list out. No I/O, no shared state; safe to call concurrently on
//! independent inputs.

use crate::allocation;
use crate::error::EngineResult;
use crate::limits::apply_limits;
use fundtrade_domain::{FundCalculationResult, FundTransactionInput, TransactionMode};
use tracing::info;

/// Stateless calculator for buy/sell instructions.
///
/// # Example
///
/// ```
/// # use fundtrade_engine::TradeCalculationEngine;
/// # use fundtrade_domain::{FundTransactionInput, ModelWeight, PositionSnapshot, TransactionMode};
/// # use rust_decimal_macros::dec;
/// let input = FundTransactionInput::new("TUV100")
///     .with_positions(vec![
///         PositionSnapshot::new("IE00A", dec!(100)),
///         PositionSnapshot::new("IE00B", dec!(0)),
///     ])
///     .with_model_weights(vec![
///         ModelWeight::new("IE00A", dec!(0.5)),
///         ModelWeight::new("IE00B", dec!(0.5)),
///     ])
///     .with_gross_portfolio_value(dec!(200));
///
/// let result = TradeCalculationEngine::new().calculate(&input, TransactionMode::Rebalance);
///
/// assert_eq!(result.trades[0].trade_amount, dec!(0.00));
/// assert_eq!(result.trades[1].trade_amount, dec!(100.00));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TradeCalculationEngine;

impl TradeCalculationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute trades for `mode`.
    ///
    /// Never fails for input conforming to the types: division-by-zero cases
    /// fall back to neutral defaults and unknown ISINs are ignored. The
    /// result holds exactly one trade per position, in position order.
    pub fn calculate(
        &self,
        input: &FundTransactionInput,
        mode: TransactionMode,
    ) -> FundCalculationResult {
        let raw_trades = allocation::raw_trades(input, mode);
        let trades = apply_limits(input, &raw_trades);

        info!(
            fund = %input.fund,
            mode = %mode,
            positions = input.positions.len(),
            trades = trades.iter().filter(|t| !t.is_zero()).count(),
            "Trade calculation completed"
        );

        FundCalculationResult {
            fund: input.fund.clone(),
            mode,
            input: input.clone(),
            trades,
        }
    }

    /// Validate preconditions, then [`calculate`](Self::calculate).
    ///
    /// # Errors
    /// Returns `EngineError::Domain(DomainError::InvalidInput)` when
    /// `FundTransactionInput::validate` rejects the input.
    pub fn try_calculate(
        &self,
        input: &FundTransactionInput,
        mode: TransactionMode,
    ) -> EngineResult<FundCalculationResult> {
        input.validate()?;
        Ok(self.calculate(input, mode))
    }
}
