//! Calculation Input
//!
//! The portfolio snapshot handed to the engine. Everything here is
//! immutable for the duration of a calculation; the engine only reads it.

use crate::rounding::weight_of;
use crate::value_objects::{DomainError, DomainResult, FundCode, InstrumentType, Isin, OrderVenue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Current holding of one instrument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub isin: Isin,
    /// Signed market value as of the calculation date
    pub market_value: Decimal,
}

impl PositionSnapshot {
    pub fn new(isin: impl Into<Isin>, market_value: Decimal) -> Self {
        Self {
            isin: isin.into(),
            market_value,
        }
    }
}

/// Target fractional allocation for one instrument
///
/// Weights are typically in [0, 1] and need not sum to 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelWeight {
    pub isin: Isin,
    pub weight: Decimal,
}

impl ModelWeight {
    pub fn new(isin: impl Into<Isin>, weight: Decimal) -> Self {
        Self {
            isin: isin.into(),
            weight,
        }
    }
}

/// Concentration ceilings on post-trade weight
///
/// By convention `hard_limit >= soft_limit`; the engine does not rely on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionLimits {
    pub soft_limit: Decimal,
    pub hard_limit: Decimal,
}

impl PositionLimits {
    pub fn new(soft_limit: Decimal, hard_limit: Decimal) -> Self {
        Self {
            soft_limit,
            hard_limit,
        }
    }
}

// =============================================================================
// FundTransactionInput
// =============================================================================

/// Aggregate input of one trade calculation
///
/// Construct with [`FundTransactionInput::new`] and the `with_*` setters.
/// All monetary fields default to zero and all collections to empty.
///
/// # Example
///
/// ```
/// # use fundtrade_domain::{FundTransactionInput, PositionSnapshot, ModelWeight};
/// # use rust_decimal_macros::dec;
/// let input = FundTransactionInput::new("TUV100")
///     .with_positions(vec![PositionSnapshot::new("IE00A", dec!(100))])
///     .with_model_weights(vec![ModelWeight::new("IE00A", dec!(1))])
///     .with_gross_portfolio_value(dec!(200))
///     .with_cash_buffer(dec!(20))
///     .with_liabilities(dec!(-30));
///
/// assert_eq!(input.net_investable(), dec!(150)); // 200 - 20 - |-30|
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundTransactionInput {
    pub fund: FundCode,
    /// Ordered holdings; ISINs are unique
    pub positions: Vec<PositionSnapshot>,
    pub model_weights: Vec<ModelWeight>,
    /// Positive: cash to deploy. Negative: deficit to raise.
    pub free_cash: Decimal,
    /// Minimum cash to retain
    pub cash_buffer: Decimal,
    /// Only the magnitude is used
    pub liabilities: Decimal,
    /// Informational; already folded into `free_cash` by the assembler
    pub receivables: Decimal,
    /// Weight denominator
    pub gross_portfolio_value: Decimal,
    /// Smallest acceptable per-instrument trade in BUY and SELL
    pub min_transaction_threshold: Decimal,
    /// Instruments eligible for priority liquidation
    pub fast_sell_isins: BTreeSet<Isin>,
    /// Sparse; absence means unconstrained
    pub position_limits: BTreeMap<Isin, PositionLimits>,
    pub instrument_types: BTreeMap<Isin, InstrumentType>,
    pub order_venues: BTreeMap<Isin, OrderVenue>,
}

impl FundTransactionInput {
    /// Create an empty input for a fund
    pub fn new(fund: impl Into<FundCode>) -> Self {
        Self {
            fund: fund.into(),
            positions: Vec::new(),
            model_weights: Vec::new(),
            free_cash: Decimal::ZERO,
            cash_buffer: Decimal::ZERO,
            liabilities: Decimal::ZERO,
            receivables: Decimal::ZERO,
            gross_portfolio_value: Decimal::ZERO,
            min_transaction_threshold: Decimal::ZERO,
            fast_sell_isins: BTreeSet::new(),
            position_limits: BTreeMap::new(),
            instrument_types: BTreeMap::new(),
            order_venues: BTreeMap::new(),
        }
    }

    pub fn with_positions(mut self, positions: Vec<PositionSnapshot>) -> Self {
        self.positions = positions;
        self
    }

    pub fn with_model_weights(mut self, model_weights: Vec<ModelWeight>) -> Self {
        self.model_weights = model_weights;
        self
    }

    pub fn with_free_cash(mut self, free_cash: Decimal) -> Self {
        self.free_cash = free_cash;
        self
    }

    pub fn with_cash_buffer(mut self, cash_buffer: Decimal) -> Self {
        self.cash_buffer = cash_buffer;
        self
    }

    pub fn with_liabilities(mut self, liabilities: Decimal) -> Self {
        self.liabilities = liabilities;
        self
    }

    pub fn with_receivables(mut self, receivables: Decimal) -> Self {
        self.receivables = receivables;
        self
    }

    pub fn with_gross_portfolio_value(mut self, gross_portfolio_value: Decimal) -> Self {
        self.gross_portfolio_value = gross_portfolio_value;
        self
    }

    pub fn with_min_transaction_threshold(mut self, threshold: Decimal) -> Self {
        self.min_transaction_threshold = threshold;
        self
    }

    pub fn with_fast_sell_isins<I, T>(mut self, isins: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Isin>,
    {
        self.fast_sell_isins = isins.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_position_limit(mut self, isin: impl Into<Isin>, limits: PositionLimits) -> Self {
        self.position_limits.insert(isin.into(), limits);
        self
    }

    pub fn with_instrument_type(mut self, isin: impl Into<Isin>, kind: InstrumentType) -> Self {
        self.instrument_types.insert(isin.into(), kind);
        self
    }

    pub fn with_order_venue(mut self, isin: impl Into<Isin>, venue: OrderVenue) -> Self {
        self.order_venues.insert(isin.into(), venue);
        self
    }

    /// Portfolio value available for allocation
    ///
    /// `grossPortfolioValue - cashBuffer - |liabilities|`
    pub fn net_investable(&self) -> Decimal {
        self.gross_portfolio_value - self.cash_buffer - self.liabilities.abs()
    }

    /// Model weights keyed by ISIN; a repeated ISIN keeps the last weight.
    pub fn weight_map(&self) -> BTreeMap<&str, Decimal> {
        self.model_weights
            .iter()
            .map(|w| (w.isin.as_str(), w.weight))
            .collect()
    }

    /// Sum of all raw model weights, including ones with no matching position
    pub fn total_model_weight(&self) -> Decimal {
        self.model_weights.iter().map(|w| w.weight).sum()
    }

    /// Limits configured for an instrument, if any
    pub fn limits_for(&self, isin: &Isin) -> Option<&PositionLimits> {
        self.position_limits.get(isin)
    }

    /// Pre-trade weight of a position, at weight scale
    pub fn current_weight(&self, position: &PositionSnapshot) -> Decimal {
        weight_of(position.market_value, self.gross_portfolio_value)
    }

    pub fn is_fast_sell(&self, isin: &Isin) -> bool {
        self.fast_sell_isins.contains(isin)
    }

    /// Check the preconditions the engine assumes but never enforces.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidInput` if:
    /// - a position ISIN is malformed or repeated
    /// - cash buffer or minimum transaction threshold is negative
    /// - a hard limit is below its soft limit
    pub fn validate(&self) -> DomainResult<()> {
        let mut seen = HashSet::with_capacity(self.positions.len());
        for position in &self.positions {
            if !position.isin.is_well_formed() {
                return Err(DomainError::InvalidInput(format!(
                    "Malformed ISIN: '{}'",
                    position.isin
                )));
            }
            if !seen.insert(position.isin.as_str()) {
                return Err(DomainError::InvalidInput(format!(
                    "Duplicate position ISIN: {}",
                    position.isin
                )));
            }
        }

        if self.cash_buffer < Decimal::ZERO {
            return Err(DomainError::InvalidInput(format!(
                "Cash buffer must not be negative: {}",
                self.cash_buffer
            )));
        }

        if self.min_transaction_threshold < Decimal::ZERO {
            return Err(DomainError::InvalidInput(format!(
                "Minimum transaction threshold must not be negative: {}",
                self.min_transaction_threshold
            )));
        }

        for (isin, limits) in &self.position_limits {
            if limits.hard_limit < limits.soft_limit {
                return Err(DomainError::InvalidInput(format!(
                    "Hard limit {} below soft limit {} for {}",
                    limits.hard_limit, limits.soft_limit, isin
                )));
            }
        }

        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn two_positions() -> FundTransactionInput {
        FundTransactionInput::new("TUV100")
            .with_positions(vec![
                PositionSnapshot::new("IE00A", dec!(600000)),
                PositionSnapshot::new("IE00B", dec!(200000)),
            ])
            .with_model_weights(vec![
                ModelWeight::new("IE00A", dec!(0.50)),
                ModelWeight::new("IE00B", dec!(0.50)),
            ])
            .with_gross_portfolio_value(dec!(1000000))
            .with_cash_buffer(dec!(50000))
            .with_min_transaction_threshold(dec!(5000))
    }

    #[test]
    fn test_net_investable_uses_liability_magnitude() {
        let input = two_positions().with_liabilities(dec!(-25000));
        assert_eq!(input.net_investable(), dec!(925000));

        let input = two_positions().with_liabilities(dec!(25000));
        assert_eq!(input.net_investable(), dec!(925000));
    }

    #[test]
    fn test_weight_map_last_entry_wins() {
        let input = two_positions().with_model_weights(vec![
            ModelWeight::new("IE00A", dec!(0.30)),
            ModelWeight::new("IE00A", dec!(0.70)),
        ]);
        assert_eq!(input.weight_map().get("IE00A"), Some(&dec!(0.70)));
        assert_eq!(input.weight_map().get("IE00B"), None);
    }

    #[test]
    fn test_total_model_weight_includes_unheld_instruments() {
        let input = two_positions().with_model_weights(vec![
            ModelWeight::new("IE00A", dec!(0.40)),
            ModelWeight::new("IE00NOTHELD", dec!(0.60)),
        ]);
        assert_eq!(input.total_model_weight(), dec!(1.00));
    }

    #[test]
    fn test_current_weight() {
        let input = two_positions();
        assert_eq!(input.current_weight(&input.positions[0]), dec!(0.6));
        let empty = two_positions().with_gross_portfolio_value(Decimal::ZERO);
        assert_eq!(empty.current_weight(&empty.positions[0]), Decimal::ZERO);
    }

    #[test]
    fn test_validate_accepts_well_formed_input() {
        let input = two_positions()
            .with_position_limit("IE00A", PositionLimits::new(dec!(0.55), dec!(0.65)));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_isin() {
        let input = two_positions().with_positions(vec![
            PositionSnapshot::new("IE00A", dec!(1)),
            PositionSnapshot::new("IE00A", dec!(2)),
        ]);
        let err = input.validate().unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn test_validate_rejects_negative_cash_buffer() {
        let input = two_positions().with_cash_buffer(dec!(-1));
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_threshold() {
        let input = two_positions().with_min_transaction_threshold(dec!(-0.01));
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_limits() {
        let input = two_positions()
            .with_position_limit("IE00B", PositionLimits::new(dec!(0.60), dec!(0.50)));
        let err = input.validate().unwrap_err();
        assert!(err.to_string().contains("IE00B"));
    }

    #[test]
    fn test_validate_rejects_empty_isin() {
        let input = two_positions().with_positions(vec![PositionSnapshot::new("", dec!(1))]);
        assert!(input.validate().is_err());
    }
}
