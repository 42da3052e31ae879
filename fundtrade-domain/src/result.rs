//! Calculation Output
//!
//! One `TradeCalculation` per input position, in input order.

use crate::input::FundTransactionInput;
use crate::value_objects::{
    DomainError, DomainResult, FundCode, Isin, LimitStatus, TransactionMode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-instrument trade after limit clamping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeCalculation {
    pub isin: Isin,
    /// Positive = buy, negative = sell; 2-decimal scale
    pub trade_amount: Decimal,
    /// Post-trade weight at 6-decimal scale
    pub projected_weight: Decimal,
    pub limit_status: LimitStatus,
}

impl TradeCalculation {
    pub fn is_buy(&self) -> bool {
        self.trade_amount > Decimal::ZERO
    }

    pub fn is_sell(&self) -> bool {
        self.trade_amount < Decimal::ZERO
    }

    pub fn is_zero(&self) -> bool {
        self.trade_amount.is_zero()
    }
}

/// Full result of one calculation, carrying its input for audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundCalculationResult {
    pub fund: FundCode,
    pub mode: TransactionMode,
    pub input: FundTransactionInput,
    pub trades: Vec<TradeCalculation>,
}

impl FundCalculationResult {
    /// Trade for an instrument, if it is held
    pub fn trade_for(&self, isin: &str) -> Option<&TradeCalculation> {
        self.trades.iter().find(|t| t.isin.as_str() == isin)
    }

    /// Signed sum of all trade amounts
    pub fn net_trade_amount(&self) -> Decimal {
        self.trades.iter().map(|t| t.trade_amount).sum()
    }

    /// Aggregate figures for audit trails
    pub fn summary(&self) -> CalculationSummary {
        let total_bought = self
            .trades
            .iter()
            .filter(|t| t.is_buy())
            .map(|t| t.trade_amount)
            .sum();
        let total_sold = self
            .trades
            .iter()
            .filter(|t| t.is_sell())
            .map(|t| t.trade_amount.abs())
            .sum();

        CalculationSummary {
            fund: self.fund.clone(),
            mode: self.mode,
            trade_count: self.trades.iter().filter(|t| !t.is_zero()).count(),
            total_bought,
            total_sold,
        }
    }

    /// JSON payload with input, output and summary
    ///
    /// # Errors
    /// Returns `DomainError::Serialization` if any part fails to serialize.
    pub fn audit_payload(&self) -> DomainResult<serde_json::Value> {
        let to_value = |value: serde_json::Result<serde_json::Value>| {
            value.map_err(|e| DomainError::Serialization(e.to_string()))
        };

        Ok(serde_json::json!({
            "input": to_value(serde_json::to_value(&self.input))?,
            "output": to_value(serde_json::to_value(&self.trades))?,
            "summary": to_value(serde_json::to_value(self.summary()))?,
        }))
    }
}

/// Aggregate view of a calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationSummary {
    pub fund: FundCode,
    pub mode: TransactionMode,
    /// Number of non-zero trades
    pub trade_count: usize,
    pub total_bought: Decimal,
    /// Magnitude of all sells
    pub total_sold: Decimal,
}
