//! Input Assembly
//!
//! Derives a [`FundTransactionInput`] from fund data that the caller has
//! already fetched. Nothing here touches storage; the assembler only sums,
//! defaults and reshapes.
//!
//! # Cash derivation
//!
//! ```text
//! gross       = Σ position market values + cash
//! liabilities = accrued fees + other liabilities + manual additionalLiabilities
//! receivables = receivables + manual additionalReceivables
//! pending     = Σ unsettled BUY amounts − Σ unsettled SELL amounts
//! free cash   = cash − cash buffer − liabilities + receivables − pending
//! ```

use crate::config::EngineConfig;
use crate::error::EngineResult;
use fundtrade_domain::{
    DomainError, FundCode, FundTransactionInput, InstrumentType, Isin, ModelWeight, OrderSide,
    OrderVenue, PositionLimits, PositionSnapshot,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::info;

const ADDITIONAL_LIABILITIES: &str = "additionalLiabilities";
const ADDITIONAL_RECEIVABLES: &str = "additionalReceivables";

// =============================================================================
// Source records
// =============================================================================

/// Holding as priced by the position calculation; unpriced holdings are skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedPosition {
    pub isin: Isin,
    pub market_value: Option<Decimal>,
}

impl PricedPosition {
    pub fn new(isin: impl Into<Isin>, market_value: Option<Decimal>) -> Self {
        Self {
            isin: isin.into(),
            market_value,
        }
    }
}

/// One row of the fund's current model portfolio
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelAllocation {
    pub isin: Isin,
    pub weight: Decimal,
    pub fast_sell: bool,
    pub instrument_type: Option<InstrumentType>,
    pub order_venue: Option<OrderVenue>,
}

impl ModelAllocation {
    pub fn new(isin: impl Into<Isin>, weight: Decimal) -> Self {
        Self {
            isin: isin.into(),
            weight,
            fast_sell: false,
            instrument_type: None,
            order_venue: None,
        }
    }

    pub fn fast_sell(mut self) -> Self {
        self.fast_sell = true;
        self
    }

    pub fn with_instrument_type(mut self, kind: InstrumentType) -> Self {
        self.instrument_type = Some(kind);
        self
    }

    pub fn with_order_venue(mut self, venue: OrderVenue) -> Self {
        self.order_venue = Some(venue);
        self
    }
}

/// Fund-level limits; missing values fall back to [`EngineConfig`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundLimit {
    pub reserve_soft: Option<Decimal>,
    pub min_transaction: Option<Decimal>,
}

/// Order placed earlier that has not settled yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingOrder {
    pub side: OrderSide,
    pub amount: Option<Decimal>,
}

/// Everything the assembler reads for one fund
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundSnapshot {
    pub fund: FundCode,
    pub positions: Vec<PricedPosition>,
    pub cash_balance: Decimal,
    pub accrued_fees: Decimal,
    /// Fund-specific liabilities on top of accrued fees
    pub other_liabilities: Decimal,
    pub receivables: Decimal,
    pub allocations: Vec<ModelAllocation>,
    pub fund_limit: Option<FundLimit>,
    /// Repeated ISINs: the last entry wins
    pub position_limits: Vec<(Isin, PositionLimits)>,
    pub pending_orders: Vec<PendingOrder>,
}

impl FundSnapshot {
    pub fn new(fund: impl Into<FundCode>) -> Self {
        Self {
            fund: fund.into(),
            positions: Vec::new(),
            cash_balance: Decimal::ZERO,
            accrued_fees: Decimal::ZERO,
            other_liabilities: Decimal::ZERO,
            receivables: Decimal::ZERO,
            allocations: Vec::new(),
            fund_limit: None,
            position_limits: Vec::new(),
            pending_orders: Vec::new(),
        }
    }

    /// Net cash already committed by unsettled orders
    pub fn pending_cash(&self) -> Decimal {
        self.pending_orders
            .iter()
            .filter_map(|order| {
                order.amount.map(|amount| match order.side {
                    OrderSide::Buy => amount,
                    OrderSide::Sell => -amount,
                })
            })
            .sum()
    }
}

// =============================================================================
// Manual adjustments
// =============================================================================

/// Operator-entered corrections applied on top of the fund data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualAdjustments {
    pub additional_liabilities: Decimal,
    pub additional_receivables: Decimal,
}

impl ManualAdjustments {
    /// Parse adjustments from a JSON object.
    ///
    /// Both keys are optional; values may be strings or numbers. Absent and
    /// `null` values count as zero. Other keys are ignored.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidInput` if the payload is not an object or
    /// a value is not a decimal.
    pub fn from_json(value: &serde_json::Value) -> EngineResult<Self> {
        let object = value.as_object().ok_or_else(|| {
            DomainError::InvalidInput(format!("Manual adjustments must be an object: {}", value))
        })?;

        let adjustment = |key: &str| -> EngineResult<Decimal> {
            match object.get(key) {
                None | Some(serde_json::Value::Null) => Ok(Decimal::ZERO),
                Some(serde_json::Value::String(raw)) => parse_adjustment(key, raw),
                Some(serde_json::Value::Number(number)) => {
                    parse_adjustment(key, &number.to_string())
                },
                Some(other) => Err(invalid_adjustment(key, other)),
            }
        };

        Ok(Self {
            additional_liabilities: adjustment(ADDITIONAL_LIABILITIES)?,
            additional_receivables: adjustment(ADDITIONAL_RECEIVABLES)?,
        })
    }
}

fn parse_adjustment(key: &str, raw: &str) -> EngineResult<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| invalid_adjustment(key, raw))
}

fn invalid_adjustment(key: &str, value: impl std::fmt::Display) -> crate::error::EngineError {
    DomainError::InvalidInput(format!(
        "Invalid manual adjustment: key={}, value={}",
        key, value
    ))
    .into()
}

// =============================================================================
// Assembler
// =============================================================================

/// Builds calculation input from a [`FundSnapshot`]
#[derive(Debug, Clone, Default)]
pub struct InputAssembler {
    config: EngineConfig,
}

impl InputAssembler {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn assemble(
        &self,
        snapshot: &FundSnapshot,
        adjustments: &ManualAdjustments,
    ) -> FundTransactionInput {
        let positions: Vec<PositionSnapshot> = snapshot
            .positions
            .iter()
            .filter_map(|p| p.market_value.map(|mv| PositionSnapshot::new(p.isin.clone(), mv)))
            .collect();

        let security_value: Decimal = positions.iter().map(|p| p.market_value).sum();
        let cash = snapshot.cash_balance;
        let gross_portfolio_value = security_value + cash;

        let limit = snapshot.fund_limit.unwrap_or_default();
        let cash_buffer = limit
            .reserve_soft
            .unwrap_or(self.config.default_cash_buffer);
        let min_transaction = limit
            .min_transaction
            .unwrap_or(self.config.default_min_transaction);

        let liabilities = snapshot.accrued_fees
            + snapshot.other_liabilities
            + adjustments.additional_liabilities;
        let receivables = snapshot.receivables + adjustments.additional_receivables;
        let pending_cash = snapshot.pending_cash();
        let free_cash = cash - cash_buffer - liabilities + receivables - pending_cash;

        info!(
            fund = %snapshot.fund,
            positions = positions.len(),
            %gross_portfolio_value,
            %free_cash,
            %pending_cash,
            "Transaction input assembled"
        );

        let model_weights = snapshot
            .allocations
            .iter()
            .map(|a| ModelWeight::new(a.isin.clone(), a.weight))
            .collect();
        let fast_sell_isins = snapshot
            .allocations
            .iter()
            .filter(|a| a.fast_sell)
            .map(|a| a.isin.clone());

        let mut input = FundTransactionInput::new(snapshot.fund.clone())
            .with_positions(positions)
            .with_model_weights(model_weights)
            .with_gross_portfolio_value(gross_portfolio_value)
            .with_cash_buffer(cash_buffer)
            .with_liabilities(liabilities)
            .with_receivables(receivables)
            .with_free_cash(free_cash)
            .with_min_transaction_threshold(min_transaction)
            .with_fast_sell_isins(fast_sell_isins);

        for (isin, limits) in &snapshot.position_limits {
            input = input.with_position_limit(isin.clone(), *limits);
        }
        for allocation in &snapshot.allocations {
            if let Some(kind) = allocation.instrument_type {
                input = input.with_instrument_type(allocation.isin.clone(), kind);
            }
            if let Some(venue) = allocation.order_venue {
                input = input.with_order_venue(allocation.isin.clone(), venue);
            }
        }

        input
    }
}

// =============================================================================
// Tests
// =============================================================================
