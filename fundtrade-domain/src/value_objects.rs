//! Value Objects for the Fundtrade Domain
//!
//! Identifiers and enumerations shared by the calculation input and output.
//! Identifiers are plain wrappers; well-formedness is checked on request by
//! [`crate::FundTransactionInput::validate`], not at construction time.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Domain errors for input validation and audit serialization
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Calculation input violates a documented precondition
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Audit payload could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

// =============================================================================
// Isin
// =============================================================================

/// Instrument identifier used as the key throughout a calculation
///
/// # Invariants
/// - Unique within one calculation's positions (checked by `validate`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Isin(String);

impl Isin {
    /// Create an ISIN from any string-like value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identifier is non-empty and purely alphanumeric
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty() && self.0.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

impl From<&str> for Isin {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Isin {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for Isin {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Isin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// FundCode
// =============================================================================

/// Fund identity (e.g., "TUV100")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FundCode(String);

impl FundCode {
    /// Create a fund code
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FundCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for FundCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// TransactionMode
// =============================================================================

/// Selects which allocation branch a calculation runs
///
/// Modes are mutually exclusive; there are no combined modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionMode {
    /// Deploy free cash into underweight positions
    Buy,
    /// Raise a cash shortfall from overweight positions
    Sell,
    /// Raise a cash shortfall from liquid positions first
    SellFast,
    /// Realign every position to its normalized target weight
    Rebalance,
}

impl fmt::Display for TransactionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionMode::Buy => write!(f, "BUY"),
            TransactionMode::Sell => write!(f, "SELL"),
            TransactionMode::SellFast => write!(f, "SELL_FAST"),
            TransactionMode::Rebalance => write!(f, "REBALANCE"),
        }
    }
}

// =============================================================================
// LimitStatus
// =============================================================================

/// Post-trade concentration check outcome
///
/// `HardLimitExceeded` on a buy means the raw trade was clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LimitStatus {
    /// Within soft limit, or no limit configured
    Ok,
    /// Above soft limit, at or below hard limit
    SoftLimitExceeded,
    /// Above hard limit before clamping
    HardLimitExceeded,
}

impl fmt::Display for LimitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitStatus::Ok => write!(f, "OK"),
            LimitStatus::SoftLimitExceeded => write!(f, "SOFT_LIMIT_EXCEEDED"),
            LimitStatus::HardLimitExceeded => write!(f, "HARD_LIMIT_EXCEEDED"),
        }
    }
}

// =============================================================================
// Order metadata
// =============================================================================

/// OrderSide represents the order direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

/// Kind of instrument, used by the booking side to pick settlement rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentType {
    /// Exchange-traded fund
    #[default]
    Etf,
    /// Mutual fund subscribed/redeemed through the fund manager
    Fund,
}

/// Where an order is routed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderVenue {
    /// Custodian bank desk
    #[default]
    Seb,
    /// Fund transfer agent
    Ft,
}

// =============================================================================
// Tests
// =============================================================================
