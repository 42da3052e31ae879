//! Fundtrade Domain Layer
//!
//! Pure data model of the trade calculation with zero I/O dependencies.
//! Contains value objects, the calculation input and output records, and the
//! decimal rounding points shared by every calculation.

#![warn(clippy::all)]

// Public modules
pub mod input;
pub mod result;
pub mod rounding;
pub mod value_objects;

// Re-export commonly used types
pub use input::{FundTransactionInput, ModelWeight, PositionLimits, PositionSnapshot};
pub use result::{CalculationSummary, FundCalculationResult, TradeCalculation};
pub use value_objects::{
    DomainError, DomainResult, FundCode, InstrumentType, Isin, LimitStatus, OrderSide,
    OrderVenue, TransactionMode,
};
