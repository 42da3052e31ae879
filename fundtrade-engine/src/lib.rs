//! Fundtrade Engine
//!
//! Pure decision logic for fund trade calculation, no I/O.
//!
//! The engine turns a portfolio snapshot and a [`TransactionMode`] into one
//! trade per held instrument:
//! - BUY deploys free cash into underweight positions
//! - SELL raises a shortfall from overweight positions
//! - SELL_FAST liquidates fast-sell instruments first
//! - REBALANCE realigns to normalized model weights
//!
//! Every mode finishes with the limit-clamping post-pass in [`limits`].
//!
//! [`TransactionMode`]: fundtrade_domain::TransactionMode

#![warn(clippy::all)]

pub mod allocation;
pub mod assembly;
pub mod config;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod limits;
pub mod orders;

pub use assembly::{
    FundLimit, FundSnapshot, InputAssembler, ManualAdjustments, ModelAllocation, PendingOrder,
    PricedPosition,
};
pub use config::{EngineConfig, Environment};
pub use distribution::{distribute_with_threshold, Distribution};
pub use engine::TradeCalculationEngine;
pub use error::{EngineError, EngineResult};
pub use orders::{draft_orders, OrderDraft};
