//! Test helpers for Fundtrade calculation tests.
//!
//! Provides portfolio fixtures and decimal assertions shared by unit and
//! integration tests.

mod helpers;

pub use helpers::{ensure_close, limits, positions, standard_input, total_trade_amount, weights};

/// Result type used by helpers and `anyhow`-returning tests
pub type Result<T> = anyhow::Result<T>;
