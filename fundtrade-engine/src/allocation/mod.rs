//! Mode-specific raw trade calculation
//!
//! Each mode yields one raw trade per position, in position order, before
//! the limit post-pass. Empty positions always yield an empty list.

mod buy;
mod rebalance;
mod sell;
mod sell_fast;

use fundtrade_domain::rounding::money;
use fundtrade_domain::{FundTransactionInput, TransactionMode};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

/// Free cash below this is a shortfall that SELL and SELL_FAST must raise
pub const SHORTFALL_TRIGGER: Decimal = dec!(-0.01);

/// Raw (pre-limit) trades for a mode
pub fn raw_trades(input: &FundTransactionInput, mode: TransactionMode) -> Vec<Decimal> {
    match mode {
        TransactionMode::Buy => buy::raw_trades(input),
        TransactionMode::Sell => sell::raw_trades(input),
        TransactionMode::SellFast => sell_fast::raw_trades(input),
        TransactionMode::Rebalance => rebalance::raw_trades(input),
    }
}

/// True when free cash is a deficit worth raising
pub fn has_shortfall(input: &FundTransactionInput) -> bool {
    input.free_cash < SHORTFALL_TRIGGER
}

fn target_weight(weights: &BTreeMap<&str, Decimal>, isin: &str) -> Decimal {
    weights.get(isin).copied().unwrap_or(Decimal::ZERO)
}

fn zero_trades(len: usize) -> Vec<Decimal> {
    vec![money(Decimal::ZERO); len]
}
