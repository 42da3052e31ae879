//! REBALANCE: move every position to its normalized target value.
//!
//! ```text
//! normalized_i = weight_i / Σ weights      (Σ weights = 0 → divisor 1)
//! trade_i      = round2(normalized_i · netInvestable − marketValue_i)
//! ```
//!
//! No threshold elimination; every position trades, including zero deltas.

use super::target_weight;
use fundtrade_domain::rounding::{div_half_up, money, SHARE_SCALE};
use fundtrade_domain::FundTransactionInput;
use rust_decimal::Decimal;

pub(super) fn raw_trades(input: &FundTransactionInput) -> Vec<Decimal> {
    if input.positions.is_empty() {
        return Vec::new();
    }

    let net_investable = input.net_investable();
    let weights = input.weight_map();

    let mut total_model_weight = input.total_model_weight();
    if total_model_weight.is_zero() {
        total_model_weight = Decimal::ONE;
    }

    input
        .positions
        .iter()
        .map(|position| {
            let raw_weight = target_weight(&weights, position.isin.as_str());
            let normalized_weight = div_half_up(raw_weight, total_model_weight, SHARE_SCALE);
            money(normalized_weight * net_investable - position.market_value)
        })
        .collect()
}
