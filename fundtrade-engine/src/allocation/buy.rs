//! BUY: deploy free cash into the positions furthest below their ideal size.

use super::target_weight;
use crate::distribution::distribute_with_threshold;
use fundtrade_domain::FundTransactionInput;
use rust_decimal::Decimal;

/// How far a position sits below its ideal allocation, floored at zero
fn deficiency_score(target_weight: Decimal, net_investable: Decimal, market_value: Decimal) -> Decimal {
    (target_weight * net_investable - market_value).max(Decimal::ZERO)
}

pub(super) fn raw_trades(input: &FundTransactionInput) -> Vec<Decimal> {
    if input.positions.is_empty() {
        return Vec::new();
    }

    let net_investable = input.net_investable();
    let weights = input.weight_map();

    let scores: Vec<Decimal> = input
        .positions
        .iter()
        .map(|position| {
            deficiency_score(
                target_weight(&weights, position.isin.as_str()),
                net_investable,
                position.market_value,
            )
        })
        .collect();

    distribute_with_threshold(&scores, input.free_cash, input.min_transaction_threshold).allocations
}
