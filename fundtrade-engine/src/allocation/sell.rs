//! SELL: raise a cash shortfall from overweight positions.
//!
//! Candidate selection is a two-pass policy decided once per call: when any
//! position both exceeds its soft limit and is overweight, only those
//! positions are sold; otherwise every overweight position is a candidate.

use super::{has_shortfall, target_weight, zero_trades};
use crate::distribution::distribute_with_threshold;
use fundtrade_domain::{FundTransactionInput, PositionSnapshot};
use rust_decimal::Decimal;
use tracing::debug;

/// Scores a position given its overweight amount
type CandidateScore = fn(&FundTransactionInput, &PositionSnapshot, Decimal) -> Decimal;

/// Amount above the ideal post-sale size, never more than is held
fn overweight_score(target_weight: Decimal, reduced_net: Decimal, market_value: Decimal) -> Decimal {
    let ideal_overweight = market_value - target_weight * reduced_net;
    market_value.min(ideal_overweight.max(Decimal::ZERO))
}

/// A position without configured limits has no ceiling protecting it and
/// counts as over its soft limit.
fn is_over_soft_limit(input: &FundTransactionInput, position: &PositionSnapshot) -> bool {
    match input.limits_for(&position.isin) {
        None => true,
        Some(limits) => input.current_weight(position) > limits.soft_limit,
    }
}

fn any_overweight(_: &FundTransactionInput, _: &PositionSnapshot, overweight: Decimal) -> Decimal {
    overweight
}

fn concentrated_only(
    input: &FundTransactionInput,
    position: &PositionSnapshot,
    overweight: Decimal,
) -> Decimal {
    if overweight > Decimal::ZERO && is_over_soft_limit(input, position) {
        overweight
    } else {
        Decimal::ZERO
    }
}

pub(super) fn raw_trades(input: &FundTransactionInput) -> Vec<Decimal> {
    if input.positions.is_empty() {
        return Vec::new();
    }

    if !has_shortfall(input) {
        return zero_trades(input.positions.len());
    }

    let target_sell_amount = input.free_cash.abs();
    let reduced_net = input.net_investable() - target_sell_amount;
    let weights = input.weight_map();

    let overweight: Vec<Decimal> = input
        .positions
        .iter()
        .map(|position| {
            overweight_score(
                target_weight(&weights, position.isin.as_str()),
                reduced_net,
                position.market_value,
            )
        })
        .collect();

    let prefer_concentrated = input
        .positions
        .iter()
        .zip(&overweight)
        .any(|(position, score)| concentrated_only(input, position, *score) > Decimal::ZERO);

    let candidate_score: CandidateScore = if prefer_concentrated {
        concentrated_only
    } else {
        any_overweight
    };

    debug!(
        fund = %input.fund,
        %target_sell_amount,
        prefer_concentrated,
        "Selecting sell candidates"
    );

    let scores: Vec<Decimal> = input
        .positions
        .iter()
        .zip(&overweight)
        .map(|(position, score)| candidate_score(input, position, *score))
        .collect();

    distribute_with_threshold(&scores, target_sell_amount, input.min_transaction_threshold)
        .allocations
        .into_iter()
        .map(|allocation| if allocation.is_zero() { allocation } else { -allocation })
        .collect()
}
