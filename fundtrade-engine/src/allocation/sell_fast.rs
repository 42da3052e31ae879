//! SELL_FAST: raise an urgent shortfall from liquid instruments first.
//!
//! Fast-sell positions are liquidated pro rata to their share of the fast
//! bucket, or in full when the shortfall exceeds the bucket. Any remainder is
//! drawn pro rata from the other positions, each capped at its holding. No
//! threshold elimination applies.

use super::{has_shortfall, zero_trades};
use fundtrade_domain::rounding::{div_half_up, money, SHARE_SCALE};
use fundtrade_domain::FundTransactionInput;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

/// Remainders at or below this are left unsold
const RESIDUAL_TOLERANCE: Decimal = dec!(0.01);

fn bucket_value(input: &FundTransactionInput, indices: &[usize]) -> Decimal {
    indices.iter().map(|&i| input.positions[i].market_value).sum()
}

pub(super) fn raw_trades(input: &FundTransactionInput) -> Vec<Decimal> {
    if input.positions.is_empty() {
        return Vec::new();
    }

    if !has_shortfall(input) {
        return zero_trades(input.positions.len());
    }

    let target_amount = input.free_cash.abs();
    let mut trades = zero_trades(input.positions.len());

    let (fast, slow): (Vec<usize>, Vec<usize>) = (0..input.positions.len())
        .partition(|&i| input.is_fast_sell(&input.positions[i].isin));

    let mut raised_from_fast = Decimal::ZERO;
    if !fast.is_empty() {
        let total_fast_value = bucket_value(input, &fast);

        if target_amount >= total_fast_value {
            raised_from_fast = total_fast_value;
            for &i in &fast {
                trades[i] = money(-input.positions[i].market_value);
            }
        } else {
            raised_from_fast = target_amount;
            for &i in &fast {
                let share = div_half_up(input.positions[i].market_value, total_fast_value, SHARE_SCALE);
                trades[i] = money(-(raised_from_fast * share));
            }
        }
    }

    let remaining_need = target_amount - raised_from_fast;
    debug!(
        fund = %input.fund,
        %target_amount,
        %raised_from_fast,
        %remaining_need,
        "Fast bucket liquidated"
    );

    if remaining_need > RESIDUAL_TOLERANCE && !slow.is_empty() {
        let total_slow_value = bucket_value(input, &slow);

        for &i in &slow {
            let market_value = input.positions[i].market_value;
            let share = div_half_up(market_value, total_slow_value, SHARE_SCALE);
            let sell_amount = market_value.min(money(remaining_need * share));
            trades[i] = money(-sell_amount);
        }
    }

    trades
}

#[cfg(test)]
mod tests {
    use super::*;
    use fundtrade_domain::PositionSnapshot;

    fn input(fast: Decimal, slow: Decimal, free_cash: Decimal) -> FundTransactionInput {
        FundTransactionInput::new("TUV100")
            .with_positions(vec![
                PositionSnapshot::new("IE00FAST", fast),
                PositionSnapshot::new("IE00SLOW", slow),
            ])
            .with_gross_portfolio_value(dec!(1000000))
            .with_cash_buffer(dec!(50000))
            .with_free_cash(free_cash)
            .with_min_transaction_threshold(dec!(5000))
            .with_fast_sell_isins(["IE00FAST"])
    }

    #[test]
    fn test_fast_bucket_covers_shortfall() {
        let trades = raw_trades(&input(dec!(200000), dec!(300000), dec!(-100000)));

        assert_eq!(trades, vec![dec!(-100000), dec!(0)]);
    }

    #[test]
    fn test_overflow_to_slow_bucket() {
        let trades = raw_trades(&input(dec!(50000), dec!(300000), dec!(-100000)));

        assert_eq!(trades, vec![dec!(-50000), dec!(-50000)]);
    }

    #[test]
    fn test_slow_sale_capped_at_holding() {
        let trades = raw_trades(&input(dec!(50000), dec!(30000), dec!(-100000)));

        assert_eq!(trades, vec![dec!(-50000), dec!(-30000)]);
    }

    #[test]
    fn test_fast_bucket_split_pro_rata() {
        let input = FundTransactionInput::new("TUV100")
            .with_positions(vec![
                PositionSnapshot::new("IE00F1", dec!(300000)),
                PositionSnapshot::new("IE00F2", dec!(100000)),
                PositionSnapshot::new("IE00SLOW", dec!(500000)),
            ])
            .with_free_cash(dec!(-100000))
            .with_fast_sell_isins(["IE00F1", "IE00F2"]);

        let trades = raw_trades(&input);

        assert_eq!(trades, vec![dec!(-75000), dec!(-25000), dec!(0)]);
    }

    #[test]
    fn test_no_fast_bucket_draws_from_all() {
        let input = FundTransactionInput::new("TUV100")
            .with_positions(vec![
                PositionSnapshot::new("IE00A", dec!(100000)),
                PositionSnapshot::new("IE00B", dec!(200000)),
            ])
            .with_free_cash(dec!(-30000));

        let trades = raw_trades(&input);

        assert_eq!(trades, vec![dec!(-10000), dec!(-20000)]);
    }

    #[test]
    fn test_unheld_fast_sell_isin_is_ignored() {
        let base = input(dec!(200000), dec!(300000), dec!(-100000));
        let with_unheld = base.clone().with_fast_sell_isins(["IE00FAST", "IE00NOTHELD"]);

        assert_eq!(raw_trades(&with_unheld), raw_trades(&base));
        assert_eq!(raw_trades(&with_unheld), vec![dec!(-100000), dec!(0)]);
    }

    #[test]
    fn test_only_unheld_fast_sell_isins_draws_from_slow_bucket() {
        let input = FundTransactionInput::new("TUV100")
            .with_positions(vec![
                PositionSnapshot::new("IE00A", dec!(100000)),
                PositionSnapshot::new("IE00B", dec!(200000)),
            ])
            .with_free_cash(dec!(-30000))
            .with_fast_sell_isins(["IE00NOTHELD"]);

        let trades = raw_trades(&input);

        assert_eq!(trades, vec![dec!(-10000), dec!(-20000)]);
        assert_eq!(trades, raw_trades(&input.clone().with_fast_sell_isins(Vec::<&str>::new())));
    }

    #[test]
    fn test_zero_value_slow_bucket_sells_nothing() {
        let trades = raw_trades(&input(dec!(50000), Decimal::ZERO, dec!(-100000)));

        assert_eq!(trades, vec![dec!(-50000), dec!(0)]);
    }

    #[test]
    fn test_no_shortfall_sells_nothing() {
        let trades = raw_trades(&input(dec!(200000), dec!(300000), dec!(50000)));

        assert_eq!(trades, vec![dec!(0), dec!(0)]);
    }

    #[test]
    fn test_small_trades_are_not_suppressed() {
        let trades = raw_trades(&input(dec!(200000), dec!(300000), dec!(-10)));

        assert_eq!(trades, vec![dec!(-10), dec!(0)]);
    }
}
