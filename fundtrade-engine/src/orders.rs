//! Order drafting
//!
//! Turns a calculation result into unsigned order drafts for booking.

use fundtrade_domain::{
    FundCalculationResult, FundCode, InstrumentType, Isin, OrderSide, OrderVenue,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order ready to be persisted by the booking side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub fund: FundCode,
    pub isin: Isin,
    pub side: OrderSide,
    pub instrument_type: InstrumentType,
    pub venue: OrderVenue,
    /// Always positive
    pub amount: Decimal,
}

/// One draft per non-zero trade, in trade order.
pub fn draft_orders(result: &FundCalculationResult) -> Vec<OrderDraft> {
    let input = &result.input;

    result
        .trades
        .iter()
        .filter(|trade| !trade.is_zero())
        .map(|trade| OrderDraft {
            fund: result.fund.clone(),
            isin: trade.isin.clone(),
            side: if trade.is_buy() {
                OrderSide::Buy
            } else {
                OrderSide::Sell
            },
            instrument_type: input
                .instrument_types
                .get(&trade.isin)
                .copied()
                .unwrap_or_default(),
            venue: input.order_venues.get(&trade.isin).copied().unwrap_or_default(),
            amount: trade.trade_amount.abs(),
        })
        .collect()
}
