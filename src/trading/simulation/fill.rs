use fastnum::D256;

use super::{FeeSchedule, SimulationResult, check_balances};
use crate::{
    error::InputError,
    num::{self, Precision},
    types::{Market, Order, OrderType, Outcome},
};

/// Result of walking the matching orders.
#[derive(Clone, Debug, PartialEq)]
pub struct FillSimulation {
    pub result: SimulationResult,
    /// Shares left unfilled once the matching orders are exhausted.
    pub shares_to_cover: D256,
}

/// Fills `shares_to_cover` shares of an incoming order of `order_type`
/// against `sorted_matching_orders`, best order first.
///
/// Shares already held are spent before any currency: a buy closes short
/// positions by giving up shares of every other outcome, a sell closes a
/// long position by giving up shares of `outcome`. Only the rest opens a
/// new position paid in currency.
#[allow(clippy::too_many_arguments)]
pub fn simulate_fill_order(
    order_type: OrderType,
    shares_to_cover: D256,
    market: &Market,
    fees: &FeeSchedule,
    sorted_matching_orders: &[&Order],
    outcome: Outcome,
    share_balances: Vec<D256>,
    precision: &Precision,
) -> Result<FillSimulation, InputError> {
    check_balances(market, outcome, &share_balances)?;
    if shares_to_cover.is_negative() || precision.is_zero(shares_to_cover) {
        return Err(InputError::SharesTooSmall(shares_to_cover));
    }
    fees.validate()?;

    let mut result = SimulationResult::new(share_balances);
    let mut remaining = shares_to_cover;
    for order in sorted_matching_orders {
        if precision.is_zero(remaining) {
            break;
        }
        let filled = num::min(order.amount(), remaining);
        let long_price = order.price() - market.min_price();
        let short_price = market.max_price() - order.price();

        match order_type {
            OrderType::Buy => {
                let used = num::min(min_other_balance(&result.share_balances, outcome), filled);
                if used > D256::ZERO {
                    result.other_shares_depleted += used;
                    add_to_others(&mut result.share_balances, outcome, -used);
                    result.settlement_fees += fees.fee(used * short_price);
                }
                let opened = filled - used;
                if opened > D256::ZERO {
                    result.tokens_depleted += opened * long_price;
                    result.share_balances[outcome as usize] += opened;
                    result.settlement_fees += fees.fee(opened * long_price);
                }
            }
            OrderType::Sell => {
                let used = num::min(result.share_balances[outcome as usize], filled);
                if used > D256::ZERO {
                    result.shares_depleted += used;
                    result.share_balances[outcome as usize] -= used;
                    result.settlement_fees += fees.fee(used * long_price);
                }
                let opened = filled - used;
                if opened > D256::ZERO {
                    result.tokens_depleted += opened * short_price;
                    add_to_others(&mut result.share_balances, outcome, opened);
                    result.settlement_fees += fees.fee(opened * short_price);
                }
            }
        }

        result.worst_case_fees += fees.fee(filled * market.range());
        result.shares_filled += filled;
        remaining -= filled;
    }

    Ok(FillSimulation {
        result,
        shares_to_cover: remaining,
    })
}

/// Buy side of [`simulate_fill_order`], matching asks.
pub fn simulate_fill_ask_order(
    shares_to_cover: D256,
    market: &Market,
    fees: &FeeSchedule,
    sorted_matching_orders: &[&Order],
    outcome: Outcome,
    share_balances: Vec<D256>,
    precision: &Precision,
) -> Result<FillSimulation, InputError> {
    simulate_fill_order(
        OrderType::Buy,
        shares_to_cover,
        market,
        fees,
        sorted_matching_orders,
        outcome,
        share_balances,
        precision,
    )
}

/// Sell side of [`simulate_fill_order`], matching bids.
pub fn simulate_fill_bid_order(
    shares_to_cover: D256,
    market: &Market,
    fees: &FeeSchedule,
    sorted_matching_orders: &[&Order],
    outcome: Outcome,
    share_balances: Vec<D256>,
    precision: &Precision,
) -> Result<FillSimulation, InputError> {
    simulate_fill_order(
        OrderType::Sell,
        shares_to_cover,
        market,
        fees,
        sorted_matching_orders,
        outcome,
        share_balances,
        precision,
    )
}

/// Smallest holding among the outcomes other than `outcome`, i.e. the size
/// of the complete short position held on `outcome`.
pub(super) fn min_other_balance(share_balances: &[D256], outcome: Outcome) -> D256 {
    share_balances
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != outcome as usize)
        .map(|(_, b)| *b)
        .reduce(num::min)
        .unwrap_or(D256::ZERO)
}

pub(super) fn add_to_others(share_balances: &mut [D256], outcome: Outcome, delta: D256) {
    share_balances
        .iter_mut()
        .enumerate()
        .filter(|(i, _)| *i != outcome as usize)
        .for_each(|(_, b)| *b += delta);
}
