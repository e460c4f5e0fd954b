use fastnum::D256;

use super::{
    FeeSchedule, SimulationResult, check_balances,
    fill::{add_to_others, min_other_balance},
};
use crate::{
    error::InputError,
    num::{self, Precision},
    types::{Market, OrderType, Outcome},
};

/// Places `num_shares` shares in a new resting bid at `price`.
///
/// Complete short positions on `outcome` are escrowed first, the remainder
/// escrows `price - min_price` currency per share.
pub fn simulate_create_bid_order(
    num_shares: D256,
    price: D256,
    market: &Market,
    fees: &FeeSchedule,
    outcome: Outcome,
    share_balances: Vec<D256>,
    precision: &Precision,
) -> Result<SimulationResult, InputError> {
    let mut result =
        prepare(num_shares, price, market, fees, outcome, share_balances, precision)?;

    let used = num::min(min_other_balance(&result.share_balances, outcome), num_shares);
    if used > D256::ZERO {
        result.other_shares_depleted = used;
        add_to_others(&mut result.share_balances, outcome, -used);
    }
    result.tokens_depleted = (num_shares - used) * (price - market.min_price());
    Ok(result)
}

/// Places `num_shares` shares in a new resting ask at `price`.
///
/// Held shares of `outcome` are escrowed first, the remainder escrows
/// `max_price - price` currency per share.
pub fn simulate_create_ask_order(
    num_shares: D256,
    price: D256,
    market: &Market,
    fees: &FeeSchedule,
    outcome: Outcome,
    share_balances: Vec<D256>,
    precision: &Precision,
) -> Result<SimulationResult, InputError> {
    let mut result =
        prepare(num_shares, price, market, fees, outcome, share_balances, precision)?;

    let used = num::min(result.share_balances[outcome as usize], num_shares);
    if used > D256::ZERO {
        result.shares_depleted = used;
        result.share_balances[outcome as usize] -= used;
    }
    result.tokens_depleted = (num_shares - used) * (market.max_price() - price);
    Ok(result)
}

#[allow(clippy::too_many_arguments)]
pub(super) fn simulate_create_order(
    order_type: OrderType,
    num_shares: D256,
    price: D256,
    market: &Market,
    fees: &FeeSchedule,
    outcome: Outcome,
    share_balances: Vec<D256>,
    precision: &Precision,
) -> Result<SimulationResult, InputError> {
    match order_type {
        OrderType::Buy => simulate_create_bid_order(
            num_shares,
            price,
            market,
            fees,
            outcome,
            share_balances,
            precision,
        ),
        OrderType::Sell => simulate_create_ask_order(
            num_shares,
            price,
            market,
            fees,
            outcome,
            share_balances,
            precision,
        ),
    }
}

fn prepare(
    num_shares: D256,
    price: D256,
    market: &Market,
    fees: &FeeSchedule,
    outcome: Outcome,
    share_balances: Vec<D256>,
    precision: &Precision,
) -> Result<SimulationResult, InputError> {
    check_balances(market, outcome, &share_balances)?;
    market.check_price(price)?;
    if num_shares.is_negative() || precision.is_zero(num_shares) {
        return Err(InputError::SharesTooSmall(num_shares));
    }
    fees.validate()?;

    let mut result = SimulationResult::new(share_balances);
    result.new_order_shares = num_shares;
    result.worst_case_fees = fees.fee(num_shares * market.range());
    Ok(result)
}
