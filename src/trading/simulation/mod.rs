//! Off-chain estimate of how an order would execute against an order book
//! snapshot.
//!
//! An incoming order first fills the matching resting orders in price
//! priority; whatever is left, when a limit price is given, rests in a new
//! order. All quantities are display decimals.

mod create;
mod fill;
mod result;


pub use create::{simulate_create_ask_order, simulate_create_bid_order};
pub use fill::{
    FillSimulation, simulate_fill_ask_order, simulate_fill_bid_order, simulate_fill_order,
};
pub use result::{SimulationResult, sum_simulated_results};

use alloy::primitives::{Address, U256};
use fastnum::D256;
use tracing::debug;

use super::filter_by_price_and_user_sort_by_price;
use crate::{
    error::InputError,
    num::{Converter, Precision},
    types::{Market, Order, OrderType, Outcome},
};

/// Fee rates charged on settlement, as fractions of the settled value.
#[derive(Clone, Copy, derive_more::Debug, PartialEq)]
pub struct FeeSchedule {
    #[debug("{market_creator_fee_rate}")]
    pub market_creator_fee_rate: D256,
    #[debug("{reporting_fee_rate}")]
    pub reporting_fee_rate: D256,
    pub should_collect_reporting_fees: bool,
}

impl FeeSchedule {
    pub fn new(
        market_creator_fee_rate: D256,
        reporting_fee_rate: D256,
        should_collect_reporting_fees: bool,
    ) -> Result<Self, InputError> {
        let fees = Self {
            market_creator_fee_rate,
            reporting_fee_rate,
            should_collect_reporting_fees,
        };
        fees.validate()?;
        Ok(fees)
    }

    /// Schedule charging nothing.
    pub fn free() -> Self {
        Self {
            market_creator_fee_rate: D256::ZERO,
            reporting_fee_rate: D256::ZERO,
            should_collect_reporting_fees: false,
        }
    }

    /// Combined rate applied to settled value.
    pub fn rate(&self) -> D256 {
        if self.should_collect_reporting_fees {
            self.market_creator_fee_rate + self.reporting_fee_rate
        } else {
            self.market_creator_fee_rate
        }
    }

    pub fn fee(&self, value: D256) -> D256 {
        value * self.rate()
    }

    fn validate(&self) -> Result<(), InputError> {
        for rate in [self.market_creator_fee_rate, self.reporting_fee_rate] {
            if rate.is_negative() {
                return Err(InputError::NegativeFeeRate(rate));
            }
        }
        Ok(())
    }
}

/// Inputs shared by [`simulate_buy`], [`simulate_sell`] and
/// [`simulate_trade`].
#[derive(Clone, Debug)]
pub struct SimulationParams<'a> {
    pub market: &'a Market,
    pub outcome: Outcome,
    /// Number of shares to trade.
    pub shares: D256,
    /// Limit price. Without one the order only takes liquidity.
    pub price: Option<D256>,
    /// Trader whose own resting orders are never matched.
    pub user: Address,
    /// Holdings of the trader for every outcome of the market.
    pub share_balances: Vec<D256>,
    pub fees: FeeSchedule,
    pub precision: Precision,
}

/// Gas price and limit of the transaction carrying the trade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GasEstimate {
    /// Wei per gas unit.
    pub gas_price: U256,
    pub gas: U256,
}

impl GasEstimate {
    /// Cost in ether.
    pub fn fee(&self) -> D256 {
        Converter::ATTO.from_unsigned(self.gas_price.saturating_mul(self.gas))
    }
}

/// Simulates a buy against the asks of `sell_order_book`.
pub fn simulate_buy<'a>(
    params: &SimulationParams<'_>,
    sell_order_book: impl IntoIterator<Item = &'a Order>,
) -> Result<SimulationResult, InputError> {
    simulate(OrderType::Buy, params, sell_order_book)
}

/// Simulates a sell against the bids of `buy_order_book`.
pub fn simulate_sell<'a>(
    params: &SimulationParams<'_>,
    buy_order_book: impl IntoIterator<Item = &'a Order>,
) -> Result<SimulationResult, InputError> {
    simulate(OrderType::Sell, params, buy_order_book)
}

/// Simulates an order of `order_type` against both sides of the outcome's
/// book, adding the gas cost when an estimate is given.
pub fn simulate_trade<'a>(
    order_type: OrderType,
    params: &SimulationParams<'_>,
    order_book: impl IntoIterator<Item = &'a Order>,
    gas: Option<GasEstimate>,
) -> Result<SimulationResult, InputError> {
    let mut result = simulate(order_type, params, order_book)?;
    if let Some(gas) = gas {
        result.gas_fees = gas.fee();
    }
    Ok(result)
}

fn simulate<'a>(
    order_type: OrderType,
    params: &SimulationParams<'_>,
    order_book: impl IntoIterator<Item = &'a Order>,
) -> Result<SimulationResult, InputError> {
    let SimulationParams {
        market,
        outcome,
        shares,
        price,
        user,
        ref share_balances,
        ref fees,
        ref precision,
    } = *params;
    check_balances(market, outcome, share_balances)?;
    if let Some(price) = price {
        market.check_price(price)?;
    }

    let matching = filter_by_price_and_user_sort_by_price(
        order_book.into_iter().filter(|o| o.outcome() == outcome),
        order_type,
        price,
        user,
    );
    debug!(?order_type, outcome, matching = matching.len(), "simulating trade");

    if let (true, Some(price)) = (matching.is_empty(), price) {
        return create::simulate_create_order(
            order_type,
            shares,
            price,
            market,
            fees,
            outcome,
            share_balances.clone(),
            precision,
        );
    }

    let fill = simulate_fill_order(
        order_type,
        shares,
        market,
        fees,
        &matching,
        outcome,
        share_balances.clone(),
        precision,
    )?;
    let mut result = fill.result;
    if let Some(price) = price
        && !precision.is_zero(fill.shares_to_cover)
    {
        let created = create::simulate_create_order(
            order_type,
            fill.shares_to_cover,
            price,
            market,
            fees,
            outcome,
            result.share_balances.clone(),
            precision,
        )?;
        result = result.merge(created);
    }
    Ok(result)
}

fn check_balances(
    market: &Market,
    outcome: Outcome,
    share_balances: &[D256],
) -> Result<(), InputError> {
    market.check_outcome(outcome)?;
    if share_balances.len() != market.num_outcomes() as usize {
        return Err(InputError::ShareBalancesMismatch {
            expected: market.num_outcomes() as usize,
            actual: share_balances.len(),
        });
    }
    Ok(())
}
