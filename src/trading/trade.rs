use alloy::primitives::{TxHash, U256};
use fastnum::D256;
use tracing::{debug, info, warn};

use super::{TradeCostParams, calculate_trade_cost, get_trade_amount_remaining};
use crate::{
    client::{OrderCreation, OrderSubmitter, ReceiptSource, TradeSubmission},
    error::Result,
    num::Precision,
    types::{Market, OrderId, OrderType, Outcome, TradeGroupId},
};

/// Trade to execute until nothing is left.
#[derive(Clone, Debug)]
pub struct TradeIntent {
    pub direction: OrderType,
    pub market: Market,
    pub outcome: Outcome,
    pub display_price: D256,
    pub display_amount: D256,
    pub trade_group_id: TradeGroupId,
    /// Take liquidity only; whatever is not filled by the first transaction
    /// is given up.
    pub do_not_create_orders: bool,
}

/// Step of the trade loop.
#[derive(Clone, Debug, PartialEq)]
pub enum TradeState {
    /// Next transaction to submit, for the given display amount.
    Pending { display_amount: D256 },
    /// Transaction mined, fills not reconciled yet.
    Submitted {
        tx_hash: TxHash,
        on_chain_amount: U256,
        on_chain_price: U256,
    },
    /// Nothing left to submit, see [`TradeOutcome`].
    Done,
}

/// How a trade loop ended.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TradeOutcome {
    /// Transactions submitted, in order.
    pub transactions: Vec<TxHash>,
    /// Attoshares neither filled nor resting on the book.
    pub unfilled_on_chain_amount: U256,
    /// Set when a transaction made no progress and the loop gave up.
    pub stalled: bool,
}

/// Submits trade transactions one at a time, each for whatever the previous
/// ones left unfilled, until the full amount is traded or rests on the book.
///
/// A failed submission or reconciliation ends the loop with the error; no
/// transaction is retried.
pub async fn trade_until_amount_is_zero<S, R>(
    submitter: &S,
    receipts: &R,
    intent: &TradeIntent,
    precision: &Precision,
) -> Result<TradeOutcome>
where
    S: OrderSubmitter,
    R: ReceiptSource,
{
    intent.market.check_outcome(intent.outcome)?;
    let mut outcome = TradeOutcome::default();
    let mut state = TradeState::Pending {
        display_amount: intent.display_amount,
    };

    loop {
        state = match state {
            TradeState::Pending { display_amount } => {
                if precision.is_zero(display_amount) {
                    debug!(%display_amount, "nothing left to trade");
                    TradeState::Done
                } else {
                    let cost = calculate_trade_cost(&TradeCostParams::for_market(
                        &intent.market,
                        intent.direction,
                        intent.display_price,
                        display_amount,
                    ))?;
                    if cost.on_chain_amount.is_zero() {
                        debug!(%display_amount, "amount below one attoshare");
                        TradeState::Done
                    } else {
                        let submission = TradeSubmission {
                            direction: intent.direction,
                            market: intent.market.id(),
                            outcome: intent.outcome,
                            on_chain_amount: cost.on_chain_amount,
                            on_chain_price: cost.on_chain_price,
                            better_order_id: OrderId::ZERO,
                            worse_order_id: OrderId::ZERO,
                            trade_group_id: intent.trade_group_id,
                            do_not_create_orders: intent.do_not_create_orders,
                            cost: cost.cost,
                        };
                        info!(
                            direction = ?intent.direction,
                            market = %intent.market.id(),
                            outcome = intent.outcome,
                            %display_amount,
                            price = %intent.display_price,
                            "submitting trade"
                        );
                        let tx_hash = submitter.submit_trade(&submission).await?;
                        outcome.transactions.push(tx_hash);
                        TradeState::Submitted {
                            tx_hash,
                            on_chain_amount: cost.on_chain_amount,
                            on_chain_price: cost.on_chain_price,
                        }
                    }
                }
            }
            TradeState::Submitted {
                tx_hash,
                on_chain_amount,
                on_chain_price,
            } => {
                let remaining =
                    get_trade_amount_remaining(receipts, tx_hash, on_chain_amount, on_chain_price)
                        .await?
                        .remaining;
                debug!(%tx_hash, %remaining, "trade reconciled");
                if remaining.is_zero() {
                    TradeState::Done
                } else if intent.do_not_create_orders {
                    outcome.unfilled_on_chain_amount = remaining;
                    TradeState::Done
                } else if remaining == on_chain_amount {
                    warn!(%tx_hash, %remaining, "trade made no progress, giving up");
                    outcome.unfilled_on_chain_amount = remaining;
                    outcome.stalled = true;
                    TradeState::Done
                } else {
                    TradeState::Pending {
                        display_amount: intent.market.amount_to_display(remaining),
                    }
                }
            }
            TradeState::Done => return Ok(outcome),
        };
    }
}

/// Places a resting order for `display_amount` shares at `display_price`.
#[allow(clippy::too_many_arguments)]
pub async fn create_order<S: OrderSubmitter>(
    submitter: &S,
    market: &Market,
    order_type: OrderType,
    outcome: Outcome,
    display_price: D256,
    display_amount: D256,
    better_order_id: OrderId,
    worse_order_id: OrderId,
    trade_group_id: TradeGroupId,
) -> Result<TxHash> {
    market.check_outcome(outcome)?;
    let cost = calculate_trade_cost(&TradeCostParams::for_market(
        market,
        order_type,
        display_price,
        display_amount,
    ))?;
    info!(
        ?order_type,
        market = %market.id(),
        outcome,
        %display_amount,
        price = %display_price,
        "creating order"
    );
    submitter
        .create_order(&OrderCreation {
            order_type,
            market: market.id(),
            outcome,
            on_chain_amount: cost.on_chain_amount,
            on_chain_price: cost.on_chain_price,
            better_order_id,
            worse_order_id,
            trade_group_id,
            cost: cost.cost,
        })
        .await
}
