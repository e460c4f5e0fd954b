//! In-memory test environment and test utilities.
//!
//! [`MockChain`] stands in for the node: it replays scripted outcomes for
//! submitted transactions, stores the logs of the "mined" ones and serves
//! them back as receipts. Submissions are recorded for later inspection.
//!
//! [`OrderBuilder`] provides a convenient way to create resting orders for
//! order book snapshots, [`order_filled_log`] and [`order_created_log`] build
//! the trade event logs the reconciliation reads.
//!
//! [`mocked_client`] runs the contract-side operations against alloy's mock
//! transport, with node responses queued on an [`Asserter`].

use std::{collections::VecDeque, sync::Mutex};

use alloy::{
    primitives::{Address, B256, Bytes, Log, TxHash, U256},
    providers::RootProvider,
    rpc::{client::RpcClient, json_rpc::ErrorPayload},
    transports::mock::{Asserter, MockResponse},
};
use alloy_sol_types::{SolEvent, SolValue};
use dashmap::DashMap;
use fastnum::D256;

use crate::{
    Network,
    abi::augur::Augur::{OrderCreated, OrderFilled},
    client::{ContractClient, OrderCreation, OrderSubmitter, ReceiptSource, TradeSubmission},
    error::{Error, Result},
    trading::{TradeCostParams, calculate_trade_cost},
    types::{CreationKey, Market, Order, OrderType, Outcome},
};

/// Scripted result of the next submitted transaction.
#[derive(Clone, Debug)]
pub enum Scripted {
    Mined { tx_hash: TxHash, logs: Vec<Log> },
    Reverted { tx_hash: TxHash },
}

/// Scripted in-memory chain.
#[derive(Debug, Default)]
pub struct MockChain {
    receipts: DashMap<TxHash, Vec<Log>>,
    scripted: Mutex<VecDeque<Scripted>>,
    trades: Mutex<Vec<TradeSubmission>>,
    orders: Mutex<Vec<OrderCreation>>,
}

impl MockChain {
    /// Makes a receipt available without any submission.
    pub fn insert_receipt(&self, tx_hash: TxHash, logs: Vec<Log>) {
        self.receipts.insert(tx_hash, logs);
    }

    /// Next submission gets mined and emits `logs`.
    pub fn push_mined(&self, tx_hash: TxHash, logs: Vec<Log>) {
        self.push(Scripted::Mined { tx_hash, logs });
    }

    /// Next submission gets reverted.
    pub fn push_reverted(&self, tx_hash: TxHash) {
        self.push(Scripted::Reverted { tx_hash });
    }

    pub fn push(&self, scripted: Scripted) {
        self.scripted
            .lock()
            .expect("scripted queue lock")
            .push_back(scripted);
    }

    /// Trade submissions received so far, in order.
    pub fn trades(&self) -> Vec<TradeSubmission> {
        self.trades.lock().expect("trades lock").clone()
    }

    /// Order creations received so far, in order.
    pub fn orders(&self) -> Vec<OrderCreation> {
        self.orders.lock().expect("orders lock").clone()
    }

    fn mine_next(&self) -> Result<TxHash> {
        let next = self
            .scripted
            .lock()
            .expect("scripted queue lock")
            .pop_front();
        match next {
            Some(Scripted::Mined { tx_hash, logs }) => {
                self.receipts.insert(tx_hash, logs);
                Ok(tx_hash)
            }
            Some(Scripted::Reverted { tx_hash }) => Err(Error::reverted(tx_hash)),
            None => Err(Error::Transport(
                "no scripted response for submission".to_string(),
            )),
        }
    }
}

impl ReceiptSource for MockChain {
    async fn transaction_receipt(&self, tx_hash: TxHash) -> Result<Option<Vec<Log>>> {
        Ok(self.receipts.get(&tx_hash).map(|logs| logs.clone()))
    }
}

impl OrderSubmitter for MockChain {
    async fn submit_trade(&self, trade: &TradeSubmission) -> Result<TxHash> {
        self.trades
            .lock()
            .expect("trades lock")
            .push(trade.clone());
        self.mine_next()
    }

    async fn create_order(&self, order: &OrderCreation) -> Result<TxHash> {
        self.orders
            .lock()
            .expect("orders lock")
            .push(order.clone());
        self.mine_next()
    }
}

/// Addresses of the contracts behind [`mocked_client`].
pub fn test_network() -> Network {
    Network::custom(
        1337,
        Address::repeat_byte(0xa1),
        Address::repeat_byte(0xa2),
        Address::repeat_byte(0xa3),
        Address::repeat_byte(0xa4),
    )
}

/// Contracts client talking to a node that answers requests in order with
/// the responses queued on `asserter`. A request with nothing queued fails.
pub fn mocked_client(asserter: Asserter) -> ContractClient<RootProvider> {
    ContractClient::new(RootProvider::new(RpcClient::mocked(asserter)), test_network())
}

/// Queues the ABI encoding of `value` as the result of the next `eth_call`.
pub fn push_call_result<T: SolValue>(asserter: &Asserter, value: T) {
    asserter.push_success(&Bytes::from(value.abi_encode()));
}

/// Queues a revert as the answer to the next request.
pub fn push_revert(asserter: &Asserter) {
    asserter.push(MockResponse::Failure(ErrorPayload {
        code: 3,
        message: "execution reverted".into(),
        data: None,
    }));
}

/// `OrderFilled` log reporting what the resting order creator put up.
pub fn order_filled_log(num_creator_shares: U256, num_creator_tokens: U256) -> Log {
    let event = OrderFilled {
        universe: Address::ZERO,
        shareToken: Address::ZERO,
        filler: Address::ZERO,
        orderId: B256::ZERO,
        numCreatorShares: num_creator_shares,
        numCreatorTokens: num_creator_tokens,
        numFillerShares: U256::ZERO,
        numFillerTokens: U256::ZERO,
        marketCreatorFees: U256::ZERO,
        reporterFees: U256::ZERO,
        tradeGroupId: U256::ZERO,
    };
    Log {
        address: Address::ZERO,
        data: event.encode_log_data(),
    }
}

/// `OrderCreated` log for a resting order escrowing `shares_escrowed`.
pub fn order_created_log(shares_escrowed: U256) -> Log {
    let event = OrderCreated {
        creator: Address::ZERO,
        universe: Address::ZERO,
        orderId: B256::ZERO,
        shareToken: Address::ZERO,
        tradeGroupId: U256::ZERO,
        tokensEscrowed: U256::ZERO,
        sharesEscrowed: shares_escrowed,
    };
    Log {
        address: Address::ZERO,
        data: event.encode_log_data(),
    }
}

/// Builder for resting orders of an order book snapshot.
///
/// On-chain values are derived the way a trade for the same price and
/// amount would be submitted. The order ID ends with the `id` byte, the
/// owner defaults to the zero address, the outcome to `0` and the creation
/// position to block `id`.
#[derive(Clone, Debug)]
pub struct OrderBuilder<'m> {
    market: &'m Market,
    id: u8,
    r#type: OrderType,
    price: D256,
    amount: D256,
    owner: Address,
    outcome: Outcome,
    created: CreationKey,
}

impl<'m> OrderBuilder<'m> {
    pub fn new(market: &'m Market, id: u8, r#type: OrderType, price: D256, amount: D256) -> Self {
        Self {
            market,
            id,
            r#type,
            price,
            amount,
            owner: Address::ZERO,
            outcome: 0,
            created: CreationKey::new(id as u64, 0),
        }
    }

    /// Resting bid.
    pub fn buy(market: &'m Market, id: u8, price: D256, amount: D256) -> Self {
        Self::new(market, id, OrderType::Buy, price, amount)
    }

    /// Resting ask.
    pub fn sell(market: &'m Market, id: u8, price: D256, amount: D256) -> Self {
        Self::new(market, id, OrderType::Sell, price, amount)
    }

    pub fn owner(mut self, owner: Address) -> Self {
        self.owner = owner;
        self
    }

    pub fn outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn created(mut self, block_number: u64, log_index: u64) -> Self {
        self.created = CreationKey::new(block_number, log_index);
        self
    }

    pub fn build(self) -> Order {
        let cost = calculate_trade_cost(&TradeCostParams::for_market(
            self.market,
            self.r#type,
            self.price,
            self.amount,
        ))
        .expect("valid order price and amount");
        Order::new(
            B256::with_last_byte(self.id),
            self.owner,
            self.outcome,
            self.r#type,
            cost.on_chain_price,
            cost.on_chain_amount,
            self.created,
            self.market,
        )
        .expect("valid order")
    }
}

#[cfg(test)]
mod tests {
    use fastnum::dec256;
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::types::OrderId;

    fn submission() -> TradeSubmission {
        TradeSubmission {
            direction: OrderType::Buy,
            market: Address::ZERO,
            outcome: 0,
            on_chain_amount: U256::from(1),
            on_chain_price: U256::from(1),
            better_order_id: OrderId::ZERO,
            worse_order_id: OrderId::ZERO,
            trade_group_id: B256::ZERO,
            do_not_create_orders: false,
            cost: U256::from(1),
        }
    }

    #[tokio::test]
    async fn test_mock_chain_replays_script() {
        let chain = MockChain::default();
        let mined = TxHash::repeat_byte(1);
        let reverted = TxHash::repeat_byte(2);
        chain.push_mined(mined, vec![order_created_log(U256::from(5))]);
        chain.push_reverted(reverted);

        assert_eq!(assert_ok!(chain.submit_trade(&submission()).await), mined);
        assert!(matches!(
            chain.submit_trade(&submission()).await,
            Err(Error::Reverted { tx_hash: Some(hash), .. }) if hash == reverted
        ));
        assert_err!(chain.submit_trade(&submission()).await);
        assert_eq!(chain.trades().len(), 3);

        let logs = assert_ok!(chain.transaction_receipt(mined).await).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(
            assert_ok!(chain.transaction_receipt(reverted).await),
            None
        );
    }

    #[test]
    fn test_order_builder() {
        let market = Market::binary(Address::ZERO, U256::from(10000)).unwrap();
        let order = OrderBuilder::sell(&market, 7, dec256!(0.65), dec256!(4))
            .outcome(1)
            .created(3, 2)
            .build();
        assert_eq!(order.id()[31], 7);
        assert_eq!(order.on_chain_price(), U256::from(6500));
        assert_eq!(order.on_chain_amount(), U256::from(400_000_000_000_000u64));
        assert_eq!(order.created(), CreationKey::new(3, 2));
        assert_eq!(order.outcome(), 1);
    }
}
