//! Network collaborators of the trading operations.
//!
//! [`ReceiptSource`] and [`OrderSubmitter`] are the only ways the trade loop
//! reaches the chain. [`ContractClient`] implements both with an alloy
//! provider; [`crate::testing::MockChain`] implements them in memory.

use std::{future::Future, time::Duration};

use alloy::{
    network::Ethereum,
    primitives::{Address, Log, TxHash, U256},
    providers::{PendingTransactionBuilder, Provider},
    rpc::types::TransactionRequest,
};
use tracing::{debug, info};

use crate::{
    Network,
    abi::{create_order::CreateOrder, trade::Trade},
    error::{Error, Result},
    types::{OrderId, OrderType, Outcome, TradeGroupId},
};

/// Trade transaction to submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TradeSubmission {
    pub direction: OrderType,
    pub market: Address,
    pub outcome: Outcome,
    /// Attoshares to trade.
    pub on_chain_amount: U256,
    /// Limit price in ticks.
    pub on_chain_price: U256,
    pub better_order_id: OrderId,
    pub worse_order_id: OrderId,
    pub trade_group_id: TradeGroupId,
    /// Only take liquidity, never leave a resting order behind.
    pub do_not_create_orders: bool,
    /// Wei attached to the transaction.
    pub cost: U256,
}

/// Resting order creation transaction to submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderCreation {
    pub order_type: OrderType,
    pub market: Address,
    pub outcome: Outcome,
    pub on_chain_amount: U256,
    pub on_chain_price: U256,
    pub better_order_id: OrderId,
    pub worse_order_id: OrderId,
    pub trade_group_id: TradeGroupId,
    pub cost: U256,
}

/// Source of mined transaction logs.
pub trait ReceiptSource {
    /// Logs of the mined transaction, `None` when no receipt is known.
    fn transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> impl Future<Output = Result<Option<Vec<Log>>>> + Send;
}

/// Sends trading transactions and waits for them to be mined.
///
/// Each call resolves exactly once: with the hash of a successfully mined
/// transaction, or with an error, [`Error::Reverted`] when the chain
/// rejected it.
pub trait OrderSubmitter {
    fn submit_trade(
        &self,
        trade: &TradeSubmission,
    ) -> impl Future<Output = Result<TxHash>> + Send;

    fn create_order(&self, order: &OrderCreation) -> impl Future<Output = Result<TxHash>> + Send;
}

/// Contracts client on top of an alloy provider, signing with the provider
/// wallet.
#[derive(Clone, Debug)]
pub struct ContractClient<P> {
    provider: P,
    network: Network,
    timeout: Option<Duration>,
}

impl<P: Provider> ContractClient<P> {
    pub fn new(provider: P, network: Network) -> Self {
        Self {
            provider,
            network,
            timeout: None,
        }
    }

    /// Gives up waiting for a transaction to be mined after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Waits for the transaction to be mined and checks its status.
    pub(crate) async fn confirm(
        &self,
        pending: PendingTransactionBuilder<Ethereum>,
    ) -> Result<TxHash> {
        let tx_hash = *pending.tx_hash();
        info!(%tx_hash, "transaction sent");
        let receipt = pending.with_timeout(self.timeout).get_receipt().await?;
        debug!(
            %tx_hash,
            block_number = ?receipt.block_number,
            gas_used = receipt.gas_used,
            "transaction mined"
        );
        if !receipt.status() {
            return Err(Error::reverted(tx_hash));
        }
        Ok(tx_hash)
    }
}

impl<P: Provider> ReceiptSource for ContractClient<P> {
    async fn transaction_receipt(&self, tx_hash: TxHash) -> Result<Option<Vec<Log>>> {
        let receipt = self.provider.get_transaction_receipt(tx_hash).await?;
        Ok(receipt.map(|r| r.inner.logs().iter().map(|l| l.inner.clone()).collect()))
    }
}

impl<P: Provider> ContractClient<P> {
    /// Trade transaction: `publicFillBestOrder` when no order may be left
    /// behind, `publicTrade` otherwise.
    pub fn trade_request(&self, t: &TradeSubmission) -> TransactionRequest {
        let instance = Trade::new(self.network.trade(), &self.provider);
        let outcome = U256::from(t.outcome);
        if t.do_not_create_orders {
            instance
                .publicFillBestOrder(
                    t.direction.code(),
                    t.market,
                    outcome,
                    t.on_chain_amount,
                    t.on_chain_price,
                    t.trade_group_id,
                )
                .value(t.cost)
                .into_transaction_request()
        } else {
            instance
                .publicTrade(
                    t.direction.code(),
                    t.market,
                    outcome,
                    t.on_chain_amount,
                    t.on_chain_price,
                    t.better_order_id,
                    t.worse_order_id,
                    t.trade_group_id,
                )
                .value(t.cost)
                .into_transaction_request()
        }
    }

    pub fn create_order_request(&self, o: &OrderCreation) -> TransactionRequest {
        CreateOrder::new(self.network.create_order(), &self.provider)
            .publicCreateOrder(
                o.order_type.code(),
                o.on_chain_amount,
                o.on_chain_price,
                o.market,
                U256::from(o.outcome),
                o.better_order_id,
                o.worse_order_id,
                o.trade_group_id,
            )
            .value(o.cost)
            .into_transaction_request()
    }
}

impl<P: Provider> OrderSubmitter for ContractClient<P> {
    async fn submit_trade(&self, t: &TradeSubmission) -> Result<TxHash> {
        let pending = self.provider.send_transaction(self.trade_request(t)).await?;
        self.confirm(pending).await
    }

    async fn create_order(&self, o: &OrderCreation) -> Result<TxHash> {
        let pending = self
            .provider
            .send_transaction(self.create_order_request(o))
            .await?;
        self.confirm(pending).await
    }
}
