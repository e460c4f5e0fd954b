//! Prediction market trading SDK.
//!
//! # Overview
//!
//! Client library for the Augur prediction-market contracts, talking to an
//! Ethereum JSON-RPC node through [`alloy`].
//!
//! The core of the crate is [`trading`], which reproduces the on-chain
//! fixed-point arithmetic off-chain:
//!
//! * [`trading::calculate_trade_cost`] converts a display price/amount into
//!   on-chain ticks and attoshares and computes the wei value to attach.
//! * [`trading::simulate_buy`] / [`trading::simulate_sell`] walk an order book
//!   snapshot to estimate how an order would fill and what it would cost.
//! * [`trading::get_trade_amount_remaining`] replays a mined transaction's logs
//!   to find out how much of a trade is still unfilled, which drives
//!   [`trading::trade_until_amount_is_zero`].
//!
//! Network access goes through the [`client::ReceiptSource`] and
//! [`client::OrderSubmitter`] seams; [`client::ContractClient`] implements both
//! on top of any alloy [`alloy::providers::Provider`].
//!
//! # Testing
//!
//! [`testing`] provides an in-memory scripted chain implementing both seams,
//! plus builders for event logs and order book snapshots.

pub mod abi;
pub mod client;
pub mod error;
pub mod num;
pub mod reporting;
pub mod testing;
pub mod time;
pub mod trading;
pub mod types;

use alloy::primitives::Address;

/// Network the contracts are deployed on.
#[derive(Clone, Debug)]
pub struct Network {
    chain_id: u64,
    augur: Address,
    trade: Address,
    create_order: Address,
    time: Address,
}

impl Network {
    pub fn custom(
        chain_id: u64,
        augur: Address,
        trade: Address,
        create_order: Address,
        time: Address,
    ) -> Self {
        Self {
            chain_id,
            augur,
            trade,
            create_order,
            time,
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Address of the contract emitting trading events.
    pub fn augur(&self) -> Address {
        self.augur
    }

    pub fn trade(&self) -> Address {
        self.trade
    }

    pub fn create_order(&self) -> Address {
        self.create_order
    }

    /// Address of the time controller, only settable on test deployments.
    pub fn time(&self) -> Address {
        self.time
    }
}
