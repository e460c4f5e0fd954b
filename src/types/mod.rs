pub(crate) mod market;
mod order;

pub use market::Market;
pub use order::{CreationKey, Order, OrderType};

use alloy::primitives::B256;

/// Index of a market outcome.
pub type Outcome = u8;

/// On-chain ID of a resting order.
pub type OrderId = B256;

/// Trade group ID attached to related transactions.
pub type TradeGroupId = B256;
