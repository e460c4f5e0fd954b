use alloy::primitives::{Address, U256};
use fastnum::D256;

use super::{Market, OrderId, Outcome};
use crate::error::InputError;

/// Direction of an order.
///
/// Codes match the contract: `0` is a buy (bid), `1` is a sell (ask).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(try_from = "u8")]
pub enum OrderType {
    Buy,
    Sell,
}

impl OrderType {
    pub fn code(&self) -> u8 {
        match self {
            OrderType::Buy => 0,
            OrderType::Sell => 1,
        }
    }

    /// Type of the resting orders an incoming order of this type matches.
    pub fn opposite(&self) -> Self {
        match self {
            OrderType::Buy => OrderType::Sell,
            OrderType::Sell => OrderType::Buy,
        }
    }
}

impl TryFrom<u8> for OrderType {
    type Error = InputError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(OrderType::Buy),
            1 => Ok(OrderType::Sell),
            _ => Err(InputError::InvalidOrderType(value)),
        }
    }
}

/// Position of the order creation in chain history, used for time priority
/// among orders at the same price.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CreationKey {
    pub block_number: u64,
    pub log_index: u64,
}

impl CreationKey {
    pub fn new(block_number: u64, log_index: u64) -> Self {
        Self {
            block_number,
            log_index,
        }
    }
}

/// Resting order from an order book snapshot.
///
/// Keeps the on-chain integer price/amount along with their display
/// decimals, derived once from the market tick parameters.
#[derive(Clone, derive_more::Debug, PartialEq)]
pub struct Order {
    id: OrderId,
    owner: Address,
    outcome: Outcome,
    r#type: OrderType,
    on_chain_price: U256,
    on_chain_amount: U256,
    #[debug("{price}")]
    price: D256,
    #[debug("{amount}")]
    amount: D256,
    created: CreationKey,
}

impl Order {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: OrderId,
        owner: Address,
        outcome: Outcome,
        r#type: OrderType,
        on_chain_price: U256,
        on_chain_amount: U256,
        created: CreationKey,
        market: &Market,
    ) -> Result<Self, InputError> {
        market.check_outcome(outcome)?;
        if on_chain_price > market.num_ticks() {
            return Err(InputError::PriceOutOfRange {
                price: crate::num::Converter::INTEGER.from_unsigned(on_chain_price),
                min: D256::ZERO,
                max: crate::num::Converter::INTEGER.from_unsigned(market.num_ticks()),
            });
        }
        Ok(Self {
            id,
            owner,
            outcome,
            r#type,
            on_chain_price,
            on_chain_amount,
            price: market.price_to_display(on_chain_price),
            amount: market.amount_to_display(on_chain_amount),
            created,
        })
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Address of the account that placed the order.
    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn r#type(&self) -> OrderType {
        self.r#type
    }

    /// Price in ticks.
    pub fn on_chain_price(&self) -> U256 {
        self.on_chain_price
    }

    /// Unfilled amount in attoshares.
    pub fn on_chain_amount(&self) -> U256 {
        self.on_chain_amount
    }

    /// Full precision display price.
    pub fn price(&self) -> D256 {
        self.price
    }

    /// Full precision unfilled display amount.
    pub fn amount(&self) -> D256 {
        self.amount
    }

    pub fn created(&self) -> CreationKey {
        self.created
    }
}

#[cfg(test)]
mod tests {
    use fastnum::dec256;

    use super::*;

    #[test]
    fn test_order_type_codes() {
        assert_eq!(OrderType::try_from(0), Ok(OrderType::Buy));
        assert_eq!(OrderType::try_from(1), Ok(OrderType::Sell));
        assert_eq!(OrderType::try_from(2), Err(InputError::InvalidOrderType(2)));
        assert_eq!(OrderType::Sell.code(), 1);
        assert_eq!(OrderType::Buy.opposite(), OrderType::Sell);
    }

    #[test]
    fn test_order_display_values() {
        let market = Market::binary(Address::ZERO, U256::from(10000)).unwrap();
        let order = Order::new(
            OrderId::ZERO,
            Address::ZERO,
            1,
            OrderType::Sell,
            U256::from(6500),
            U256::from(400_000_000_000_000u64),
            CreationKey::new(10, 2),
            &market,
        )
        .unwrap();
        assert_eq!(order.price(), dec256!(0.65));
        assert_eq!(order.amount(), dec256!(4));
    }

    #[test]
    fn test_order_display_values_with_inexact_tick_size() {
        let market = Market::binary(Address::ZERO, U256::from(6)).unwrap();
        let order = Order::new(
            OrderId::ZERO,
            Address::ZERO,
            0,
            OrderType::Buy,
            U256::from(3),
            U256::from(500_000_000_000_000_000u64),
            CreationKey::default(),
            &market,
        )
        .unwrap();
        assert_eq!(order.price(), dec256!(0.5));
        assert_eq!(order.amount(), dec256!(3));
    }

    #[test]
    fn test_order_rejects_price_above_num_ticks() {
        let market = Market::binary(Address::ZERO, U256::from(100)).unwrap();
        let result = Order::new(
            OrderId::ZERO,
            Address::ZERO,
            0,
            OrderType::Buy,
            U256::from(101),
            U256::from(1),
            CreationKey::default(),
            &market,
        );
        assert!(matches!(result, Err(InputError::PriceOutOfRange { .. })));
    }
}
