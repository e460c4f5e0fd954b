use alloy::primitives::U256;
use fastnum::D256;

use super::convert;
use crate::{
    error::InputError,
    num,
    types::{Market, OrderType, market},
};

/// Parameters of [`calculate_trade_cost`].
///
/// Deserializes from the camelCase object form, with decimals given as
/// base-10 strings and `orderType` as `0` (buy) or `1` (sell).
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TradeCostParams {
    #[serde(deserialize_with = "num::deserialize_decimal")]
    pub display_price: D256,
    #[serde(deserialize_with = "num::deserialize_decimal")]
    pub display_amount: D256,
    #[serde(deserialize_with = "num::deserialize_decimal")]
    pub num_ticks: D256,
    pub order_type: OrderType,
    #[serde(deserialize_with = "num::deserialize_decimal")]
    pub min_display_price: D256,
    #[serde(deserialize_with = "num::deserialize_decimal")]
    pub max_display_price: D256,
}

impl TradeCostParams {
    pub fn for_market(
        market: &Market,
        order_type: OrderType,
        display_price: D256,
        display_amount: D256,
    ) -> Self {
        Self {
            display_price,
            display_amount,
            num_ticks: convert::integer(market.num_ticks()),
            order_type,
            min_display_price: market.min_price(),
            max_display_price: market.max_price(),
        }
    }
}

/// Cost breakdown of a trade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TradeCost {
    /// Wei value to attach to the trade transaction.
    pub cost: U256,
    /// Number of attoshares traded.
    pub on_chain_amount: U256,
    /// Price in ticks.
    pub on_chain_price: U256,
}

/// Converts a display price/amount into on-chain units and computes the
/// value needed for the trade.
///
/// Rounding never favors the trader: buy prices round up, sell prices round
/// down, the cost rounds up and the amount rounds down.
pub fn calculate_trade_cost(p: &TradeCostParams) -> Result<TradeCost, InputError> {
    if p.num_ticks <= D256::ZERO || p.num_ticks.floor() != p.num_ticks {
        return Err(InputError::InvalidNumTicks(p.num_ticks));
    }
    market::validate_price_range(p.min_display_price, p.max_display_price)?;
    market::check_price_in_range(p.display_price, p.min_display_price, p.max_display_price)?;
    if p.display_amount.is_negative() {
        return Err(InputError::NegativeAmount(p.display_amount));
    }

    let (min, max) = (p.min_display_price, p.max_display_price);
    let on_chain_price = convert::display_price_to_ticks(p.display_price, min, max, p.num_ticks);
    let on_chain_amount =
        convert::display_amount_to_attoshares(p.display_amount, min, max, p.num_ticks);
    // attoshares times num_ticks, divided out once the price is applied
    let scaled_amount = p.display_amount * (max - min) * num::ATTO;
    let (on_chain_price, cost) = match p.order_type {
        OrderType::Buy => {
            let price = on_chain_price.ceil();
            (price, bid_cost(price, scaled_amount) / p.num_ticks)
        }
        OrderType::Sell => {
            let price = on_chain_price.floor();
            (price, ask_cost(price, scaled_amount, p.num_ticks) / p.num_ticks)
        }
    };

    let int = num::Converter::INTEGER;
    Ok(TradeCost {
        cost: int.to_unsigned(cost.ceil())?,
        on_chain_amount: int.to_unsigned(on_chain_amount.floor())?,
        on_chain_price: int.to_unsigned(on_chain_price)?,
    })
}

/// Value escrowed by a buyer: price times amount.
pub fn bid_cost(on_chain_price: D256, on_chain_amount: D256) -> D256 {
    on_chain_price * on_chain_amount
}

/// Value escrowed by a seller: the complement of the price times amount.
pub fn ask_cost(on_chain_price: D256, on_chain_amount: D256, num_ticks: D256) -> D256 {
    (num_ticks - on_chain_price) * on_chain_amount
}

#[cfg(test)]
mod tests {
    use fastnum::dec256;

    use super::*;

    fn params(order_type: OrderType, price: D256, amount: D256) -> TradeCostParams {
        TradeCostParams {
            display_price: price,
            display_amount: amount,
            num_ticks: dec256!(10000),
            order_type,
            min_display_price: dec256!(0),
            max_display_price: dec256!(1),
        }
    }

    #[test]
    fn test_buy_ten_at_half() {
        let cost =
            calculate_trade_cost(&params(OrderType::Buy, dec256!(0.5), dec256!(10))).unwrap();
        assert_eq!(cost.on_chain_price, U256::from(5000));
        assert_eq!(cost.on_chain_amount, U256::from(1_000_000_000_000_000u64));
        assert_eq!(cost.cost, U256::from(5_000_000_000_000_000_000u128));
    }

    #[test]
    fn test_sell_uses_complement_price() {
        let cost =
            calculate_trade_cost(&params(OrderType::Sell, dec256!(0.7), dec256!(10))).unwrap();
        assert_eq!(cost.on_chain_price, U256::from(7000));
        assert_eq!(cost.on_chain_amount, U256::from(1_000_000_000_000_000u64));
        assert_eq!(cost.cost, U256::from(3_000_000_000_000_000_000u128));
    }

    #[test]
    fn test_price_rounding_direction() {
        // 0.12345 is 1234.5 ticks
        let buy =
            calculate_trade_cost(&params(OrderType::Buy, dec256!(0.12345), dec256!(1))).unwrap();
        let sell =
            calculate_trade_cost(&params(OrderType::Sell, dec256!(0.12345), dec256!(1))).unwrap();
        assert_eq!(buy.on_chain_price, U256::from(1235));
        assert_eq!(sell.on_chain_price, U256::from(1234));
    }

    #[test]
    fn test_cost_rounds_up_and_amount_rounds_down() {
        let p = TradeCostParams {
            display_price: dec256!(0.5),
            display_amount: dec256!(1),
            num_ticks: dec256!(3),
            order_type: OrderType::Buy,
            min_display_price: dec256!(0),
            max_display_price: dec256!(1),
        };
        // tick size 1/3, price 1.5 ticks -> 2, amount 333333333333333333.33..
        let cost = calculate_trade_cost(&p).unwrap();
        assert_eq!(cost.on_chain_price, U256::from(2));
        assert_eq!(cost.on_chain_amount, U256::from(333_333_333_333_333_333u64));
        assert_eq!(cost.cost, U256::from(666_666_666_666_666_667u64));
    }

    fn params_with_ticks(
        order_type: OrderType,
        price: D256,
        amount: D256,
        num_ticks: D256,
    ) -> TradeCostParams {
        TradeCostParams {
            num_ticks,
            ..params(order_type, price, amount)
        }
    }

    #[test]
    fn test_on_grid_price_with_inexact_tick_size() {
        // 0.5 is exactly 3 of 6 ticks on both sides
        for order_type in [OrderType::Buy, OrderType::Sell] {
            let cost = calculate_trade_cost(&params_with_ticks(
                order_type,
                dec256!(0.5),
                dec256!(1),
                dec256!(6),
            ))
            .unwrap();
            assert_eq!(cost.on_chain_price, U256::from(3), "{order_type:?}");
            assert_eq!(cost.on_chain_amount, U256::from(166_666_666_666_666_666u64));
            assert_eq!(cost.cost, U256::from(500_000_000_000_000_000u64), "{order_type:?}");
        }

        let sell = calculate_trade_cost(&params_with_ticks(
            OrderType::Sell,
            dec256!(0),
            dec256!(3),
            dec256!(3),
        ))
        .unwrap();
        assert_eq!(sell.on_chain_price, U256::ZERO);
        assert_eq!(sell.on_chain_amount, U256::from(1_000_000_000_000_000_000u64));
        assert_eq!(sell.cost, U256::from(3_000_000_000_000_000_000u128));

        let buy = calculate_trade_cost(&params_with_ticks(
            OrderType::Buy,
            dec256!(1),
            dec256!(3),
            dec256!(3),
        ))
        .unwrap();
        assert_eq!(buy.on_chain_price, U256::from(3));
        assert_eq!(buy.cost, U256::from(3_000_000_000_000_000_000u128));

        for order_type in [OrderType::Buy, OrderType::Sell] {
            let cost = calculate_trade_cost(&params_with_ticks(
                order_type,
                dec256!(1),
                dec256!(7),
                dec256!(7),
            ))
            .unwrap();
            assert_eq!(cost.on_chain_price, U256::from(7));
            assert_eq!(cost.on_chain_amount, U256::from(1_000_000_000_000_000_000u64));
        }
    }

    #[test]
    fn test_nearest_decimal_to_grid_price_rounds_to_that_tick() {
        // 4/7 written slightly below for a buy and slightly above for a sell
        let buy = calculate_trade_cost(&params_with_ticks(
            OrderType::Buy,
            dec256!(0.571428571428571),
            dec256!(1),
            dec256!(7),
        ))
        .unwrap();
        assert_eq!(buy.on_chain_price, U256::from(4));
        let sell = calculate_trade_cost(&params_with_ticks(
            OrderType::Sell,
            dec256!(0.571428571428572),
            dec256!(1),
            dec256!(7),
        ))
        .unwrap();
        assert_eq!(sell.on_chain_price, U256::from(4));
        // 1/3 in a 3 tick market
        let sell = calculate_trade_cost(&params_with_ticks(
            OrderType::Sell,
            dec256!(0.3333333334),
            dec256!(1),
            dec256!(3),
        ))
        .unwrap();
        assert_eq!(sell.on_chain_price, U256::from(1));
    }

    #[test]
    fn test_scalar_market_with_negative_min() {
        let p = TradeCostParams {
            display_price: dec256!(-2.5),
            display_amount: dec256!(2),
            num_ticks: dec256!(2000),
            order_type: OrderType::Buy,
            min_display_price: dec256!(-10),
            max_display_price: dec256!(10),
        };
        let cost = calculate_trade_cost(&p).unwrap();
        assert_eq!(cost.on_chain_price, U256::from(750));
        assert_eq!(cost.on_chain_amount, U256::from(20_000_000_000_000_000u64));
        assert_eq!(cost.cost, U256::from(15_000_000_000_000_000_000u128));
    }

    #[test]
    fn test_cost_is_monotonic_in_amount() {
        for order_type in [OrderType::Buy, OrderType::Sell] {
            let mut prev = U256::ZERO;
            for amount in [
                dec256!(0),
                dec256!(0.001),
                dec256!(0.5),
                dec256!(1),
                dec256!(7.25),
                dec256!(100),
            ] {
                let cost =
                    calculate_trade_cost(&params(order_type, dec256!(0.4321), amount)).unwrap();
                assert!(cost.cost >= prev, "{order_type:?} {amount}");
                prev = cost.cost;
            }
        }
    }

    #[test]
    fn test_invalid_inputs() {
        let mut p = params(OrderType::Buy, dec256!(0.5), dec256!(1));
        p.num_ticks = dec256!(0);
        assert_eq!(
            calculate_trade_cost(&p),
            Err(InputError::InvalidNumTicks(dec256!(0)))
        );

        p.num_ticks = dec256!(10.5);
        assert!(matches!(
            calculate_trade_cost(&p),
            Err(InputError::InvalidNumTicks(_))
        ));

        let p = params(OrderType::Buy, dec256!(1.5), dec256!(1));
        assert!(matches!(
            calculate_trade_cost(&p),
            Err(InputError::PriceOutOfRange { .. })
        ));

        let p = params(OrderType::Sell, dec256!(0.5), dec256!(-1));
        assert_eq!(
            calculate_trade_cost(&p),
            Err(InputError::NegativeAmount(dec256!(-1)))
        );
    }

    #[test]
    fn test_params_from_json() {
        let p: TradeCostParams = serde_json::from_str(
            r#"{
                "displayPrice": "0.5",
                "displayAmount": "10",
                "numTicks": "10000",
                "orderType": 0,
                "minDisplayPrice": "0",
                "maxDisplayPrice": "1"
            }"#,
        )
        .unwrap();
        assert_eq!(p, params(OrderType::Buy, dec256!(0.5), dec256!(10)));
    }

    #[test]
    fn test_params_from_json_rejects_unknown_and_missing_fields() {
        let unknown = serde_json::from_str::<TradeCostParams>(
            r#"{
                "displayPrice": "0.5",
                "displayAmount": "10",
                "numTicks": "10000",
                "orderType": 0,
                "minDisplayPrice": "0",
                "maxDisplayPrice": "1",
                "slippage": "0.1"
            }"#,
        );
        assert!(unknown.is_err());

        let missing = serde_json::from_str::<TradeCostParams>(
            r#"{ "displayPrice": "0.5", "displayAmount": "10", "orderType": 1 }"#,
        );
        assert!(missing.is_err());

        let bad_type = serde_json::from_str::<TradeCostParams>(
            r#"{
                "displayPrice": "0.5",
                "displayAmount": "10",
                "numTicks": "10000",
                "orderType": 2,
                "minDisplayPrice": "0",
                "maxDisplayPrice": "1"
            }"#,
        );
        assert!(bad_type.is_err());
    }
}
