use std::cmp::Ordering;

use alloy::primitives::Address;
use fastnum::D256;
use itertools::Itertools;

use crate::types::{Order, OrderType};

/// Selects the resting orders an incoming order could match, in matching
/// priority.
///
/// `order_type` is the type of the incoming order and `order_book_side` the
/// single-outcome side of the book it trades against. Orders owned by
/// `user_address` are skipped. With a limit `price`, an incoming buy only
/// matches asks at or below it and an incoming sell only bids at or above
/// it; without one, every order matches.
///
/// The best price comes first: lowest ask for a buy, highest bid for a sell.
/// Orders at the same price keep creation order.
pub fn filter_by_price_and_user_sort_by_price<'a>(
    order_book_side: impl IntoIterator<Item = &'a Order>,
    order_type: OrderType,
    price: Option<D256>,
    user_address: Address,
) -> Vec<&'a Order> {
    let resting_type = order_type.opposite();
    order_book_side
        .into_iter()
        .filter(|o| o.r#type() == resting_type)
        .filter(|o| o.owner() != user_address)
        .filter(|o| o.amount() > D256::ZERO)
        .filter(|o| match (order_type, price) {
            (_, None) => true,
            (OrderType::Buy, Some(limit)) => o.price() <= limit,
            (OrderType::Sell, Some(limit)) => o.price() >= limit,
        })
        .sorted_by(|a, b| {
            let by_price = match order_type {
                OrderType::Buy => a.price().partial_cmp(&b.price()),
                OrderType::Sell => b.price().partial_cmp(&a.price()),
            };
            by_price
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.created().cmp(&b.created()))
        })
        .collect()
}
