//! Conversions between display decimals and on-chain integers.
//!
//! None of these functions round: the results are exact (up to the decimal
//! precision) and callers apply the rounding direction they need.
//!
//! The `tick_size` forms take an already divided tick size, which is inexact
//! when `num_ticks` does not divide the price range. The `*_ticks` and
//! `*_attoshares` forms take the range and `num_ticks` instead and multiply
//! before dividing, so values on the tick grid convert to whole numbers.

use alloy::primitives::U256;
use fastnum::D256;

use crate::num::{self, ATTO};

/// Display price to (unrounded) on-chain ticks.
pub fn display_price_to_on_chain(display_price: D256, min_price: D256, tick_size: D256) -> D256 {
    (display_price - min_price) / tick_size
}

/// On-chain ticks to display price.
pub fn on_chain_price_to_display(on_chain_price: D256, min_price: D256, tick_size: D256) -> D256 {
    on_chain_price * tick_size + min_price
}

/// Display amount to (unrounded) attoshares.
pub fn display_amount_to_on_chain(display_amount: D256, tick_size: D256) -> D256 {
    display_amount * tick_size * ATTO
}

/// Attoshares to display amount.
pub fn on_chain_amount_to_display(on_chain_amount: D256, tick_size: D256) -> D256 {
    on_chain_amount / tick_size / ATTO
}

/// Display price to (unrounded) on-chain ticks: `(price - min) * num_ticks / range`.
pub fn display_price_to_ticks(
    display_price: D256,
    min_price: D256,
    max_price: D256,
    num_ticks: D256,
) -> D256 {
    (display_price - min_price) * num_ticks / (max_price - min_price)
}

/// On-chain ticks to display price: `min + ticks * range / num_ticks`.
pub fn ticks_to_display_price(
    on_chain_price: D256,
    min_price: D256,
    max_price: D256,
    num_ticks: D256,
) -> D256 {
    on_chain_price * (max_price - min_price) / num_ticks + min_price
}

/// Display amount to (unrounded) attoshares: `amount * range * 1e18 / num_ticks`.
pub fn display_amount_to_attoshares(
    display_amount: D256,
    min_price: D256,
    max_price: D256,
    num_ticks: D256,
) -> D256 {
    display_amount * (max_price - min_price) * ATTO / num_ticks
}

/// Attoshares to display amount.
pub fn attoshares_to_display_amount(
    on_chain_amount: D256,
    min_price: D256,
    max_price: D256,
    num_ticks: D256,
) -> D256 {
    on_chain_amount * num_ticks / (max_price - min_price) / ATTO
}

pub(crate) fn integer(value: U256) -> D256 {
    num::Converter::INTEGER.from_unsigned(value)
}
