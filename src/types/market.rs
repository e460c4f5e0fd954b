use alloy::primitives::{Address, U256};
use fastnum::D256;

use crate::{error::InputError, num, trading::convert};

/// Tick parameters of a market.
///
/// Display prices live in `[min_price, max_price]`, on-chain prices are
/// integer ticks in `[0, num_ticks]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Market {
    id: Address,
    num_outcomes: u8,
    num_ticks: U256,
    min_price: D256,
    max_price: D256,
}

impl Market {
    pub fn new(
        id: Address,
        num_outcomes: u8,
        num_ticks: U256,
        min_price: D256,
        max_price: D256,
    ) -> Result<Self, InputError> {
        if num_outcomes < 2 {
            return Err(InputError::InvalidNumOutcomes(num_outcomes));
        }
        let num_ticks_dec = num::Converter::INTEGER.from_unsigned(num_ticks);
        if num_ticks.is_zero() {
            return Err(InputError::InvalidNumTicks(num_ticks_dec));
        }
        validate_price_range(min_price, max_price)?;
        Ok(Self {
            id,
            num_outcomes,
            num_ticks,
            min_price,
            max_price,
        })
    }

    /// Binary yes/no market with prices in `[0, 1]`.
    pub fn binary(id: Address, num_ticks: U256) -> Result<Self, InputError> {
        Self::new(id, 2, num_ticks, D256::ZERO, D256::ONE)
    }

    pub fn id(&self) -> Address {
        self.id
    }

    pub fn num_outcomes(&self) -> u8 {
        self.num_outcomes
    }

    pub fn num_ticks(&self) -> U256 {
        self.num_ticks
    }

    pub fn min_price(&self) -> D256 {
        self.min_price
    }

    pub fn max_price(&self) -> D256 {
        self.max_price
    }

    /// Display price range covered by the market.
    pub fn range(&self) -> D256 {
        self.max_price - self.min_price
    }

    /// Display value of one on-chain tick.
    pub fn tick_size(&self) -> D256 {
        self.range() / num::Converter::INTEGER.from_unsigned(self.num_ticks)
    }

    /// Display price of an on-chain tick count. Prices on the tick grid are
    /// exact whenever they have a finite decimal form.
    pub fn price_to_display(&self, on_chain_price: U256) -> D256 {
        convert::ticks_to_display_price(
            convert::integer(on_chain_price),
            self.min_price,
            self.max_price,
            convert::integer(self.num_ticks),
        )
    }

    /// Display amount of an attoshare count.
    pub fn amount_to_display(&self, on_chain_amount: U256) -> D256 {
        convert::attoshares_to_display_amount(
            convert::integer(on_chain_amount),
            self.min_price,
            self.max_price,
            convert::integer(self.num_ticks),
        )
    }

    pub(crate) fn check_outcome(&self, outcome: u8) -> Result<(), InputError> {
        if outcome >= self.num_outcomes {
            return Err(InputError::InvalidOutcome {
                outcome,
                num_outcomes: self.num_outcomes as usize,
            });
        }
        Ok(())
    }

    pub(crate) fn check_price(&self, price: D256) -> Result<(), InputError> {
        check_price_in_range(price, self.min_price, self.max_price)
    }
}

pub(crate) fn validate_price_range(min: D256, max: D256) -> Result<(), InputError> {
    if max <= min {
        return Err(InputError::EmptyPriceRange { min, max });
    }
    Ok(())
}

pub(crate) fn check_price_in_range(price: D256, min: D256, max: D256) -> Result<(), InputError> {
    if price < min || price > max {
        return Err(InputError::PriceOutOfRange { price, min, max });
    }
    Ok(())
}
