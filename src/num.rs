use alloy::primitives::U256;
use fastnum::{
    D256, bint, dec256,
    decimal::{Context, Decimal, RoundingMode, Sign},
};
use serde::{Deserialize, Deserializer};

use crate::error::InputError;

/// Number of attoshares (and wei) per whole unit.
pub const ATTO: D256 = dec256!(1000000000000000000);

/// Fixed-point to decimal converter.
#[derive(Clone, Copy, Debug, Default)]
pub struct Converter {
    decimals: i32,
}

impl Converter {
    /// Converter for plain integers (ticks).
    pub const INTEGER: Self = Self { decimals: 0 };

    /// Converter for 18-decimal fixed-point values (attoshares, wei).
    pub const ATTO: Self = Self { decimals: 18 };

    pub const fn new(decimals: u8) -> Self {
        Self {
            decimals: decimals as i32,
        }
    }

    pub fn from_unsigned(&self, value: U256) -> D256 {
        let unscaled = bint::UInt::<4>::from_le_slice(value.as_le_slice())
            .expect("Converter: U256 -> UInt::<4>");
        Decimal::<4>::from_parts(
            unscaled,
            -self.decimals,
            Sign::Plus,
            Context::default().with_rounding_mode(RoundingMode::Floor),
        )
    }

    /// Converts back to the fixed-point representation.
    ///
    /// Digits below the converter precision are truncated, callers round
    /// explicitly beforehand when the direction matters.
    pub fn to_unsigned(&self, value: D256) -> Result<U256, InputError> {
        if value.is_negative() {
            return Err(InputError::NotOnChainInteger(value));
        }
        let scale = Decimal::<4>::from_parts(
            bint::UInt::<4>::ONE,
            self.decimals,
            Sign::Plus,
            Context::default(),
        );
        let rescaled = (value * scale).floor().rescale(0);
        let bytes = rescaled.digits().to_radix_le(256);
        if bytes.len() > 32 {
            return Err(InputError::NotOnChainInteger(value));
        }
        Ok(U256::from_le_slice(bytes.as_slice()))
    }
}

/// Threshold below which a quantity is treated as zero.
///
/// Passed explicitly into every operation that needs it, so simulations
/// with different requirements never share state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Precision {
    pub zero: D256,
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            zero: dec256!(0.00000001),
        }
    }
}

impl Precision {
    pub fn is_zero(&self, value: D256) -> bool {
        value <= self.zero
    }
}

/// Parses a base-10 decimal string.
pub fn parse_decimal(value: &str) -> Result<D256, InputError> {
    D256::from_str(value.trim(), Context::default())
        .map_err(|_| InputError::InvalidDecimal(value.to_string()))
}

pub(crate) fn min(a: D256, b: D256) -> D256 {
    if a < b { a } else { b }
}

/// Deserializes a decimal given as a base-10 string.
pub fn deserialize_decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<D256, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_decimal(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_converter_from_unsigned() {
        assert_eq!(
            Converter::INTEGER.from_unsigned(U256::from(1234567890)),
            dec256!(1234567890)
        );
        assert_eq!(
            Converter::new(6).from_unsigned(U256::from(1234567890)),
            dec256!(1234.56789)
        );
        assert_eq!(
            Converter::ATTO.from_unsigned(U256::from(1_000_000_000_000_000u64)),
            dec256!(0.001)
        );
    }

    #[test]
    fn test_numeric_converter_to_unsigned() {
        assert_eq!(
            Converter::INTEGER.to_unsigned(dec256!(1234567890)).unwrap(),
            U256::from(1234567890)
        );
        assert_eq!(
            Converter::new(6).to_unsigned(dec256!(1234.56789)).unwrap(),
            U256::from(1234567890)
        );
        assert_eq!(
            Converter::ATTO.to_unsigned(dec256!(5)).unwrap(),
            U256::from(5_000_000_000_000_000_000u128)
        );
    }

    #[test]
    fn test_numeric_converter_truncates_extra_digits() {
        assert_eq!(
            Converter::INTEGER.to_unsigned(dec256!(4999.9)).unwrap(),
            U256::from(4999)
        );
    }

    #[test]
    fn test_numeric_converter_rejects_negative() {
        assert_eq!(
            Converter::INTEGER.to_unsigned(dec256!(-1)),
            Err(InputError::NotOnChainInteger(dec256!(-1)))
        );
    }

    #[test]
    fn test_precision_zero() {
        let precision = Precision::default();
        assert!(precision.is_zero(D256::ZERO));
        assert!(precision.is_zero(dec256!(0.000000001)));
        assert!(!precision.is_zero(dec256!(0.0001)));
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("0.5").unwrap(), dec256!(0.5));
        assert_eq!(parse_decimal(" -10 ").unwrap(), dec256!(-10));
        assert!(matches!(
            parse_decimal("half"),
            Err(InputError::InvalidDecimal(_))
        ));
    }
}
