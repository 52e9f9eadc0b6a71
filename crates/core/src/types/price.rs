//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored as exact decimals and rendered to clients as plain JSON
//! numbers (`19.9`, not `"19.90"`). Deserialization accepts numbers and
//! numeric strings, so the same type works for JSON and form bodies.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Errors produced when constructing a [`Price`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,

    /// The value is not a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
}

/// A non-negative item price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Create a price, rejecting negative amounts.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// Lossy conversion used for JSON output.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim()).map_err(|e| PriceError::Invalid(e.to_string()))?;
        Self::new(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_prices() {
        assert_eq!("19.99".parse::<Price>().unwrap().to_string(), "19.99");
        assert_eq!(" 0 ".parse::<Price>().unwrap().to_string(), "0");
    }

    #[test]
    fn test_parse_negative() {
        assert_eq!("-1.00".parse::<Price>(), Err(PriceError::Negative));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            "nineteen".parse::<Price>(),
            Err(PriceError::Invalid(_))
        ));
    }

    #[test]
    fn test_serializes_as_number() {
        let price: Price = "19.90".parse().unwrap();
        let value = serde_json::to_value(price).unwrap();
        assert_eq!(value, serde_json::json!(19.9));
    }

    #[test]
    fn test_deserializes_from_number_and_string() {
        let from_number: Price = serde_json::from_str("15.9").unwrap();
        let from_string: Price = serde_json::from_str("\"15.90\"").unwrap();
        assert_eq!(from_number, from_string);
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Price>("-3").is_err());
    }
}
