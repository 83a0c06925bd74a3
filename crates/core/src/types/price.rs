//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PriceError {
    /// The amount is negative.
    #[error("price must not be negative")]
    Negative,
    /// The amount does not fit the cents representation.
    #[error("price is too large")]
    TooLarge,
}

/// A non-negative item price.
///
/// Amounts are decimal values in the marketplace's single display currency,
/// rounded to two decimal places on construction. The persistent store keeps
/// prices as integer cents; [`Price::from_cents`] and [`Price::as_cents`]
/// convert at that boundary.
///
/// ## Examples
///
/// ```
/// use palengke_core::Price;
/// use rust_decimal::Decimal;
///
/// let price = Price::new(Decimal::new(35000, 2)).unwrap(); // 350.00
/// assert_eq!(price.as_cents(), 35000);
/// assert!(Price::new(Decimal::from(-1)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price from a decimal amount, rounding to cents.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero and
    /// [`PriceError::TooLarge`] if it cannot be represented as `i64` cents.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }

        let rounded = amount.round_dp(2);
        (rounded * Decimal::ONE_HUNDRED)
            .to_i64()
            .ok_or(PriceError::TooLarge)?;

        Ok(Self(rounded))
    }

    /// Create a price from integer cents.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `cents` is below zero.
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        if cents < 0 {
            return Err(PriceError::Negative);
        }
        Ok(Self(Decimal::new(cents, 2)))
    }

    /// The amount as a decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The amount as integer cents.
    ///
    /// Construction guarantees the conversion cannot overflow.
    #[must_use]
    pub fn as_cents(&self) -> i64 {
        (self.0 * Decimal::ONE_HUNDRED).to_i64().unwrap_or(i64::MAX)
    }

    /// The total value of `quantity` units at this price.
    #[must_use]
    pub fn total_for(&self, quantity: i64) -> Decimal {
        self.0 * Decimal::from(quantity)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_negative() {
        assert!(matches!(
            Price::new(Decimal::from(-5)),
            Err(PriceError::Negative)
        ));
    }

    #[test]
    fn test_new_rounds_to_cents() {
        let price = Price::new(Decimal::new(12345, 3)).unwrap(); // 12.345
        assert_eq!(price.as_cents(), 1234);
    }

    #[test]
    fn test_cents_roundtrip() {
        let price = Price::from_cents(35000).unwrap();
        assert_eq!(price.amount(), Decimal::new(350, 0));
        assert_eq!(price.as_cents(), 35000);
    }

    #[test]
    fn test_from_cents_rejects_negative() {
        assert!(matches!(Price::from_cents(-1), Err(PriceError::Negative)));
    }

    #[test]
    fn test_total_for() {
        let price = Price::new(Decimal::from(100)).unwrap();
        assert_eq!(price.total_for(5), Decimal::from(500));
        assert_eq!(Price::ZERO.total_for(10), Decimal::ZERO);
    }

    #[test]
    fn test_display() {
        let price = Price::from_cents(25050).unwrap();
        assert_eq!(format!("{price}"), "250.50");
    }

    #[test]
    fn test_serde_as_string() {
        // rust_decimal's serde-with-str feature serializes the amount as a string
        let price = Price::from_cents(10000).unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"100.00\"");

        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, price);
    }
}
