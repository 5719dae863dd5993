//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored as `NUMERIC` in `PostgreSQL` and never pass through
//! floating point. On the wire they serialize as decimal strings (`"19.99"`)
//! and deserialize from either strings or JSON numbers.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Decimal places kept by the `NUMERIC(12, 2)` price columns.
pub const PRICE_SCALE: u32 = 2;

/// Exclusive upper bound of the `NUMERIC(12, 2)` price columns.
const PRICE_LIMIT: i64 = 10_000_000_000;

/// A price the datastore cannot hold exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("price must not be negative")]
    Negative,
    #[error("price must have at most {PRICE_SCALE} decimal places")]
    Precision,
    #[error("price must be less than {PRICE_LIMIT}")]
    TooLarge,
}

/// A monetary amount in the catalog's single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type), sqlx(transparent))]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an amount in cents (e.g., `1999` is `19.99`).
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Check that the amount is stored without rounding or overflow.
    ///
    /// # Errors
    ///
    /// Returns `PriceError` for negative amounts, more than two decimal
    /// places, or amounts of ten billion or more.
    pub fn check_storable(&self) -> Result<(), PriceError> {
        if self.0.is_sign_negative() && !self.0.is_zero() {
            return Err(PriceError::Negative);
        }
        if self.0.normalize().scale() > PRICE_SCALE {
            return Err(PriceError::Precision);
        }
        if self.0 >= Decimal::from(PRICE_LIMIT) {
            return Err(PriceError::TooLarge);
        }
        Ok(())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
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
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_from_cents() {
        assert_eq!(
            Price::from_cents(1999).amount(),
            Decimal::from_str("19.99").unwrap()
        );
    }

    #[test]
    fn test_display_two_places() {
        assert_eq!(Price::from_cents(500).to_string(), "5.00");
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Price::from_cents(1999)).unwrap();
        assert_eq!(json, "\"19.99\"");
    }

    #[test]
    fn test_check_storable() {
        assert!(Price::from_cents(1999).check_storable().is_ok());
        assert!(Price::from_cents(0).check_storable().is_ok());
        assert!(Price::new(Decimal::from_str("19.990").unwrap()).check_storable().is_ok());
        assert!(Price::new(Decimal::from_str("9999999999.99").unwrap()).check_storable().is_ok());

        assert_eq!(Price::from_cents(-1).check_storable(), Err(PriceError::Negative));
        assert_eq!(
            Price::new(Decimal::from_str("19.999").unwrap()).check_storable(),
            Err(PriceError::Precision)
        );
        assert_eq!(
            Price::new(Decimal::from(10_000_000_000_i64)).check_storable(),
            Err(PriceError::TooLarge)
        );
    }

    #[test]
    fn test_deserializes_from_number_and_string() {
        let from_number: Price = serde_json::from_str("19.99").unwrap();
        let from_string: Price = serde_json::from_str("\"19.99\"").unwrap();
        assert_eq!(from_number, Price::from_cents(1999));
        assert_eq!(from_string, Price::from_cents(1999));
    }
}
