//! Currency amounts.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// ISO 4217 code for US dollars, the only currency the API settles in.
pub const USD: &str = "USD";

/// A currency amount as the API represents it: `{"value": "1.00", "currency": "USD"}`.
///
/// The value is a [`Decimal`] serialized as a string, so no precision is
/// lost on the way in or out.
///
/// # Example
///
/// ```
/// use dwolla_rs::models::Amount;
/// use rust_decimal_macros::dec;
///
/// let amount = Amount::usd(dec!(0.03));
/// assert_eq!(amount.to_string(), "0.03 USD");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amount {
    /// Amount in major units
    pub value: Decimal,
    /// Currency code
    pub currency: String,
}

impl Amount {
    /// Create an amount in an arbitrary currency.
    pub fn new(value: Decimal, currency: impl Into<String>) -> Self {
        Self {
            value,
            currency: currency.into(),
        }
    }

    /// Create a US dollar amount.
    pub fn usd(value: Decimal) -> Self {
        Self::new(value, USD)
    }

    /// Returns `true` if the value is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.value > Decimal::ZERO
    }

    /// Reject non-positive amounts, naming `field` in the error.
    pub(crate) fn ensure_positive(&self, field: &str) -> crate::Result<()> {
        if self.is_positive() {
            Ok(())
        } else {
            Err(crate::Error::InvalidInput(format!(
                "{field} must be positive, got {self}"
            )))
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}
