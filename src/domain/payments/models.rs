//! Payment Models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::{self, CURRENCY, PricingError};

/// Body of `POST /api/payment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPaymentIntent {
    /// Amount in minor units (paise).
    pub amount: u64,
    /// ISO 4217 code.
    pub currency: String,
}

impl NewPaymentIntent {
    /// Intent for a major-unit total in the storefront currency.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the total cannot be expressed in minor
    /// units.
    pub fn for_total(total: Decimal) -> Result<Self, PricingError> {
        Ok(Self {
            amount: pricing::minor_units(total)?,
            currency: CURRENCY.iso_alpha_code.to_owned(),
        })
    }
}

/// Pre-created payment order handed to the payment widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Provider order token.
    pub id: String,
    /// Amount in minor units.
    pub amount: u64,
    /// ISO 4217 code.
    pub currency: String,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn intent_amount_is_in_paise() -> TestResult {
        let intent = NewPaymentIntent::for_total(Decimal::from(2200))?;

        assert_eq!(
            serde_json::to_value(&intent)?,
            serde_json::json!({"amount": 220_000, "currency": "INR"})
        );

        Ok(())
    }
}
