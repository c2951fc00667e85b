//! Prices

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

/// Currency every storefront price is quoted in.
pub const CURRENCY: &Currency = iso::INR;

/// Errors that can occur while converting prices for payment.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// The amount is negative and cannot be charged.
    #[error("amount {0} is negative")]
    Negative(Decimal),

    /// The amount does not fit into the minor-unit integer range.
    #[error("amount {0} is out of range")]
    OutOfRange(Decimal),
}

/// Price of `quantity` units at `unit_price`.
#[must_use]
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Sum of `price × quantity` over the given pairs.
pub fn total_price(lines: impl IntoIterator<Item = (Decimal, u32)>) -> Decimal {
    lines
        .into_iter()
        .map(|(price, quantity)| line_total(price, quantity))
        .sum()
}

/// Wrap an amount in the storefront currency for display.
#[must_use]
pub fn to_money(amount: Decimal) -> Money<'static, Currency> {
    Money::from_decimal(amount, CURRENCY)
}

/// Convert a major-unit amount into minor units (paise), rounding half away
/// from zero.
///
/// # Errors
///
/// - [`PricingError::Negative`]: the amount is below zero.
/// - [`PricingError::OutOfRange`]: the scaled amount does not fit in a `u64`.
pub fn minor_units(amount: Decimal) -> Result<u64, PricingError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PricingError::Negative(amount));
    }

    let scale = 10_u64
        .checked_pow(CURRENCY.exponent)
        .ok_or(PricingError::OutOfRange(amount))?;

    amount
        .checked_mul(Decimal::from(scale))
        .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|scaled| scaled.to_u64())
        .ok_or(PricingError::OutOfRange(amount))
}
