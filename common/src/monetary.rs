//! Amount helpers for directory balances and ledger records.
//!
//! Amounts are plain `Decimal`s in a single implied currency.

use rust_decimal::Decimal;

use crate::error::{Result, TellerError};

/// Currency suffix written after every amount in the transactions file.
pub const CURRENCY_CODE: &str = "BDT";

/// Check that an amount is strictly positive.
pub fn ensure_positive(amount: Decimal) -> Result<Decimal> {
    if amount <= Decimal::ZERO {
        return Err(TellerError::InvalidAmount {
            amount: amount.to_string(),
        });
    }
    Ok(amount)
}

/// Render an amount the way the flat files store it.
///
/// Trailing fractional zeros are dropped: `50500.0` becomes `50500`
/// and `12.50` becomes `12.5`.
pub fn format_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}

/// Parse an amount from a flat-file field or user input.
pub fn parse_amount(value: &str) -> Result<Decimal> {
    value
        .trim()
        .parse::<Decimal>()
        .map_err(|e| TellerError::InvalidAmount {
            amount: format!("{} ({})", value.trim(), e),
        })
}
