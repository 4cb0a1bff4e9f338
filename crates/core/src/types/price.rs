//! Money amount helpers using decimal arithmetic.
//!
//! Catalog prices arrive as decimal strings from the storefront and are
//! echoed back to the order API as strings, so amounts are kept as
//! [`Decimal`] end to end. Nothing here touches floating point.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Errors from parsing or converting money amounts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// The input string is empty.
    #[error("amount cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("invalid amount {0:?}")]
    Invalid(String),
    /// Amounts are never negative in this system.
    #[error("amount cannot be negative: {0}")]
    Negative(Decimal),
    /// The amount does not fit the payment provider's minor-unit integer.
    #[error("amount out of range for minor units: {0}")]
    OutOfRange(Decimal),
}

/// Parse a decimal currency amount from its string form.
///
/// # Errors
///
/// Returns an error if the input is empty, not a decimal number, or
/// negative.
pub fn parse_amount(s: &str) -> Result<Decimal, AmountError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }

    let amount: Decimal = trimmed
        .parse()
        .map_err(|_| AmountError::Invalid(trimmed.to_owned()))?;

    if amount.is_sign_negative() {
        return Err(AmountError::Negative(amount));
    }

    Ok(amount)
}

/// Format an amount the way the order API expects totals: two decimal
/// places, no currency symbol.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("{amount:.2}")
}

/// Convert an amount to the payment provider's minor-unit representation
/// (e.g. rupees to paise).
///
/// # Errors
///
/// Returns an error if the amount is negative or overflows `i64`.
pub fn to_minor_units(amount: Decimal) -> Result<i64, AmountError> {
    if amount.is_sign_negative() {
        return Err(AmountError::Negative(amount));
    }

    (amount * Decimal::from(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(AmountError::OutOfRange(amount))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_amount_valid() {
        assert_eq!(parse_amount("500").unwrap(), dec("500"));
        assert_eq!(parse_amount("499.50").unwrap(), dec("499.50"));
        assert_eq!(parse_amount(" 10 ").unwrap(), dec("10"));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(parse_amount(""), Err(AmountError::Empty));
        assert_eq!(parse_amount("   "), Err(AmountError::Empty));
        assert!(matches!(parse_amount("ten"), Err(AmountError::Invalid(_))));
        assert!(matches!(parse_amount("-5"), Err(AmountError::Negative(_))));
    }

    #[test]
    fn test_format_amount_two_decimals() {
        assert_eq!(format_amount(dec("500")), "500.00");
        assert_eq!(format_amount(dec("99.9")), "99.90");
        assert_eq!(format_amount(dec("0")), "0.00");
    }

    #[test]
    fn test_to_minor_units() {
        assert_eq!(to_minor_units(dec("500")).unwrap(), 50_000);
        assert_eq!(to_minor_units(dec("499.50")).unwrap(), 49_950);
        assert_eq!(to_minor_units(dec("0.005")).unwrap(), 1);
    }

    #[test]
    fn test_to_minor_units_negative() {
        assert!(matches!(
            to_minor_units(dec("-1")),
            Err(AmountError::Negative(_))
        ));
    }
}
