//! # Monetary Amounts
//!
//! `Money` stores the amount as a validated decimal string with an
//! ISO 4217 currency code. Arithmetic and comparison go through minor
//! units (cents), never floating point.
//!
//! ## Security Invariant
//!
//! Financial amounts must never be represented as floating-point numbers.
//! String storage plus integer minor-unit arithmetic ensures no precision
//! loss anywhere between the API boundary and the escrow ledger.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Number of fractional digits carried in minor units.
const MINOR_UNIT_SCALE: u32 = 2;

/// Monetary amount with currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount as a decimal string (e.g., "120.00", "45").
    pub amount: String,
    /// ISO 4217 currency code (e.g., "USD", "EUR").
    pub currency: String,
}

impl Money {
    /// Create a new monetary amount.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidAmount`] if the amount string is empty
    /// or contains non-numeric characters, [`CoreError::AmountPrecision`]
    /// if it carries more than two decimal places, and
    /// [`CoreError::InvalidCurrency`] if the currency is not a 3-letter
    /// uppercase code.
    pub fn new(
        amount: impl Into<String>,
        currency: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let amount = amount.into();
        let currency = currency.into();
        // Validate eagerly so every constructed Money has usable minor units.
        minor_units(&amount)?;
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(CoreError::InvalidCurrency(currency));
        }
        Ok(Self { amount, currency })
    }

    /// The amount in minor units (cents).
    pub fn minor_units(&self) -> i64 {
        // Validated at construction; a stored Money always parses.
        minor_units(&self.amount).unwrap_or(0)
    }

    /// Whether the amount is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.minor_units() > 0
    }

    /// Whether two amounts are in the same currency.
    pub fn same_currency(&self, other: &Money) -> bool {
        self.currency == other.currency
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// Parse a decimal string into minor units (scale 2).
///
/// Accepts an optional leading minus, digits, and at most one dot followed
/// by at most two fractional digits. Invalid strings are rejected rather
/// than silently coerced to zero.
fn minor_units(s: &str) -> Result<i64, CoreError> {
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    if body.is_empty() {
        return Err(CoreError::InvalidAmount(s.to_string()));
    }

    let (whole, frac) = match body.split_once('.') {
        Some((w, f)) => (w, f),
        None => (body, ""),
    };
    if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::InvalidAmount(s.to_string()));
    }
    if !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::InvalidAmount(s.to_string()));
    }
    if frac.len() as u32 > MINOR_UNIT_SCALE {
        return Err(CoreError::AmountPrecision(s.to_string()));
    }

    let whole: i64 = whole
        .parse()
        .map_err(|_| CoreError::InvalidAmount(s.to_string()))?;
    let mut frac_value: i64 = 0;
    if !frac.is_empty() {
        frac_value = frac
            .parse()
            .map_err(|_| CoreError::InvalidAmount(s.to_string()))?;
        for _ in frac.len() as u32..MINOR_UNIT_SCALE {
            frac_value *= 10;
        }
    }

    let magnitude = whole
        .checked_mul(100)
        .and_then(|w| w.checked_add(frac_value))
        .ok_or_else(|| CoreError::InvalidAmount(s.to_string()))?;
    Ok(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_amount_parses() {
        let m = Money::new("120", "USD").unwrap();
        assert_eq!(m.minor_units(), 12000);
        assert!(m.is_positive());
    }

    #[test]
    fn two_decimal_amount_parses() {
        let m = Money::new("120.00", "USD").unwrap();
        assert_eq!(m.minor_units(), 12000);
    }

    #[test]
    fn single_decimal_digit_scales() {
        let m = Money::new("45.5", "EUR").unwrap();
        assert_eq!(m.minor_units(), 4550);
    }

    #[test]
    fn zero_is_not_positive() {
        let m = Money::new("0.00", "USD").unwrap();
        assert!(!m.is_positive());
    }

    #[test]
    fn negative_amount_is_not_positive() {
        let m = Money::new("-10", "USD").unwrap();
        assert_eq!(m.minor_units(), -1000);
        assert!(!m.is_positive());
    }

    #[test]
    fn invalid_amounts_rejected() {
        assert!(Money::new("", "USD").is_err());
        assert!(Money::new("abc", "USD").is_err());
        assert!(Money::new("12,50", "USD").is_err());
        assert!(Money::new("1.2.3", "USD").is_err());
        assert!(Money::new(".", "USD").is_err());
        assert!(Money::new("-", "USD").is_err());
    }

    #[test]
    fn three_decimal_places_rejected() {
        match Money::new("1.005", "USD") {
            Err(CoreError::AmountPrecision(_)) => {}
            other => panic!("expected AmountPrecision, got {other:?}"),
        }
    }

    #[test]
    fn invalid_currency_rejected() {
        assert!(Money::new("10", "usd").is_err());
        assert!(Money::new("10", "US").is_err());
        assert!(Money::new("10", "DOLLARS").is_err());
    }

    #[test]
    fn same_currency_check() {
        let a = Money::new("10", "USD").unwrap();
        let b = Money::new("20", "USD").unwrap();
        let c = Money::new("10", "EUR").unwrap();
        assert!(a.same_currency(&b));
        assert!(!a.same_currency(&c));
    }

    #[test]
    fn display_formats_amount_and_currency() {
        let m = Money::new("120.00", "USD").unwrap();
        assert_eq!(m.to_string(), "120.00 USD");
    }

    #[test]
    fn serde_roundtrip() {
        let m = Money::new("99.99", "GBP").unwrap();
        let json = serde_json::to_string(&m).unwrap();
        let parsed: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, parsed);
    }
}
