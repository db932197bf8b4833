//! Money type for representing monetary values.
//!
//! Amounts are integers in the currency's minor unit (paise for INR,
//! cents for USD) so price arithmetic never drifts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "INR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol (e.g., "₹").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "\u{20b9}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Number of minor units in one major unit.
    pub fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "INR" => Some(Currency::INR),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit.
    pub minor_units: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(minor_units: i64, currency: Currency) -> Self {
        Self {
            minor_units,
            currency,
        }
    }

    /// Create a Money value from whole major units.
    ///
    /// ```
    /// use urbno_commerce::money::{Currency, Money};
    /// let price = Money::from_major(2999, Currency::INR);
    /// assert_eq!(price.minor_units, 299_900);
    /// ```
    pub fn from_major(amount: i64, currency: Currency) -> Self {
        Self::new(amount.saturating_mul(currency.minor_per_major()), currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.minor_units == 0
    }

    /// Whole major units, truncated toward zero.
    pub fn major_units(&self) -> i64 {
        self.minor_units / self.currency.minor_per_major()
    }

    /// Try to add another Money value, returning None on currency mismatch
    /// or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.minor_units
            .checked_add(other.minor_units)
            .map(|sum| Money::new(sum, self.currency))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.minor_units
            .checked_sub(other.minor_units)
            .map(|diff| Money::new(diff, self.currency))
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.minor_units
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Sum an iterator of Money values, returning None on currency
    /// mismatch or overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }

    /// Format with symbol and full precision (e.g., "₹2999.00").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format without symbol (e.g., "2999.00").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        let per_major = self.currency.minor_per_major();
        let sign = if self.minor_units < 0 { "-" } else { "" };
        let abs = self.minor_units.unsigned_abs();
        let major = abs / per_major as u64;
        if places == 0 {
            return format!("{sign}{major}");
        }
        let minor = abs % per_major as u64;
        format!("{sign}{major}.{minor:0places$}")
    }

    /// Storefront rendering: drops the fraction when it is zero
    /// (e.g., "₹2999", but "₹2999.50").
    pub fn display_compact(&self) -> String {
        if self.minor_units % self.currency.minor_per_major() == 0 {
            let sign = if self.minor_units < 0 { "-" } else { "" };
            format!(
                "{}{}{}",
                sign,
                self.currency.symbol(),
                self.major_units().unsigned_abs()
            )
        } else {
            self.display()
        }
    }

    /// Decimal string in major units, as used in structured data
    /// (e.g., "2999.00").
    pub fn to_decimal_string(&self) -> String {
        self.display_amount()
    }
}

impl Add for Money {
    type Output = Money;

    /// # Panics
    /// Panics on currency mismatch or overflow. Use `try_add` otherwise.
    fn add(self, other: Money) -> Money {
        self.try_add(&other)
            .expect("Currency mismatch or overflow in addition")
    }
}

impl Sub for Money {
    type Output = Money;

    /// # Panics
    /// Panics on currency mismatch or overflow. Use `try_subtract` otherwise.
    fn sub(self, other: Money) -> Money {
        self.try_subtract(&other)
            .expect("Currency mismatch or overflow in subtraction")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_major() {
        let m = Money::from_major(2999, Currency::INR);
        assert_eq!(m.minor_units, 299_900);
        assert_eq!(m.major_units(), 2999);

        let m = Money::from_major(100, Currency::JPY);
        assert_eq!(m.minor_units, 100);
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(299_950, Currency::INR);
        assert_eq!(m.display(), "\u{20b9}2999.50");

        let m = Money::new(5, Currency::USD);
        assert_eq!(m.display(), "$0.05");

        let m = Money::new(100, Currency::JPY);
        assert_eq!(m.display(), "\u{00a5}100");
    }

    #[test]
    fn test_money_display_compact() {
        assert_eq!(Money::from_major(2999, Currency::INR).display_compact(), "\u{20b9}2999");
        assert_eq!(Money::new(299_950, Currency::INR).display_compact(), "\u{20b9}2999.50");
    }

    #[test]
    fn test_money_negative_display() {
        let m = Money::new(-250, Currency::USD);
        assert_eq!(m.display_amount(), "-2.50");
    }

    #[test]
    fn test_money_addition() {
        let a = Money::new(1000, Currency::INR);
        let b = Money::new(500, Currency::INR);
        assert_eq!((a + b).minor_units, 1500);
    }

    #[test]
    fn test_try_add_rejects_mixed_currency() {
        let inr = Money::new(1000, Currency::INR);
        let usd = Money::new(1000, Currency::USD);
        assert_eq!(inr.try_add(&usd), None);
    }

    #[test]
    fn test_try_add_overflow() {
        let a = Money::new(i64::MAX, Currency::INR);
        let b = Money::new(1, Currency::INR);
        assert_eq!(a.try_add(&b), None);
    }

    #[test]
    fn test_try_sum() {
        let items = [
            Money::new(100, Currency::INR),
            Money::new(250, Currency::INR),
        ];
        let total = Money::try_sum(items.iter(), Currency::INR).unwrap();
        assert_eq!(total.minor_units, 350);

        let mixed = [Money::new(100, Currency::INR), Money::new(1, Currency::USD)];
        assert!(Money::try_sum(mixed.iter(), Currency::INR).is_none());
    }

    #[test]
    #[should_panic(expected = "Currency mismatch")]
    fn test_money_currency_mismatch() {
        let inr = Money::new(1000, Currency::INR);
        let eur = Money::new(1000, Currency::EUR);
        let _ = inr + eur;
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("INR"), Some(Currency::INR));
        assert_eq!(Currency::from_code("usd"), Some(Currency::USD));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
