//! Money type for representing monetary values.
//!
//! Amounts are integers in the currency's minor unit (paise, cents), so
//! totals add up exactly no matter how many lines an order has.

use serde::{Deserialize, Serialize};
use std::fmt;

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

    fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
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
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a Money value from a decimal amount, rounding to minor units.
    ///
    /// ```
    /// use storefront_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::INR);
    /// assert_eq!(price.amount_minor, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_minor = (amount * currency.minor_per_major() as f64).round() as i64;
        Self::new(amount_minor, currency)
    }

    /// Create a price from user input.
    ///
    /// Negative, NaN and infinite input all become zero.
    pub fn price(amount: f64, currency: Currency) -> Self {
        if !amount.is_finite() || amount <= 0.0 {
            return Self::zero(currency);
        }
        Self::from_decimal(amount, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_minor < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_minor as f64 / self.currency.minor_per_major() as f64
    }

    /// Format as a display string (e.g., "₹49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        if places == 0 {
            return self.amount_minor.to_string();
        }
        let per = self.currency.minor_per_major();
        let sign = if self.amount_minor < 0 { "-" } else { "" };
        let abs = self.amount_minor.unsigned_abs();
        let per = per.unsigned_abs();
        format!("{}{}.{:0places$}", sign, abs / per, abs % per)
    }

    /// Try to add another Money value.
    ///
    /// Returns `None` if currencies differ or the sum overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_minor
            .checked_add(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a quantity, returning `None` on overflow.
    pub fn try_multiply(&self, quantity: i64) -> Option<Money> {
        self.amount_minor
            .checked_mul(quantity)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Sum an iterator of Money values.
    ///
    /// Returns `None` on currency mismatch or overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
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
    fn test_money_from_decimal() {
        let m = Money::from_decimal(14999.99, Currency::INR);
        assert_eq!(m.amount_minor, 1_499_999);

        let m = Money::from_decimal(100.0, Currency::JPY);
        assert_eq!(m.amount_minor, 100);
    }

    #[test]
    fn test_price_coerces_invalid_input() {
        assert!(Money::price(-5.0, Currency::INR).is_zero());
        assert!(Money::price(f64::NAN, Currency::INR).is_zero());
        assert!(Money::price(f64::INFINITY, Currency::INR).is_zero());
        assert_eq!(Money::price(2.5, Currency::INR).amount_minor, 250);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::INR).display(), "\u{20b9}49.99");
        assert_eq!(Money::new(5, Currency::USD).display(), "$0.05");
        assert_eq!(Money::new(-150, Currency::USD).display_amount(), "-1.50");
        assert_eq!(Money::new(100, Currency::JPY).display(), "\u{00a5}100");
    }

    #[test]
    fn test_try_sum() {
        let items = [Money::new(1000, Currency::INR), Money::new(250, Currency::INR)];
        let total = Money::try_sum(items.iter(), Currency::INR).unwrap();
        assert_eq!(total.amount_minor, 1250);
    }

    #[test]
    fn test_currency_mismatch() {
        let inr = Money::new(1000, Currency::INR);
        let eur = Money::new(1000, Currency::EUR);
        assert!(inr.try_add(&eur).is_none());
    }

    #[test]
    fn test_multiply_overflow() {
        let m = Money::new(i64::MAX, Currency::INR);
        assert!(m.try_multiply(2).is_none());
        assert_eq!(Money::new(300, Currency::INR).try_multiply(3).unwrap().amount_minor, 900);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("inr"), Some(Currency::INR));
        assert_eq!(Currency::from_code("EUR"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
