//! Type-safe price representation using decimal arithmetic.
//!
//! A [`Price`] is a non-negative amount in the store's display currency. The
//! currency is a property of the store, not of each product, so it lives in
//! configuration and is only consulted when formatting.

use std::borrow::Cow;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// Nothing was entered.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price is not a number: {0}")]
    NotANumber(String),
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// A non-negative monetary amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount < Decimal::ZERO {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// Parse a price typed by a user.
    ///
    /// Surrounding whitespace is ignored. A single comma is accepted as the
    /// decimal separator when no dot is present (`"12,50"`).
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if the input is empty, not a number, or negative.
    pub fn parse(input: &str) -> Result<Self, PriceError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let normalized: Cow<'_, str> =
            if !trimmed.contains('.') && trimmed.matches(',').count() == 1 {
                Cow::Owned(trimmed.replace(',', "."))
            } else {
                Cow::Borrowed(trimmed)
            };

        let amount = Decimal::from_str(&normalized)
            .map_err(|_| PriceError::NotANumber(trimmed.to_owned()))?;
        Self::new(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// This price multiplied by a quantity, saturating at the decimal maximum.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Format for display in the given currency (e.g. `R$ 15.00`, `$5.00`).
    #[must_use]
    pub fn display(&self, currency: CurrencyCode) -> String {
        match currency {
            CurrencyCode::BRL => format!("{} {:.2}", currency.symbol(), self.cents()),
            _ => format!("{}{:.2}", currency.symbol(), self.cents()),
        }
    }

    /// Amount rounded half away from zero to two decimal places.
    fn cents(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.cents())
    }
}

/// ISO 4217 currency codes the store can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    BRL,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Currency symbol used when formatting prices.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::BRL => "R$",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BRL => "BRL",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BRL" => Ok(Self::BRL),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            other => Err(format!("unsupported currency: {other}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn price(s: &str) -> Price {
        Price::parse(s).unwrap()
    }

    #[test]
    fn test_parse_accepts_dot_and_comma() {
        assert_eq!(price("15.00").amount(), Decimal::new(1500, 2));
        assert_eq!(price(" 312,50 ").amount(), Decimal::new(31250, 2));
        assert_eq!(price("0").amount(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(Price::parse(""), Err(PriceError::Empty));
        assert_eq!(Price::parse("  "), Err(PriceError::Empty));
        assert_eq!(Price::parse("-1"), Err(PriceError::Negative));
        assert!(matches!(Price::parse("abc"), Err(PriceError::NotANumber(_))));
        assert!(matches!(
            Price::parse("1,000,00"),
            Err(PriceError::NotANumber(_))
        ));
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [price("15.00").times(2), price("5.00").times(1)]
            .into_iter()
            .sum();
        assert_eq!(total, price("35.00"));
    }

    #[test]
    fn test_display() {
        assert_eq!(price("15").display(CurrencyCode::BRL), "R$ 15.00");
        assert_eq!(price("5.5").display(CurrencyCode::USD), "$5.50");
        assert_eq!(price("2.345").to_string(), "2.35");
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        let parsed: Result<Price, _> = serde_json::from_str("\"-3.00\"");
        assert!(parsed.is_err());

        let ok: Price = serde_json::from_str("\"3.00\"").unwrap();
        assert_eq!(ok, price("3"));
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!("brl".parse::<CurrencyCode>().unwrap(), CurrencyCode::BRL);
        assert!("JPY".parse::<CurrencyCode>().is_err());
    }
}
