//! Money type for representing monetary values.
//!
//! Amounts are exact decimals. Arithmetic never rounds; rounding to the
//! currency's minor unit happens only when a value is presented.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    GHS,
    NGN,
    USD,
    EUR,
    GBP,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "GHS").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::GHS => "GHS",
            Currency::NGN => "NGN",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Convert a float amount into a decimal.
///
/// Goes through the shortest decimal representation of the float, so `19.99`
/// becomes exactly `19.99`. Returns `None` for NaN and infinities.
pub fn amount_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_str(&value.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(value))
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Unrounded amount in the currency's major unit.
    pub amount: Decimal,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value.
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Round half-up to the currency's minor unit.
    ///
    /// ```
    /// use boutique_commerce::money::{Currency, Money};
    /// use rust_decimal::Decimal;
    ///
    /// let m = Money::new(Decimal::new(10005, 3), Currency::GHS); // 10.005
    /// assert_eq!(m.rounded().amount, Decimal::new(1001, 2)); // 10.01
    /// ```
    pub fn rounded(&self) -> Money {
        let amount = self.amount.round_dp_with_strategy(
            self.currency.decimal_places(),
            RoundingStrategy::MidpointAwayFromZero,
        );
        Money::new(amount, self.currency)
    }

    /// Format as a display string (e.g., "GHS 49.99").
    pub fn display(&self) -> String {
        format!("{} {}", self.currency.code(), self.display_amount())
    }

    /// Format as a display string without the code (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", self.rounded().amount)
    }

    /// Add another amount, `None` on overflow.
    ///
    /// Amounts of different currencies never meet inside one cart; the
    /// left-hand currency wins.
    pub fn checked_add(&self, other: &Money) -> Option<Money> {
        let amount = self.amount.checked_add(other.amount)?;
        Some(Money::new(amount, self.currency))
    }

    /// Multiply by a quantity, `None` on overflow.
    pub fn checked_multiply(&self, quantity: i64) -> Option<Money> {
        let amount = self.amount.checked_mul(Decimal::from(quantity))?;
        Some(Money::new(amount, self.currency))
    }

    /// Multiply by a decimal rate (e.g., a tax fraction). Not rounded.
    pub fn checked_multiply_rate(&self, rate: Decimal) -> Option<Money> {
        let amount = self.amount.checked_mul(rate)?;
        Some(Money::new(amount, self.currency))
    }

    /// Sum amounts in one currency, `None` on overflow.
    pub fn checked_sum<'a>(
        iter: impl IntoIterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        iter.into_iter()
            .try_fold(Money::zero(currency), |acc, m| acc.checked_add(m))
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

    fn ghs(amount: Decimal) -> Money {
        Money::new(amount, Currency::GHS)
    }

    #[test]
    fn test_display_pads_to_two_places() {
        assert_eq!(ghs(Decimal::from(25)).display(), "GHS 25.00");
        assert_eq!(ghs(Decimal::new(1999, 2)).display_amount(), "19.99");
        assert_eq!(Money::new(Decimal::from(100), Currency::JPY).display(), "JPY 100");
    }

    #[test]
    fn test_rounding_is_half_up() {
        assert_eq!(ghs(Decimal::new(2345, 3)).rounded().amount, Decimal::new(235, 2));
        assert_eq!(ghs(Decimal::new(2344, 3)).rounded().amount, Decimal::new(234, 2));
    }

    #[test]
    fn test_no_rounding_during_arithmetic() {
        // 0.333 * 3 stays exact until presentation
        let third = ghs(Decimal::new(333, 3));
        let total = third.checked_multiply(3).unwrap();
        assert_eq!(total.amount, Decimal::new(999, 3));
        assert_eq!(total.display_amount(), "1.00");
    }

    #[test]
    fn test_multiply_rate() {
        let subtotal = ghs(Decimal::from(200));
        let tax = subtotal.checked_multiply_rate(Decimal::new(125, 3)).unwrap(); // 12.5%
        assert_eq!(tax.amount, Decimal::from(25));
    }

    #[test]
    fn test_checked_sum() {
        let items = [ghs(Decimal::from(10)), ghs(Decimal::new(55, 1))];
        assert_eq!(
            Money::checked_sum(&items, Currency::GHS).unwrap().amount,
            Decimal::new(155, 1)
        );
        assert!(Money::checked_sum(std::iter::empty(), Currency::GHS).unwrap().is_zero());
    }

    #[test]
    fn test_overflow_is_none() {
        let huge = ghs(Decimal::MAX);
        assert!(huge.checked_add(&ghs(Decimal::ONE)).is_none());
        assert!(huge.checked_multiply(2).is_none());
        assert!(Money::checked_sum(&[huge, huge], Currency::GHS).is_none());
        assert_eq!(huge.checked_multiply(1), Some(huge));
    }

    #[test]
    fn test_amount_from_f64() {
        assert_eq!(amount_from_f64(19.99), Some(Decimal::new(1999, 2)));
        assert_eq!(amount_from_f64(f64::NAN), None);
        assert_eq!(amount_from_f64(f64::INFINITY), None);
    }

    #[test]
    fn test_currency_serde_and_places() {
        let currency: Currency = serde_json::from_str("\"JPY\"").unwrap();
        assert_eq!(currency.decimal_places(), 0);
        assert_eq!(Currency::default(), Currency::GHS);
        assert_eq!(Currency::USD.to_string(), "USD");
    }
}
