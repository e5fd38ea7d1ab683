//! Cart pricing calculations.

use crate::error::CommerceError;
use crate::identity::IdentityKey;
use crate::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Shipping and tax settings applied by [`Cart::compute_totals`].
///
/// [`Cart::compute_totals`]: crate::cart::Cart::compute_totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "RawTotalsConfig", into = "RawTotalsConfig")]
pub struct TotalsConfig {
    shipping_flat: Decimal,
    tax_rate: Decimal,
}

impl TotalsConfig {
    /// Create a config. Shipping must be non-negative and the tax rate a
    /// fraction in `[0, 1]`.
    pub fn new(shipping_flat: Decimal, tax_rate: Decimal) -> Result<Self, CommerceError> {
        if shipping_flat < Decimal::ZERO {
            return Err(CommerceError::InvalidConfig(format!(
                "shipping_flat must not be negative, got {shipping_flat}"
            )));
        }
        if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE {
            return Err(CommerceError::InvalidConfig(format!(
                "tax_rate must be between 0 and 1, got {tax_rate}"
            )));
        }
        Ok(Self {
            shipping_flat,
            tax_rate,
        })
    }

    /// No shipping, no tax.
    pub fn free() -> Self {
        Self::default()
    }

    /// Flat shipping fee.
    pub fn shipping_flat(&self) -> Decimal {
        self.shipping_flat
    }

    /// Tax rate as a fraction.
    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }
}

#[derive(Serialize, Deserialize)]
struct RawTotalsConfig {
    #[serde(default, with = "rust_decimal::serde::float")]
    shipping_flat: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    tax_rate: Decimal,
}

impl TryFrom<RawTotalsConfig> for TotalsConfig {
    type Error = CommerceError;

    fn try_from(raw: RawTotalsConfig) -> Result<Self, Self::Error> {
        TotalsConfig::new(raw.shipping_flat, raw.tax_rate)
    }
}

impl From<TotalsConfig> for RawTotalsConfig {
    fn from(config: TotalsConfig) -> Self {
        Self {
            shipping_flat: config.shipping_flat,
            tax_rate: config.tax_rate,
        }
    }
}

/// Complete pricing breakdown for a cart.
///
/// Amounts are unrounded; call [`CartTotals::rounded`] for presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct CartTotals {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Flat shipping fee.
    pub shipping: Money,
    /// `subtotal * tax_rate`.
    pub tax: Money,
    /// `subtotal + shipping + tax`.
    pub grand_total: Money,
    /// Per-line breakdown in cart order.
    pub lines: Vec<LineTotal>,
}

impl CartTotals {
    /// Totals rounded half-up to the currency's minor unit.
    pub fn rounded(&self) -> CartTotals {
        CartTotals {
            subtotal: self.subtotal.rounded(),
            shipping: self.shipping.rounded(),
            tax: self.tax.rounded(),
            grand_total: self.grand_total.rounded(),
            lines: self
                .lines
                .iter()
                .map(|line| LineTotal {
                    unit_price: line.unit_price.rounded(),
                    total: line.total.rounded(),
                    ..line.clone()
                })
                .collect(),
        }
    }

    /// Order summary lines, e.g. `"Lace Bra x 2 - GHS 40.00"`.
    pub fn summary_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| format!("{} x {} - {}", line.name, line.quantity, line.total))
            .collect()
    }

    /// Check if any lines are priced.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Pricing for a single line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineTotal {
    /// Line identity.
    pub key: IdentityKey,
    /// Product name.
    pub name: String,
    /// Quantity.
    pub quantity: i64,
    /// Unit price.
    pub unit_price: Money,
    /// `unit_price * quantity`.
    pub total: Money,
}
