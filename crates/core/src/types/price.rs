//! Type-safe price representation using decimal arithmetic.
//!
//! All amounts are Peruvian soles. Arithmetic stays exact in [`Decimal`];
//! [`format_soles`] is the only place values are rounded.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// IGV (sales tax) applied on top of the cart subtotal.
pub const TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (soles, not céntimos).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in soles.
    #[must_use]
    pub const fn soles(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::PEN)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.currency_code {
            CurrencyCode::PEN => f.write_str(&format_soles(self.amount)),
            CurrencyCode::USD => write!(f, "${}", group_thousands(self.amount)),
        }
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    PEN,
    USD,
}

/// Cart totals derived from a subtotal.
///
/// `tax = subtotal * TAX_RATE` and `total = subtotal + tax`, both unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl Totals {
    /// Compute tax and total for a subtotal.
    #[must_use]
    pub fn from_subtotal(subtotal: Decimal) -> Self {
        let tax = subtotal * TAX_RATE;
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

/// Format an amount the way `es-PE` receipts show it: `S/. 1,234.50`.
///
/// Rounds to two decimals, half away from zero.
///
/// ```
/// use rust_decimal::Decimal;
/// use techsolutions_core::format_soles;
///
/// assert_eq!(format_soles(Decimal::new(123_450, 2)), "S/. 1,234.50");
/// assert_eq!(format_soles(Decimal::new(45, 1)), "S/. 4.50");
/// ```
#[must_use]
pub fn format_soles(amount: Decimal) -> String {
    format!("S/. {}", group_thousands(amount))
}

/// Two-decimal rendering with comma thousands separators, no symbol.
fn group_thousands(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}.{frac}")
}
