//! Prices and artisan price ranges using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (rupees, not paise).
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

    /// Create a rupee price.
    #[must_use]
    pub const fn inr(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::INR)
    }

    /// Format for display, e.g. "₹1250" or "₹499.5".
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{}", self.currency_code.symbol(), self.amount.normalize())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes the profile store prices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[allow(clippy::upper_case_acronyms)]
pub enum CurrencyCode {
    #[default]
    INR,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::INR => "₹",
        }
    }
}

/// An artisan's typical price range.
///
/// The profile store records whatever the artisan said during onboarding, so
/// this is sometimes a number and sometimes free text ("500 rupaye tak",
/// "Rs. 200-500", "premium").
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PriceRange {
    /// Nothing recorded.
    #[default]
    Unspecified,
    /// A plain number, taken to be rupees.
    Amount(Decimal),
    /// Free text, kept verbatim.
    Text(String),
}

impl PriceRange {
    /// Build from free text, treating blank text as unspecified.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Self::Unspecified;
        }
        trimmed
            .parse::<Decimal>()
            .map_or_else(|_| Self::Text(trimmed.to_string()), Self::Amount)
    }

    /// Whether anything was recorded.
    #[must_use]
    pub const fn is_specified(&self) -> bool {
        !matches!(self, Self::Unspecified)
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unspecified => Ok(()),
            Self::Amount(amount) => write!(f, "{}", Price::inr(*amount)),
            Self::Text(text) => f.write_str(text),
        }
    }
}
