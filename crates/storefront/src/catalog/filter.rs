//! Product listing filters (`?search=&category=&price=`).

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::Product;

/// Price range options offered by the listing page.
pub const PRICE_RANGES: &[(&str, &str)] = &[
    ("0-500", "Hasta S/. 500"),
    ("500-1000", "S/. 500 - S/. 1,000"),
    ("1000-2000", "S/. 1,000 - S/. 2,000"),
    ("2000+", "Más de S/. 2,000"),
];

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceRange {
    /// `"min-max"`
    Between(Decimal, Decimal),
    /// `"min+"`
    AtLeast(Decimal),
}

impl PriceRange {
    #[must_use]
    pub fn contains(self, price: Decimal) -> bool {
        match self {
            Self::Between(min, max) => price >= min && price <= max,
            Self::AtLeast(min) => price >= min,
        }
    }
}

impl FromStr for PriceRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || format!("invalid price range: {s}");

        if let Some(min) = s.strip_suffix('+') {
            return min
                .trim()
                .parse()
                .map(Self::AtLeast)
                .map_err(|_| invalid());
        }

        let (min, max) = s.split_once('-').ok_or_else(invalid)?;
        let min = min.trim().parse().map_err(|_| invalid())?;
        let max = max.trim().parse().map_err(|_| invalid())?;
        Ok(Self::Between(min, max))
    }
}

/// Query parameters of the listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProductFilter {
    pub search: String,
    pub category: String,
    pub price: String,
}

impl ProductFilter {
    /// Parsed price range; empty or unparseable values mean "any price".
    #[must_use]
    pub fn price_range(&self) -> Option<PriceRange> {
        if self.price.trim().is_empty() {
            return None;
        }
        match self.price.parse() {
            Ok(range) => Some(range),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring price filter");
                None
            }
        }
    }

    /// Whether a product passes every active filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let search = self.search.trim().to_lowercase();
        let category = self.category.trim();

        (search.is_empty() || product.name.to_lowercase().contains(&search))
            && (category.is_empty() || product.category == category)
            && self
                .price_range()
                .is_none_or(|range| range.contains(product.price))
    }

    /// Products passing the filter, in catalog order.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products
            .iter()
            .filter(|product| self.matches(product))
            .cloned()
            .collect()
    }

    /// Whether any filter is set.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !(self.search.trim().is_empty()
            && self.category.trim().is_empty()
            && self.price.trim().is_empty())
    }
}
