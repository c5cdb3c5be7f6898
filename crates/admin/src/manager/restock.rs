//! Restock requests.

use std::fmt;

use rand::Rng;
use serde::Deserialize;
use thiserror::Error;

use super::inventory::StockItem;

/// Suppliers offered in the restock form.
pub const SUPPLIERS: &[&str] = &[
    "TechDistribuidora S.A.C.",
    "Importaciones Digitales Perú",
    "Mayorista Lima Tech",
];

/// How fast the supplier should deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Normal,
    Urgente,
    Express,
}

impl Urgency {
    pub const ALL: [Self; 3] = [Self::Normal, Self::Urgente, Self::Express];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Urgente => "urgente",
            Self::Express => "express",
        }
    }

    /// Expected delivery time.
    #[must_use]
    pub const fn lead_time(self) -> &'static str {
        match self {
            Self::Normal => "5-7 días hábiles",
            Self::Urgente => "2-3 días hábiles",
            Self::Express => "24 horas",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestockError {
    #[error("La cantidad debe ser mayor a 0")]
    InvalidQuantity,
    #[error("Selecciona un proveedor")]
    UnknownSupplier,
}

/// Restock form as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RestockForm {
    pub quantity: String,
    pub supplier: String,
    pub urgency: Urgency,
}

/// Accepted restock request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestockConfirmation {
    /// `SOL-2025-04817`
    pub number: String,
    pub product_code: String,
    pub product_name: String,
    pub quantity: u32,
    pub supplier: String,
    pub urgency: Urgency,
    pub lead_time: &'static str,
}

/// Request number for `year` with a random five-digit suffix.
pub fn request_number<R: Rng>(year: i32, rng: &mut R) -> String {
    format!("SOL-{year}-{:05}", rng.random_range(0..100_000))
}

/// Validate the form and issue a request number.
///
/// # Errors
///
/// Returns [`RestockError`] for a non-positive quantity or a supplier that is
/// not in [`SUPPLIERS`].
pub fn submit(
    item: &StockItem,
    form: &RestockForm,
    year: i32,
) -> Result<RestockConfirmation, RestockError> {
    let quantity: u32 = form
        .quantity
        .trim()
        .parse()
        .ok()
        .filter(|&q| q > 0)
        .ok_or(RestockError::InvalidQuantity)?;

    let supplier = SUPPLIERS
        .iter()
        .find(|&&s| s == form.supplier.trim())
        .ok_or(RestockError::UnknownSupplier)?;

    let number = request_number(year, &mut rand::rng());

    tracing::info!(
        number = %number,
        product = %item.code,
        quantity,
        supplier = %supplier,
        urgency = %form.urgency,
        "Restock request sent"
    );

    Ok(RestockConfirmation {
        number,
        product_code: item.code.clone(),
        product_name: item.name.clone(),
        quantity,
        supplier: (*supplier).to_owned(),
        urgency: form.urgency,
        lead_time: form.urgency.lead_time(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::manager::inventory::{find, stock_items};

    fn form(quantity: &str, urgency: Urgency) -> RestockForm {
        RestockForm {
            quantity: quantity.into(),
            supplier: SUPPLIERS.first().copied().unwrap_or_default().into(),
            urgency,
        }
    }

    #[test]
    fn test_request_number_format() {
        let mut rng = StdRng::seed_from_u64(7);
        let number = request_number(2025, &mut rng);
        assert!(number.starts_with("SOL-2025-"));
        let suffix = number.trim_start_matches("SOL-2025-");
        assert_eq!(suffix.len(), 5);
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_lead_time_by_urgency() {
        assert_eq!(Urgency::Normal.lead_time(), "5-7 días hábiles");
        assert_eq!(Urgency::Urgente.lead_time(), "2-3 días hábiles");
        assert_eq!(Urgency::Express.lead_time(), "24 horas");
    }

    #[test]
    fn test_submit() {
        let items = stock_items();
        let webcam = find(&items, "TECH-006").unwrap();

        let confirmation = submit(webcam, &form("20", Urgency::Express), 2025).unwrap();
        assert_eq!(confirmation.product_name, "Webcam Logitech C920");
        assert_eq!(confirmation.quantity, 20);
        assert_eq!(confirmation.lead_time, "24 horas");
        assert!(confirmation.number.starts_with("SOL-2025-"));

        assert_eq!(
            submit(webcam, &form("0", Urgency::Normal), 2025).unwrap_err(),
            RestockError::InvalidQuantity
        );

        let unknown = RestockForm {
            supplier: "Otro".into(),
            ..form("5", Urgency::Normal)
        };
        assert_eq!(
            submit(webcam, &unknown, 2025).unwrap_err(),
            RestockError::UnknownSupplier
        );
    }
}
