//! Product administration rules.
//!
//! The inventory API owns the products; this module holds what the admin
//! screen adds on top: stats, filtering, form defaults, validation and the
//! stock badge.

use std::collections::BTreeSet;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use techsolutions_api_client::{InventoryProduct, ProductInput};
use thiserror::Error;

/// Categories offered by the product form and the category filter.
pub const CATEGORIES: &[&str] = &[
    "Computadoras",
    "Accesorios",
    "Monitores",
    "Audio",
    "Almacenamiento",
    "Componentes",
    "Impresoras",
    "Tablets",
];

/// Default minimum stock for new products.
pub const DEFAULT_STOCK_MINIMO: i32 = 5;

/// Counters above the products table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    /// Distinct non-empty categories.
    pub categories: usize,
}

impl ProductStats {
    #[must_use]
    pub fn from_products(products: &[InventoryProduct]) -> Self {
        let active = products.iter().filter(|p| p.activo).count();
        let categories = products
            .iter()
            .filter_map(|p| p.categoria.as_deref())
            .filter(|c| !c.trim().is_empty())
            .collect::<BTreeSet<_>>()
            .len();

        Self {
            total: products.len(),
            active,
            inactive: products.len() - active,
            categories,
        }
    }
}

/// `?search=&category=` on the products page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProductQuery {
    pub search: String,
    pub category: String,
}

impl ProductQuery {
    /// Name or code substring (case-insensitive) and exact category.
    #[must_use]
    pub fn matches(&self, product: &InventoryProduct) -> bool {
        let needle = self.search.trim().to_lowercase();
        let text_ok = needle.is_empty()
            || product.nombre.to_lowercase().contains(&needle)
            || product.codigo.to_lowercase().contains(&needle);

        let category = self.category.trim();
        let category_ok = category.is_empty() || product.categoria.as_deref() == Some(category);

        text_ok && category_ok
    }

    #[must_use]
    pub fn apply<'a>(&self, products: &'a [InventoryProduct]) -> Vec<&'a InventoryProduct> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Code suggested for a new product: `TECH-` and the last six digits of the
/// epoch milliseconds.
#[must_use]
pub fn new_product_code(epoch_millis: i64) -> String {
    format!("TECH-{:06}", epoch_millis.rem_euclid(1_000_000))
}

/// Stock cell in the products table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockBadge {
    pub class: &'static str,
    pub text: String,
}

impl StockBadge {
    #[must_use]
    pub fn new(stock: i32, stock_minimo: i32) -> Self {
        if stock == 0 {
            Self {
                class: "out-of-stock",
                text: "Sin stock".to_owned(),
            }
        } else if stock <= stock_minimo {
            Self {
                class: "low-stock",
                text: format!("⚠️ {stock}"),
            }
        } else {
            Self {
                class: "in-stock",
                text: format!("{stock} uds"),
            }
        }
    }
}

/// Validation failures of the product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProductFormError {
    #[error("El nombre es requerido")]
    MissingName,
    #[error("La categoría es requerida")]
    MissingCategory,
    #[error("El precio debe ser mayor a 0")]
    InvalidPrice,
}

/// Product form as submitted. Numbers stay text until validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    pub codigo: String,
    pub nombre: String,
    pub categoria: String,
    pub precio: String,
    pub stock: String,
    pub stock_minimo: String,
    pub descripcion: String,
    pub imagen: String,
    /// Checkbox: present when checked.
    pub activo: Option<String>,
}

impl ProductForm {
    /// Defaults for "Agregar Nuevo Producto".
    #[must_use]
    pub fn blank(epoch_millis: i64) -> Self {
        Self {
            codigo: new_product_code(epoch_millis),
            stock_minimo: DEFAULT_STOCK_MINIMO.to_string(),
            activo: Some("on".to_owned()),
            ..Self::default()
        }
    }

    /// Prefilled form for editing.
    #[must_use]
    pub fn from_product(product: &InventoryProduct) -> Self {
        Self {
            codigo: product.codigo.clone(),
            nombre: product.nombre.clone(),
            categoria: product.categoria.clone().unwrap_or_default(),
            precio: product.precio.to_string(),
            stock: product.stock.to_string(),
            stock_minimo: product.stock_minimo.to_string(),
            descripcion: product.descripcion.clone().unwrap_or_default(),
            imagen: product.imagen.clone().unwrap_or_default(),
            activo: product.activo.then(|| "on".to_owned()),
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.activo.is_some()
    }

    /// Validate and build the API body.
    ///
    /// Unparseable numbers fall back to 0 (stock) and 5 (minimum stock);
    /// an unparseable price is rejected with the price error.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule: name, category, then price.
    pub fn validate(&self) -> Result<ProductInput, ProductFormError> {
        let nombre = self.nombre.trim();
        if nombre.is_empty() {
            return Err(ProductFormError::MissingName);
        }

        let categoria = self.categoria.trim();
        if categoria.is_empty() {
            return Err(ProductFormError::MissingCategory);
        }

        let precio = Decimal::from_str(self.precio.trim()).unwrap_or_default();
        if precio <= Decimal::ZERO {
            return Err(ProductFormError::InvalidPrice);
        }

        Ok(ProductInput {
            codigo: non_empty(&self.codigo),
            nombre: nombre.to_owned(),
            descripcion: non_empty(&self.descripcion),
            precio,
            stock: self.stock.trim().parse().unwrap_or(0),
            stock_minimo: self
                .stock_minimo
                .trim()
                .parse()
                .unwrap_or(DEFAULT_STOCK_MINIMO),
            categoria: categoria.to_owned(),
            imagen: non_empty(&self.imagen),
            activo: self.is_active(),
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use techsolutions_core::ProductId;

    use super::*;

    fn product(id: i64, nombre: &str, categoria: Option<&str>, activo: bool) -> InventoryProduct {
        InventoryProduct {
            id: ProductId::new(id),
            codigo: format!("TECH-{id:03}"),
            nombre: nombre.to_owned(),
            descripcion: None,
            precio: Decimal::new(10_000, 2),
            stock: 10,
            stock_minimo: 5,
            categoria: categoria.map(str::to_owned),
            imagen: None,
            activo,
        }
    }

    #[test]
    fn test_stats_count_distinct_categories() {
        let products = vec![
            product(1, "Laptop HP", Some("Computadoras"), true),
            product(2, "Mouse", Some("Accesorios"), true),
            product(3, "Teclado", Some("Accesorios"), false),
            product(4, "Sin categoría", None, true),
        ];
        let stats = ProductStats::from_products(&products);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.active, 3);
        assert_eq!(stats.inactive, 1);
        assert_eq!(stats.categories, 2);
    }

    #[test]
    fn test_query_matches_name_code_and_category() {
        let laptop = product(1, "Laptop HP", Some("Computadoras"), true);

        let by_code = ProductQuery {
            search: "tech-001".into(),
            ..ProductQuery::default()
        };
        assert!(by_code.matches(&laptop));

        let wrong_category = ProductQuery {
            search: "laptop".into(),
            category: "Audio".into(),
        };
        assert!(!wrong_category.matches(&laptop));
    }

    #[test]
    fn test_new_product_code_uses_last_six_digits() {
        assert_eq!(new_product_code(1_732_912_345_678), "TECH-345678");
        assert_eq!(new_product_code(1_700_000_000_042), "TECH-000042");
    }

    #[test]
    fn test_stock_badge() {
        assert_eq!(StockBadge::new(0, 5).text, "Sin stock");
        assert_eq!(StockBadge::new(5, 5).text, "⚠️ 5");
        assert_eq!(StockBadge::new(6, 5).text, "6 uds");
        assert_eq!(StockBadge::new(6, 5).class, "in-stock");
    }

    #[test]
    fn test_validate_rules_in_order() {
        let mut form = ProductForm::blank(0);
        assert_eq!(form.validate(), Err(ProductFormError::MissingName));

        form.nombre = "Monitor".into();
        assert_eq!(form.validate(), Err(ProductFormError::MissingCategory));

        form.categoria = "Monitores".into();
        form.precio = "0".into();
        assert_eq!(form.validate(), Err(ProductFormError::InvalidPrice));

        form.precio = "abc".into();
        assert_eq!(form.validate(), Err(ProductFormError::InvalidPrice));
    }

    #[test]
    fn test_validate_builds_input_with_defaults() {
        let form = ProductForm {
            nombre: " Monitor Samsung 27\" ".into(),
            categoria: "Monitores".into(),
            precio: "850.00".into(),
            stock: "".into(),
            stock_minimo: "x".into(),
            ..ProductForm::blank(1_000_123)
        };
        let input = form.validate().unwrap();
        assert_eq!(input.nombre, "Monitor Samsung 27\"");
        assert_eq!(input.codigo.as_deref(), Some("TECH-000123"));
        assert_eq!(input.precio, Decimal::new(85_000, 2));
        assert_eq!(input.stock, 0);
        assert_eq!(input.stock_minimo, DEFAULT_STOCK_MINIMO);
        assert!(input.activo);
        assert!(input.descripcion.is_none());
    }

    #[test]
    fn test_edit_form_prefills_from_product() {
        let form = ProductForm::from_product(&product(7, "SSD", Some("Almacenamiento"), false));
        assert_eq!(form.codigo, "TECH-007");
        assert!(!form.is_active());
        assert_eq!(form.validate().unwrap().categoria, "Almacenamiento");
    }
}
