//! `ts-cli products list`

use techsolutions_api_client::{ApiClient, InventoryProduct};
use techsolutions_core::{StockLevel, format_soles};

/// One line per product: code, name, price, stock and level.
fn line(p: &InventoryProduct) -> String {
    let level = StockLevel::classify(p.stock);
    format!(
        "{:<10} {:<32} {:>12} {:>5} uds  {}{}",
        p.codigo,
        p.nombre,
        format_soles(p.precio),
        p.stock,
        level.label(),
        if p.activo { "" } else { " (inactivo)" }
    )
}

/// List every inventory product.
///
/// # Errors
///
/// Returns an error if the API request fails.
pub async fn list(api: &ApiClient) -> Result<(), Box<dyn std::error::Error>> {
    let products = api.list_products().await?;
    tracing::info!("{} productos", products.len());
    for product in &products {
        tracing::info!("{}", line(product));
    }
    Ok(())
}
