//! Inventory endpoints (`/api/inventario`).

use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use techsolutions_core::ProductId;
use tracing::instrument;

use crate::{ApiClient, ApiError};

/// Product as the inventory API lists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryProduct {
    pub id: ProductId,
    pub codigo: String,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    pub precio: Decimal,
    pub stock: i32,
    #[serde(default = "default_stock_minimo")]
    pub stock_minimo: i32,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub imagen: Option<String>,
    #[serde(default = "default_true")]
    pub activo: bool,
}

const fn default_stock_minimo() -> i32 {
    5
}

const fn default_true() -> bool {
    true
}

/// Body for creating or updating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    /// Left out on create to let the backend generate one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo: Option<String>,
    pub nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    pub precio: Decimal,
    pub stock: i32,
    pub stock_minimo: i32,
    pub categoria: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imagen: Option<String>,
    pub activo: bool,
}

/// Result of a create or update.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductSaved {
    pub exitoso: bool,
    pub mensaje: String,
    pub id: ProductId,
    pub nombre: String,
    #[serde(default)]
    pub codigo: Option<String>,
}

/// Plain acknowledgement (`{exitoso, mensaje}`).
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {
    pub exitoso: bool,
    pub mensaje: String,
}

/// Stock after a reduce / increase.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustment {
    pub mensaje: String,
    pub producto: String,
    pub stock_actual: i32,
    pub stock_minimo: i32,
    pub necesita_reposicion: bool,
}

#[derive(Serialize)]
struct Quantity {
    cantidad: u32,
}

/// Turn a `{exitoso: false, mensaje}` body that came back with 200 into an
/// error.
fn ensure_ok(exitoso: bool, mensaje: &str) -> Result<(), ApiError> {
    if exitoso {
        Ok(())
    } else {
        Err(ApiError::Rejected(mensaje.to_owned()))
    }
}

impl ApiClient {
    /// List every product, active or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a product list.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<InventoryProduct>, ApiError> {
        let url = self.endpoint(&["api", "inventario", "productos"])?;
        let products: Vec<InventoryProduct> = self.send(self.request(Method::GET, url)).await?;
        tracing::debug!(count = products.len(), "Fetched inventory products");
        Ok(products)
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] with the backend's message when the
    /// product is refused (e.g. missing name).
    #[instrument(skip(self, input), fields(nombre = %input.nombre))]
    pub async fn create_product(&self, input: &ProductInput) -> Result<ProductSaved, ApiError> {
        let url = self.endpoint(&["api", "inventario", "productos"])?;
        let saved: ProductSaved = self
            .send(self.request(Method::POST, url).json(input))
            .await?;
        ensure_ok(saved.exitoso, &saved.mensaje)?;
        Ok(saved)
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or is refused.
    #[instrument(skip(self, input), fields(id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<ProductSaved, ApiError> {
        let id = id.to_string();
        let url = self.endpoint(&["api", "inventario", "productos", &id])?;
        let saved: ProductSaved = self
            .send(self.request(Method::PUT, url).json(input))
            .await?;
        ensure_ok(saved.exitoso, &saved.mensaje)?;
        Ok(saved)
    }

    /// Delete (deactivate) a product.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404 if the product does not exist.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<Ack, ApiError> {
        let id = id.to_string();
        let url = self.endpoint(&["api", "inventario", "productos", &id])?;
        let ack: Ack = self.send(self.request(Method::DELETE, url)).await?;
        ensure_ok(ack.exitoso, &ack.mensaje)?;
        Ok(ack)
    }

    /// Take units out of stock.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] on insufficient stock.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn reduce_stock(
        &self,
        id: ProductId,
        cantidad: u32,
    ) -> Result<StockAdjustment, ApiError> {
        self.adjust_stock(id, "reducir", cantidad).await
    }

    /// Put units back into stock.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn increase_stock(
        &self,
        id: ProductId,
        cantidad: u32,
    ) -> Result<StockAdjustment, ApiError> {
        self.adjust_stock(id, "aumentar", cantidad).await
    }

    async fn adjust_stock(
        &self,
        id: ProductId,
        action: &str,
        cantidad: u32,
    ) -> Result<StockAdjustment, ApiError> {
        let id = id.to_string();
        let url = self.endpoint(&["api", "inventario", &id, action])?;
        self.send(self.request(Method::POST, url).json(&Quantity { cantidad }))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::ApiConfig;

    async fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&ApiConfig::new(server.uri().parse().unwrap())).unwrap()
    }

    fn monitor_input() -> ProductInput {
        ProductInput {
            codigo: Some("TECH-123456".to_owned()),
            nombre: "Monitor Samsung 24\"".to_owned(),
            descripcion: None,
            precio: Decimal::new(59999, 2),
            stock: 15,
            stock_minimo: 5,
            categoria: "Monitores".to_owned(),
            imagen: None,
            activo: true,
        }
    }

    #[tokio::test]
    async fn test_list_products_accepts_numeric_prices() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/inventario/productos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": 1,
                    "codigo": "TECH-001",
                    "nombre": "Laptop HP ProBook",
                    "descripcion": "Laptop empresarial",
                    "precio": 2599.99,
                    "stock": 25,
                    "stockMinimo": 10,
                    "categoria": "Computadoras",
                    "imagen": null,
                    "activo": true
                },
                { "id": 2, "codigo": "TECH-002", "nombre": "Mouse", "precio": "85.00", "stock": 0 }
            ])))
            .mount(&server)
            .await;

        let products = client_for(&server).await.list_products().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].precio, Decimal::new(259_999, 2));
        assert_eq!(products[0].stock_minimo, 10);
        assert_eq!(products[1].stock_minimo, 5);
        assert!(products[1].activo);
        assert!(products[1].categoria.is_none());
    }

    #[tokio::test]
    async fn test_create_product_posts_camel_case_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/inventario/productos"))
            .and(body_partial_json(json!({
                "codigo": "TECH-123456",
                "stockMinimo": 5,
                "categoria": "Monitores"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "exitoso": true,
                "mensaje": "✅ Producto agregado exitosamente",
                "id": 6,
                "codigo": "TECH-123456",
                "nombre": "Monitor Samsung 24\"",
                "precio": 599.99,
                "stock": 15
            })))
            .expect(1)
            .mount(&server)
            .await;

        let saved = client_for(&server)
            .await
            .create_product(&monitor_input())
            .await
            .unwrap();
        assert_eq!(saved.id, ProductId::new(6));
        assert_eq!(saved.codigo.as_deref(), Some("TECH-123456"));
    }

    #[tokio::test]
    async fn test_create_product_surfaces_backend_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/inventario/productos"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "exitoso": false,
                "mensaje": "El nombre del producto es requerido"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .create_product(&monitor_input())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Rejected(ref m) if m == "El nombre del producto es requerido"));
    }

    #[tokio::test]
    async fn test_update_and_delete_target_product_path() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/inventario/productos/6"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "exitoso": true,
                "mensaje": "✏️ Producto actualizado exitosamente",
                "id": 6,
                "nombre": "Monitor Samsung 24\""
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/inventario/productos/6"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "exitoso": true,
                "mensaje": "🗑️ Producto 'Monitor' eliminado exitosamente"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/inventario/productos/99"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let updated = api
            .update_product(ProductId::new(6), &monitor_input())
            .await
            .unwrap();
        assert_eq!(updated.id, ProductId::new(6));

        let ack = api.delete_product(ProductId::new(6)).await.unwrap();
        assert!(ack.mensaje.contains("eliminado"));

        let missing = api.delete_product(ProductId::new(99)).await.unwrap_err();
        assert!(matches!(missing, ApiError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_reduce_stock_reports_restock_need() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/inventario/3/reducir"))
            .and(body_partial_json(json!({ "cantidad": 5 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "exitoso": true,
                "mensaje": "Stock reducido exitosamente",
                "producto": "Teclado Mecánico RGB",
                "stockActual": 3,
                "stockMinimo": 5,
                "necesitaReposicion": true
            })))
            .mount(&server)
            .await;

        let adjusted = client_for(&server)
            .await
            .reduce_stock(ProductId::new(3), 5)
            .await
            .unwrap();
        assert_eq!(adjusted.stock_actual, 3);
        assert!(adjusted.necesita_reposicion);
    }
}
