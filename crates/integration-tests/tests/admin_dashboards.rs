//! Admin dashboards over HTTP, with the backend API mocked.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::json;
use techsolutions_core::UserRole;
use techsolutions_integration_tests::{TestServer, spawn_admin};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn get(server: &TestServer, path: &str) -> (StatusCode, String) {
    let resp = server.client.get(server.url(path)).send().await.unwrap();
    (resp.status(), resp.text().await.unwrap())
}

async fn mock_products(api: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/inventario/productos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1, "codigo": "TECH-001", "nombre": "Laptop HP ProBook 450",
                "precio": 2500, "stock": 15, "stockMinimo": 5,
                "categoria": "Computadoras", "activo": true
            },
            {
                "id": 2, "codigo": "TECH-002", "nombre": "Mouse Inalámbrico Logitech",
                "precio": 85, "stock": 0, "stockMinimo": 5,
                "categoria": "Accesorios", "activo": false
            }
        ])))
        .mount(api)
        .await;
}

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let api = MockServer::start().await;
    let server = spawn_admin(&api.uri(), UserRole::Admin).await;

    let resp = server.client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(resp.headers()["x-frame-options"], "DENY");
    assert_eq!(resp.headers()["x-content-type-options"], "nosniff");
    assert_eq!(resp.headers()["cache-control"], "no-store");
}

#[tokio::test]
async fn test_products_listing_with_stats_and_filter() {
    let api = MockServer::start().await;
    mock_products(&api).await;
    let server = spawn_admin(&api.uri(), UserRole::Admin).await;

    let (status, body) = get(&server, "/products").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Laptop HP ProBook 450"));
    assert!(body.contains("Sin stock"));
    assert!(body.contains("S/. 2,500.00"));

    let (_, filtered) = get(&server, "/products?category=Accesorios").await;
    assert!(filtered.contains("Mouse Inalámbrico Logitech"));
    assert!(!filtered.contains("Laptop HP ProBook 450"));
}

#[tokio::test]
async fn test_products_listing_degrades_when_api_is_down() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/inventario/productos"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "Base de datos no disponible" })))
        .mount(&api)
        .await;
    let server = spawn_admin(&api.uri(), UserRole::Admin).await;

    let (status, body) = get(&server, "/products").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("notice error"));
    assert!(body.contains("No hay productos."));
}

#[tokio::test]
async fn test_create_product_redirects_with_notice() {
    let api = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/inventario/productos"))
        .and(body_partial_json(json!({ "nombre": "Hub USB-C", "categoria": "Accesorios" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "exitoso": true, "mensaje": "Producto creado", "id": 13, "nombre": "Hub USB-C"
        })))
        .expect(1)
        .mount(&api)
        .await;
    let server = spawn_admin(&api.uri(), UserRole::Admin).await;

    let resp = server
        .client
        .post(server.url("/products"))
        .form(&[
            ("codigo", "TECH-000013"),
            ("nombre", "Hub USB-C"),
            ("categoria", "Accesorios"),
            ("precio", "79.90"),
            ("stock", "10"),
            ("stock_minimo", "5"),
            ("activo", "on"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/products?notice=created");
}

#[tokio::test]
async fn test_invalid_product_form_is_rerendered() {
    let api = MockServer::start().await;
    let server = spawn_admin(&api.uri(), UserRole::Admin).await;

    let resp = server
        .client
        .post(server.url("/products"))
        .form(&[("nombre", "Hub USB-C"), ("categoria", "Accesorios"), ("precio", "0")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("El precio debe ser mayor a 0"));
    assert!(body.contains(r#"value="Hub USB-C""#));
}

#[tokio::test]
async fn test_promotions_create_and_delete() {
    let api = MockServer::start().await;
    let server = spawn_admin(&api.uri(), UserRole::Admin).await;

    let resp = server
        .client
        .post(server.url("/promotions"))
        .form(&[
            ("name", "Cyber Wow"),
            ("discount", "25"),
            ("starts_on", "2025-11-01"),
            ("ends_on", "2025-11-03"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/promotions?created=PROMO-003");

    let (_, body) = get(&server, "/promotions?created=PROMO-003").await;
    assert!(body.contains("Cyber Wow"));
    assert!(body.contains("Promoción PROMO-003 creada exitosamente"));

    let resp = server
        .client
        .post(server.url("/promotions/3/delete"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let (_, body) = get(&server, "/promotions").await;
    assert!(!body.contains("Cyber Wow"));

    let resp = server
        .client
        .post(server.url("/promotions/3/delete"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_promotion_shows_error() {
    let api = MockServer::start().await;
    let server = spawn_admin(&api.uri(), UserRole::Admin).await;

    let resp = server
        .client
        .post(server.url("/promotions"))
        .form(&[("name", "Sin descuento"), ("discount", "")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("Complete todos los campos"));
}

#[tokio::test]
async fn test_finances_require_manager_or_accountant() {
    let api = MockServer::start().await;

    let admin = spawn_admin(&api.uri(), UserRole::Admin).await;
    let (status, _) = get(&admin, "/manager/finances").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let accountant = spawn_admin(&api.uri(), UserRole::Contador).await;
    let (status, body) = get(&accountant, "/manager/finances?period=mes").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Este mes"));
    assert!(body.contains("Finanzas"));
}

#[tokio::test]
async fn test_sales_by_period() {
    let api = MockServer::start().await;
    let server = spawn_admin(&api.uri(), UserRole::Gerente).await;

    let (status, body) = get(&server, "/manager/sales").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("VTA-2025-0045"));

    let (_, body) = get(&server, "/manager/sales?period=a%C3%B1o").await;
    assert!(body.contains("Este año"));
}

#[tokio::test]
async fn test_inventory_filter_and_restock() {
    let api = MockServer::start().await;
    let server = spawn_admin(&api.uri(), UserRole::Gerente).await;

    let (_, body) = get(&server, "/manager/inventory?level=critico").await;
    assert!(body.contains("Webcam Logitech C920"));
    assert!(!body.contains("Cable HDMI 2.0"));

    let resp = server
        .client
        .post(server.url("/manager/inventory/TECH-006/restock"))
        .form(&[
            ("quantity", "20"),
            ("supplier", "Mayorista Lima Tech"),
            ("urgency", "express"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Solicitud SOL-"));
    assert!(body.contains("24 horas"));

    let (status, _) = get(&server, "/manager/inventory/TECH-999/restock").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_gateway_toggle_and_manual_charge() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/pagos/pasarelas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "paypal", "nombre": "PayPal", "habilitada": true },
            { "id": "yape", "nombre": "Yape", "habilitada": true },
            { "id": "plin", "nombre": "Plin", "habilitada": false }
        ])))
        .mount(&api)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/pagos/pasarelas/plin/configurar"))
        .and(body_partial_json(json!({ "habilitar": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mensaje": "Pasarela plin habilitada", "pasarela": "plin", "habilitada": true
        })))
        .expect(1)
        .mount(&api)
        .await;
    let server = spawn_admin(&api.uri(), UserRole::Admin).await;

    let resp = server
        .client
        .post(server.url("/gateways/plin/toggle"))
        .form(&[("enable", "true")])
        .send()
        .await
        .unwrap();
    assert!(resp.text().await.unwrap().contains("Pasarela plin habilitada"));

    let resp = server
        .client
        .post(server.url("/gateways/charge"))
        .form(&[("gateway", "yape"), ("amount", "abc"), ("reference", "ORD-1")])
        .send()
        .await
        .unwrap();
    assert!(resp.text().await.unwrap().contains("Completa monto y referencia válidos."));
}
