//! Storefront cart and checkout over HTTP.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use techsolutions_core::PaymentMethod;
use techsolutions_integration_tests::{TestServer, spawn_storefront};
use techsolutions_storefront::checkout::SimulatedGateway;

async fn post(server: &TestServer, path: &str, form: &[(&str, &str)]) -> String {
    let resp = server
        .client
        .post(server.url(path))
        .form(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK, "POST {path}");
    resp.text().await.unwrap()
}

async fn get(server: &TestServer, path: &str) -> String {
    let resp = server.client.get(server.url(path)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK, "GET {path}");
    resp.text().await.unwrap()
}

/// Poll the processing step until it leaves step 3.
async fn wait_for_outcome(server: &TestServer) -> String {
    for _ in 0..50 {
        let body = get(server, "/checkout/status").await;
        if !body.contains("processing-status") {
            return body;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("checkout never finished processing");
}

const BOLETA_CONTACT: &[(&str, &str)] = &[
    ("email", "ana@example.com"),
    ("ruc", ""),
    ("razon_social", ""),
    ("direccion_fiscal", ""),
    ("dni", "12345678"),
    ("nombre_cliente", "Ana Quispe"),
];

/// The header badge with no count in it.
const EMPTY_BADGE: &str = r#"hx-swap="outerHTML"></span>"#;

async fn fill_cart_and_reach_contact(server: &TestServer, method: &str) {
    post(server, "/cart/add", &[("product_id", "4")]).await;
    post(server, "/cart/add", &[("product_id", "4")]).await;
    let step1 = post(server, "/checkout/open", &[]).await;
    assert!(step1.contains(" disabled>Continuar</button>"));
    let step1 = post(server, "/checkout/method", &[("method", method)]).await;
    assert!(step1.contains(r##"hx-target="#checkout-modal">Continuar</button>"##));
    let step2 = post(server, "/checkout/continue", &[]).await;
    assert!(step2.contains(r#"<li class="active">Datos</li>"#));
    post(server, "/checkout/document", &[("document_type", "boleta")]).await;
}

#[tokio::test]
async fn test_health() {
    let server = spawn_storefront(Arc::new(SimulatedGateway::new())).await;
    assert_eq!(get(&server, "/health").await, "ok");
}

#[tokio::test]
async fn test_add_to_cart_updates_badge() {
    let server = spawn_storefront(Arc::new(SimulatedGateway::new())).await;

    let resp = server
        .client
        .post(server.url("/cart/add"))
        .form(&[("product_id", "5")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers()["hx-trigger"], "cart-updated");
    let body = resp.text().await.unwrap();
    assert!(body.contains("PS5 Console agregado al carrito"));

    let count = get(&server, "/cart/count").await;
    assert!(count.contains(">1</span>"));

    let cart = get(&server, "/cart").await;
    assert!(cart.contains("PS5 Console"));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let server = spawn_storefront(Arc::new(SimulatedGateway::new())).await;
    let resp = server
        .client
        .post(server.url("/cart/add"))
        .form(&[("product_id", "404")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_checkout_refuses_empty_cart() {
    let server = spawn_storefront(Arc::new(SimulatedGateway::new())).await;
    let body = post(&server, "/checkout/open", &[]).await;
    assert!(body.contains("Tu carrito está vacío"));
    assert!(!body.contains("checkout-steps"));
}

#[tokio::test]
async fn test_checkout_completes_and_empties_cart() {
    let server = spawn_storefront(Arc::new(SimulatedGateway::new())).await;
    fill_cart_and_reach_contact(&server, "yape").await;

    let processing = post(&server, "/checkout/pay", BOLETA_CONTACT).await;
    assert!(processing.contains("processing-status"));

    let done = wait_for_outcome(&server).await;
    assert!(done.contains("¡Pago exitoso!"));
    assert!(done.contains("ORD-"));
    assert!(done.contains("Tu boleta de venta fue enviada a"));
    assert!(done.contains("ana@example.com"));
    assert!(done.contains("YAPE-"));

    let count = get(&server, "/cart/count").await;
    assert!(count.contains(EMPTY_BADGE), "{count}");
    assert!(get(&server, "/cart").await.contains("vacío"));
}

#[tokio::test]
async fn test_items_added_before_paying_are_charged() {
    let server = spawn_storefront(Arc::new(SimulatedGateway::new())).await;
    fill_cart_and_reach_contact(&server, "yape").await;

    // 2 x 399 + 3,999 = 4,797 plus IGV
    post(&server, "/cart/add", &[("product_id", "1")]).await;
    let step2 = post(&server, "/checkout/contact", BOLETA_CONTACT).await;
    assert!(step2.contains("S/. 5,660.46"), "{step2}");

    post(&server, "/checkout/pay", BOLETA_CONTACT).await;
    let done = wait_for_outcome(&server).await;
    assert!(done.contains("<dt>Total pagado</dt><dd>S/. 5,660.46</dd>"), "{done}");

    let count = get(&server, "/cart/count").await;
    assert!(count.contains(EMPTY_BADGE), "{count}");
}

#[tokio::test]
async fn test_items_added_while_processing_stay_in_cart() {
    let server = spawn_storefront(Arc::new(SimulatedGateway::new())).await;
    fill_cart_and_reach_contact(&server, "yape").await;

    post(&server, "/checkout/pay", BOLETA_CONTACT).await;
    post(&server, "/cart/add", &[("product_id", "1")]).await;

    let done = wait_for_outcome(&server).await;
    assert!(done.contains("<dt>Total pagado</dt><dd>S/. 941.64</dd>"), "{done}");

    let count = get(&server, "/cart/count").await;
    assert!(count.contains(">1</span>"), "{count}");
    let cart = get(&server, "/cart").await;
    assert!(cart.contains("MacBook Pro"));
    assert!(!cart.contains("Sony WH-1000XM5"));
}

#[tokio::test]
async fn test_invalid_contact_stays_on_step_two() {
    let server = spawn_storefront(Arc::new(SimulatedGateway::new())).await;
    fill_cart_and_reach_contact(&server, "plin").await;

    let form = [
        ("email", "no-es-correo"),
        ("dni", "123"),
        ("nombre_cliente", ""),
    ];
    let body = post(&server, "/checkout/pay", &form).await;
    assert!(body.contains(r#"<li class="active">Datos</li>"#));
    assert!(body.contains("El DNI debe tener 8 caracteres"));
    assert!(!body.contains("processing-status"));
}

#[tokio::test]
async fn test_refused_payment_returns_to_contact_step() {
    let gateway = SimulatedGateway::new().with_disabled(PaymentMethod::Plin);
    let server = spawn_storefront(Arc::new(gateway)).await;
    fill_cart_and_reach_contact(&server, "plin").await;

    post(&server, "/checkout/pay", BOLETA_CONTACT).await;
    let body = wait_for_outcome(&server).await;

    assert!(body.contains(r#"<li class="active">Datos</li>"#));
    assert!(body.contains("La pasarela plin no está habilitada"));
    // The cart survives a failed payment.
    assert!(get(&server, "/cart/count").await.contains(">2</span>"));
}

#[tokio::test]
async fn test_close_cancels_processing() {
    let server = spawn_storefront(Arc::new(SimulatedGateway::new())).await;
    fill_cart_and_reach_contact(&server, "paypal").await;
    post(&server, "/checkout/pay", BOLETA_CONTACT).await;

    let closed = post(&server, "/checkout/close", &[]).await;
    assert!(!closed.contains("checkout-steps"));

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(get(&server, "/cart/count").await.contains(">2</span>"));
}
