//! Payment gateway endpoints (`/api/pagos`).

use std::collections::BTreeMap;

use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{ApiClient, ApiError};

#[derive(Serialize)]
struct ChargeRequest<'a> {
    pasarela: &'a str,
    monto: Decimal,
    referencia: &'a str,
}

/// Successful charge.
#[derive(Debug, Clone, Deserialize)]
pub struct ChargeReceipt {
    pub exitoso: bool,
    pub mensaje: String,
    pub pasarela: String,
    pub monto: Decimal,
    pub referencia: String,
}

/// Gateway as listed by `GET /api/pagos/pasarelas`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GatewayInfo {
    pub id: String,
    pub nombre: String,
    pub habilitada: bool,
    #[serde(default)]
    pub descripcion: Option<String>,
}

/// Result of enabling or disabling a gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayToggled {
    pub mensaje: String,
    pub pasarela: String,
    pub habilitada: bool,
}

/// Transaction status for a reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Verification {
    pub referencia: String,
    pub pasarela: String,
    pub estado: String,
}

#[derive(Serialize)]
struct Toggle {
    habilitar: bool,
}

impl ApiClient {
    /// Charge `amount` through `gateway` (`paypal`, `yape` or `plin`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the gateway is unknown, disabled,
    /// or reports `exitoso: false`.
    #[instrument(skip(self), fields(gateway = %gateway, amount = %amount))]
    pub async fn charge(
        &self,
        gateway: &str,
        amount: Decimal,
        reference: &str,
    ) -> Result<ChargeReceipt, ApiError> {
        let url = self.endpoint(&["api", "pagos", "procesar"])?;
        let body = ChargeRequest {
            pasarela: gateway,
            monto: amount,
            referencia: reference,
        };
        let receipt: ChargeReceipt = self
            .send(self.request(Method::POST, url).json(&body))
            .await?;

        if !receipt.exitoso {
            return Err(ApiError::Rejected(receipt.mensaje));
        }

        tracing::info!(reference = %receipt.referencia, "Payment processed");
        Ok(receipt)
    }

    /// Enabled flag per gateway name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn gateway_status(&self) -> Result<BTreeMap<String, bool>, ApiError> {
        let url = self.endpoint(&["api", "pagos", "pasarelas", "estado"])?;
        self.send(self.request(Method::GET, url)).await
    }

    /// Every integrated gateway with its display name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn gateways(&self) -> Result<Vec<GatewayInfo>, ApiError> {
        let url = self.endpoint(&["api", "pagos", "pasarelas"])?;
        self.send(self.request(Method::GET, url)).await
    }

    /// Enable or disable a gateway.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] for unknown gateways.
    #[instrument(skip(self))]
    pub async fn configure_gateway(
        &self,
        gateway: &str,
        enable: bool,
    ) -> Result<GatewayToggled, ApiError> {
        let url = self.endpoint(&["api", "pagos", "pasarelas", gateway, "configurar"])?;
        self.send(
            self.request(Method::PUT, url)
                .json(&Toggle { habilitar: enable }),
        )
        .await
    }

    /// Look up a transaction by gateway and reference.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the backend cannot verify it.
    #[instrument(skip(self))]
    pub async fn verify(&self, gateway: &str, reference: &str) -> Result<Verification, ApiError> {
        let url = self.endpoint(&["api", "pagos", "verificar", gateway, reference])?;
        self.send(self.request(Method::GET, url)).await
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

    #[tokio::test]
    async fn test_charge_returns_receipt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/pagos/procesar"))
            .and(body_partial_json(json!({ "pasarela": "yape", "referencia": "ORD-2025-ABC123" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "exitoso": true,
                "mensaje": "Pago procesado correctamente",
                "pasarela": "yape",
                "monto": 29.5,
                "referencia": "ORD-2025-ABC123"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let receipt = client_for(&server)
            .await
            .charge("yape", Decimal::new(2950, 2), "ORD-2025-ABC123")
            .await
            .unwrap();
        assert_eq!(receipt.monto, Decimal::new(295, 1));
        assert_eq!(receipt.mensaje, "Pago procesado correctamente");
    }

    #[tokio::test]
    async fn test_charge_on_disabled_gateway_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/pagos/procesar"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "exitoso": false,
                "mensaje": "La pasarela yape no está habilitada"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .charge("yape", Decimal::ONE, "ref")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "La pasarela yape no está habilitada");
    }

    #[tokio::test]
    async fn test_charge_with_unsuccessful_ok_body_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/pagos/procesar"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "exitoso": false,
                "mensaje": "Error al procesar el pago",
                "pasarela": "plin",
                "monto": 10,
                "referencia": "ref"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .charge("plin", Decimal::TEN, "ref")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Rejected(ref m) if m == "Error al procesar el pago"));
    }

    #[tokio::test]
    async fn test_gateway_status_and_toggle() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/pagos/pasarelas/estado"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "paypal": true, "yape": true, "plin": false })),
            )
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/pagos/pasarelas/plin/configurar"))
            .and(body_partial_json(json!({ "habilitar": true })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "exitoso": true,
                "mensaje": "Pasarela plin habilitada",
                "pasarela": "plin",
                "habilitada": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let status = api.gateway_status().await.unwrap();
        assert_eq!(status.get("plin"), Some(&false));
        assert_eq!(status.len(), 3);

        let toggled = api.configure_gateway("plin", true).await.unwrap();
        assert!(toggled.habilitada);
        assert_eq!(toggled.mensaje, "Pasarela plin habilitada");
    }

    #[tokio::test]
    async fn test_verify_maps_error_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/pagos/verificar/paypal/ORD-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "referencia": "ORD-1",
                "pasarela": "paypal",
                "estado": "COMPLETADO - PayPal"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/pagos/verificar/visa/ORD-1"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({ "error": "Pasarela no encontrada: visa" })),
            )
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let verification = api.verify("paypal", "ORD-1").await.unwrap();
        assert_eq!(verification.estado, "COMPLETADO - PayPal");

        let err = api.verify("visa", "ORD-1").await.unwrap_err();
        assert_eq!(err.to_string(), "Pasarela no encontrada: visa");
    }
}
