//! `ts-cli gateways ...`

use techsolutions_api_client::ApiClient;
use techsolutions_core::PaymentMethod;

/// Report the enabled flag of every gateway.
///
/// # Errors
///
/// Returns an error if the API request fails.
pub async fn status(api: &ApiClient) -> Result<(), Box<dyn std::error::Error>> {
    let status = api.gateway_status().await?;
    if status.is_empty() {
        tracing::warn!("The API reported no gateways");
    }
    for (gateway, enabled) in &status {
        tracing::info!("{gateway}: {}", if *enabled { "habilitada" } else { "deshabilitada" });
    }
    Ok(())
}

/// Enable or disable a gateway.
///
/// # Errors
///
/// Returns an error if the API rejects the change.
pub async fn configure(
    api: &ApiClient,
    gateway: PaymentMethod,
    enable: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let toggled = api.configure_gateway(gateway.as_str(), enable).await?;
    tracing::info!(
        gateway = %toggled.pasarela,
        enabled = toggled.habilitada,
        "{}",
        toggled.mensaje
    );
    Ok(())
}
