//! `ts-cli pay` and `ts-cli verify`.

use rust_decimal::Decimal;
use techsolutions_api_client::ApiClient;
use techsolutions_core::{PaymentMethod, format_soles};

/// Charge `amount` through `gateway`.
///
/// # Errors
///
/// Returns an error for non-positive amounts or when the gateway rejects the
/// charge.
pub async fn pay(
    api: &ApiClient,
    gateway: PaymentMethod,
    amount: Decimal,
    reference: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if amount <= Decimal::ZERO {
        return Err(format!("amount must be positive, got {amount}").into());
    }

    tracing::info!("Charging {} via {}...", format_soles(amount), gateway.display_name());
    let receipt = api.charge(gateway.as_str(), amount, reference).await?;

    tracing::info!("{}", receipt.mensaje);
    tracing::info!("  Pasarela: {}", receipt.pasarela);
    tracing::info!("  Monto: {}", format_soles(receipt.monto));
    tracing::info!("  Referencia: {}", receipt.referencia);
    Ok(())
}

/// Look up a transaction.
///
/// # Errors
///
/// Returns an error if the API cannot verify the reference.
pub async fn verify(
    api: &ApiClient,
    gateway: PaymentMethod,
    reference: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let verification = api.verify(gateway.as_str(), reference).await?;
    tracing::info!(
        reference = %verification.referencia,
        gateway = %verification.pasarela,
        "Estado: {}",
        verification.estado
    );
    Ok(())
}
