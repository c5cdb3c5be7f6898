//! Payment gateway panel forms.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use techsolutions_core::PaymentMethod;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GatewayFormError {
    #[error("Completa monto y referencia válidos.")]
    InvalidCharge,
    #[error("Selecciona una pasarela válida.")]
    UnknownGateway,
    #[error("Ingresa una referencia para verificar.")]
    MissingReference,
}

/// Manual charge form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChargeForm {
    pub gateway: String,
    pub amount: String,
    pub reference: String,
}

/// Validated manual charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualCharge {
    pub gateway: PaymentMethod,
    pub amount: Decimal,
    pub reference: String,
}

impl ChargeForm {
    /// # Errors
    ///
    /// [`GatewayFormError::InvalidCharge`] unless the amount is a positive
    /// number and the reference is not blank.
    pub fn validate(&self) -> Result<ManualCharge, GatewayFormError> {
        let gateway = self
            .gateway
            .parse::<PaymentMethod>()
            .map_err(|_| GatewayFormError::UnknownGateway)?;

        let amount = Decimal::from_str(self.amount.trim())
            .ok()
            .filter(|a| *a > Decimal::ZERO);
        let reference = self.reference.trim();

        match amount {
            Some(amount) if !reference.is_empty() => Ok(ManualCharge {
                gateway,
                amount,
                reference: reference.to_owned(),
            }),
            _ => Err(GatewayFormError::InvalidCharge),
        }
    }
}

/// Transaction lookup form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VerifyForm {
    pub gateway: String,
    pub reference: String,
}

impl VerifyForm {
    /// # Errors
    ///
    /// Rejects unknown gateways and blank references.
    pub fn validate(&self) -> Result<(PaymentMethod, String), GatewayFormError> {
        let gateway = self
            .gateway
            .parse::<PaymentMethod>()
            .map_err(|_| GatewayFormError::UnknownGateway)?;
        let reference = self.reference.trim();
        if reference.is_empty() {
            return Err(GatewayFormError::MissingReference);
        }
        Ok((gateway, reference.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn charge(amount: &str, reference: &str) -> ChargeForm {
        ChargeForm {
            gateway: "yape".into(),
            amount: amount.into(),
            reference: reference.into(),
        }
    }

    #[test]
    fn test_charge_requires_amount_and_reference() {
        let ok = charge("150.50", " ORD-2025-000123 ").validate().unwrap();
        assert_eq!(ok.gateway, PaymentMethod::Yape);
        assert_eq!(ok.amount, Decimal::new(15_050, 2));
        assert_eq!(ok.reference, "ORD-2025-000123");

        for bad in [charge("0", "ref"), charge("-5", "ref"), charge("abc", "ref"), charge("10", "  ")] {
            assert_eq!(bad.validate().unwrap_err(), GatewayFormError::InvalidCharge);
        }
        assert_eq!(
            GatewayFormError::InvalidCharge.to_string(),
            "Completa monto y referencia válidos."
        );
    }

    #[test]
    fn test_unknown_gateway() {
        let form = ChargeForm {
            gateway: "visa".into(),
            ..charge("10", "ref")
        };
        assert_eq!(form.validate().unwrap_err(), GatewayFormError::UnknownGateway);
    }

    #[test]
    fn test_verify_form() {
        let form = VerifyForm {
            gateway: "plin".into(),
            reference: "".into(),
        };
        assert_eq!(form.validate().unwrap_err(), GatewayFormError::MissingReference);

        let form = VerifyForm {
            gateway: "PayPal".into(),
            reference: "TX-1".into(),
        };
        assert_eq!(form.validate().unwrap(), (PaymentMethod::PayPal, "TX-1".to_owned()));
    }
}
