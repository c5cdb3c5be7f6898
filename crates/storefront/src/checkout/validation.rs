//! Contact-step validation.
//!
//! Pure functions over raw form values. They run on every contact update so
//! the view can enable or disable "continue", and once more as the guard
//! before payment processing starts. Nothing here is verified server-side
//! beyond these checks.

use serde::Deserialize;
use techsolutions_core::{DocumentType, Dni, Email, Ruc};

/// Raw contact form values, exactly as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub email: String,
    pub ruc: String,
    pub razon_social: String,
    pub direccion_fiscal: String,
    pub dni: String,
    pub nombre_cliente: String,
}

/// Billing identity attached to the sales document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerInfo {
    Factura {
        ruc: Ruc,
        razon_social: String,
        direccion: String,
    },
    Boleta {
        dni: Dni,
        nombre: String,
    },
}

impl CustomerInfo {
    #[must_use]
    pub const fn document_type(&self) -> DocumentType {
        match self {
            Self::Factura { .. } => DocumentType::Factura,
            Self::Boleta { .. } => DocumentType::Boleta,
        }
    }

    /// Name printed on the document.
    #[must_use]
    pub fn holder(&self) -> &str {
        match self {
            Self::Factura { razon_social, .. } => razon_social,
            Self::Boleta { nombre, .. } => nombre,
        }
    }
}

/// A contact step that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    pub email: Email,
    pub customer: CustomerInfo,
}

/// A field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldError {
    DocumentType,
    Email,
    Ruc,
    RazonSocial,
    DireccionFiscal,
    Dni,
    NombreCliente,
}

impl FieldError {
    /// Form field name.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::DocumentType => "document_type",
            Self::Email => "email",
            Self::Ruc => "ruc",
            Self::RazonSocial => "razon_social",
            Self::DireccionFiscal => "direccion_fiscal",
            Self::Dni => "dni",
            Self::NombreCliente => "nombre_cliente",
        }
    }

    /// Inline hint shown next to the field.
    #[must_use]
    pub const fn hint(self) -> &'static str {
        match self {
            Self::DocumentType => "Selecciona el tipo de comprobante",
            Self::Email => "Ingresa un correo válido",
            Self::Ruc => "El RUC debe tener 11 caracteres",
            Self::RazonSocial => "Ingresa la razón social",
            Self::DireccionFiscal => "Ingresa la dirección fiscal",
            Self::Dni => "El DNI debe tener 8 caracteres",
            Self::NombreCliente => "Ingresa tu nombre completo",
        }
    }
}

/// Whether `value` (trimmed) is an acceptable checkout email.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    Email::parse(value).is_ok()
}

fn required(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

/// Validate the contact step.
///
/// # Errors
///
/// Returns every failing field, in form order.
pub fn validate_contact(
    document_type: Option<DocumentType>,
    form: &ContactForm,
) -> Result<ValidContact, Vec<FieldError>> {
    let mut errors = Vec::new();

    let email = Email::parse(&form.email)
        .map_err(|_| errors.push(FieldError::Email))
        .ok();

    let customer = match document_type {
        None => {
            errors.insert(0, FieldError::DocumentType);
            None
        }
        Some(DocumentType::Factura) => {
            let ruc = Ruc::parse(&form.ruc)
                .map_err(|_| errors.push(FieldError::Ruc))
                .ok();
            let razon_social = required(&form.razon_social);
            if razon_social.is_none() {
                errors.push(FieldError::RazonSocial);
            }
            let direccion = required(&form.direccion_fiscal);
            if direccion.is_none() {
                errors.push(FieldError::DireccionFiscal);
            }
            match (ruc, razon_social, direccion) {
                (Some(ruc), Some(razon_social), Some(direccion)) => Some(CustomerInfo::Factura {
                    ruc,
                    razon_social,
                    direccion,
                }),
                _ => None,
            }
        }
        Some(DocumentType::Boleta) => {
            let dni = Dni::parse(&form.dni)
                .map_err(|_| errors.push(FieldError::Dni))
                .ok();
            let nombre = required(&form.nombre_cliente);
            if nombre.is_none() {
                errors.push(FieldError::NombreCliente);
            }
            match (dni, nombre) {
                (Some(dni), Some(nombre)) => Some(CustomerInfo::Boleta { dni, nombre }),
                _ => None,
            }
        }
    };

    match (email, customer) {
        (Some(email), Some(customer)) if errors.is_empty() => Ok(ValidContact { email, customer }),
        _ => Err(errors),
    }
}
