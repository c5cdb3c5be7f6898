//! Peruvian tax document types.
//!
//! A purchase is billed either with a *factura* (businesses, identified by
//! an 11-character RUC) or a *boleta* (individuals, identified by an
//! 8-character DNI). Only the length is checked; SUNAT lookups are out of
//! reach for a storefront.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Ruc`] or [`Dni`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The identifier does not have the required number of characters.
    #[error("{kind} must have exactly {expected} characters, got {actual}")]
    WrongLength {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Unknown document type name.
    #[error("unknown document type: {0}")]
    UnknownType(String),
}

/// Sales document requested at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Factura,
    Boleta,
}

impl DocumentType {
    /// Form value (`factura` / `boleta`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Factura => "factura",
            Self::Boleta => "boleta",
        }
    }

    /// Title shown on the confirmation screen.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Factura => "Factura Electrónica",
            Self::Boleta => "Boleta de Venta",
        }
    }

    /// Lowercase name used in "we sent your ..." sentences.
    #[must_use]
    pub const fn sent_label(self) -> &'static str {
        match self {
            Self::Factura => "factura electrónica",
            Self::Boleta => "boleta de venta",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentType {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "factura" => Ok(Self::Factura),
            "boleta" => Ok(Self::Boleta),
            other => Err(DocumentError::UnknownType(other.to_owned())),
        }
    }
}

macro_rules! fixed_length_id {
    ($name:ident, $kind:literal, $len:literal) => {
        #[doc = concat!("A ", $kind, " (exactly ", stringify!($len), " characters, trimmed).")]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Required number of characters.
            pub const LENGTH: usize = $len;

            #[doc = concat!("Parse a ", $kind, " from user input.")]
            ///
            /// # Errors
            ///
            /// Returns [`DocumentError::WrongLength`] when the trimmed input
            /// does not have exactly `LENGTH` characters.
            pub fn parse(s: &str) -> Result<Self, DocumentError> {
                let s = s.trim();
                let actual = s.chars().count();
                if actual != Self::LENGTH {
                    return Err(DocumentError::WrongLength {
                        kind: $kind,
                        expected: Self::LENGTH,
                        actual,
                    });
                }
                Ok(Self(s.to_owned()))
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = DocumentError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

fixed_length_id!(Ruc, "RUC", 11);
fixed_length_id!(Dni, "DNI", 8);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ruc_requires_eleven_characters() {
        assert!(Ruc::parse("20123456789").is_ok());
        assert!(Ruc::parse(" 20123456789 ").is_ok());
        assert_eq!(
            Ruc::parse("2012345678"),
            Err(DocumentError::WrongLength {
                kind: "RUC",
                expected: 11,
                actual: 10
            })
        );
        assert!(Ruc::parse("201234567890").is_err());
    }

    #[test]
    fn test_dni_requires_eight_characters() {
        assert_eq!(Dni::parse("12345678").unwrap().as_str(), "12345678");
        assert!(Dni::parse("1234567").is_err());
        assert!(Dni::parse("").is_err());
    }

    #[test]
    fn test_document_type_labels() {
        assert_eq!(DocumentType::Factura.label(), "Factura Electrónica");
        assert_eq!(DocumentType::Boleta.sent_label(), "boleta de venta");
        assert_eq!("boleta".parse::<DocumentType>().unwrap(), DocumentType::Boleta);
        assert!("recibo".parse::<DocumentType>().is_err());
    }
}
