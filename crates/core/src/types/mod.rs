//! Core types for TechSolutions.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod document;
pub mod email;
pub mod id;
pub mod price;
pub mod status;

pub use document::{DocumentError, DocumentType, Dni, Ruc};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price, TAX_RATE, Totals, format_soles};
pub use status::*;
