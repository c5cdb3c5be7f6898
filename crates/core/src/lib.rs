//! TechSolutions Core - Shared domain types.
//!
//! This crate provides the types shared by every TechSolutions component:
//! - `storefront` - Public catalog, cart and checkout (port 3000)
//! - `admin` - Product, promotion and manager dashboards (port 3001)
//! - `api-client` - Typed client for the inventory and payments API
//! - `cli` - Operator commands against the same API
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Money is always [`rust_decimal::Decimal`]; rounding happens only
//! when a value is formatted for display.
//!
//! # Modules
//!
//! - [`types`] - IDs, prices and totals, emails, tax documents and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
