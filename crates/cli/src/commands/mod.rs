//! Subcommand implementations. Results are reported through `tracing`.

pub mod gateways;
pub mod payments;
pub mod products;
