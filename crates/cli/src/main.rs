//! TechSolutions CLI - Operator tools for the payments and inventory API.
//!
//! # Usage
//!
//! ```bash
//! # Which gateways are enabled
//! ts-cli gateways status
//!
//! # Take Plin offline
//! ts-cli gateways disable plin
//!
//! # Manual charge
//! ts-cli pay --gateway yape --amount 150.50 --reference ORD-2025-000123
//!
//! # Look up a transaction
//! ts-cli verify yape ORD-2025-000123
//!
//! # Inventory listing
//! ts-cli products list
//! ```
//!
//! The API location comes from `--api-url` or `TECHSOLUTIONS_API_URL`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use secrecy::SecretString;
use techsolutions_api_client::{ApiClient, ApiConfig};
use techsolutions_core::PaymentMethod;
use url::Url;

mod commands;

#[derive(Parser)]
#[command(name = "ts-cli")]
#[command(author, version, about = "TechSolutions operator CLI")]
struct Cli {
    /// Base URL of the payments / inventory API
    #[arg(
        long,
        global = true,
        env = "TECHSOLUTIONS_API_URL",
        default_value = "http://127.0.0.1:8080"
    )]
    api_url: Url,

    /// Bearer token for the API
    #[arg(long, global = true, env = "TECHSOLUTIONS_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or configure payment gateways
    Gateways {
        #[command(subcommand)]
        action: GatewayAction,
    },
    /// Charge an amount through a gateway
    Pay {
        /// Gateway (`paypal`, `yape`, `plin`)
        #[arg(short, long)]
        gateway: PaymentMethod,

        /// Amount in soles
        #[arg(short, long)]
        amount: Decimal,

        /// Order or payment reference
        #[arg(short, long)]
        reference: String,
    },
    /// Look up a transaction
    Verify {
        gateway: PaymentMethod,
        reference: String,
    },
    /// Inventory products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
}

#[derive(Subcommand)]
enum GatewayAction {
    /// Enabled flag for every gateway
    Status,
    /// Enable a gateway
    Enable { gateway: PaymentMethod },
    /// Disable a gateway
    Disable { gateway: PaymentMethod },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List every product with price and stock
    List,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ts_cli=info,techsolutions_api_client=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn client(cli: &Cli) -> Result<ApiClient, Box<dyn std::error::Error>> {
    let mut config = ApiConfig::new(cli.api_url.clone());
    if let Some(token) = cli.api_token.as_deref().filter(|t| !t.is_empty()) {
        config = config.with_token(SecretString::from(token.to_owned()));
    }
    Ok(ApiClient::new(&config)?)
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let api = client(&cli)?;

    match cli.command {
        Commands::Gateways { action } => match action {
            GatewayAction::Status => commands::gateways::status(&api).await?,
            GatewayAction::Enable { gateway } => {
                commands::gateways::configure(&api, gateway, true).await?;
            }
            GatewayAction::Disable { gateway } => {
                commands::gateways::configure(&api, gateway, false).await?;
            }
        },
        Commands::Pay {
            gateway,
            amount,
            reference,
        } => commands::payments::pay(&api, gateway, amount, &reference).await?,
        Commands::Verify { gateway, reference } => {
            commands::payments::verify(&api, gateway, &reference).await?;
        }
        Commands::Products { action } => match action {
            ProductAction::List => commands::products::list(&api).await?,
        },
    }
    Ok(())
}
