//! ShopEase CLI - Run the client flows from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Print the current cart item count
//! shopease cart count
//!
//! # Add product 42 to the cart
//! shopease cart add 42 --quantity 2
//!
//! # Call an admin endpoint
//! shopease call /api/admin/orders
//! shopease call /api/admin/orders/7/status --method PUT --data '{"status":"SHIPPED"}'
//! ```
//!
//! # Commands
//!
//! - `cart count` - Refresh and print the cart badge count
//! - `cart add` - Run the add-to-cart flow and report its notifications
//! - `call` - Call an admin endpoint through the admin auth policy
//!
//! # Environment Variables
//!
//! - `SHOPEASE_API_BASE` - Server base URL (default: `http://localhost:8080`)
//! - `SHOPEASE_TOKEN` - Bearer token for the session (required for `call`)
//! - `SHOPEASE_USER` - JSON user object stored alongside the token

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "shopease")]
#[command(author, version, about = "ShopEase client CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cart operations
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Call an admin endpoint through the admin auth policy
    Call {
        /// Endpoint path, e.g. `/api/admin/orders`
        endpoint: String,

        /// HTTP method
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// JSON request body (ignored for GET)
        #[arg(short, long)]
        data: Option<String>,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Refresh and print the cart item count
    Count,
    /// Add a product to the cart
    Add {
        /// Product ID to add
        product_id: i64,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing; defaults to info for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopease=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Count => commands::cart::count().await?,
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(product_id, quantity).await?,
        },
        Commands::Call {
            endpoint,
            method,
            data,
        } => commands::call::execute(&endpoint, &method, data.as_deref()).await?,
    }
    Ok(())
}
