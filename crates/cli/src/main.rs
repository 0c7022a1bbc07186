//! Boxpaper CLI - inspect and manage local storefront data.
//!
//! Operates directly on the storefront's file store, so it sees the same
//! orders and account as a storefront started with the same data directory.
//!
//! # Usage
//!
//! ```bash
//! # List orders, newest first
//! bp-cli orders list
//!
//! # Mark an order delivered
//! bp-cli orders status ORDER-3F9C1A7E delivered
//!
//! # Show the local account
//! bp-cli account show
//! ```
//!
//! # Commands
//!
//! - `orders list|show|status|delete` - Order history
//! - `account show|logout` - The local account
//! - `catalog` - Product list

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use boxpaper_core::{OrderId, OrderStatus};
use boxpaper_storefront::services::{IdentityStore, OrderStore};
use boxpaper_storefront::storage::FileStore;

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "bp-cli")]
#[command(author, version, about = "Boxpaper CLI tools")]
struct Cli {
    /// Storefront data directory
    #[arg(long, global = true, env = "STOREFRONT_DATA_DIR", default_value = ".boxpaper")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage order history
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Manage the local account
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// List catalog products
    Catalog {
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List orders, newest first
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one order as JSON
    Show { order_id: String },
    /// Change an order's status (pending, confirmed, delivered, cancelled)
    Status {
        order_id: String,
        status: OrderStatus,
    },
    /// Delete an order
    Delete { order_id: String },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Show the local account
    Show,
    /// Remove the local account
    Logout,
}

fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Err(e) = run(cli, &mut out) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, out: &mut impl Write) -> Result<(), CommandError> {
    let store = Arc::new(FileStore::new(cli.data_dir));

    match cli.command {
        Commands::Orders { action } => {
            let orders = OrderStore::new(store);
            match action {
                OrdersAction::List { json } => commands::orders::list(&orders, json, out),
                OrdersAction::Show { order_id } => {
                    commands::orders::show(&orders, &OrderId::new(order_id), out)
                }
                OrdersAction::Status { order_id, status } => {
                    commands::orders::set_status(&orders, &OrderId::new(order_id), status, out)
                }
                OrdersAction::Delete { order_id } => {
                    commands::orders::delete(&orders, &OrderId::new(order_id), out)
                }
            }
        }
        Commands::Account { action } => {
            let identity = IdentityStore::new(store);
            match action {
                AccountAction::Show => commands::account::show(&identity, out),
                AccountAction::Logout => commands::account::logout(&identity, out),
            }
        }
        Commands::Catalog { category } => commands::catalog::list(category.as_deref(), out),
    }
}
