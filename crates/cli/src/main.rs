//! Finprod CLI - Manage financial products from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List products, 10 per page, matching "tarjeta"
//! finprod list --search tarjeta --per-page 10
//!
//! # Show one product
//! finprod show trj-crd
//!
//! # Check whether an ID is taken
//! finprod exists trj-crd
//!
//! # Delete a product
//! finprod delete trj-crd
//! ```
//!
//! # Commands
//!
//! - `list` - Filtered, paginated product listing
//! - `show` - Product details
//! - `exists` - ID availability check
//! - `create` / `update` - Validated writes
//! - `delete` - Remove a product

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::num::NonZeroUsize;

use clap::{Parser, Subcommand};
use finprod_core::DEFAULT_ITEMS_PER_PAGE;

mod commands;

use commands::products::{self, CommandError, ProductArgs};

#[derive(Parser)]
#[command(name = "finprod")]
#[command(author, version, about = "Finprod product management")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of products
    List {
        /// Case-insensitive search over name and description
        #[arg(short, long, default_value = "")]
        search: String,

        /// Products per page
        #[arg(long, default_value_t = DEFAULT_ITEMS_PER_PAGE)]
        per_page: NonZeroUsize,

        /// Page to show (clamped to the last page)
        #[arg(short, long, default_value = "1")]
        page: NonZeroUsize,
    },
    /// Show a product
    Show {
        /// Product ID
        id: String,
    },
    /// Check whether a product ID is taken
    Exists {
        /// Product ID
        id: String,
    },
    /// Create a product
    Create(ProductArgs),
    /// Replace a product's fields
    Update(ProductArgs),
    /// Delete a product
    Delete {
        /// Product ID
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Load .env first so RUST_LOG can come from it
    dotenvy::dotenv().ok();

    // Logs go to stderr, command output to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finprod_cli=info,finprod_admin=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => print(&output),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

#[allow(clippy::print_stdout)]
fn print(output: &str) {
    println!("{}", output.trim_end());
}

async fn run(cli: Cli) -> Result<String, CommandError> {
    match cli.command {
        Commands::List {
            search,
            per_page,
            page,
        } => products::list(&search, per_page, page).await,
        Commands::Show { id } => products::show(&id).await,
        Commands::Exists { id } => Ok(products::exists(&id).await?.to_string()),
        Commands::Create(args) => products::create(args).await,
        Commands::Update(args) => products::update(args).await,
        Commands::Delete { id } => products::delete(&id).await,
    }
}
