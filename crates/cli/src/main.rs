//! Vitrin CLI - Command-line view over the storefront's cart state.
//!
//! State lives in a JSON file that stands in for browser storage, so carts
//! and address books survive between invocations exactly as they would
//! survive a page reload.
//!
//! # Usage
//!
//! ```bash
//! # Show cart lines and totals
//! vitrin cart show
//!
//! # Replace the cart from a JSON array of lines
//! vitrin cart set cart.json
//!
//! # Change the quantity of the first line
//! vitrin cart quantity 0 3
//!
//! # Save an address
//! vitrin address add '{"title":"Ev","city":"İzmir"}'
//!
//! # Resolve a storefront URL
//! vitrin route '/product/42'
//! ```
//!
//! # Commands
//!
//! - `cart` - Show and edit cart lines
//! - `address` - Manage the saved address book
//! - `user` - Show the logged-in user record
//! - `route` - Resolve a path against the routing table

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use vitrin_core::AddressId;
use vitrin_storefront::config::{LogFormat, StorefrontConfig};
use vitrin_storefront::storage::JsonFileStore;
use vitrin_storefront::store::CartStore;

mod commands;

#[derive(Parser)]
#[command(name = "vitrin")]
#[command(author, version, about = "Vitrin storefront cart tools")]
struct Cli {
    /// Storage file (overrides `VITRIN_STORAGE_PATH`)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show and edit cart lines
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage saved addresses
    Address {
        #[command(subcommand)]
        action: AddressAction,
    },
    /// Show the logged-in user
    User,
    /// Resolve a storefront path
    Route {
        /// Path or URL, e.g. `/listing?brand=Nike`
        location: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print cart lines and totals
    Show,
    /// Replace the cart with the lines in a JSON file
    Set {
        /// File containing a JSON array of cart lines
        file: PathBuf,
    },
    /// Remove the line at an index
    Remove {
        /// Zero-based line index
        index: usize,
    },
    /// Set the quantity of the line at an index
    Quantity {
        /// Zero-based line index
        index: usize,

        /// New quantity (zero or negative is ignored)
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
}

#[derive(Subcommand)]
enum AddressAction {
    /// Print saved addresses
    List,
    /// Save a new address from a JSON object
    Add {
        /// Address fields as a JSON object
        fields: String,
    },
    /// Replace the fields of a saved address
    Update {
        /// Address ID
        id: AddressId,

        /// Address fields as a JSON object
        fields: String,
    },
    /// Delete a saved address
    Remove {
        /// Address ID
        id: AddressId,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    init_tracing(config.log_format);

    if let Err(e) = run(cli, &config) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing to stderr, keeping stdout for command output.
fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vitrin_storefront=info,vitrin_cli=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Commands::Route { location } = &cli.command {
        commands::route::resolve(location)?;
        return Ok(());
    }

    let path = cli.storage.unwrap_or_else(|| config.storage_path.clone());
    tracing::debug!(path = %path.display(), "Opening storage");
    let mut store = CartStore::open(JsonFileStore::open(path));

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&store)?,
            CartAction::Set { file } => commands::cart::set(&mut store, &file)?,
            CartAction::Remove { index } => commands::cart::remove(&mut store, index)?,
            CartAction::Quantity { index, quantity } => {
                commands::cart::quantity(&mut store, index, quantity)?;
            }
        },
        Commands::Address { action } => match action {
            AddressAction::List => commands::address::list(&store)?,
            AddressAction::Add { fields } => commands::address::add(&mut store, &fields)?,
            AddressAction::Update { id, fields } => {
                commands::address::update(&mut store, id, &fields)?;
            }
            AddressAction::Remove { id } => commands::address::remove(&mut store, id)?,
        },
        Commands::User => commands::user::show(&store)?,
        Commands::Route { .. } => {}
    }
    Ok(())
}
