//! Tote CLI - browse the catalog and manage the local cart and wishlist.
//!
//! # Usage
//!
//! ```bash
//! # Browse
//! tote products --category electronics
//! tote product 9
//!
//! # Cart
//! tote cart add 9 -q 2
//! tote cart show
//! tote cart checkout --yes
//!
//! # Wishlist
//! tote wishlist toggle 9
//! ```
//!
//! # Commands
//!
//! - `products`, `product`, `categories` - Read the remote catalog
//! - `cart` - Show and change the persisted cart
//! - `wishlist` - Show and change the persisted wishlist
//! - `reset` - Wipe all locally persisted data
//!
//! Configuration is read from the environment (see
//! [`tote_storefront::config`]); cart and wishlist files live in
//! `TOTE_DATA_DIR`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{self, Write};
use std::time::Duration;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tote_core::ProductId;
use tote_storefront::config::StorefrontConfig;
use tote_storefront::error::AppError;
use tote_storefront::state::AppState;

mod commands;
#[cfg(test)]
mod test_support;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "tote")]
#[command(author, version, about = "Tote storefront in your terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Only show this category (exact name)
        #[arg(short, long)]
        category: Option<String>,

        /// Case-insensitive text to look for in titles and descriptions
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one product
    Product {
        /// Product id
        id: ProductId,
    },
    /// List category names
    Categories,
    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Show or change the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Delete the locally stored cart and wishlist
    Reset,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add a product
    Add {
        /// Product id
        id: ProductId,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Set a product's quantity (0 or less removes it)
    Set {
        /// Product id
        id: ProductId,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove everything
    Clear {
        /// Skip the preview and empty the cart
        #[arg(short, long)]
        yes: bool,
    },
    /// Place the order
    Checkout {
        /// Skip the preview and place the order
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show saved products
    Show,
    /// Save a product
    Add {
        /// Product id
        id: ProductId,
    },
    /// Remove a saved product
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Save the product if absent, otherwise remove it
    Toggle {
        /// Product id
        id: ProductId,
    },
    /// Remove everything
    Clear,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    // Logs go to stderr so command output stays pipeable
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tote_storefront=info,tote_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            fail(&CommandError::App(AppError::Config(e)));
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    let state = match AppState::new(&config) {
        Ok(state) => state,
        Err(e) => fail(&CommandError::App(e)),
    };
    state.hydrate().await;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = run(cli.command, &state, &mut out).await;

    // Every mutation must reach disk before the process exits
    state.flush().await;

    if let Err(e) = result {
        fail(&e);
    }
}

fn fail(error: &CommandError) -> ! {
    error.capture();
    if let Some(client) = sentry::Hub::current().client() {
        client.flush(Some(Duration::from_secs(2)));
    }
    let _ = writeln!(io::stderr(), "Error: {}", error.user_message());
    std::process::exit(1);
}

async fn run(command: Commands, state: &AppState, out: &mut impl Write) -> Result<(), CommandError> {
    match command {
        Commands::Products { category, search } => {
            commands::catalog::products(state, category, search.as_deref(), out).await?;
        }
        Commands::Product { id } => commands::catalog::product(state, id, out).await?,
        Commands::Categories => commands::catalog::categories(state, out).await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(state, out)?,
            CartAction::Add { id, quantity } => {
                commands::cart::add(state, id, quantity, out).await?;
            }
            CartAction::Remove { id } => commands::cart::remove(state, id, out)?,
            CartAction::Set { id, quantity } => commands::cart::set(state, id, quantity, out)?,
            CartAction::Clear { yes } => commands::cart::clear(state, yes, out)?,
            CartAction::Checkout { yes } => commands::cart::checkout(state, yes, out)?,
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::wishlist::show(state, out)?,
            WishlistAction::Add { id } => commands::wishlist::add(state, id, out).await?,
            WishlistAction::Remove { id } => commands::wishlist::remove(state, id, out)?,
            WishlistAction::Toggle { id } => commands::wishlist::toggle(state, id, out).await?,
            WishlistAction::Clear => commands::wishlist::clear(state, out)?,
        },
        Commands::Reset => {
            state.reset().await;
            writeln!(out, "Local cart and wishlist data deleted.")?;
        }
    }
    Ok(())
}
