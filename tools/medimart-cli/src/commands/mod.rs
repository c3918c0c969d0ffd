//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod gate;
pub mod list;
pub mod summary;

use std::path::PathBuf;

use clap::{Args, Subcommand};
use medimart_auth::Role;
use medimart_commerce::listing::{SortDirection, SortKey};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Free-text search over name, generic name and company.
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Sort field (name, generic-name, company, category, price, discount, stock).
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Sort direction.
    #[arg(long, default_value = "asc")]
    pub dir: SortDirection,

    /// Page to show (1-indexed).
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Items per page (default: from config).
    #[arg(long)]
    pub per_page: Option<usize>,

    /// Catalog JSON file (default: from config).
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add a medicine from the catalog.
    Add {
        /// Medicine id.
        id: String,
        /// Units to add.
        #[arg(short, long, default_value = "1")]
        quantity: i64,
        /// Catalog JSON file (default: from config).
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Replace a line's quantity; 0 removes the line.
    Set {
        /// Medicine id.
        id: String,
        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line.
    Remove {
        /// Medicine id.
        id: String,
    },
    /// Empty the cart.
    Clear,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    #[command(subcommand)]
    pub command: Option<CheckoutCommand>,

    /// Customer email.
    #[arg(short, long)]
    pub email: Option<String>,

    /// Make the simulated processor decline the card.
    #[arg(long)]
    pub decline: bool,

    /// Make the simulated processor unreachable.
    #[arg(long, conflicts_with = "decline")]
    pub offline: bool,
}

#[derive(Subcommand)]
pub enum CheckoutCommand {
    /// Show the last order confirmation.
    LastOrder,
}

/// Arguments for the gate command.
#[derive(Args)]
pub struct GateArgs {
    /// Route to check.
    #[arg(long, default_value = "/dashboard")]
    pub path: String,

    /// Role the route needs; omit for routes open to any signed-in user.
    #[arg(long)]
    pub required: Option<Role>,

    /// Signed-in email; omit to check as a signed-out visitor.
    #[arg(short, long)]
    pub email: Option<String>,

    /// Role the directory holds for the email; omit to simulate a missing record.
    #[arg(short, long)]
    pub role: Option<Role>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Write a default medimart.toml.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
