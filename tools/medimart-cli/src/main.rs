//! MediMart CLI - drive the storefront core from a terminal.
//!
//! Commands:
//! - `medimart list` - Search, sort and page through a catalog file
//! - `medimart cart` - Show or change the persisted cart
//! - `medimart summary` - Price the cart
//! - `medimart checkout` - Pay for the cart through a simulated processor
//! - `medimart gate` - Check whether a user may open a dashboard route
//! - `medimart config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{CartArgs, CheckoutArgs, ConfigArgs, GateArgs, ListArgs};

/// MediMart CLI - browse, fill a cart and check out against local storage
#[derive(Parser)]
#[command(name = "medimart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog medicines
    List(ListArgs),

    /// Show or change the cart
    Cart(CartArgs),

    /// Show the cart's pricing summary
    Summary,

    /// Check out the cart
    Checkout(CheckoutArgs),

    /// Check route access for a user
    Gate(GateArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Send library logs to stderr. `RUST_LOG` wins; otherwise `-v` shows debug
/// events from the MediMart crates and the default is warnings only.
fn init_tracing(verbose: bool, json: bool) {
    let default_filter = if verbose {
        "medimart_cli=debug,medimart_commerce=debug,medimart_auth=debug,medimart_cache=debug"
    } else {
        "warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.json);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::List(args) => commands::list::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Summary => commands::summary::run(&ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Gate(args) => commands::gate::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
