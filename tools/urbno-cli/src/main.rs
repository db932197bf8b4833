//! URBNO CLI - Browse the mock storefront from the terminal.
//!
//! Commands:
//! - `urbno catalog` - List the shop grid with filters
//! - `urbno show` - Open a product page and pick a variant
//! - `urbno cart` - Manage the local cart
//! - `urbno review` - Check and submit a product review
//! - `urbno account` - Mock sign-up and sign-in
//! - `urbno drop` - Countdown to the next drop
//! - `urbno config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AccountArgs, CartArgs, CatalogArgs, ConfigArgs, DropArgs, ReviewArgs, ShowArgs};

/// URBNO CLI - Streetwear storefront in your terminal
#[derive(Parser)]
#[command(name = "urbno")]
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
    /// List products in the shop
    Catalog(CatalogArgs),

    /// Show a product page
    Show(ShowArgs),

    /// Manage the local cart
    Cart(CartArgs),

    /// Write a review for a product
    Review(ReviewArgs),

    /// Sign up, sign in or out
    Account(AccountArgs),

    /// Countdown to the next drop
    Drop(DropArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx),
        Commands::Show(args) => commands::show::run(args, &ctx),
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Review(args) => commands::review::run(args, &ctx),
        Commands::Account(args) => commands::account::run(args, &ctx),
        Commands::Drop(args) => commands::drop::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Logs go to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
