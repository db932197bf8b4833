//! CLI command implementations.

pub mod account;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod drop;
pub mod review;
pub mod show;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use urbno_commerce::catalog::MockCatalog;
use urbno_commerce::pdp::{ProductView, ViewState};

use crate::context::Context;

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Only show this category (e.g. "Tees").
    #[arg(long)]
    pub category: Option<String>,

    /// Price band: all, under-1000, 1000-2000, 2000-4000, above-4000.
    #[arg(long)]
    pub price: Option<String>,

    /// Show the related-products rail instead of the shop grid.
    #[arg(long)]
    pub related: bool,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Product slug.
    pub slug: String,

    /// Select an option, as `dimension=option` (repeatable).
    #[arg(short, long = "select", value_name = "KEY=OPTION")]
    pub selections: Vec<String>,

    /// Requested quantity; clamped to stock.
    #[arg(short, long)]
    pub quantity: Option<i64>,

    /// Also print reviews.
    #[arg(long)]
    pub reviews: bool,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Add a product to the cart.
    Add {
        /// Product slug.
        slug: String,

        /// Select an option, as `dimension=option` (repeatable).
        #[arg(short, long = "select", value_name = "KEY=OPTION")]
        selections: Vec<String>,

        /// Quantity to add; clamped to stock.
        #[arg(short, long, default_value = "1")]
        quantity: i64,
    },
    /// List cart contents.
    List,
    /// Change the quantity of a line; 0 removes it.
    Update {
        /// Line item id.
        line: String,
        /// New quantity.
        quantity: i64,
    },
    /// Remove a line.
    Remove {
        /// Line item id.
        line: String,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the review command.
#[derive(Args)]
pub struct ReviewArgs {
    /// Product slug.
    pub slug: String,

    /// Star rating, 1 to 5.
    #[arg(short, long, default_value_t = 0)]
    pub rating: u8,

    /// Optional headline.
    #[arg(short, long, default_value = "")]
    pub title: String,

    /// Review text.
    #[arg(short, long, default_value = "")]
    pub comment: String,
}

/// Arguments for the account command.
#[derive(Args)]
pub struct AccountArgs {
    #[command(subcommand)]
    pub command: AccountCommand,
}

#[derive(Subcommand)]
pub enum AccountCommand {
    /// Create an account, or sign in if it exists.
    Signup {
        /// Email address.
        email: String,
    },
    /// Sign in to an existing account.
    Login {
        /// Email address.
        email: String,
    },
    /// Sign out.
    Logout,
    /// Show the signed-in user.
    Whoami,
}

/// Arguments for the drop command.
#[derive(Args)]
pub struct DropArgs {
    /// Days until the drop.
    #[arg(short, long, default_value_t = urbno_commerce::promo::DEFAULT_DROP_DAYS,
          value_parser = clap::value_parser!(i64).range(0..=MAX_DROP_DAYS))]
    pub days: i64,

    /// Hours until the flash sale ends.
    #[arg(long, default_value_t = 26, value_parser = clap::value_parser!(i64).range(0..=MAX_DROP_DAYS * 24))]
    pub flash_hours: i64,

    /// Flash-sale discount in percent.
    #[arg(long, default_value_t = urbno_commerce::promo::DEFAULT_FLASH_DISCOUNT,
          value_parser = clap::value_parser!(u32).range(1..=90))]
    pub discount: u32,
}

/// Upper bound for countdown lengths.
pub const MAX_DROP_DAYS: i64 = 365;

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
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

/// Open a product page and apply `dimension=option` selections and a
/// requested quantity, in that order.
pub(crate) fn open_view(
    ctx: &Context,
    slug: &str,
    selections: &[String],
    quantity: Option<i64>,
) -> Result<ProductView> {
    let policy = ctx.config.catalog.availability;
    let mut view = ViewState::load(&MockCatalog, slug, policy).into_view(slug)?;

    for raw in selections {
        let (key, option) = parse_selection(raw)?;
        let Some(dimension) = view.product().dimension(key) else {
            bail!("'{}' has no '{}' option group", view.product().title, key);
        };
        if dimension.option(option).is_none() {
            let known: Vec<&str> = dimension.options.iter().map(|o| o.id.as_str()).collect();
            bail!(
                "Unknown {} '{}' (choose from: {})",
                dimension.name.to_lowercase(),
                option,
                known.join(", ")
            );
        }
        view.select(key, option);
    }

    if let Some(requested) = quantity {
        let clamped = view.set_quantity(requested);
        if i64::from(clamped) != requested {
            ctx.output
                .warn(&format!("Quantity {} adjusted to {}", requested, clamped));
        }
    }

    Ok(view)
}

fn parse_selection(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((key, option)) if !key.trim().is_empty() && !option.trim().is_empty() => {
            Ok((key.trim(), option.trim()))
        }
        _ => bail!("Invalid selection '{}': expected KEY=OPTION", raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("color=olive").unwrap(), ("color", "olive"));
        assert_eq!(parse_selection(" size = one ").unwrap(), ("size", "one"));
        assert!(parse_selection("color").is_err());
        assert!(parse_selection("=olive").is_err());
        assert!(parse_selection("color=").is_err());
    }
}
