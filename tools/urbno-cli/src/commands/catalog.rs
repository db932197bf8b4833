//! Shop grid listing.

use anyhow::{anyhow, Result};
use console::style;
use urbno_commerce::catalog::{related_products, shop_products, PriceBand, ProductCard, ShopFilter};
use urbno_commerce::promo::{ExitIntent, ExitSignal};

use super::CatalogArgs;
use crate::context::Context;

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let cards = if args.related {
        related_products()
    } else {
        shop_products()
    };

    let mut filter = ShopFilter::new();
    if let Some(category) = args.category {
        filter = filter.category(category);
    }
    if let Some(price) = args.price.as_deref() {
        let band: PriceBand = price.parse().map_err(|e: String| anyhow!(e))?;
        filter = filter.price(band);
    }

    let matching = filter.apply(&cards);
    tracing::debug!(total = cards.len(), shown = matching.len(), "filtered shop grid");

    if ctx.output.is_json() {
        ctx.output.json(&matching);
        return Ok(());
    }

    ctx.output
        .header(if args.related { "You may also like" } else { "Shop" });

    if matching.is_empty() {
        ctx.output.info("No products match these filters");
        return Ok(());
    }

    let widths = [26, 10, 12, 14];
    ctx.output
        .table_row(&["PRODUCT", "PRICE", "WAS", "BADGE"], &widths);
    for card in matching {
        print_card(card, &widths, ctx);
    }

    if !args.related {
        exit_offer(ctx)?;
    }

    Ok(())
}

/// Leaving the shop grid counts as exit intent; the offer shows once per store.
fn exit_offer(ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    let mut gate = ExitIntent::load(&store)?;
    if gate.observe(ExitSignal::PointerLeave { y: 0 }) {
        gate.save(&store)?;
        ctx.output.line("");
        ctx.output.line(&style(gate.headline()).magenta().bold().to_string());
        ctx.output.line(&style("Join the crew: urbno account signup <email>").dim().to_string());
    }
    Ok(())
}

fn print_card(card: &ProductCard, widths: &[usize], ctx: &Context) {
    let price = card.price.display_compact();
    let was = card
        .original_price
        .map(|p| p.display_compact())
        .unwrap_or_default();
    let badge = card.badge.map(|b| b.label()).unwrap_or("");
    ctx.output
        .table_row(&[&card.title, &price, &was, badge], widths);
    ctx.output.line(&format!("    {}", style(&card.slug).dim()));
}
