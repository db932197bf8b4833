//! Local cart management.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use serde_json::json;
use urbno_commerce::cart::Cart;
use urbno_commerce::ids::LineItemId;

use super::{open_view, CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    let mut cart = Cart::load(&store)?;
    ctx.output
        .debug(&format!("Store: {}", ctx.store_dir().display()));

    let changed = match args.command {
        CartCommand::Add {
            slug,
            selections,
            quantity,
        } => add(&mut cart, &slug, &selections, quantity, ctx)?,
        CartCommand::List => {
            list(&cart, ctx)?;
            false
        }
        CartCommand::Update { line, quantity } => {
            let id = LineItemId::new(line);
            if !cart.update_quantity(&id, quantity)? {
                bail!("No cart line with id {}", id);
            }
            if quantity <= 0 {
                ctx.output.success("Removed from cart");
            } else {
                ctx.output
                    .success(&format!("Quantity set to {}", quantity));
            }
            true
        }
        CartCommand::Remove { line } => {
            let id = LineItemId::new(line);
            if !cart.remove(&id) {
                bail!("No cart line with id {}", id);
            }
            ctx.output.success("Removed from cart");
            true
        }
        CartCommand::Clear { yes } => clear(&mut cart, yes, ctx)?,
    };

    if changed {
        cart.save(&store)?;
        if ctx.output.is_json() {
            list(&cart, ctx)?;
        }
    }

    Ok(())
}

fn add(
    cart: &mut Cart,
    slug: &str,
    selections: &[String],
    quantity: i64,
    ctx: &Context,
) -> Result<bool> {
    let view = open_view(ctx, slug, selections, Some(quantity))?;
    let request = view.cart_request()?;
    let label = request.variant_label.clone();
    let title = request.title.clone();
    let line = cart.add(request)?;

    let held = cart.get(&line).map(|item| item.quantity).unwrap_or_default();
    ctx.output.success(&format!(
        "Added {} x {}{} (line {}, now {})",
        view.quantity(),
        title,
        if label.is_empty() {
            String::new()
        } else {
            format!(" [{}]", label)
        },
        line,
        held
    ));
    if let Some(item) = cart.get(&line).filter(|item| item.max_quantity.is_some()) {
        if item.quantity == item.limit() {
            ctx.output
                .warn(&format!("Line is at the stock limit ({})", item.limit()));
        }
    }
    Ok(true)
}

fn list(cart: &Cart, ctx: &Context) -> Result<()> {
    let subtotal = cart.subtotal()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "items": cart.items,
            "item_count": cart.item_count(),
            "subtotal": subtotal,
        }));
        return Ok(());
    }

    ctx.output.header("Cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    let widths = [16, 26, 28, 5, 10];
    ctx.output
        .table_row(&["LINE", "PRODUCT", "VARIANT", "QTY", "TOTAL"], &widths);
    for item in &cart.items {
        let quantity = item.quantity.to_string();
        let total = item.total_price.display_compact();
        ctx.output.table_row(
            &[item.id.as_str(), &item.title, &item.variant_label, &quantity, &total],
            &widths,
        );
    }
    ctx.output.line("");
    ctx.output.kv("Items", &cart.item_count().to_string());
    ctx.output.kv("Subtotal", &subtotal.display_compact());
    Ok(())
}

fn clear(cart: &mut Cart, yes: bool, ctx: &Context) -> Result<bool> {
    if cart.is_empty() {
        ctx.output.info("Your cart is already empty");
        return Ok(false);
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} items from the cart?", cart.item_count()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cart left unchanged");
            return Ok(false);
        }
    }

    cart.clear();
    ctx.output.success("Cart cleared");
    Ok(true)
}
