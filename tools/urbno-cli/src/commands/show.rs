//! Product detail page.

use anyhow::Result;
use chrono::Utc;
use console::style;
use serde_json::json;
use urbno_commerce::catalog::mock;
use urbno_commerce::pdp::ProductView;
use urbno_commerce::reviews::ReviewsData;
use urbno_commerce::structured_data::{meta_description, product_json_ld, product_url};

use super::{open_view, ShowArgs};
use crate::context::Context;
use crate::output::{price_line, stars, stock_badge};

/// Run the show command.
pub fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let view = open_view(ctx, &args.slug, &args.selections, args.quantity)?;
    let product = view.product();
    let reviews = mock::product_reviews(product.id.as_str());
    let base_url = &ctx.config.site.base_url;

    if ctx.output.is_json() {
        let images = mock::product_images(&product.slug);
        ctx.output.json(&json!({
            "url": product_url(base_url, &product.slug),
            "description": meta_description(product),
            "selection": view.selection(),
            "summary": view.summary(),
            "buy_bar": view.buy_bar(),
            "json_ld": product_json_ld(product, &images, &reviews, base_url, Utc::now().date_naive()),
        }));
        return Ok(());
    }

    print_details(&view, &reviews, ctx);
    print_buy_bar(&view, ctx);
    if args.reviews {
        print_reviews(&reviews, ctx);
    }

    Ok(())
}

fn print_details(view: &ProductView, reviews: &ReviewsData, ctx: &Context) {
    let product = view.product();

    ctx.output.header(&product.title);
    let byline: Vec<String> = [
        product.brand.clone(),
        product.sku.as_ref().map(|sku| format!("SKU {}", sku)),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !byline.is_empty() {
        ctx.output.line(&style(byline.join("  ")).dim().to_string());
    }
    if reviews.has_reviews() {
        ctx.output.line(&format!(
            "{} {:.1} ({})",
            style(stars(reviews.rounded_stars())).yellow(),
            reviews.average_rating,
            reviews.count_label()
        ));
    }
    ctx.output.line("");
    ctx.output.line(&price_line(&view.price_display()));
    if let Some(tax_info) = &product.tax_info {
        ctx.output.line(&style(tax_info).dim().to_string());
    }
    ctx.output.line(&stock_badge(&view.stock_banner()));

    for (key, dimension) in &product.variants {
        let selected = view.selection().get(key);
        let options: Vec<String> = dimension
            .options
            .iter()
            .map(|option| {
                let mut label = option.value.clone();
                if let Some(delta) = option.price_delta.filter(|d| *d != 0) {
                    label.push_str(&format!(" ({:+})", delta / product.price.currency.minor_per_major()));
                }
                if Some(option.id.as_str()) == selected {
                    style(format!("[{}]", label)).cyan().bold().to_string()
                } else if !option.available {
                    style(label).dim().strikethrough().to_string()
                } else {
                    label
                }
            })
            .collect();
        ctx.output.kv(&dimension.name, &options.join("  "));
    }

    if !product.description.is_empty() {
        ctx.output.line("");
        ctx.output.line(&product.description);
    }
    for feature in &product.features {
        ctx.output.list_item(feature);
    }
    if let Some(delivery) = &product.estimated_delivery {
        ctx.output.kv("Delivery", delivery);
    }
}

fn print_buy_bar(view: &ProductView, ctx: &Context) {
    let bar = view.buy_bar();

    ctx.output.line("");
    ctx.output.line(&style("─".repeat(48)).dim().to_string());
    ctx.output.line(&format!("{}  {}", style(&bar.title).bold(), price_line(&bar.price)));
    if !bar.summary.is_empty() {
        ctx.output.line(&bar.summary);
    }
    let minus = if bar.can_decrement { "-" } else { " " };
    let plus = if bar.can_increment { "+" } else { " " };
    ctx.output
        .line(&format!("Qty  [{}] {} [{}]", minus, bar.quantity, plus));

    if bar.can_purchase {
        ctx.output.success(&format!(
            "Add to cart: urbno cart add {} {}",
            view.product().slug,
            cart_flags(view)
        ));
    } else {
        ctx.output.warn("This combination is out of stock");
    }
}

/// `--select` and `--quantity` flags that reproduce the current view.
fn cart_flags(view: &ProductView) -> String {
    let mut flags: Vec<String> = view
        .selection()
        .iter()
        .map(|(key, option)| format!("--select {}={}", key, option))
        .collect();
    if view.quantity() > 1 {
        flags.push(format!("--quantity {}", view.quantity()));
    }
    flags.join(" ")
}

fn print_reviews(reviews: &ReviewsData, ctx: &Context) {
    ctx.output.header("Reviews");
    if !reviews.has_reviews() {
        ctx.output.info("No reviews yet");
        return;
    }

    for stars_value in (1..=5u8).rev() {
        ctx.output.line(&format!(
            "  {}  {:>3}%  ({})",
            stars(stars_value),
            reviews.percentage(stars_value),
            reviews.count(stars_value)
        ));
    }
    for review in reviews.top_reviews() {
        ctx.output.line("");
        let verified = if review.verified { " · Verified" } else { "" };
        ctx.output.line(&format!(
            "{} {}",
            style(stars(review.rating)).yellow(),
            style(&review.title).bold()
        ));
        ctx.output.line(
            &style(format!("{} · {}{}", review.author, review.date, verified))
                .dim()
                .to_string(),
        );
        ctx.output.line(&review.comment);
    }
}
