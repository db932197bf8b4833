//! Weekly drop countdown and flash-sale banner.

use anyhow::Result;
use chrono::{Duration, Utc};
use console::style;
use serde_json::json;
use urbno_commerce::promo::{FlashSale, WeeklyDrop};

use super::DropArgs;
use crate::context::Context;

/// Run the drop command.
pub fn run(args: DropArgs, ctx: &Context) -> Result<()> {
    let now = Utc::now();
    let drop = WeeklyDrop::in_days(now, args.days);
    let sale = FlashSale::new(now + Duration::hours(args.flash_hours)).with_discount(args.discount);
    let time_left = drop.time_left(now);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "drop": {
                "starts_at": drop.starts_at,
                "live": drop.is_live(now),
                "time_left": time_left,
            },
            "flash_sale": {
                "visible": sale.is_visible(now),
                "discount_percent": sale.discount_percent,
                "ends_at": sale.ends_at,
                "headline": sale.headline(now),
            },
        }));
        return Ok(());
    }

    if sale.is_visible(now) {
        ctx.output
            .line(&style(sale.headline(now)).red().bold().to_string());
    }

    ctx.output.header("Next drop");
    if drop.is_live(now) {
        ctx.output.success("The drop is live");
    } else {
        ctx.output
            .line(&style(time_left.to_string()).bold().to_string());
        ctx.output
            .kv("Starts", &drop.starts_at.format("%a %d %b %Y, %H:%M UTC").to_string());
    }

    Ok(())
}
