//! Write-a-review form.

use anyhow::{bail, Result};
use urbno_commerce::account::Accounts;
use urbno_commerce::reviews::{ReviewDraft, REVIEW_THANKS};

use super::{open_view, ReviewArgs};
use crate::context::Context;

/// Run the review command.
pub fn run(args: ReviewArgs, ctx: &Context) -> Result<()> {
    let view = open_view(ctx, &args.slug, &[], None)?;
    let accounts = Accounts::load(&ctx.store()?)?;

    let draft = ReviewDraft::new(args.rating, args.title, args.comment);
    let review = match draft.validate(&accounts) {
        Ok(review) => review,
        Err(errors) => {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            bail!("{}", messages.join("; "));
        }
    };
    tracing::debug!(product = %view.product().id, rating = review.rating, "review accepted");

    if ctx.output.is_json() {
        ctx.output.json(&review);
        return Ok(());
    }

    ctx.output.success(REVIEW_THANKS);
    ctx.output.kv("Product", &view.product().title);
    ctx.output.kv("Rating", &crate::output::stars(review.rating));
    if let Some(title) = &review.title {
        ctx.output.kv("Title", title);
    }
    ctx.output.kv("By", &review.author);

    Ok(())
}
