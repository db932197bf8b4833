//! schema.org JSON-LD for product pages.

use crate::catalog::Product;
use crate::reviews::ReviewsData;
use chrono::{Days, NaiveDate};
use serde_json::{json, Value};

const SCHEMA_CONTEXT: &str = "https://schema.org";
const DEFAULT_BRAND: &str = "URBNO";

/// How long a quoted price stays valid.
pub const PRICE_VALID_DAYS: u64 = 365;

/// Canonical URL of a product page.
pub fn product_url(base_url: &str, slug: &str) -> String {
    format!("{}/products/{slug}", base_url.trim_end_matches('/'))
}

/// `Product` document with brand, offer and, when there are reviews, an
/// aggregate rating. The offer uses the base price; availability follows
/// the product-level stock flag.
pub fn product_json_ld(
    product: &Product,
    images: &[String],
    reviews: &ReviewsData,
    base_url: &str,
    today: NaiveDate,
) -> Value {
    let valid_until = today
        .checked_add_days(Days::new(PRICE_VALID_DAYS))
        .unwrap_or(today);
    let availability = if product.in_stock {
        "https://schema.org/InStock"
    } else {
        "https://schema.org/OutOfStock"
    };

    let mut doc = json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "Product",
        "name": product.title,
        "description": product.description,
        "image": images,
        "brand": {
            "@type": "Brand",
            "name": product.brand.as_deref().unwrap_or(DEFAULT_BRAND),
        },
        "sku": product.sku,
        "offers": {
            "@type": "Offer",
            "url": product_url(base_url, &product.slug),
            "priceCurrency": product.price.currency.code(),
            "price": product.price.to_decimal_string(),
            "priceValidUntil": valid_until.format("%Y-%m-%d").to_string(),
            "availability": availability,
            "itemCondition": "https://schema.org/NewCondition",
        },
    });

    if let (Some(rating), Some(map)) = (aggregate_rating(reviews), doc.as_object_mut()) {
        map.insert("aggregateRating".to_string(), rating);
    }
    doc
}

/// Standalone `AggregateRating`, or `None` without reviews.
pub fn aggregate_rating(reviews: &ReviewsData) -> Option<Value> {
    if !reviews.has_reviews() {
        return None;
    }
    Some(json!({
        "@type": "AggregateRating",
        "ratingValue": reviews.average_rating,
        "reviewCount": reviews.total_reviews,
        "bestRating": 5,
        "worstRating": 1,
    }))
}

/// Page metadata description: the first 160 characters of the product
/// description.
pub fn meta_description(product: &Product) -> String {
    product.description.chars().take(160).collect()
}
