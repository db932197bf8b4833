//! In-memory catalog backing the storefront.
//!
//! One hand-written detail product; any other well-formed slug yields a
//! generated product whose numbers are seeded from the slug, so the same
//! page always shows the same price and stock.

use super::product::{Product, VariantDimension, VariantOption};
use super::ProductSource;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use crate::reviews::{Review, ReviewsData};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Slug of the hand-written detail product.
pub const FEATURED_SLUG: &str = "shadow-pack-backpack";

const BRAND: &str = "URBNO";
const DELIVERY: &str = "3-5 business days";
const TAX_INFO: &str = "Inclusive of all taxes";

const DEFAULT_IMAGES: [&str; 4] = [
    "https://images.unsplash.com/photo-1553062407-98eeb64c6a62?q=80&w=1200&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1441986300917-64674bd600d8?q=80&w=1200&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1583743814966-8936f5b7be1a?q=80&w=1200&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1576566588028-4147f3842f27?q=80&w=1200&auto=format&fit=crop",
];

/// The built-in catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockCatalog;

impl ProductSource for MockCatalog {
    fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, CommerceError> {
        Ok(lookup(slug))
    }
}

/// Resolve a slug to a product: the featured product, a generated one,
/// or `None` for malformed slugs.
pub fn lookup(slug: &str) -> Option<Product> {
    if slug == FEATURED_SLUG {
        return Some(shadow_pack_backpack());
    }
    generate_from_slug(slug)
}

/// A slug is non-empty, uses only `[a-z0-9-]`, and has at least one
/// alphanumeric character.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && slug.chars().any(|c| c.is_ascii_alphanumeric())
}

/// Color and size dimensions shared by every mock product.
fn standard_variants(product: Product, olive_available: bool) -> Product {
    product
        .with_dimension(
            "color",
            VariantDimension::new("Color")
                .with_option(VariantOption::new("black", "Black"))
                .with_option(VariantOption::new("navy", "Navy"))
                .with_option(VariantOption::new("olive", "Olive").with_available(olive_available)),
        )
        .with_dimension(
            "size",
            VariantDimension::new("Size").with_option(VariantOption::new("one", "One Size")),
        )
}

pub fn shadow_pack_backpack() -> Product {
    let mut product = Product::new(
        "1",
        FEATURED_SLUG,
        "Shadow Pack Backpack",
        Money::from_major(2999, Currency::INR),
    )
    .with_original_price(Money::from_major(3999, Currency::INR))
    .with_stock_count(8);

    product.brand = Some(BRAND.to_string());
    product.sku = Some("URB-SPB-001".to_string());
    product.vendor = Some(BRAND.to_string());
    product.description = "Limited numbered drop. Digital concepts built for the streets. \
        Premium materials, hand-sketched design, and timeless utility.\n\n\
        Perfect for everyday carry with multiple compartments and adjustable straps. \
        Made with sustainable materials and attention to detail."
        .to_string();
    product.features = [
        "Water-resistant material",
        "Multiple compartments",
        "Adjustable straps",
        "Limited edition numbered",
        "Hand-sketched design",
    ]
    .map(String::from)
    .to_vec();
    product.estimated_delivery = Some(DELIVERY.to_string());
    product.tax_info = Some(TAX_INFO.to_string());

    standard_variants(product, false)
}

/// Build a product for an arbitrary slug. The slug doubles as the id.
pub fn generate_from_slug(slug: &str) -> Option<Product> {
    if !is_valid_slug(slug) {
        return None;
    }

    let mut rng = StdRng::seed_from_u64(slug_seed(slug));
    let price = 1999 + rng.gen_range(0..2000);
    let original_price = 2999 + rng.gen_range(0..2000);
    let stock_count = rng.gen_range(1..=15);
    let olive_available = rng.gen_bool(0.5);

    let sku_stem: String = slug.to_uppercase().chars().take(8).collect();

    let mut product = Product::new(slug, slug, title_from_slug(slug), Money::from_major(price, Currency::INR))
        .with_original_price(Money::from_major(original_price, Currency::INR))
        .with_stock_count(stock_count);

    product.brand = Some(BRAND.to_string());
    product.sku = Some(format!("URB-{sku_stem}-{slug}"));
    product.vendor = Some(BRAND.to_string());
    product.description = "Limited numbered drop. Digital concepts built for the streets. \
        Premium materials, hand-sketched design, and timeless utility.\n\n\
        Perfect for everyday use with attention to detail and sustainable materials."
        .to_string();
    product.features = [
        "Premium materials",
        "Hand-sketched design",
        "Limited edition",
        "Sustainable production",
    ]
    .map(String::from)
    .to_vec();
    product.estimated_delivery = Some(DELIVERY.to_string());
    product.tax_info = Some(TAX_INFO.to_string());

    Some(standard_variants(product, olive_available))
}

/// "oversized-hoodie" -> "Oversized Hoodie".
pub fn title_from_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// FNV-1a over the slug bytes; stable across builds and platforms.
fn slug_seed(slug: &str) -> u64 {
    slug.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

/// Gallery images for a product page.
pub fn product_images(_slug: &str) -> Vec<String> {
    DEFAULT_IMAGES.iter().map(|url| url.to_string()).collect()
}

/// Reviews shown on every detail page.
pub fn product_reviews(_product_id: &str) -> ReviewsData {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN);

    ReviewsData {
        average_rating: 4.5,
        total_reviews: 24,
        distribution: [0, 1, 3, 8, 12],
        reviews: vec![
            Review {
                id: "1".to_string(),
                author: "Alex M.".to_string(),
                rating: 5,
                title: Some("Perfect backpack!".to_string()),
                comment: "Love the design and quality. The compartments are well thought out \
                    and the material feels premium. Highly recommend!"
                    .to_string(),
                date: date(2024, 1, 15),
                verified: true,
            },
            Review {
                id: "2".to_string(),
                author: "Sarah K.".to_string(),
                rating: 4,
                title: Some("Great quality".to_string()),
                comment: "Really happy with my purchase. The backpack is sturdy and looks great. \
                    Only minor issue is the strap adjustment could be easier."
                    .to_string(),
                date: date(2024, 1, 10),
                verified: true,
            },
            Review {
                id: "3".to_string(),
                author: "Mike R.".to_string(),
                rating: 5,
                title: None,
                comment: "Amazing product! Worth every penny. The limited edition numbering is a nice touch."
                    .to_string(),
                date: date(2024, 1, 5),
                verified: true,
            },
        ],
    }
}
