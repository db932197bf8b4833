//! Shop listing cards, filters and related-product rails.

use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category filter value that matches every card.
pub const ALL_CATEGORIES: &str = "All";

/// Categories offered by the shop filter bar, in display order.
pub const SHOP_CATEGORIES: [&str; 8] = [
    ALL_CATEGORIES,
    "Hoodies",
    "Tees",
    "Bags",
    "Accessories",
    "Footwear",
    "Jackets",
    "Bottoms",
];

/// Merchandising badge on a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Badge {
    Limited,
    Trending,
    EditorsPick,
}

impl Badge {
    pub fn label(&self) -> &'static str {
        match self {
            Badge::Limited => "Limited",
            Badge::Trending => "Trending",
            Badge::EditorsPick => "Editor's Pick",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A product tile in the shop grid or a related-products rail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCard {
    pub id: u32,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub category: Option<String>,
    pub price: Money,
    #[serde(default)]
    pub original_price: Option<Money>,
    #[serde(default)]
    pub badge: Option<Badge>,
}

impl ProductCard {
    fn new(id: u32, title: &str, price: i64, original_price: Option<i64>) -> Self {
        Self {
            id,
            title: title.to_string(),
            slug: slugify(title),
            category: None,
            price: Money::from_major(price, Currency::INR),
            original_price: original_price.map(|p| Money::from_major(p, Currency::INR)),
            badge: None,
        }
    }

    fn in_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    fn with_badge(mut self, badge: Badge) -> Self {
        self.badge = Some(badge);
        self
    }
}

/// The shop grid.
pub fn shop_products() -> Vec<ProductCard> {
    vec![
        ProductCard::new(1, "Oversized Graphic Tee", 699, Some(999))
            .in_category("Tees")
            .with_badge(Badge::Trending),
        ProductCard::new(2, "Minimal Logo Tee", 499, Some(799))
            .in_category("Tees")
            .with_badge(Badge::EditorsPick),
        ProductCard::new(3, "Vintage Wash Tee", 749, Some(1199))
            .in_category("Tees")
            .with_badge(Badge::Limited),
        ProductCard::new(4, "Color Block Tee", 599, Some(899)).in_category("Tees"),
        ProductCard::new(5, "Typography Statement Tee", 549, Some(799))
            .in_category("Tees")
            .with_badge(Badge::Trending),
        ProductCard::new(6, "Abstract Art Tee", 649, Some(999))
            .in_category("Tees")
            .with_badge(Badge::Limited),
        ProductCard::new(7, "Oversized Hoodie", 799, Some(1499))
            .in_category("Hoodies")
            .with_badge(Badge::Trending),
        ProductCard::new(8, "Zip-Up Hoodie", 749, Some(1299))
            .in_category("Hoodies")
            .with_badge(Badge::EditorsPick),
    ]
}

/// "You may also like" rail under the detail page.
pub fn related_products() -> Vec<ProductCard> {
    vec![
        ProductCard::new(2, "Numbered Hoodie", 2499, Some(2999)),
        ProductCard::new(3, "URBNO Cap", 999, None),
        ProductCard::new(4, "Paper Tote", 799, None),
        ProductCard::new(5, "Canvas Sneaker", 3499, Some(3999)),
    ]
}

/// Price band filter. Bounds are in major units, lower bound inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PriceBand {
    #[default]
    All,
    Under1000,
    From1000To2000,
    From2000To4000,
    Above4000,
}

impl PriceBand {
    pub const ALL: [PriceBand; 5] = [
        PriceBand::All,
        PriceBand::Under1000,
        PriceBand::From1000To2000,
        PriceBand::From2000To4000,
        PriceBand::Above4000,
    ];

    /// Check if a price falls inside the band.
    pub fn contains(&self, price: &Money) -> bool {
        let at_least = |major: i64| price.minor_units >= Money::from_major(major, price.currency).minor_units;
        match self {
            PriceBand::All => true,
            PriceBand::Under1000 => !at_least(1000),
            PriceBand::From1000To2000 => at_least(1000) && !at_least(2000),
            PriceBand::From2000To4000 => at_least(2000) && !at_least(4000),
            PriceBand::Above4000 => at_least(4000),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceBand::All => "All",
            PriceBand::Under1000 => "Under 1000",
            PriceBand::From1000To2000 => "1000-2000",
            PriceBand::From2000To4000 => "2000-4000",
            PriceBand::Above4000 => "Above 4000",
        }
    }
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PriceBand {
    type Err = String;

    /// Accepts the display label or its slug (`under-1000`, `above-4000`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = slugify(s);
        PriceBand::ALL
            .into_iter()
            .find(|band| slugify(band.label()) == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown price band '{s}' (expected one of: {})",
                    PriceBand::ALL.map(|b| b.label()).join(", ")
                )
            })
    }
}

/// Category and price filters of the shop page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShopFilter {
    /// `None` or [`ALL_CATEGORIES`] matches every card.
    pub category: Option<String>,
    pub price: PriceBand,
}

impl ShopFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn price(mut self, band: PriceBand) -> Self {
        self.price = band;
        self
    }

    /// Check if a card passes both filters. Category matching is exact.
    pub fn matches(&self, card: &ProductCard) -> bool {
        let category_match = match self.category.as_deref() {
            None | Some(ALL_CATEGORIES) => true,
            Some(wanted) => card.category.as_deref() == Some(wanted),
        };
        category_match && self.price.contains(&card.price)
    }

    /// Cards passing the filter, in listing order.
    pub fn apply<'a>(&self, cards: &'a [ProductCard]) -> Vec<&'a ProductCard> {
        cards.iter().filter(|card| self.matches(card)).collect()
    }
}

/// Lower-case `title`, collapse every run of non-alphanumerics into one
/// `-`, and trim dashes from both ends.
///
/// ```
/// use urbno_commerce::catalog::slugify;
/// assert_eq!(slugify("Zip-Up Hoodie"), "zip-up-hoodie");
/// assert_eq!(slugify("  URBNO   Cap! "), "urbno-cap");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
