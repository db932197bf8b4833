//! Product and variant catalog types.

use crate::ids::ProductId;
use crate::money::Money;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Selectable dimensions of a product, keyed by dimension key in catalog
/// order.
pub type Variants = IndexMap<String, VariantDimension>;

/// A product as shown on the detail page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// URL-friendly slug.
    pub slug: String,
    /// Product title.
    pub title: String,
    /// Brand line shown above the title.
    #[serde(default)]
    pub brand: Option<String>,
    /// Stock keeping unit.
    #[serde(default)]
    pub sku: Option<String>,
    /// Vendor name.
    #[serde(default)]
    pub vendor: Option<String>,
    /// Long description; paragraphs separated by blank lines.
    #[serde(default)]
    pub description: String,
    /// Base price before variant adjustments.
    pub price: Money,
    /// "Was" price for the struck-through display. Never used for pricing.
    #[serde(default)]
    pub original_price: Option<Money>,
    /// Product-level availability override.
    pub in_stock: bool,
    /// Units on hand, when known.
    #[serde(default)]
    pub stock_count: Option<u32>,
    /// Selectable dimensions (color, size, ...).
    #[serde(default)]
    pub variants: Variants,
    /// Feature bullet points.
    #[serde(default)]
    pub features: Vec<String>,
    /// Delivery estimate, e.g. "3-5 business days".
    #[serde(default)]
    pub estimated_delivery: Option<String>,
    /// Tax note, e.g. "Inclusive of all taxes".
    #[serde(default)]
    pub tax_info: Option<String>,
}

impl Product {
    /// Create an in-stock product with no variants.
    pub fn new(
        id: impl Into<ProductId>,
        slug: impl Into<String>,
        title: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            title: title.into(),
            brand: None,
            sku: None,
            vendor: None,
            description: String::new(),
            price,
            original_price: None,
            in_stock: true,
            stock_count: None,
            variants: Variants::new(),
            features: Vec::new(),
            estimated_delivery: None,
            tax_info: None,
        }
    }

    /// Add a dimension under `key`.
    pub fn with_dimension(mut self, key: impl Into<String>, dimension: VariantDimension) -> Self {
        self.variants.insert(key.into(), dimension);
        self
    }

    pub fn with_original_price(mut self, original_price: Money) -> Self {
        self.original_price = Some(original_price);
        self
    }

    pub fn with_stock_count(mut self, stock_count: u32) -> Self {
        self.stock_count = Some(stock_count);
        self
    }

    /// Look up a dimension by key, ignoring case.
    pub fn dimension(&self, key: &str) -> Option<&VariantDimension> {
        self.variants
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, dimension)| dimension)
    }

    /// Check if the product has any selectable dimension.
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Report catalog data problems. The resolvers tolerate all of them;
    /// callers log them as data-quality warnings.
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();
        let mut seen_keys = HashSet::new();

        for (key, dimension) in &self.variants {
            if !seen_keys.insert(key.to_lowercase()) {
                issues.push(CatalogIssue::DuplicateDimension { key: key.clone() });
            }
            if dimension.options.is_empty() {
                issues.push(CatalogIssue::EmptyDimension { key: key.clone() });
                continue;
            }
            let mut seen_ids = HashSet::new();
            for option in &dimension.options {
                if !seen_ids.insert(option.id.as_str()) {
                    issues.push(CatalogIssue::DuplicateOption {
                        key: key.clone(),
                        option_id: option.id.clone(),
                    });
                }
            }
            if !dimension.has_available() {
                issues.push(CatalogIssue::NoAvailableOption { key: key.clone() });
            }
        }

        issues
    }
}

/// A data-quality problem in a product's variant catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogIssue {
    /// Dimension has no options at all.
    EmptyDimension { key: String },
    /// Every option in the dimension is unavailable.
    NoAvailableOption { key: String },
    /// Option id repeated within one dimension.
    DuplicateOption { key: String, option_id: String },
    /// Two keys collide once lower-cased.
    DuplicateDimension { key: String },
}

impl std::fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogIssue::EmptyDimension { key } => {
                write!(f, "variant dimension '{key}' has no options")
            }
            CatalogIssue::NoAvailableOption { key } => {
                write!(f, "variant dimension '{key}' has no available option")
            }
            CatalogIssue::DuplicateOption { key, option_id } => {
                write!(f, "option id '{option_id}' repeated in dimension '{key}'")
            }
            CatalogIssue::DuplicateDimension { key } => {
                write!(f, "dimension key '{key}' collides with another key ignoring case")
            }
        }
    }
}

/// One selectable axis of a product (e.g., Color).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariantDimension {
    /// Display name (e.g., "Color").
    pub name: String,
    /// Options in display order.
    #[serde(default)]
    pub options: Vec<VariantOption>,
}

impl VariantDimension {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
        }
    }

    /// Append an option.
    pub fn with_option(mut self, option: VariantOption) -> Self {
        self.options.push(option);
        self
    }

    /// Find an option by id.
    pub fn option(&self, id: &str) -> Option<&VariantOption> {
        self.options.iter().find(|o| o.id == id)
    }

    /// First available option in catalog order.
    pub fn first_available(&self) -> Option<&VariantOption> {
        self.options.iter().find(|o| o.available)
    }

    /// Check if at least one option can be selected.
    pub fn has_available(&self) -> bool {
        self.options.iter().any(|o| o.available)
    }
}

/// One concrete choice within a dimension (e.g., Color: Black).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariantOption {
    /// Identifier, unique within its dimension.
    pub id: String,
    /// Display label.
    pub value: String,
    /// Whether this option can currently be selected.
    pub available: bool,
    /// Adjustment to the base price in minor units of the product currency.
    #[serde(default)]
    pub price_delta: Option<i64>,
}

impl VariantOption {
    /// An available option with no price adjustment.
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            available: true,
            price_delta: None,
        }
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    pub fn with_price_delta(mut self, delta: i64) -> Self {
        self.price_delta = Some(delta);
        self
    }
}
