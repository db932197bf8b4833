//! Product catalog module.
//!
//! Contains product and variant types, stock status, the shop listing and
//! the built-in mock catalog.

mod inventory;
mod listing;
pub mod mock;
mod product;

use crate::error::CommerceError;

pub use inventory::{StockStatus, LOW_STOCK_THRESHOLD};
pub use listing::{
    related_products, shop_products, slugify, Badge, PriceBand, ProductCard, ShopFilter,
    ALL_CATEGORIES, SHOP_CATEGORIES,
};
pub use mock::MockCatalog;
pub use product::{CatalogIssue, Product, VariantDimension, VariantOption, Variants};

/// Where product pages get their data.
pub trait ProductSource {
    /// Find a product by slug. `Ok(None)` means the page does not exist.
    fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, CommerceError>;
}
