//! Stock status shown next to the price.

use serde::{Deserialize, Serialize};

/// Stock counts strictly below this trigger the low-stock warning.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Stock banner state for the detail panel and buy bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "remaining", rename_all = "snake_case")]
pub enum StockStatus {
    /// The current selection cannot be purchased.
    OutOfStock,
    /// Purchasable, with only a few units left.
    LowStock(u32),
    /// Purchasable.
    InStock,
}

impl StockStatus {
    /// Derive the banner from resolved availability and the product's
    /// stock count.
    pub fn evaluate(is_available: bool, stock_count: Option<u32>) -> Self {
        if !is_available {
            return StockStatus::OutOfStock;
        }
        match stock_count {
            Some(n) if n > 0 && n < LOW_STOCK_THRESHOLD => StockStatus::LowStock(n),
            _ => StockStatus::InStock,
        }
    }

    /// Check if the banner allows purchase.
    pub fn is_purchasable(&self) -> bool {
        !matches!(self, StockStatus::OutOfStock)
    }

    /// Human-readable banner text.
    pub fn message(&self) -> String {
        match self {
            StockStatus::OutOfStock => "Out of stock".to_string(),
            StockStatus::LowStock(n) => format!("Only {n} left in stock"),
            StockStatus::InStock => "In stock".to_string(),
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}
