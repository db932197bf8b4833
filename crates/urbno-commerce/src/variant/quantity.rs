//! Quantity bounds for the steppers.

use serde::{Deserialize, Serialize};

/// Bound a requested quantity to what can be bought.
///
/// Always at least 1. Unavailable combinations pin to 1. A known stock
/// count caps the quantity, and a count of 0 still yields 1.
pub fn clamp_quantity(requested: i64, stock_count: Option<u32>, is_available: bool) -> u32 {
    if !is_available {
        return 1;
    }
    let upper = stock_count.map_or(u32::MAX, |n| n.max(1));
    requested.clamp(1, i64::from(upper)) as u32
}

/// The +/- stepper pair for one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityControl {
    pub stock_count: Option<u32>,
    pub is_available: bool,
}

impl QuantityControl {
    pub fn new(stock_count: Option<u32>, is_available: bool) -> Self {
        Self {
            stock_count,
            is_available,
        }
    }

    pub fn clamp(&self, requested: i64) -> u32 {
        clamp_quantity(requested, self.stock_count, self.is_available)
    }

    /// "-" is disabled at 1.
    pub fn can_decrement(&self, current: u32) -> bool {
        current > 1
    }

    /// "+" is disabled when unavailable or at the stock cap.
    pub fn can_increment(&self, current: u32) -> bool {
        if !self.is_available {
            return false;
        }
        match self.stock_count {
            Some(cap) => current < cap,
            None => current < u32::MAX,
        }
    }

    /// Quantity after pressing "-".
    pub fn decrement(&self, current: u32) -> u32 {
        self.clamp(i64::from(current) - 1)
    }

    /// Quantity after pressing "+". Holds when the button is disabled.
    pub fn increment(&self, current: u32) -> u32 {
        if !self.can_increment(current) {
            return self.clamp(i64::from(current));
        }
        self.clamp(i64::from(current) + 1)
    }
}
