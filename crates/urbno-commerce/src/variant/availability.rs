//! Purchasability of a variant combination.

use super::selection::{selected_option, SelectionState};
use crate::catalog::Product;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// How a dimension without a usable selection is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityPolicy {
    /// Missing or stale selections do not block purchase.
    #[default]
    Permissive,
    /// Every non-empty dimension needs a selection naming a real option.
    Strict,
}

impl AvailabilityPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityPolicy::Permissive => "permissive",
            AvailabilityPolicy::Strict => "strict",
        }
    }
}

impl fmt::Display for AvailabilityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AvailabilityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "permissive" => Ok(AvailabilityPolicy::Permissive),
            "strict" => Ok(AvailabilityPolicy::Strict),
            other => Err(format!("unknown availability policy '{other}' (expected permissive or strict)")),
        }
    }
}

/// Whether the selected combination can be purchased, under the
/// permissive policy.
pub fn resolve_availability(product: &Product, selection: &SelectionState) -> bool {
    resolve_availability_with(product, selection, AvailabilityPolicy::Permissive)
}

/// Whether the selected combination can be purchased.
///
/// False when the product is out of stock or has a stock count of zero.
/// Otherwise every dimension whose selection resolves must point at an
/// available option. Empty dimensions never constrain.
pub fn resolve_availability_with(
    product: &Product,
    selection: &SelectionState,
    policy: AvailabilityPolicy,
) -> bool {
    if !product.in_stock || product.stock_count == Some(0) {
        return false;
    }

    product.variants.iter().all(|(key, dimension)| {
        if dimension.options.is_empty() {
            debug!(product = %product.id, dimension = %key, "variant dimension has no options");
            return true;
        }
        match selected_option(key, dimension, selection) {
            Some(option) => option.available,
            None => policy == AvailabilityPolicy::Permissive,
        }
    })
}
