//! Human-readable description of the current selection.

use super::selection::{selected_option, SelectionState};
use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// One dimension's entry in the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSummaryItem {
    /// Dimension key as it appears in the catalog.
    pub key: String,
    /// Dimension display name.
    pub name: String,
    /// Selected option label; empty when nothing resolves.
    pub value: String,
}

impl VariantSummaryItem {
    pub fn is_resolved(&self) -> bool {
        !self.value.is_empty()
    }
}

/// One item per dimension, in catalog order.
pub fn variant_summary(product: &Product, selection: &SelectionState) -> Vec<VariantSummaryItem> {
    product
        .variants
        .iter()
        .map(|(key, dimension)| VariantSummaryItem {
            key: key.clone(),
            name: dimension.name.clone(),
            value: selected_option(key, dimension, selection)
                .map(|option| option.value.clone())
                .unwrap_or_default(),
        })
        .collect()
}

/// "Color: Black, Size: One Size". Unresolved dimensions are left out.
pub fn summary_line(items: &[VariantSummaryItem]) -> String {
    items
        .iter()
        .filter(|item| item.is_resolved())
        .map(|item| format!("{}: {}", item.name, item.value))
        .collect::<Vec<_>>()
        .join(", ")
}
