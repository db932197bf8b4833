//! Effective price of a variant combination.

use super::selection::{selected_option, SelectionState};
use crate::catalog::Product;
use crate::money::Money;

/// Base price plus the `price_delta` of every resolvable selected option.
///
/// Unresolvable entries, options without a delta and empty dimensions add
/// nothing. The sum is exact and saturates at the `i64` limits.
///
/// ```
/// use urbno_commerce::catalog::mock;
/// use urbno_commerce::variant::{initialize_selection, resolve_price};
///
/// let product = mock::shadow_pack_backpack();
/// let selection = initialize_selection(&product.variants);
/// assert_eq!(resolve_price(&product, &selection), product.price);
/// ```
pub fn resolve_price(product: &Product, selection: &SelectionState) -> Money {
    let deltas: i128 = product
        .variants
        .iter()
        .filter_map(|(key, dimension)| selected_option(key, dimension, selection))
        .filter_map(|option| option.price_delta)
        .map(i128::from)
        .sum();

    let total = i128::from(product.price.minor_units) + deltas;
    let clamped = total.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64;
    Money::new(clamped, product.price.currency)
}
