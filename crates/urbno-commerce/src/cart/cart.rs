//! Cart and line item types.

use crate::error::CommerceError;
use crate::ids::{LineItemId, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// Everything needed to put the current product view into the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartRequest {
    pub product_id: ProductId,
    pub slug: String,
    pub title: String,
    /// Lower-cased dimension key to option id.
    pub selections: BTreeMap<String, String>,
    /// "Color: Black, Size: One Size".
    pub variant_label: String,
    /// Resolved price of the selected combination.
    pub unit_price: Money,
    pub quantity: i64,
    /// Units on hand for the product, when known. A line never holds more.
    #[serde(default)]
    pub max_quantity: Option<u32>,
}

/// The device-local shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Items in the cart.
    pub items: Vec<LineItem>,
    /// Cart currency.
    pub currency: Currency,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        let now = current_timestamp();
        Self {
            items: Vec::new(),
            currency,
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a product view's selection to the cart.
    ///
    /// A line with the same product and selections absorbs the quantity,
    /// capped at the request's `max_quantity` and at
    /// [`MAX_QUANTITY_PER_ITEM`]. Returns the id of the line that now
    /// holds the item.
    ///
    /// Returns an error if:
    /// - Quantity is not positive
    /// - A new line would exceed MAX_QUANTITY_PER_ITEM
    /// - The price is in another currency than the cart
    pub fn add(&mut self, request: CartRequest) -> Result<LineItemId, CommerceError> {
        if request.quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(request.quantity));
        }
        if request.unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: request.unit_price.currency.code().to_string(),
            });
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == request.product_id && i.selections == request.selections)
        {
            existing.max_quantity = request.max_quantity;
            existing.quantity = existing
                .quantity
                .saturating_add(request.quantity)
                .min(existing.limit());
            existing.update_total()?;
            debug!(line = %existing.id, quantity = existing.quantity, "merged cart line");
            self.updated_at = current_timestamp();
            return Ok(existing.id.clone());
        }

        if request.quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                request.quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        let mut item = LineItem::new(request)?;
        item.quantity = item.quantity.min(item.limit());
        item.update_total()?;
        let id = item.id.clone();
        debug!(line = %id, product = %item.product_id, "new cart line");
        self.items.push(item);
        self.updated_at = current_timestamp();
        Ok(id)
    }

    /// Update item quantity.
    ///
    /// If quantity is <= 0, removes the item. Quantities above the line's
    /// stock cap or [`MAX_QUANTITY_PER_ITEM`] are rejected. Returns
    /// `Ok(false)` when no line has that id.
    pub fn update_quantity(
        &mut self,
        line_item_id: &LineItemId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove(line_item_id));
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        if let Some(item) = self.items.iter_mut().find(|i| &i.id == line_item_id) {
            if quantity > item.limit() {
                return Err(CommerceError::QuantityExceedsLimit(quantity, item.limit()));
            }
            item.quantity = quantity;
            item.update_total()?;
            self.updated_at = current_timestamp();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Remove an item from the cart.
    pub fn remove(&mut self, line_item_id: &LineItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != line_item_id);
        let removed = self.items.len() < len_before;
        if removed {
            self.updated_at = current_timestamp();
        }
        removed
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.updated_at = current_timestamp();
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get number of lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by ID.
    pub fn get(&self, line_item_id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == line_item_id)
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        if let Some(other) = self.items.iter().find(|i| i.total_price.currency != self.currency) {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: other.total_price.currency.code().to_string(),
            });
        }
        Money::try_sum(self.items.iter().map(|i| &i.total_price), self.currency)
            .ok_or(CommerceError::Overflow)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Unique line item identifier.
    pub id: LineItemId,
    /// Product ID.
    pub product_id: ProductId,
    /// Product slug, for linking back to the page.
    pub slug: String,
    /// Product title (denormalized for display).
    pub title: String,
    /// Lower-cased dimension key to option id.
    pub selections: BTreeMap<String, String>,
    /// Variant summary (e.g., "Color: Black, Size: One Size").
    pub variant_label: String,
    /// Quantity.
    pub quantity: i64,
    /// Unit price.
    pub unit_price: Money,
    /// Total price (unit_price * quantity).
    pub total_price: Money,
    /// Stock cap recorded when the line was last added to.
    #[serde(default)]
    pub max_quantity: Option<u32>,
}

impl LineItem {
    /// Create a new line item.
    pub fn new(request: CartRequest) -> Result<Self, CommerceError> {
        let total_price = request
            .unit_price
            .try_multiply(request.quantity)
            .ok_or(CommerceError::Overflow)?;
        Ok(Self {
            id: LineItemId::generate(),
            product_id: request.product_id,
            slug: request.slug,
            title: request.title,
            selections: request.selections,
            variant_label: request.variant_label,
            quantity: request.quantity,
            unit_price: request.unit_price,
            total_price,
            max_quantity: request.max_quantity,
        })
    }

    /// Most units this line may hold.
    pub fn limit(&self) -> i64 {
        self.max_quantity
            .map_or(MAX_QUANTITY_PER_ITEM, |n| i64::from(n).min(MAX_QUANTITY_PER_ITEM))
    }

    /// Update the total price based on quantity.
    pub fn update_total(&mut self) -> Result<(), CommerceError> {
        self.total_price = self
            .unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)?;
        Ok(())
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(color: &str, quantity: i64) -> CartRequest {
        let mut selections = BTreeMap::new();
        selections.insert("color".to_string(), color.to_string());
        selections.insert("size".to_string(), "one".to_string());
        CartRequest {
            product_id: ProductId::new("1"),
            slug: "shadow-pack-backpack".to_string(),
            title: "Shadow Pack Backpack".to_string(),
            selections,
            variant_label: format!("Color: {color}, Size: One Size"),
            unit_price: Money::from_major(2999, Currency::INR),
            quantity,
            max_quantity: None,
        }
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::default();
        assert!(cart.is_empty());
        assert_eq!(cart.currency, Currency::INR);
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::default();
        cart.add(request("black", 2)).unwrap();

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.subtotal().unwrap(), Money::from_major(5998, Currency::INR));
    }

    #[test]
    fn test_add_same_selection_merges() {
        let mut cart = Cart::default();
        let first = cart.add(request("black", 1)).unwrap();
        let second = cart.add(request("black", 2)).unwrap();

        assert_eq!(first, second);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.get(&first).unwrap().quantity, 3);
    }

    #[test]
    fn test_different_selection_is_new_line() {
        let mut cart = Cart::default();
        cart.add(request("black", 1)).unwrap();
        cart.add(request("navy", 1)).unwrap();
        assert_eq!(cart.line_count(), 2);
    }

    #[test]
    fn test_invalid_quantity() {
        let mut cart = Cart::default();
        assert!(matches!(
            cart.add(request("black", 0)),
            Err(CommerceError::InvalidQuantity(0))
        ));
    }

    #[test]
    fn test_new_line_over_limit() {
        let mut cart = Cart::default();
        assert!(matches!(
            cart.add(request("black", MAX_QUANTITY_PER_ITEM + 1)),
            Err(CommerceError::QuantityExceedsLimit(_, _))
        ));
    }

    #[test]
    fn test_merge_caps_at_limit() {
        let mut cart = Cart::default();
        let id = cart.add(request("black", MAX_QUANTITY_PER_ITEM - 1)).unwrap();
        cart.add(request("black", 5)).unwrap();
        assert_eq!(cart.get(&id).unwrap().quantity, MAX_QUANTITY_PER_ITEM);
    }

    #[test]
    fn test_merge_caps_at_stock() {
        let mut cart = Cart::default();
        let stocked = |quantity| CartRequest {
            max_quantity: Some(8),
            ..request("black", quantity)
        };
        let id = cart.add(stocked(8)).unwrap();
        cart.add(stocked(8)).unwrap();

        let line = cart.get(&id).unwrap();
        assert_eq!(line.quantity, 8);
        assert_eq!(line.total_price, Money::from_major(8 * 2999, Currency::INR));
        assert_eq!(cart.item_count(), 8);
    }

    #[test]
    fn test_new_line_clamped_to_stock() {
        let mut cart = Cart::default();
        let id = cart
            .add(CartRequest {
                max_quantity: Some(3),
                ..request("black", 5)
            })
            .unwrap();
        assert_eq!(cart.get(&id).unwrap().quantity, 3);
    }

    #[test]
    fn test_update_rejects_more_than_stock() {
        let mut cart = Cart::default();
        let id = cart
            .add(CartRequest {
                max_quantity: Some(4),
                ..request("black", 1)
            })
            .unwrap();

        assert!(matches!(
            cart.update_quantity(&id, 5),
            Err(CommerceError::QuantityExceedsLimit(5, 4))
        ));
        assert!(cart.update_quantity(&id, 4).unwrap());
        assert_eq!(cart.get(&id).unwrap().quantity, 4);
    }

    #[test]
    fn test_currency_mismatch() {
        let mut cart = Cart::new(Currency::USD);
        assert!(matches!(
            cart.add(request("black", 1)),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::default();
        let id = cart.add(request("black", 1)).unwrap();

        assert!(cart.update_quantity(&id, 4).unwrap());
        assert_eq!(cart.get(&id).unwrap().total_price, Money::from_major(11_996, Currency::INR));

        assert!(!cart.update_quantity(&LineItemId::new("line_missing"), 2).unwrap());
        assert!(cart.update_quantity(&id, MAX_QUANTITY_PER_ITEM + 1).is_err());

        assert!(cart.update_quantity(&id, 0).unwrap());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::default();
        let id = cart.add(request("black", 1)).unwrap();
        cart.add(request("navy", 1)).unwrap();

        assert!(cart.remove(&id));
        assert!(!cart.remove(&id));
        assert_eq!(cart.line_count(), 1);

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.subtotal().unwrap().is_zero());
    }
}
