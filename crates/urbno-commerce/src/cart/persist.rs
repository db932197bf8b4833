//! Cart persistence in the local store.

use super::Cart;
use crate::error::CommerceError;
use urbno_store::{Backend, Store};

/// Store key holding the serialized cart.
pub const CART_KEY: &str = "urbno_cart";

impl Cart {
    /// Load the saved cart, or an empty one if nothing is stored yet.
    pub fn load<B: Backend>(store: &Store<B>) -> Result<Self, CommerceError> {
        Ok(store.get_or_default(CART_KEY)?)
    }

    /// Write the cart back to the store.
    pub fn save<B: Backend>(&self, store: &Store<B>) -> Result<(), CommerceError> {
        store.set(CART_KEY, self)?;
        Ok(())
    }
}
