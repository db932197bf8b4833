//! Shopping cart module.
//!
//! Contains the cart, its line items and, with the `storage` feature,
//! loading and saving the cart in a [`Store`](urbno_store::Store).

mod cart;
#[cfg(feature = "storage")]
mod persist;

pub use cart::{Cart, CartRequest, LineItem, MAX_QUANTITY_PER_ITEM};
#[cfg(feature = "storage")]
pub use persist::CART_KEY;
