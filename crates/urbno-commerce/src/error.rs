//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// The variant resolvers never produce these; they fall back to defined
/// defaults. Errors come from actions with side effects: adding to the
/// cart, signing in, persisting state.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product source failed to answer a lookup.
    #[error("Catalog unavailable: {0}")]
    Catalog(String),

    /// The selected variant combination cannot be purchased.
    #[error("Selected variant of {0} is out of stock")]
    VariantUnavailable(String),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Sign-up or sign-in attempted without an email address.
    #[error("Please enter an email address")]
    EmptyEmail,

    /// Sign-in for an email with no local account.
    #[error("User not found: {0}. Try signing up.")]
    UserNotFound(String),

    /// Account action that needs a signed-in user.
    #[error("Not signed in")]
    NotSignedIn,

    /// Local storage failure.
    #[cfg(feature = "storage")]
    #[error("Storage error: {0}")]
    Storage(#[from] urbno_store::StoreError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}
