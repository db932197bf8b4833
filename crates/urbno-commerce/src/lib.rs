//! Storefront domain types and logic for URBNO.
//!
//! This crate provides the pieces behind the URBNO product pages:
//!
//! - **Catalog**: Products, variant dimensions, stock status, shop listing
//! - **Variant**: Selection, price and availability resolution, quantity bounds
//! - **PDP**: Product view state shared by the detail panel and the buy bar
//! - **Cart**: Device-local cart with line items
//! - **Account**: Mock sign-up and sign-in
//! - **Reviews**, **Promo**, **Structured data**: supporting page modules
//!
//! # Example
//!
//! ```rust
//! use urbno_commerce::prelude::*;
//! use urbno_commerce::catalog::mock;
//!
//! let mut view = ProductView::new(mock::shadow_pack_backpack());
//! assert!(view.is_available());
//!
//! view.select("color", "olive");
//! assert!(!view.is_available());
//! assert_eq!(view.quantity(), 1);
//!
//! view.select("color", "navy");
//! let mut cart = Cart::default();
//! cart.add(view.cart_request()?)?;
//! println!("Subtotal: {}", cart.subtotal()?.display());
//! # Ok::<(), CommerceError>(())
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod account;
pub mod cart;
pub mod catalog;
pub mod display;
pub mod pdp;
pub mod promo;
pub mod reviews;
pub mod structured_data;
pub mod variant;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        MockCatalog, PriceBand, Product, ProductCard, ProductSource, ShopFilter, StockStatus,
        VariantDimension, VariantOption, Variants,
    };

    // Variant resolution
    pub use crate::variant::{
        clamp_quantity, initialize_selection, resolve_availability, resolve_availability_with,
        resolve_price, set_selection, AvailabilityPolicy, QuantityControl, SelectionState,
    };

    // Page state
    pub use crate::display::{discount_percent, PriceDisplay};
    pub use crate::pdp::{BuyBar, ProductView, ViewState};

    // Cart & accounts
    pub use crate::account::{Accounts, SignUp, User};
    pub use crate::cart::{Cart, CartRequest, LineItem};

    // Reviews & promotions
    pub use crate::promo::{ExitIntent, ExitSignal};
    pub use crate::reviews::{NewReview, ReviewDraft, ReviewError};
}
