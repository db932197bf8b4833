//! Variant selection, pricing and availability.
//!
//! Everything here is pure: given a [`Product`](crate::catalog::Product)
//! and a [`SelectionState`], the resolvers compute price, purchasability,
//! quantity bounds and the summary shown in the buy bar. None of them
//! fail; malformed catalog data falls back to defined defaults.

mod availability;
mod pricing;
mod quantity;
mod selection;
mod summary;

pub use availability::{resolve_availability, resolve_availability_with, AvailabilityPolicy};
pub use pricing::resolve_price;
pub use quantity::{clamp_quantity, QuantityControl};
pub use selection::{initialize_selection, set_selection, SelectionState};
pub use summary::{summary_line, variant_summary, VariantSummaryItem};
