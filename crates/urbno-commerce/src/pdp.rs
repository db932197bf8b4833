//! Product detail page state.
//!
//! [`ProductView`] is the single source of truth for one open product
//! page. The detail panel and the sticky [`BuyBar`] both read from it, so
//! they can never disagree about price, availability or quantity.

use crate::cart::CartRequest;
use crate::catalog::{Product, ProductSource, StockStatus};
use crate::display::PriceDisplay;
use crate::error::CommerceError;
use crate::money::Money;
use crate::variant::{
    initialize_selection, resolve_availability_with, resolve_price, summary_line,
    variant_summary, AvailabilityPolicy, QuantityControl, SelectionState, VariantSummaryItem,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// One open product page: product, selection and quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductView {
    product: Product,
    selection: SelectionState,
    quantity: u32,
    policy: AvailabilityPolicy,
}

impl ProductView {
    /// Open a page with the default selection and quantity 1.
    pub fn new(product: Product) -> Self {
        Self::with_policy(product, AvailabilityPolicy::default())
    }

    pub fn with_policy(product: Product, policy: AvailabilityPolicy) -> Self {
        for issue in product.validate() {
            warn!(product = %product.id, %issue, "catalog data issue");
        }
        let selection = initialize_selection(&product.variants);
        let mut view = Self {
            product,
            selection,
            quantity: 1,
            policy,
        };
        view.reclamp();
        view
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn policy(&self) -> AvailabilityPolicy {
        self.policy
    }

    /// Choose `option_id` for dimension `key`, then re-clamp the quantity.
    pub fn select(&mut self, key: &str, option_id: &str) {
        let known = self
            .product
            .dimension(key)
            .is_some_and(|dimension| dimension.option(option_id).is_some());
        if !known {
            warn!(product = %self.product.id, dimension = %key, option = option_id, "selected option not in catalog, ignoring");
        }
        self.selection.select(key, option_id);
        self.reclamp();
        info!(
            event = "product_variant_change",
            product_id = %self.product.id,
            dimension = %key.to_lowercase(),
            option = option_id,
            price = self.price().minor_units,
            available = self.is_available(),
            quantity = self.quantity,
        );
    }

    /// Set the quantity, clamped to what can be bought. Returns the
    /// stored value.
    pub fn set_quantity(&mut self, requested: i64) -> u32 {
        self.quantity = self.quantity_control().clamp(requested);
        self.quantity
    }

    pub fn increment_quantity(&mut self) -> u32 {
        self.quantity = self.quantity_control().increment(self.quantity);
        self.quantity
    }

    pub fn decrement_quantity(&mut self) -> u32 {
        self.quantity = self.quantity_control().decrement(self.quantity);
        self.quantity
    }

    /// Resolved price of the current selection.
    pub fn price(&self) -> Money {
        resolve_price(&self.product, &self.selection)
    }

    /// Whether the current selection can be purchased.
    pub fn is_available(&self) -> bool {
        resolve_availability_with(&self.product, &self.selection, self.policy)
    }

    pub fn quantity_control(&self) -> QuantityControl {
        QuantityControl::new(self.product.stock_count, self.is_available())
    }

    pub fn stock_banner(&self) -> StockStatus {
        StockStatus::evaluate(self.is_available(), self.product.stock_count)
    }

    pub fn price_display(&self) -> PriceDisplay {
        PriceDisplay::new(self.price(), self.product.original_price)
    }

    pub fn summary(&self) -> Vec<VariantSummaryItem> {
        variant_summary(&self.product, &self.selection)
    }

    /// Snapshot for the sticky bar.
    pub fn buy_bar(&self) -> BuyBar {
        let control = self.quantity_control();
        let is_available = control.is_available;
        BuyBar {
            title: self.product.title.clone(),
            price: self.price_display(),
            summary: summary_line(&self.summary()),
            quantity: self.quantity,
            is_available,
            stock: StockStatus::evaluate(is_available, self.product.stock_count),
            can_increment: control.can_increment(self.quantity),
            can_decrement: control.can_decrement(self.quantity),
            can_purchase: is_available,
        }
    }

    /// Build the add-to-cart payload for the current state.
    pub fn cart_request(&self) -> Result<CartRequest, CommerceError> {
        if !self.is_available() {
            return Err(CommerceError::VariantUnavailable(self.product.title.clone()));
        }
        let request = CartRequest {
            product_id: self.product.id.clone(),
            slug: self.product.slug.clone(),
            title: self.product.title.clone(),
            selections: self.selection.to_map(),
            variant_label: summary_line(&self.summary()),
            unit_price: self.price(),
            quantity: i64::from(self.quantity),
            max_quantity: self.quantity_control().stock_count,
        };
        info!(
            event = "add_to_cart",
            product_id = %request.product_id,
            quantity = request.quantity,
            price = request.unit_price.minor_units,
            variant = %request.variant_label,
        );
        Ok(request)
    }

    fn reclamp(&mut self) {
        self.quantity = self.quantity_control().clamp(i64::from(self.quantity));
    }
}

/// What the sticky buy bar shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyBar {
    pub title: String,
    pub price: PriceDisplay,
    /// "Color: Black, Size: One Size".
    pub summary: String,
    pub quantity: u32,
    pub is_available: bool,
    pub stock: StockStatus,
    pub can_increment: bool,
    pub can_decrement: bool,
    pub can_purchase: bool,
}

/// Lifecycle of a product page.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Loaded(ProductView),
    NotFound,
    Error(String),
}

impl ViewState {
    /// Look up `slug` and open the page.
    pub fn load(source: &impl ProductSource, slug: &str, policy: AvailabilityPolicy) -> Self {
        match source.find_by_slug(slug) {
            Ok(Some(product)) => ViewState::Loaded(ProductView::with_policy(product, policy)),
            Ok(None) => ViewState::NotFound,
            Err(e) => {
                warn!(slug, error = %e, "product lookup failed");
                ViewState::Error(e.to_string())
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ViewState::Loaded(_))
    }

    pub fn view(&self) -> Option<&ProductView> {
        match self {
            ViewState::Loaded(view) => Some(view),
            _ => None,
        }
    }

    pub fn view_mut(&mut self) -> Option<&mut ProductView> {
        match self {
            ViewState::Loaded(view) => Some(view),
            _ => None,
        }
    }

    /// Take the view, or the error that explains why there is none.
    pub fn into_view(self, slug: &str) -> Result<ProductView, CommerceError> {
        match self {
            ViewState::Loaded(view) => Ok(view),
            ViewState::Loading | ViewState::NotFound => {
                Err(CommerceError::ProductNotFound(slug.to_string()))
            }
            ViewState::Error(reason) => Err(CommerceError::Catalog(reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{mock, MockCatalog, VariantDimension, VariantOption};
    use crate::money::Currency;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{self, Layer, SubscriberExt};

    #[test]
    fn test_backpack_opens_on_first_available() {
        let view = ProductView::new(mock::shadow_pack_backpack());
        assert_eq!(view.selection().get("color"), Some("black"));
        assert_eq!(view.selection().get("size"), Some("one"));
        assert!(view.is_available());
        assert_eq!(view.quantity(), 1);
        assert_eq!(view.stock_banner(), StockStatus::LowStock(8));
    }

    #[test]
    fn test_switching_to_unavailable_option() {
        let mut view = ProductView::new(mock::shadow_pack_backpack());
        view.set_quantity(4);
        view.select("color", "olive");

        assert!(!view.is_available());
        assert_eq!(view.quantity(), 1);
        let bar = view.buy_bar();
        assert!(!bar.can_purchase);
        assert!(!bar.can_increment);
        assert_eq!(bar.stock, StockStatus::OutOfStock);
        assert!(matches!(
            view.cart_request(),
            Err(CommerceError::VariantUnavailable(_))
        ));
    }

    #[test]
    fn test_increment_respects_stock() {
        let product = mock::shadow_pack_backpack().with_stock_count(3);
        let mut view = ProductView::new(product);
        for _ in 0..5 {
            view.increment_quantity();
        }
        assert_eq!(view.quantity(), 3);
        assert!(!view.buy_bar().can_increment);
        assert_eq!(view.decrement_quantity(), 2);
    }

    #[test]
    fn test_buy_bar_mirrors_detail_panel() {
        let mut view = ProductView::new(mock::shadow_pack_backpack());
        view.select("color", "navy");
        let bar = view.buy_bar();

        assert_eq!(bar.price, view.price_display());
        assert_eq!(bar.price.current, view.price());
        assert_eq!(bar.summary, "Color: Navy, Size: One Size");
        assert_eq!(bar.quantity, view.quantity());
        assert_eq!(bar.stock, view.stock_banner());
        assert_eq!(bar.price.discount_percent, Some(25));
    }

    #[test]
    fn test_price_delta_flows_into_cart_request() {
        let product = Product::new("9", "tee", "Tee", Money::from_major(699, Currency::INR)).with_dimension(
            "size",
            VariantDimension::new("Size")
                .with_option(VariantOption::new("m", "M"))
                .with_option(VariantOption::new("xxl", "XXL").with_price_delta(10_000)),
        );
        let mut view = ProductView::new(product);
        view.select("Size", "xxl");
        view.set_quantity(2);

        let request = view.cart_request().unwrap();
        assert_eq!(request.unit_price, Money::from_major(799, Currency::INR));
        assert_eq!(request.quantity, 2);
        assert_eq!(request.max_quantity, None);
        assert_eq!(request.selections.get("size").map(String::as_str), Some("xxl"));
        assert_eq!(request.variant_label, "Size: XXL");
    }

    #[test]
    fn test_cart_request_carries_stock_cap() {
        let view = ProductView::new(mock::shadow_pack_backpack());
        assert_eq!(view.cart_request().unwrap().max_quantity, Some(8));
    }

    /// Counts WARN events while installed.
    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: layer::Context<'_, S>) {
            if *event.metadata().level() == Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_data_issues_warn_once_per_action() {
        let product = mock::shadow_pack_backpack().with_dimension("fit", VariantDimension::new("Fit"));
        let catalog_issues = product.validate().len();
        assert_eq!(catalog_issues, 1);

        let warnings = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(warnings.clone()));
        tracing::subscriber::with_default(subscriber, || {
            let mut view = ProductView::new(product);
            view.buy_bar();
            view.select("color", "navy");
            view.buy_bar();
            view.select("color", "teal");
            view.buy_bar();
            view.cart_request().unwrap();
        });

        // One for the empty dimension on open, one for the unknown colour
        assert_eq!(warnings.load(Ordering::SeqCst), catalog_issues + 1);
    }

    #[test]
    fn test_reselecting_available_option_keeps_quantity() {
        let mut view = ProductView::new(mock::shadow_pack_backpack());
        view.set_quantity(5);
        view.select("color", "navy");
        assert_eq!(view.quantity(), 5);
        view.set_quantity(50);
        assert_eq!(view.quantity(), 8);
    }

    #[test]
    fn test_view_state_load() {
        let state = ViewState::load(&MockCatalog, mock::FEATURED_SLUG, AvailabilityPolicy::Permissive);
        assert!(state.is_loaded());
        assert_eq!(state.view().unwrap().product().title, "Shadow Pack Backpack");

        let missing = ViewState::load(&MockCatalog, "Not A Slug", AvailabilityPolicy::Permissive);
        assert_eq!(missing, ViewState::NotFound);
        assert!(matches!(
            missing.into_view("Not A Slug"),
            Err(CommerceError::ProductNotFound(_))
        ));
    }

    struct BrokenSource;

    impl ProductSource for BrokenSource {
        fn find_by_slug(&self, _slug: &str) -> Result<Option<Product>, CommerceError> {
            Err(CommerceError::Catalog("backend offline".to_string()))
        }
    }

    #[test]
    fn test_view_state_error() {
        let state = ViewState::load(&BrokenSource, "x", AvailabilityPolicy::Permissive);
        assert!(matches!(state, ViewState::Error(ref reason) if reason.contains("backend offline")));
        assert!(state.view().is_none());
    }

    #[test]
    fn test_strict_policy_view() {
        let product = mock::shadow_pack_backpack().with_dimension(
            "strap",
            VariantDimension::new("Strap").with_option(VariantOption::new("long", "Long").unavailable()),
        );
        let permissive = ProductView::new(product.clone());
        assert!(permissive.is_available());

        let strict = ProductView::with_policy(product, AvailabilityPolicy::Strict);
        assert!(!strict.is_available());
        assert_eq!(strict.quantity(), 1);
    }
}
