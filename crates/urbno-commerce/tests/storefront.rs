//! End-to-end flows over the mock catalog: open a page, change the
//! selection, put it in the cart, sign in.

use urbno_commerce::catalog::mock;
use urbno_commerce::prelude::*;
use urbno_store::Store;

fn backpack_view() -> ProductView {
    match ViewState::load(&MockCatalog, mock::FEATURED_SLUG, AvailabilityPolicy::Permissive) {
        ViewState::Loaded(view) => view,
        other => panic!("backpack did not load: {other:?}"),
    }
}

#[test]
fn test_backpack_default_state() {
    let view = backpack_view();
    let selection = view.selection();
    assert_eq!(selection.get("color"), Some("black"));
    assert_eq!(selection.get("size"), Some("one"));
    assert!(view.is_available());

    let bar = view.buy_bar();
    assert_eq!(bar.price.current, Money::from_major(2999, Currency::INR));
    assert_eq!(bar.price.discount_percent, Some(25));
    assert_eq!(bar.summary, "Color: Black, Size: One Size");
    assert_eq!(bar.stock, StockStatus::LowStock(8));
    assert!(bar.can_purchase);
}

#[test]
fn test_olive_blocks_purchase() {
    let mut view = backpack_view();
    view.set_quantity(6);
    view.select("color", "olive");

    let bar = view.buy_bar();
    assert!(!bar.can_purchase);
    assert!(!bar.can_increment);
    assert_eq!(bar.quantity, 1);
    assert_eq!(bar.stock.message(), "Out of stock");
    assert!(view.cart_request().is_err());

    // Back to an available colour restores purchase, quantity stays at 1
    view.select("color", "black");
    assert!(view.buy_bar().can_purchase);
    assert_eq!(view.quantity(), 1);
}

#[test]
fn test_page_to_cart_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open_dir(dir.path()).unwrap();

    let mut view = backpack_view();
    view.select("color", "navy");
    view.increment_quantity();

    let mut cart = Cart::load(&store).unwrap();
    cart.add(view.cart_request().unwrap()).unwrap();
    cart.add(view.cart_request().unwrap()).unwrap();
    cart.save(&store).unwrap();

    let cart = Cart::load(&Store::open_dir(dir.path()).unwrap()).unwrap();
    assert_eq!(cart.line_count(), 1);
    assert_eq!(cart.item_count(), 4);
    assert_eq!(cart.items[0].variant_label, "Color: Navy, Size: One Size");
    assert_eq!(cart.subtotal().unwrap(), Money::from_major(4 * 2999, Currency::INR));
}

#[test]
fn test_repeat_add_never_exceeds_stock() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open_dir(dir.path()).unwrap();

    let mut view = backpack_view();
    assert_eq!(view.set_quantity(8), 8);

    let mut cart = Cart::load(&store).unwrap();
    let line = cart.add(view.cart_request().unwrap()).unwrap();
    cart.add(view.cart_request().unwrap()).unwrap();
    cart.save(&store).unwrap();

    let cart = Cart::load(&Store::open_dir(dir.path()).unwrap()).unwrap();
    let stock = i64::from(view.product().stock_count.unwrap());
    assert_eq!(cart.get(&line).unwrap().quantity, stock);
    assert_eq!(cart.subtotal().unwrap(), Money::from_major(8 * 2999, Currency::INR));
}

#[test]
fn test_generated_page_is_stable() {
    let first = price_for("canvas-sneaker");
    let second = price_for("canvas-sneaker");
    assert_eq!(first, second);
}

fn price_for(slug: &str) -> Money {
    ViewState::load(&MockCatalog, slug, AvailabilityPolicy::Permissive)
        .into_view(slug)
        .unwrap()
        .price()
}

#[test]
fn test_unknown_slug_shape_is_not_found() {
    let state = ViewState::load(&MockCatalog, "Bad Slug!", AvailabilityPolicy::Permissive);
    assert_eq!(state, ViewState::NotFound);
}

#[test]
fn test_account_flow_persists() {
    let store = Store::in_memory();

    let mut accounts = Accounts::load(&store).unwrap();
    let outcome = accounts.sign_up("crew@urbno.com").unwrap();
    assert_eq!(outcome.message(), "Welcome to URBNO!");
    accounts.sign_out();
    accounts.save(&store).unwrap();

    let mut accounts = Accounts::load(&store).unwrap();
    assert!(accounts.current_user().is_none());
    assert_eq!(accounts.sign_in("crew@urbno.com").unwrap().referral_code, outcome.user().referral_code);
}

#[test]
fn test_shop_filters_over_listing() {
    let cards = urbno_commerce::catalog::shop_products();
    let filter = ShopFilter::new().category("Tees").price(PriceBand::Under1000);
    let titles: Vec<_> = filter.apply(&cards).iter().map(|c| c.title.clone()).collect();
    assert_eq!(titles.len(), 6);
    assert!(titles.iter().all(|t| t.ends_with("Tee")));
}
