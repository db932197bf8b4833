use proptest::prelude::*;
use urbno_commerce::catalog::{Product, VariantDimension, VariantOption};
use urbno_commerce::money::{Currency, Money};
use urbno_commerce::variant::{
    clamp_quantity, initialize_selection, resolve_availability, resolve_price, QuantityControl,
    SelectionState,
};

fn option_strategy(index: usize) -> impl Strategy<Value = VariantOption> {
    (any::<bool>(), proptest::option::of(-50_000i64..50_000)).prop_map(move |(available, delta)| {
        let mut option = VariantOption::new(format!("o{index}"), format!("Option {index}"))
            .with_available(available);
        option.price_delta = delta;
        option
    })
}

fn dimension_strategy() -> impl Strategy<Value = VariantDimension> {
    (0usize..4)
        .prop_flat_map(|n| (0..n).map(option_strategy).collect::<Vec<_>>())
        .prop_map(|options| VariantDimension {
            name: "Dim".to_string(),
            options,
        })
}

fn product_strategy() -> impl Strategy<Value = Product> {
    (
        0i64..10_000_000,
        any::<bool>(),
        proptest::option::of(0u32..20),
        proptest::collection::vec(dimension_strategy(), 0..4),
    )
        .prop_map(|(base, in_stock, stock_count, dimensions)| {
            let mut product = Product::new("p", "p", "P", Money::new(base, Currency::INR));
            product.in_stock = in_stock;
            product.stock_count = stock_count;
            for (i, dimension) in dimensions.into_iter().enumerate() {
                product = product.with_dimension(format!("dim{i}"), dimension);
            }
            product
        })
}

/// Pick one option id per dimension, sometimes a stale id, sometimes none.
fn selection_for(product: &Product, picks: &[u8]) -> SelectionState {
    let mut selection = SelectionState::new();
    for ((key, dimension), pick) in product.variants.iter().zip(picks) {
        match pick % 6 {
            5 => {}
            4 => selection.select(key, "stale"),
            n if !dimension.options.is_empty() => {
                let option = &dimension.options[usize::from(n) % dimension.options.len()];
                selection.select(key, option.id.clone());
            }
            _ => {}
        }
    }
    selection
}

proptest! {
    #[test]
    fn prop_price_is_base_plus_selected_deltas(
        product in product_strategy(),
        picks in proptest::collection::vec(any::<u8>(), 4),
    ) {
        let selection = selection_for(&product, &picks);
        let expected: i64 = product.price.minor_units
            + product
                .variants
                .iter()
                .filter_map(|(key, dim)| selection.get(key).and_then(|id| dim.option(id)))
                .filter_map(|o| o.price_delta)
                .sum::<i64>();
        prop_assert_eq!(resolve_price(&product, &selection).minor_units, expected);
    }

    #[test]
    fn prop_out_of_stock_is_never_available(
        product in product_strategy(),
        picks in proptest::collection::vec(any::<u8>(), 4),
    ) {
        let mut product = product;
        product.in_stock = false;
        let selection = selection_for(&product, &picks);
        prop_assert!(!resolve_availability(&product, &selection));
    }

    #[test]
    fn prop_availability_matches_selected_options(
        product in product_strategy(),
        picks in proptest::collection::vec(any::<u8>(), 4),
    ) {
        let selection = selection_for(&product, &picks);
        let selected: Vec<&VariantOption> = product
            .variants
            .iter()
            .filter_map(|(key, dim)| selection.get(key).and_then(|id| dim.option(id)))
            .collect();
        let stocked = product.in_stock && product.stock_count != Some(0);

        let available = resolve_availability(&product, &selection);
        if selected.iter().any(|o| !o.available) {
            prop_assert!(!available);
        } else {
            prop_assert_eq!(available, stocked);
        }
    }

    #[test]
    fn prop_initialize_selection_is_idempotent(product in product_strategy()) {
        let first = initialize_selection(&product.variants);
        prop_assert_eq!(&first, &initialize_selection(&product.variants));
        for (key, option_id) in first.iter() {
            let dimension = product.dimension(key).unwrap();
            prop_assert!(dimension.option(option_id).unwrap().available);
        }
    }

    #[test]
    fn prop_clamp_stays_in_bounds(
        requested in any::<i64>(),
        stock_count in proptest::option::of(0u32..50),
        is_available in any::<bool>(),
    ) {
        let quantity = clamp_quantity(requested, stock_count, is_available);
        prop_assert!(quantity >= 1);
        if !is_available {
            prop_assert_eq!(quantity, 1);
        } else if let Some(n) = stock_count {
            prop_assert!(quantity <= n.max(1));
        }
    }

    #[test]
    fn prop_increment_never_exceeds_stock(
        stock in 1u32..20,
        presses in 0usize..40,
    ) {
        let control = QuantityControl::new(Some(stock), true);
        let mut quantity = 1;
        for _ in 0..presses {
            quantity = control.increment(quantity);
            prop_assert!(quantity <= stock);
        }
    }
}
