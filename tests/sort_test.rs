//! Sort engine tests.

mod common;

use rust_decimal_macros::dec;

use ratescope::sort::{SortField, SortOrder, SortState, sort_rates};

use common::{fixture_page, ids, rate};

fn state(field: SortField, order: SortOrder) -> SortState {
    SortState { field, order }
}

#[test]
fn test_ascending_then_descending_reverses_keys() {
    let rates = vec![
        rate("a", dec!(2.89), "Alpha"),
        rate("b", dec!(3.25), "Beta"),
        rate("c", dec!(2.89), "Gamma"),
    ];

    let asc = sort_rates(&rates, state(SortField::Rate, SortOrder::Asc));
    let asc_keys: Vec<_> = asc.iter().map(|r| r.rate).collect();
    assert_eq!(asc_keys, [dec!(2.89), dec!(2.89), dec!(3.25)]);

    let desc = sort_rates(&rates, state(SortField::Rate, SortOrder::Desc));
    let desc_keys: Vec<_> = desc.iter().map(|r| r.rate).collect();
    assert_eq!(desc_keys, [dec!(3.25), dec!(2.89), dec!(2.89)]);
    assert_eq!(desc.len(), 3);

    // Equal keys keep input order in both directions
    assert_eq!(ids(&asc), ["a", "c", "b"]);
    assert_eq!(ids(&desc), ["b", "a", "c"]);
}

#[test]
fn test_sorting_is_idempotent() {
    let rates = fixture_page().rates;
    for field in [SortField::Rate, SortField::Apr, SortField::Lender] {
        for order in [SortOrder::Asc, SortOrder::Desc] {
            let once = sort_rates(&rates, state(field, order));
            let twice = sort_rates(&once, state(field, order));
            assert_eq!(once, twice, "{field:?} {order:?}");
        }
    }
}

#[test]
fn test_lender_sort_ignores_case() {
    let rates = vec![
        rate("z", dec!(4.0), "zenith"),
        rate("a", dec!(4.0), "Apex"),
        rate("m", dec!(4.0), "maple"),
    ];
    let sorted = sort_rates(&rates, state(SortField::Lender, SortOrder::Asc));
    assert_eq!(ids(&sorted), ["a", "m", "z"]);
}

#[test]
fn test_apr_sort_over_fixture() {
    let rates = fixture_page().rates;
    let sorted = sort_rates(&rates, state(SortField::Apr, SortOrder::Asc));
    assert_eq!(
        ids(&sorted),
        ["5", "harbour-5f", "maple-5f", "laurentian-3f", "summit-5v"]
    );
    // Input untouched
    assert_eq!(rates[0].id, "maple-5f");
}

#[test]
fn test_selecting_same_field_toggles_order() {
    let mut sort = SortState::default();
    assert_eq!(sort.field, SortField::Rate);
    assert_eq!(sort.order, SortOrder::Asc);

    sort.select(SortField::Rate);
    assert_eq!(sort.order, SortOrder::Desc);

    sort.select(SortField::Lender);
    assert_eq!(sort.field, SortField::Lender);
    assert_eq!(sort.order, SortOrder::Asc);
}
