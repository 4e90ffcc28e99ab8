use chrono::NaiveDate;

use supply_chain_dashboard::ingestion::{LoadOptions, load};
use supply_chain_dashboard::processing::{FilterOptions, FilterSpec, apply, enrich};
use supply_chain_dashboard::schema::{ORDER_DATE, ORDER_ID, REGION, SHIP_MODE};
use supply_chain_dashboard::types::{DataSet, Value};

fn enriched_orders() -> DataSet {
    enrich(&load("tests/fixtures/orders.csv", &LoadOptions::default()).unwrap()).unwrap()
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn order_ids(ds: &DataSet) -> Vec<String> {
    ds.column(ORDER_ID)
        .unwrap()
        .filter_map(|v| v.as_str().map(str::to_owned))
        .collect()
}

#[test]
fn options_cover_observed_values() {
    let options = FilterOptions::from_table(&enriched_orders()).unwrap();

    assert_eq!(options.date_span, Some((ymd(2024, 1, 5), ymd(2024, 3, 20))));
    assert_eq!(options.regions, vec!["Central", "East", "South", "West"]);
    assert_eq!(
        options.ship_modes,
        vec!["First Class", "Freight", "Same Day", "Second Class", "Standard Class"]
    );
}

#[test]
fn default_selection_keeps_every_dated_row() {
    let enriched = enriched_orders();
    let spec = FilterOptions::from_table(&enriched).unwrap().default_spec();
    let filtered = apply(&enriched, &spec).unwrap();

    // CA-5 has no order date and cannot fall inside any range.
    assert_eq!(order_ids(&filtered), vec!["CA-1", "CA-1", "CA-2", "CA-3", "CA-4", "CA-6"]);
}

#[test]
fn every_kept_row_satisfies_the_selection() {
    let enriched = enriched_orders();
    let spec = FilterSpec::new(
        ymd(2024, 1, 1),
        ymd(2024, 2, 29),
        ["East", "West"],
        ["Standard Class", "First Class"],
    );
    let filtered = apply(&enriched, &spec).unwrap();

    assert_eq!(order_ids(&filtered), vec!["CA-1", "CA-1", "CA-3"]);
    for row in &filtered.rows {
        let idx = |c: &str| filtered.schema.index_of(c).unwrap();
        let date = row[idx(ORDER_DATE)].as_date().unwrap();
        assert!(spec.start <= date && date <= spec.end);
        assert!(spec.regions.contains(row[idx(REGION)].as_str().unwrap()));
        assert!(spec.ship_modes.contains(row[idx(SHIP_MODE)].as_str().unwrap()));
    }
}

#[test]
fn date_range_is_inclusive_at_both_ends() {
    let enriched = enriched_orders();
    let options = FilterOptions::from_table(&enriched).unwrap();
    let spec = FilterSpec::new(
        ymd(2024, 2, 10),
        ymd(2024, 2, 15),
        options.regions.clone(),
        options.ship_modes.clone(),
    );

    assert_eq!(order_ids(&apply(&enriched, &spec).unwrap()), vec!["CA-2", "CA-3"]);
}

#[test]
fn empty_region_selection_yields_empty_table() {
    let enriched = enriched_orders();
    let options = FilterOptions::from_table(&enriched).unwrap();
    let spec = FilterSpec::new(
        ymd(2024, 1, 1),
        ymd(2024, 12, 31),
        Vec::<String>::new(),
        options.ship_modes.clone(),
    );

    let filtered = apply(&enriched, &spec).unwrap();
    assert!(filtered.is_empty());
    assert_eq!(filtered.schema, enriched.schema);
}

#[test]
fn inverted_range_yields_empty_table() {
    let enriched = enriched_orders();
    let options = FilterOptions::from_table(&enriched).unwrap();
    let spec = FilterSpec::new(
        ymd(2024, 3, 1),
        ymd(2024, 1, 1),
        options.regions.clone(),
        options.ship_modes.clone(),
    );

    assert!(apply(&enriched, &spec).unwrap().is_empty());
}

#[test]
fn filtering_preserves_row_contents() {
    let enriched = enriched_orders();
    let spec = FilterSpec::new(ymd(2024, 3, 1), ymd(2024, 3, 31), ["South"], ["Second Class"]);
    let filtered = apply(&enriched, &spec).unwrap();

    assert_eq!(filtered.rows, vec![enriched.rows[6].clone()]);
    assert_eq!(filtered.get(0, REGION), Some(&Value::text("South")));
}

#[test]
fn unknown_region_filters_everything() {
    let enriched = enriched_orders();
    let options = FilterOptions::from_table(&enriched).unwrap();
    let spec = FilterSpec::new(
        ymd(2024, 1, 1),
        ymd(2024, 12, 31),
        ["Atlantis"],
        options.ship_modes.clone(),
    );

    assert!(apply(&enriched, &spec).unwrap().is_empty());
}
