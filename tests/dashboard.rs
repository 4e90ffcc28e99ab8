use chrono::NaiveDate;

use supply_chain_dashboard::dashboard::{ChartKind, Dashboard, Metric, MetricValue, ViewKind};
use supply_chain_dashboard::ingestion::{LoadOptions, load};
use supply_chain_dashboard::processing::{FilterOptions, FilterSpec, enrich};
use supply_chain_dashboard::types::DataSet;

fn enriched_orders() -> DataSet {
    enrich(&load("tests/fixtures/orders.csv", &LoadOptions::default()).unwrap()).unwrap()
}

fn default_dashboard() -> Dashboard {
    let enriched = enriched_orders();
    let spec = FilterOptions::from_table(&enriched).unwrap().default_spec();
    Dashboard::build(&enriched, &spec).unwrap()
}

fn metric<'a>(dashboard: &'a Dashboard, kind: ViewKind, label: &str) -> &'a Metric {
    dashboard
        .view(kind)
        .unwrap()
        .metrics
        .iter()
        .find(|m| m.label == label)
        .unwrap_or_else(|| panic!("no metric {label:?} in {kind:?}"))
}

fn display(dashboard: &Dashboard, kind: ViewKind, label: &str) -> String {
    metric(dashboard, kind, label).display.clone()
}

#[test]
fn builds_all_four_views_in_order() {
    let dashboard = default_dashboard();
    let titles: Vec<_> = dashboard.views.iter().map(|v| v.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Supply Chain & Fulfillment",
            "Financial Performance",
            "Product & Inventory",
            "Customer & Regional",
        ]
    );
    for view in &dashboard.views {
        assert!(!view.charts.is_empty(), "{:?} has no charts", view.kind);
    }
}

#[test]
fn fulfillment_metrics() {
    let d = default_dashboard();
    assert_eq!(display(&d, ViewKind::Fulfillment, "Avg Order Processing (Days)"), "4.50");
    assert_eq!(display(&d, ViewKind::Fulfillment, "Total Orders"), "5");
    assert_eq!(display(&d, ViewKind::Fulfillment, "Total Late Orders"), "3");
    assert_eq!(display(&d, ViewKind::Fulfillment, "Late Order %"), "50.0%");
}

#[test]
fn financial_metrics() {
    let d = default_dashboard();
    assert_eq!(display(&d, ViewKind::Financial, "Total Sales"), "$1,020");
    assert_eq!(display(&d, ViewKind::Financial, "Total Profit"), "$155");
    assert_eq!(display(&d, ViewKind::Financial, "Profit Margin"), "15.20%");
    assert_eq!(display(&d, ViewKind::Financial, "Avg Discount"), "13.33%");
}

#[test]
fn product_metrics_use_first_appearance_for_ties() {
    let d = default_dashboard();
    assert_eq!(display(&d, ViewKind::Product, "Best Selling Product"), "Phone C");
    assert_eq!(display(&d, ViewKind::Product, "Most Profitable Product"), "Phone C");
    assert_eq!(display(&d, ViewKind::Product, "Total Quantity Sold"), "13");

    let view = d.view(ViewKind::Product).unwrap();
    let treemap = view.charts.iter().find(|c| c.kind == ChartKind::Treemap).unwrap();
    assert_eq!(treemap.path, vec!["Category", "Sub-Category"]);
}

#[test]
fn customer_metrics() {
    let d = default_dashboard();
    assert_eq!(display(&d, ViewKind::Customer, "Total Customers"), "3");
    assert_eq!(display(&d, ViewKind::Customer, "Top Customer"), "Bob Ortiz ($600)");
    assert_eq!(display(&d, ViewKind::Customer, "Most Profitable Customer"), "Bob Ortiz ($100)");
    // West, East and Central tie on sales; West appears first.
    assert_eq!(display(&d, ViewKind::Customer, "Top Region"), "West ($300)");
}

#[test]
fn empty_selection_reports_placeholders() {
    let enriched = enriched_orders();
    let spec = FilterSpec::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        Vec::<String>::new(),
        ["Standard Class"],
    );
    let d = Dashboard::build(&enriched, &spec).unwrap();

    assert_eq!(d.summary.rows, 0);
    assert_eq!(display(&d, ViewKind::Fulfillment, "Avg Order Processing (Days)"), "N/A");
    assert_eq!(display(&d, ViewKind::Fulfillment, "Late Order %"), "0.0%");
    assert_eq!(display(&d, ViewKind::Financial, "Profit Margin"), "0.00%");
    assert_eq!(display(&d, ViewKind::Financial, "Avg Discount"), "N/A");
    assert_eq!(
        metric(&d, ViewKind::Product, "Best Selling Product").value,
        MetricValue::Missing
    );
    assert_eq!(display(&d, ViewKind::Customer, "Top Customer"), "N/A");

    for view in &d.views {
        for chart in &view.charts {
            assert!(chart.table.is_empty(), "{}", chart.title);
        }
    }
}

#[test]
fn dashboard_serializes_to_json() {
    let d = default_dashboard();
    let json = serde_json::to_value(&d).unwrap();

    assert_eq!(json["views"].as_array().unwrap().len(), 4);
    assert_eq!(json["views"][0]["kind"], "fulfillment");
    assert_eq!(json["summary"]["total_orders"], 5);
    assert_eq!(json["filter"]["start"], "2024-01-05");
}
