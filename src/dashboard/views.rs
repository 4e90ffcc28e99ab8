use crate::error::DashboardResult;
use crate::processing::scenarios::{self, AVG_DISCOUNT, AVG_TIME, ORDER_COUNT, TOTAL_PROFIT};
use crate::processing::{bottom_n, top_n, top_one, SummaryMetrics};
use crate::schema::{
    CATEGORY, CUSTOMER_NAME, ORDER_MONTH, ORDER_PRIORITY, PROCESSING_TIME_DAYS, PRODUCT_NAME,
    PROFIT, QUANTITY, REGION, SALES, SEGMENT, SHIPPING_COST, SHIP_MODE, SUB_CATEGORY,
};
use crate::types::{DataSet, Value};

use super::format::{currency, fixed_or_na, percent, percent_points, NOT_AVAILABLE};
use super::{Chart, ChartKind, Metric, MetricValue, View, ViewKind};

const TOP_N: usize = 10;

fn count_metric(label: &str, n: usize) -> Metric {
    Metric::new(label, MetricValue::Number(n as f64), n.to_string())
}

fn optional_number(value: Option<f64>) -> MetricValue {
    value.map_or(MetricValue::Missing, MetricValue::Number)
}

/// Name of the top group, or `N/A` when there is none.
fn top_name(label: &str, top: Option<&[Value]>) -> Metric {
    match top.and_then(|row| row.first()) {
        Some(name) => Metric::new(label, MetricValue::Text(name.to_string()), name.to_string()),
        None => Metric::new(label, MetricValue::Missing, NOT_AVAILABLE),
    }
}

/// `Name ($amount)` for a `(name, amount)` top row, or `N/A`.
fn top_name_with_amount(label: &str, top: Option<&[Value]>) -> Metric {
    match top {
        Some([name, amount, ..]) => {
            let display = format!("{name} (${:.0})", amount.as_f64().unwrap_or(0.0));
            Metric::new(label, MetricValue::Text(name.to_string()), display)
        }
        _ => Metric::new(label, MetricValue::Missing, NOT_AVAILABLE),
    }
}

fn view(kind: ViewKind, metrics: Vec<Metric>, charts: Vec<Chart>) -> View {
    View {
        kind,
        title: kind.title().to_owned(),
        metrics,
        charts,
    }
}

/// Processing time, lateness and order volume.
pub fn fulfillment_view(filtered: &DataSet, summary: &SummaryMetrics) -> DashboardResult<View> {
    let avg = summary.avg_processing_days.map(|v| (v * 100.0).round() / 100.0);
    let metrics = vec![
        Metric::new(
            "Avg Order Processing (Days)",
            optional_number(avg),
            fixed_or_na(avg, 2),
        ),
        count_metric("Total Orders", summary.total_orders),
        count_metric("Total Late Orders", summary.late_orders),
        Metric::new(
            "Late Order %",
            MetricValue::Number(summary.late_pct),
            percent_points(summary.late_pct, 1),
        ),
    ];

    let charts = vec![
        Chart::new(
            ChartKind::Line,
            "Average Order Processing Time Over Time",
            scenarios::processing_time_by_month(filtered)?,
        )
        .x(ORDER_MONTH)
        .y(PROCESSING_TIME_DAYS),
        Chart::new(
            ChartKind::Bar,
            "Average Processing Time by Ship Mode",
            scenarios::processing_time_by_ship_mode(filtered)?,
        )
        .x(SHIP_MODE)
        .y(PROCESSING_TIME_DAYS)
        .color(PROCESSING_TIME_DAYS),
        Chart::new(
            ChartKind::Bar,
            "Order Count by Order Priority (Color: Avg Processing Time)",
            scenarios::orders_by_priority(filtered)?,
        )
        .x(ORDER_PRIORITY)
        .y(ORDER_COUNT)
        .color(AVG_TIME),
    ];

    Ok(view(ViewKind::Fulfillment, metrics, charts))
}

/// Sales, profit, discount and shipping cost.
pub fn financial_view(filtered: &DataSet, summary: &SummaryMetrics) -> DashboardResult<View> {
    let metrics = vec![
        Metric::new(
            "Total Sales",
            MetricValue::Number(summary.total_sales),
            currency(summary.total_sales),
        ),
        Metric::new(
            "Total Profit",
            MetricValue::Number(summary.total_profit),
            currency(summary.total_profit),
        ),
        Metric::new(
            "Profit Margin",
            MetricValue::Number(summary.overall_margin),
            percent(summary.overall_margin, 2),
        ),
        Metric::new(
            "Avg Discount",
            optional_number(summary.avg_discount),
            summary
                .avg_discount
                .map_or_else(|| NOT_AVAILABLE.to_string(), |d| percent(d, 2)),
        ),
    ];

    let charts = vec![
        Chart::new(
            ChartKind::Line,
            "Sales vs Profit Over Time",
            scenarios::sales_profit_by_month(filtered)?,
        )
        .x(ORDER_MONTH)
        .y(SALES)
        .y(PROFIT),
        Chart::new(
            ChartKind::Scatter,
            "Discount vs Profit by Sub-Category",
            scenarios::discount_profit_by_sub_category(filtered)?,
        )
        .x(AVG_DISCOUNT)
        .y(TOTAL_PROFIT)
        .color(TOTAL_PROFIT)
        .size(TOTAL_PROFIT)
        .hover(SUB_CATEGORY),
        Chart::new(
            ChartKind::Bar,
            "Total Shipping Cost by Ship Mode",
            scenarios::shipping_cost_by_ship_mode(filtered)?,
        )
        .x(SHIP_MODE)
        .y(SHIPPING_COST)
        .color(SHIPPING_COST),
    ];

    Ok(view(ViewKind::Financial, metrics, charts))
}

/// Product rankings and category mix.
pub fn product_view(filtered: &DataSet) -> DashboardResult<View> {
    let products = scenarios::product_totals(filtered)?;
    let best_selling = top_one(&products, SALES)?;
    let most_profitable = top_one(&products, PROFIT)?;
    let quantity: f64 = products
        .column(QUANTITY)?
        .filter_map(Value::as_f64)
        .sum();

    let metrics = vec![
        top_name("Best Selling Product", best_selling.as_deref()),
        top_name("Most Profitable Product", most_profitable.as_deref()),
        Metric::new(
            "Total Quantity Sold",
            MetricValue::Number(quantity.trunc()),
            format!("{}", quantity.trunc() as i64),
        ),
    ];

    let charts = vec![
        Chart::new(
            ChartKind::HorizontalBar,
            "Top 10 Products by Sales",
            top_n(&products, SALES, TOP_N)?,
        )
        .x(SALES)
        .y(PRODUCT_NAME),
        Chart::new(
            ChartKind::HorizontalBar,
            "Bottom 10 Products by Profit",
            bottom_n(&products, PROFIT, TOP_N)?,
        )
        .x(PROFIT)
        .y(PRODUCT_NAME),
        Chart::new(
            ChartKind::Treemap,
            "Sales by Category and Sub-Category",
            scenarios::category_tree(filtered)?,
        )
        .path(&[CATEGORY, SUB_CATEGORY])
        .y(SALES)
        .color(PROFIT),
        Chart::new(ChartKind::Scatter, "Sales vs Profit by Product", products)
            .x(SALES)
            .y(PROFIT)
            .size(SALES)
            .hover(PRODUCT_NAME),
    ];

    Ok(view(ViewKind::Product, metrics, charts))
}

/// Customer, segment and region breakdowns.
pub fn customer_view(filtered: &DataSet, summary: &SummaryMetrics) -> DashboardResult<View> {
    let customer_sales = scenarios::sales_by_customer(filtered)?;
    let customer_profit = scenarios::profit_by_customer(filtered)?;
    let region_sales = scenarios::sales_by_region(filtered)?;

    let top_customer = top_one(&customer_sales, SALES)?;
    let most_profitable = top_one(&customer_profit, PROFIT)?;
    let top_region = top_one(&region_sales, SALES)?;

    let metrics = vec![
        count_metric("Total Customers", summary.total_customers),
        top_name_with_amount("Top Customer", top_customer.as_deref()),
        top_name_with_amount("Most Profitable Customer", most_profitable.as_deref()),
        top_name_with_amount("Top Region", top_region.as_deref()),
    ];

    let charts = vec![
        Chart::new(
            ChartKind::Donut,
            "Sales by Segment",
            scenarios::sales_by_segment(filtered)?,
        )
        .x(SEGMENT)
        .y(SALES),
        Chart::new(
            ChartKind::HorizontalBar,
            "Top 10 Customers by Profit",
            top_n(&customer_profit, PROFIT, TOP_N)?,
        )
        .x(PROFIT)
        .y(CUSTOMER_NAME),
        Chart::new(
            ChartKind::StackedBar,
            "Sales by Region and Segment",
            scenarios::sales_by_region_segment(filtered)?,
        )
        .x(REGION)
        .y(SALES)
        .color(SEGMENT),
        Chart::new(ChartKind::Bar, "Sales by Region", region_sales)
            .x(REGION)
            .y(SALES),
    ];

    Ok(view(ViewKind::Customer, metrics, charts))
}
