//! The named aggregations behind each dashboard chart and headline.
//!
//! Each function takes the filtered table and returns an aggregated table in group
//! first-appearance order, except where a function says it sorts.

use crate::error::DashboardResult;
use crate::schema::{
    CATEGORY, CUSTOMER_NAME, DISCOUNT, ORDER_ID, ORDER_MONTH, ORDER_PRIORITY,
    PROCESSING_TIME_DAYS, PRODUCT_NAME, PROFIT, QUANTITY, REGION, SALES, SEGMENT, SHIPPING_COST,
    SHIP_MODE, SUB_CATEGORY,
};
use crate::types::{DataSet, SortOrder};

use super::aggregate::{aggregate, Measure};

pub const ORDER_COUNT: &str = "Order_Count";
pub const AVG_TIME: &str = "Avg_Time";
pub const AVG_DISCOUNT: &str = "avg_discount";
pub const TOTAL_PROFIT: &str = "total_profit";

/// Mean processing days per month, oldest month first.
pub fn processing_time_by_month(filtered: &DataSet) -> DashboardResult<DataSet> {
    aggregate(filtered, &[ORDER_MONTH], &[Measure::mean(PROCESSING_TIME_DAYS)])?
        .sort_by(ORDER_MONTH, SortOrder::Ascending)
}

/// Mean processing days per ship mode.
pub fn processing_time_by_ship_mode(filtered: &DataSet) -> DashboardResult<DataSet> {
    aggregate(filtered, &[SHIP_MODE], &[Measure::mean(PROCESSING_TIME_DAYS)])
}

/// Distinct orders and mean processing days per order priority.
pub fn orders_by_priority(filtered: &DataSet) -> DashboardResult<DataSet> {
    aggregate(
        filtered,
        &[ORDER_PRIORITY],
        &[
            Measure::count_distinct(ORDER_ID).alias(ORDER_COUNT),
            Measure::mean(PROCESSING_TIME_DAYS).alias(AVG_TIME),
        ],
    )
}

/// Sales and profit per month, oldest month first.
pub fn sales_profit_by_month(filtered: &DataSet) -> DashboardResult<DataSet> {
    aggregate(filtered, &[ORDER_MONTH], &[Measure::sum(SALES), Measure::sum(PROFIT)])?
        .sort_by(ORDER_MONTH, SortOrder::Ascending)
}

/// Mean discount and total profit per sub-category.
pub fn discount_profit_by_sub_category(filtered: &DataSet) -> DashboardResult<DataSet> {
    aggregate(
        filtered,
        &[SUB_CATEGORY],
        &[
            Measure::mean(DISCOUNT).alias(AVG_DISCOUNT),
            Measure::sum(PROFIT).alias(TOTAL_PROFIT),
        ],
    )
}

/// Total shipping cost per ship mode.
pub fn shipping_cost_by_ship_mode(filtered: &DataSet) -> DashboardResult<DataSet> {
    aggregate(filtered, &[SHIP_MODE], &[Measure::sum(SHIPPING_COST)])
}

/// Sales, profit and quantity per product.
pub fn product_totals(filtered: &DataSet) -> DashboardResult<DataSet> {
    aggregate(
        filtered,
        &[PRODUCT_NAME],
        &[Measure::sum(SALES), Measure::sum(PROFIT), Measure::sum(QUANTITY)],
    )
}

/// Sales and profit per category, then sub-category.
pub fn category_tree(filtered: &DataSet) -> DashboardResult<DataSet> {
    aggregate(
        filtered,
        &[CATEGORY, SUB_CATEGORY],
        &[Measure::sum(SALES), Measure::sum(PROFIT)],
    )
}

pub fn sales_by_segment(filtered: &DataSet) -> DashboardResult<DataSet> {
    aggregate(filtered, &[SEGMENT], &[Measure::sum(SALES)])
}

pub fn sales_by_region(filtered: &DataSet) -> DashboardResult<DataSet> {
    aggregate(filtered, &[REGION], &[Measure::sum(SALES)])
}

pub fn sales_by_region_segment(filtered: &DataSet) -> DashboardResult<DataSet> {
    aggregate(filtered, &[REGION, SEGMENT], &[Measure::sum(SALES)])
}

pub fn sales_by_customer(filtered: &DataSet) -> DashboardResult<DataSet> {
    aggregate(filtered, &[CUSTOMER_NAME], &[Measure::sum(SALES)])
}

pub fn profit_by_customer(filtered: &DataSet) -> DashboardResult<DataSet> {
    aggregate(filtered, &[CUSTOMER_NAME], &[Measure::sum(PROFIT)])
}
