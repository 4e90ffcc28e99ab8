//! Ungrouped summary metrics over a filtered table.

use serde::Serialize;

use crate::error::DashboardResult;
use crate::schema::{
    CUSTOMER_ID, DISCOUNT, IS_LATE, ORDER_ID, PROCESSING_TIME_DAYS, PROFIT, QUANTITY, SALES,
};
use crate::types::{DataSet, Value};

use super::reduce::{reduce, Reducer};

/// `numerator / max(1, denominator)`.
///
/// A zero denominator never fails or produces a non-finite number.
pub fn protected_ratio(numerator: f64, denominator: f64) -> f64 {
    numerator / denominator.max(1.0)
}

/// Overall margin: [`protected_ratio`], except that zero sales report a zero margin whatever
/// the profit.
pub fn margin_ratio(profit: f64, sales: f64) -> f64 {
    if sales == 0.0 {
        0.0
    } else {
        protected_ratio(profit, sales)
    }
}

/// Scalar metrics shown above the charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetrics {
    /// Rows in the filtered table.
    pub rows: usize,
    /// Mean processing days; `None` when no row has a processing time.
    pub avg_processing_days: Option<f64>,
    /// Distinct order ids.
    pub total_orders: usize,
    /// Rows flagged late.
    pub late_orders: usize,
    /// `100 * late_orders / max(1, rows)`.
    pub late_pct: f64,
    pub total_sales: f64,
    pub total_profit: f64,
    /// `total_profit / max(1, total_sales)`, and 0 when total sales are exactly 0.
    pub overall_margin: f64,
    /// Mean discount; `None` on an empty selection.
    pub avg_discount: Option<f64>,
    pub total_quantity: f64,
    /// Distinct customer ids.
    pub total_customers: usize,
}

impl SummaryMetrics {
    /// Compute every summary metric over `filtered`.
    pub fn compute(filtered: &DataSet) -> DashboardResult<Self> {
        let float = |column: &str, reducer: Reducer| -> DashboardResult<Option<f64>> {
            Ok(reduce(filtered, column, reducer)?.as_f64())
        };
        let count = |column: &str, reducer: Reducer| -> DashboardResult<usize> {
            Ok(match reduce(filtered, column, reducer)? {
                Value::Int64(n) => usize::try_from(n).unwrap_or(0),
                _ => 0,
            })
        };

        let rows = filtered.row_count();
        let late_orders = count(IS_LATE, Reducer::Sum)?;
        let total_sales = float(SALES, Reducer::Sum)?.unwrap_or(0.0);
        let total_profit = float(PROFIT, Reducer::Sum)?.unwrap_or(0.0);

        Ok(Self {
            rows,
            avg_processing_days: float(PROCESSING_TIME_DAYS, Reducer::Mean)?,
            total_orders: count(ORDER_ID, Reducer::CountDistinct)?,
            late_orders,
            late_pct: 100.0 * protected_ratio(late_orders as f64, rows as f64),
            total_sales,
            total_profit,
            overall_margin: margin_ratio(total_profit, total_sales),
            avg_discount: float(DISCOUNT, Reducer::Mean)?,
            total_quantity: float(QUANTITY, Reducer::Sum)?.unwrap_or(0.0),
            total_customers: count(CUSTOMER_ID, Reducer::CountDistinct)?,
        })
    }
}
