//! Column names of the order record set and the raw schema the loader produces.
//!
//! Source columns keep the header names used by the supply-chain export; derived columns added
//! by [`crate::processing::enrich`] use snake_case names.

use crate::types::{DataType, Field, Schema};

pub const ORDER_ID: &str = "Order ID";
pub const ORDER_DATE: &str = "Order Date";
pub const SHIP_DATE: &str = "Ship Date";
pub const SHIP_MODE: &str = "Ship Mode";
pub const REGION: &str = "Region";
pub const ORDER_PRIORITY: &str = "Order Priority";
pub const SALES: &str = "Sales";
pub const PROFIT: &str = "Profit";
pub const DISCOUNT: &str = "Discount";
pub const SHIPPING_COST: &str = "Shipping_Cost";
pub const QUANTITY: &str = "Quantity";
pub const CATEGORY: &str = "Category";
pub const SUB_CATEGORY: &str = "Sub-Category";
pub const PRODUCT_NAME: &str = "Product Name";
pub const CUSTOMER_ID: &str = "Customer ID";
pub const CUSTOMER_NAME: &str = "Customer Name";
pub const SEGMENT: &str = "Segment";

pub const PROCESSING_TIME_DAYS: &str = "processing_time_days";
pub const STANDARD_SLA_DAYS: &str = "standard_sla_days";
pub const IS_LATE: &str = "is_late";
pub const PROFIT_MARGIN: &str = "profit_margin";
pub const ORDER_MONTH: &str = "order_month";

/// Raw order schema, in loader output order.
///
/// Dates stay textual here; [`crate::processing::enrich`] parses them. Measures are coerced to
/// `Float64` at load time.
pub fn raw_order_schema() -> Schema {
    Schema::new(vec![
        Field::new(ORDER_ID, DataType::Utf8),
        Field::new(ORDER_DATE, DataType::Utf8),
        Field::new(SHIP_DATE, DataType::Utf8),
        Field::new(SHIP_MODE, DataType::Utf8),
        Field::new(REGION, DataType::Utf8),
        Field::new(ORDER_PRIORITY, DataType::Utf8),
        Field::new(SALES, DataType::Float64),
        Field::new(PROFIT, DataType::Float64),
        Field::new(DISCOUNT, DataType::Float64),
        Field::new(SHIPPING_COST, DataType::Float64),
        Field::new(QUANTITY, DataType::Float64),
        Field::new(CATEGORY, DataType::Utf8),
        Field::new(SUB_CATEGORY, DataType::Utf8),
        Field::new(PRODUCT_NAME, DataType::Utf8),
        Field::new(CUSTOMER_ID, DataType::Utf8),
        Field::new(CUSTOMER_NAME, DataType::Utf8),
        Field::new(SEGMENT, DataType::Utf8),
    ])
}

/// Derived fields appended by enrichment, in append order.
pub fn derived_fields() -> Vec<Field> {
    vec![
        Field::new(PROCESSING_TIME_DAYS, DataType::Int64),
        Field::new(STANDARD_SLA_DAYS, DataType::Int64),
        Field::new(IS_LATE, DataType::Bool),
        Field::new(PROFIT_MARGIN, DataType::Float64),
        Field::new(ORDER_MONTH, DataType::Date),
    ]
}
