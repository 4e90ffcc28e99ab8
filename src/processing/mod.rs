//! In-memory order-table transformations.
//!
//! Every stage is a pure function from a [`crate::types::DataSet`] to a new one:
//!
//! - [`enrich()`]: parse dates and add derived columns (processing time, SLA, lateness,
//!   profit margin, order month)
//! - [`apply()`]: narrow the enriched table with a [`FilterSpec`]
//! - [`aggregate()`]: group by key columns and reduce [`Measure`]s
//! - [`reduce()`]: reduce one column of the whole table
//! - [`rank`]: top-N / bottom-N selection with stable tie-breaking
//! - [`SummaryMetrics`]: the ungrouped headline numbers
//! - [`scenarios`]: the named aggregations each chart needs
//!
//! ## Example: enrich → filter → aggregate
//!
//! ```rust
//! use supply_chain_dashboard::processing::{aggregate, apply, enrich, FilterOptions, Measure};
//! use supply_chain_dashboard::schema::{raw_order_schema, REGION, SALES};
//! use supply_chain_dashboard::types::{DataSet, Value};
//!
//! let schema = raw_order_schema();
//! let mut row = vec![Value::Null; schema.fields.len()];
//! row[schema.index_of("Order ID").unwrap()] = Value::text("CA-1");
//! row[schema.index_of("Order Date").unwrap()] = Value::text("01/03/2024");
//! row[schema.index_of("Ship Date").unwrap()] = Value::text("06/03/2024");
//! row[schema.index_of("Ship Mode").unwrap()] = Value::text("Standard Class");
//! row[schema.index_of(REGION).unwrap()] = Value::text("West");
//! row[schema.index_of(SALES).unwrap()] = Value::Float64(120.0);
//! let raw = DataSet::new(schema, vec![row]);
//!
//! let enriched = enrich(&raw).unwrap();
//! let spec = FilterOptions::from_table(&enriched).unwrap().default_spec();
//! let filtered = apply(&enriched, &spec).unwrap();
//! let by_region = aggregate(&filtered, &[REGION], &[Measure::sum(SALES)]).unwrap();
//! assert_eq!(by_region.rows, vec![vec![Value::text("West"), Value::Float64(120.0)]]);
//! ```

pub mod aggregate;
pub mod enrich;
pub mod filter;
pub mod rank;
pub mod reduce;
pub mod scenarios;
pub mod summary;

pub use aggregate::{aggregate, Measure};
pub use enrich::{enrich, enrich_with_report, EnrichReport};
pub use filter::{apply, filter, FilterOptions, FilterSpec};
pub use rank::{bottom_n, top_n, top_one};
pub use reduce::{reduce, Reducer};
pub use summary::SummaryMetrics;
