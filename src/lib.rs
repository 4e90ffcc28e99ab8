//! `supply-chain-dashboard` is the data core of a supply-chain order analytics dashboard.
//!
//! It loads a flat table of order records into an in-memory [`types::DataSet`], enriches it with
//! derived fulfilment and financial columns, narrows it with a user filter selection and
//! aggregates it into the tables and headline metrics behind four dashboard views. Rendering is
//! left to whatever consumes the (serializable) [`dashboard::Dashboard`].
//!
//! ## Pipeline
//!
//! ```text
//! load ─► enrich ─► (cache) ─► apply(FilterSpec) ─► aggregate / SummaryMetrics ─► Dashboard
//! ```
//!
//! - [`ingestion::load`]: delimited file → raw table typed by [`schema::raw_order_schema`]
//! - [`processing::enrich`]: parse dates, derive processing time, SLA, lateness, margin and month
//! - [`cache::EnrichedCache`]: enrich each source once per process
//! - [`processing::apply`]: date range + region + ship mode selection
//! - [`processing::aggregate`], [`processing::SummaryMetrics`]: grouped and ungrouped reductions
//! - [`dashboard::Dashboard::build`]: every view for one selection
//!
//! ## Quick example
//!
//! ```no_run
//! use supply_chain_dashboard::cache::EnrichedCache;
//! use supply_chain_dashboard::dashboard::{Dashboard, ViewKind};
//! use supply_chain_dashboard::ingestion::LoadOptions;
//! use supply_chain_dashboard::processing::FilterOptions;
//!
//! # fn main() -> Result<(), supply_chain_dashboard::DashboardError> {
//! let cache = EnrichedCache::new();
//! let enriched = cache.get_or_load("orders.csv", &LoadOptions::default())?;
//!
//! let spec = FilterOptions::from_table(&enriched)?.default_spec();
//! let dashboard = Dashboard::build(&enriched, &spec)?;
//! if let Some(view) = dashboard.view(ViewKind::Financial) {
//!     for metric in &view.metrics {
//!         println!("{}: {}", metric.label, metric.display);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: source loading, CSV reader and load observers
//! - [`schema`]: order column names and the raw/derived column types
//! - [`types`]: schema + in-memory dataset types
//! - [`processing`]: enrichment, filtering, aggregation and ranking
//! - [`dashboard`]: per-view metrics and chart tables
//! - [`cache`]: memoised enriched tables keyed by source path
//! - [`config`]: default source path and its environment override
//! - [`error`]: error types used across the crate

pub mod cache;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod ingestion;
pub mod processing;
pub mod schema;
pub mod types;

pub use error::{DashboardError, DashboardResult};
