//! Loader: delimited source → raw order [`crate::types::DataSet`].
//!
//! Most callers should use [`load`] (from [`loader`]) which:
//!
//! - checks the source resolves to a readable file ([`crate::DashboardError::SourceNotFound`])
//! - infers the delimiter from the extension (or uses [`LoadOptions::delimiter`])
//! - requires every order column by header name ([`crate::DashboardError::MalformedSource`])
//! - optionally reports success/failure/alerts to a [`LoadObserver`]
//!
//! The lower-level reader lives in [`csv`].

pub mod csv;
pub mod loader;
pub mod observability;

pub use loader::{delimiter_for_path, load, LoadOptions};
pub use observability::{
    CompositeObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, LogObserver,
};
