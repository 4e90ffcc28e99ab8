//! Enriched-table cache keyed by source path.
//!
//! Loading and enriching a source is expensive relative to re-filtering, so the shell keeps one
//! [`EnrichedCache`] and asks it for the enriched table on every interaction. Entries are
//! immutable [`Arc<DataSet>`]s, safe to share read-only. Only an explicit
//! [`EnrichedCache::invalidate`] (or [`EnrichedCache::clear`]) forces a reload.
//!
//! Entries are keyed by source identity, not spelling: `orders.csv`, `./orders.csv` and an
//! absolute path to the same file share one entry (see [`source_key`]).

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, info};

use crate::error::DashboardResult;
use crate::ingestion::{load, LoadOptions};
use crate::processing::enrich_with_report;
use crate::types::DataSet;

#[derive(Debug, Default)]
pub struct EnrichedCache {
    entries: RwLock<HashMap<PathBuf, Arc<DataSet>>>,
}

impl EnrichedCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached enriched table for `path`, loading and enriching it on first use.
    ///
    /// Failed loads are not cached; the next call retries.
    pub fn get_or_load(
        &self,
        path: impl AsRef<Path>,
        options: &LoadOptions,
    ) -> DashboardResult<Arc<DataSet>> {
        let path = path.as_ref();
        let key = source_key(path);
        if let Some(hit) = self.lookup(&key) {
            debug!("cache hit for {}", path.display());
            return Ok(hit);
        }

        let raw = load(path, options)?;
        let (enriched, report) = enrich_with_report(&raw)?;
        info!(
            "cached {} enriched rows for {} ({} unparsed order dates)",
            report.rows,
            path.display(),
            report.unparsed_order_dates
        );

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have filled the slot while we were loading; keep the first entry.
        let entry = entries
            .entry(key)
            .or_insert_with(|| Arc::new(enriched));
        Ok(Arc::clone(entry))
    }

    /// Cached enriched table for `path`, without loading.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<Arc<DataSet>> {
        self.lookup(&source_key(path.as_ref()))
    }

    fn lookup(&self, key: &Path) -> Option<Arc<DataSet>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Drop the entry for `path`. Returns whether one was present. Other entries are kept.
    pub fn invalidate(&self, path: impl AsRef<Path>) -> bool {
        let removed = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&source_key(path.as_ref()))
            .is_some();
        if removed {
            debug!("invalidated cache entry for {}", path.as_ref().display());
        }
        removed
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cache key for a source path.
///
/// A path that resolves is canonicalized (symlinks, `.` and `..` resolved). One that does not is
/// made absolute against the working directory and cleaned lexically, so it still reaches the
/// loader and fails there with [`crate::DashboardError::SourceNotFound`].
pub fn source_key(path: &Path) -> PathBuf {
    if let Ok(canonical) = std::fs::canonicalize(path) {
        return canonical;
    }
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };
    lexical_clean(&absolute)
}

fn lexical_clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
