//! Loader entrypoint.
//!
//! [`load`] reads an order record set from a delimited file into a raw [`DataSet`] shaped like
//! [`crate::schema::raw_order_schema`]. It distinguishes a source that is not there
//! ([`DashboardError::SourceNotFound`]) from one that is there but unusable
//! ([`DashboardError::MalformedSource`] / [`DashboardError::InvalidValue`]).
//!
//! Loading is not memoized here; [`crate::cache::EnrichedCache`] memoizes the whole
//! load-and-enrich step per source.

use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;

use log::debug;

use crate::error::{DashboardError, DashboardResult};
use crate::schema::raw_order_schema;
use crate::types::DataSet;

use super::csv::read_delimited;
use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};

/// Options controlling [`load`].
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// Field delimiter. If `None`, inferred from the file extension.
    pub delimiter: Option<u8>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("delimiter", &self.delimiter.map(|d| d as char))
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Delimiter implied by a file extension: tab for `.tsv`/`.tab`, comma otherwise.
pub fn delimiter_for_path(path: &Path) -> u8 {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "tsv" | "tab" => b'\t',
        _ => b',',
    }
}

/// Load the raw order table from `path`.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row count stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// ```no_run
/// use supply_chain_dashboard::ingestion::{load, LoadOptions};
///
/// # fn main() -> Result<(), supply_chain_dashboard::DashboardError> {
/// let raw = load("orders.csv", &LoadOptions::default())?;
/// println!("rows={}", raw.row_count());
/// # Ok(())
/// # }
/// ```
pub fn load(path: impl AsRef<Path>, options: &LoadOptions) -> DashboardResult<DataSet> {
    let path = path.as_ref();
    let ctx = LoadContext {
        path: path.to_path_buf(),
        delimiter: options.delimiter.unwrap_or_else(|| delimiter_for_path(path)),
    };

    debug!("loading {} (delimiter {:?})", path.display(), ctx.delimiter as char);
    let result = load_inner(path, ctx.delimiter);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(ds) => obs.on_success(&ctx, LoadStats { rows: ds.row_count() }),
            Err(e) => {
                let sev = LoadSeverity::for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn load_inner(path: &Path, delimiter: u8) -> DashboardResult<DataSet> {
    let file = open_source(path)?;
    read_delimited(io::BufReader::new(file), &raw_order_schema(), delimiter)
        .map_err(|e| classify(path, e))
}

/// Open `path` as a regular file. Any failure to resolve or open it (missing, a directory, a
/// path through a regular file, no permission) is [`DashboardError::SourceNotFound`].
fn open_source(path: &Path) -> DashboardResult<File> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Err(not_found(path)),
        Err(e) => {
            debug!("cannot resolve {}: {e}", path.display());
            return Err(not_found(path));
        }
    }
    File::open(path).map_err(|e| {
        debug!("cannot open {}: {e}", path.display());
        not_found(path)
    })
}

fn not_found(path: &Path) -> DashboardError {
    DashboardError::SourceNotFound {
        path: path.to_path_buf(),
    }
}

/// Attach the source path to reader errors and split I/O failures from format failures.
///
/// The source is already open here, so an I/O error is a failed read and stays
/// [`DashboardError::Io`].
fn classify(path: &Path, err: DashboardError) -> DashboardError {
    match err {
        DashboardError::Csv(e) if !e.is_io_error() => {
            DashboardError::malformed(format!("{}: {e}", path.display()))
        }
        DashboardError::Csv(e) => match e.into_kind() {
            ::csv::ErrorKind::Io(io) => DashboardError::Io(io),
            kind => DashboardError::malformed(format!("{}: {kind:?}", path.display())),
        },
        DashboardError::MalformedSource { message } => {
            DashboardError::malformed(format!("{}: {message}", path.display()))
        }
        other => other,
    }
}
