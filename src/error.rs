use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for loading and pipeline operations.
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Error type returned by the loader and the processing pipeline.
///
/// Per-value problems (unparseable dates, zero denominators) are never errors: they become
/// [`crate::types::Value::Null`] cells and are counted in [`crate::processing::EnrichReport`].
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The source identifier does not resolve to a readable file.
    #[error("source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// The source exists but is not usable delimited text with the expected columns.
    #[error("malformed source: {message}")]
    MalformedSource { message: String },

    /// Underlying I/O error other than a missing file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding error not attributable to a specific source path.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A numeric cell could not be coerced to its column type.
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    InvalidValue {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// A pipeline stage referenced a column the table does not carry.
    #[error("unknown column '{column}'")]
    UnknownColumn { column: String },
}

impl DashboardError {
    /// `true` for [`DashboardError::SourceNotFound`].
    pub fn is_source_not_found(&self) -> bool {
        matches!(self, Self::SourceNotFound { .. })
    }

    /// `true` when the source was readable but its structure or contents were rejected.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::MalformedSource { .. } | Self::InvalidValue { .. } | Self::Csv(_)
        )
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedSource {
            message: message.into(),
        }
    }

    pub(crate) fn unknown_column(column: &str) -> Self {
        Self::UnknownColumn {
            column: column.to_owned(),
        }
    }
}
