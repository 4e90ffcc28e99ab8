use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use log::{error, info, warn};

use crate::error::DashboardError;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (load failed; the source is readable but unusable).
    Error,
    /// Critical error (source missing or unreadable).
    Critical,
}

impl LoadSeverity {
    /// Severity of a failed load.
    pub fn for_error(e: &DashboardError) -> Self {
        match e {
            DashboardError::SourceNotFound { .. } | DashboardError::Io(_) => Self::Critical,
            DashboardError::Csv(err) => match err.kind() {
                ::csv::ErrorKind::Io(_) => Self::Critical,
                _ => Self::Error,
            },
            DashboardError::MalformedSource { .. }
            | DashboardError::InvalidValue { .. }
            | DashboardError::UnknownColumn { .. } => Self::Error,
        }
    }
}

/// Context about a load attempt.
#[derive(Debug, Clone)]
pub struct LoadContext {
    /// The source path used for loading.
    pub path: PathBuf,
    /// Field delimiter used for loading.
    pub delimiter: u8,
}

/// Minimal stats reported on a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// Number of loaded rows.
    pub rows: usize,
}

/// Observer interface for load outcomes.
pub trait LoadObserver: Send + Sync {
    /// Called when a load succeeds.
    fn on_success(&self, _ctx: &LoadContext, _stats: LoadStats) {}

    /// Called when a load fails.
    fn on_failure(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &DashboardError) {}

    /// Called when a load failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &DashboardError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Forwards every load event to each of its members, in insertion order.
#[derive(Default)]
pub struct CompositeObserver {
    members: Vec<Arc<dyn LoadObserver>>,
}

impl CompositeObserver {
    pub fn new(members: Vec<Arc<dyn LoadObserver>>) -> Self {
        Self { members }
    }

    /// Append `member`, builder style.
    pub fn with(mut self, member: Arc<dyn LoadObserver>) -> Self {
        self.members.push(member);
        self
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompositeObserver({} members)", self.members.len())
    }
}

impl LoadObserver for CompositeObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        self.members.iter().for_each(|m| m.on_success(ctx, stats));
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &DashboardError) {
        self.members
            .iter()
            .for_each(|m| m.on_failure(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &DashboardError) {
        self.members
            .iter()
            .for_each(|m| m.on_alert(ctx, severity, error));
    }
}

/// Reports load events through the `log` facade.
#[derive(Debug, Default)]
pub struct LogObserver;

impl LoadObserver for LogObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        info!(
            "[load][ok] path={} delimiter={:?} rows={}",
            ctx.path.display(),
            ctx.delimiter as char,
            stats.rows
        );
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &DashboardError) {
        warn!(
            "[load][{:?}] path={} err={}",
            severity,
            ctx.path.display(),
            error
        );
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &DashboardError) {
        error!(
            "[ALERT][load][{:?}] path={} err={}",
            severity,
            ctx.path.display(),
            error
        );
    }
}
