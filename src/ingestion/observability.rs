use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{LoadError, SkipReason};

use super::unified::IngestionFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    /// Informational event (e.g. a file without lane data).
    Info,
    /// Warning-level event (non-fatal, but the file looked like it should have contributed).
    Warning,
    /// Error-level event (the file could not be parsed).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

impl IngestionSeverity {
    /// Severity of a skipped file.
    pub fn for_skip(reason: &SkipReason) -> Self {
        match reason {
            SkipReason::HeaderNotFound | SkipReason::EmptyAfterFilter { .. } => Self::Info,
            SkipReason::ColumnMissing { .. } => Self::Warning,
            SkipReason::Load(err) => Self::for_load(err),
        }
    }

    fn for_load(err: &LoadError) -> Self {
        match err {
            LoadError::Io(_) => Self::Critical,
            LoadError::Csv(err) => match err.kind() {
                ::csv::ErrorKind::Io(_) => Self::Critical,
                _ => Self::Error,
            },
            #[cfg(feature = "excel")]
            LoadError::Excel(calamine::Error::Io(_)) => Self::Critical,
            #[cfg(feature = "excel")]
            LoadError::Excel(_) => Self::Error,
            LoadError::NoWorksheet => Self::Error,
            LoadError::ExcelDisabled | LoadError::UnknownFormat { .. } => Self::Warning,
        }
    }
}

/// Context about a single file of an ingestion run.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    /// The input path.
    pub path: PathBuf,
    /// Format used to load the file.
    pub format: IngestionFormat,
}

/// Stats reported when a file contributes records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    /// Number of retained records.
    pub rows: usize,
    /// Zero-based grid index of the header row.
    pub header_row: usize,
}

/// Observer interface for per-file ingestion outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait IngestionObserver: Send + Sync {
    /// Called when a file contributes records.
    fn on_loaded(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    /// Called when a file is skipped.
    fn on_skipped(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _reason: &SkipReason) {}

    /// Called when a skip meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_skipped`].
    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, reason: &SkipReason) {
        self.on_skipped(ctx, severity, reason)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IngestionObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn IngestionObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl IngestionObserver for CompositeObserver {
    fn on_loaded(&self, ctx: &IngestionContext, stats: IngestionStats) {
        for o in &self.observers {
            o.on_loaded(ctx, stats);
        }
    }

    fn on_skipped(&self, ctx: &IngestionContext, severity: IngestionSeverity, reason: &SkipReason) {
        for o in &self.observers {
            o.on_skipped(ctx, severity, reason);
        }
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, reason: &SkipReason) {
        for o in &self.observers {
            o.on_alert(ctx, severity, reason);
        }
    }
}

/// Logs ingestion events through `tracing`.
///
/// Skips are logged at a level matching their severity: `Info` skips (no header, no numeric
/// rows) at info, `Warning` at warn, and `Error`/`Critical` at error.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl IngestionObserver for TracingObserver {
    fn on_loaded(&self, ctx: &IngestionContext, stats: IngestionStats) {
        tracing::info!(
            path = %ctx.path.display(),
            format = ?ctx.format,
            rows = stats.rows,
            header_row = stats.header_row,
            "file ingested"
        );
    }

    fn on_skipped(&self, ctx: &IngestionContext, severity: IngestionSeverity, reason: &SkipReason) {
        let path = ctx.path.display();
        match severity {
            IngestionSeverity::Info => {
                tracing::info!(path = %path, format = ?ctx.format, reason = %reason, "file skipped")
            }
            IngestionSeverity::Warning => {
                tracing::warn!(path = %path, format = ?ctx.format, reason = %reason, "file skipped")
            }
            IngestionSeverity::Error | IngestionSeverity::Critical => tracing::error!(
                path = %path,
                format = ?ctx.format,
                severity = ?severity,
                reason = %reason,
                "file skipped"
            ),
        }
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, reason: &SkipReason) {
        tracing::error!(
            path = %ctx.path.display(),
            format = ?ctx.format,
            severity = ?severity,
            reason = %reason,
            "ALERT: file skipped"
        );
    }
}
