//! Unified per-file entrypoint.
//!
//! Most callers should use [`crate::aggregate::ingest_dir`]. This module provides the
//! per-file building blocks it is made of:
//!
//! - [`load_grid`] reads one file into a raw [`crate::types::Grid`] in its declared format.
//! - [`ingest_file`] loads a file, runs [`crate::processing::process_grid`] over it, and
//!   reports the outcome to the configured [`super::observability::IngestionObserver`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{LoadError, SkipReason};
use crate::processing::{FileBatch, process_grid};
use crate::types::{Grid, MarkerSet};

use super::csv;
use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IngestionFormat {
    /// Spreadsheet/workbook formats (feature-gated behind `excel`).
    Excel,
    /// Comma-separated values.
    Csv,
}

impl IngestionFormat {
    /// Extensions discovered for each format, lowercase.
    pub const EXCEL_EXTENSIONS: &'static [&'static str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];
    pub const CSV_EXTENSIONS: &'static [&'static str] = &["csv"];

    /// Parse an ingestion format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        if Self::EXCEL_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Excel)
        } else if Self::CSV_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Csv)
        } else {
            None
        }
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Excel => Self::EXCEL_EXTENSIONS,
            Self::Csv => Self::CSV_EXTENSIONS,
        }
    }
}

/// A discovered input file and the format it is declared as.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceFile {
    pub path: PathBuf,
    pub format: IngestionFormat,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, format: IngestionFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Build a source file, inferring the format from the path's extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let path = path.into();
        let format = infer_format_from_path(&path)?;
        Ok(Self { path, format })
    }
}

/// Options controlling an ingestion run.
///
/// Use [`Default`] for the standard `UL1,UL2,UL3` markers with no observer.
#[derive(Clone)]
pub struct IngestionOptions {
    /// Header labels to locate and project.
    pub markers: MarkerSet,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("markers", &self.markers)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            markers: MarkerSet::default(),
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Result of ingesting one file.
#[derive(Debug)]
pub enum FileOutcome {
    /// The file contributed at least one record.
    Loaded(FileBatch),
    /// The file contributed nothing. Processing of other files continues.
    Skipped(SkipReason),
}

impl FileOutcome {
    pub fn rows(&self) -> usize {
        match self {
            Self::Loaded(batch) => batch.records.len(),
            Self::Skipped(_) => 0,
        }
    }
}

impl From<Result<FileBatch, SkipReason>> for FileOutcome {
    fn from(result: Result<FileBatch, SkipReason>) -> Self {
        match result {
            Ok(batch) => Self::Loaded(batch),
            Err(reason) => Self::Skipped(reason),
        }
    }
}

/// Read a file into a raw grid using its declared format.
pub fn load_grid(source: &SourceFile) -> Result<Grid, LoadError> {
    match source.format {
        IngestionFormat::Csv => csv::load_csv_grid(&source.path),
        IngestionFormat::Excel => load_excel_dispatch(&source.path),
    }
}

/// Load one file and run the processing pipeline over it.
///
/// When an observer is configured, this function reports:
///
/// - `on_loaded` when the file contributes records, with row count and header row
/// - `on_skipped` when it does not, with a computed severity
/// - `on_alert` when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use lane_ingest::ingestion::{ingest_file, FileOutcome, IngestionOptions, SourceFile};
///
/// # fn main() -> Result<(), lane_ingest::error::LoadError> {
/// let source = SourceFile::from_path("sensors.csv")?;
/// match ingest_file(&source, &IngestionOptions::default()) {
///     FileOutcome::Loaded(batch) => println!("rows={}", batch.records.len()),
///     FileOutcome::Skipped(reason) => println!("skipped: {reason}"),
/// }
/// # Ok(())
/// # }
/// ```
pub fn ingest_file(source: &SourceFile, options: &IngestionOptions) -> FileOutcome {
    tracing::debug!(path = %source.path.display(), format = ?source.format, "processing file");

    let outcome: FileOutcome = load_grid(source)
        .map_err(SkipReason::from)
        .and_then(|grid| process_grid(grid, &options.markers))
        .into();

    if let Some(obs) = options.observer.as_ref() {
        let ctx = IngestionContext {
            path: source.path.clone(),
            format: source.format,
        };
        match &outcome {
            FileOutcome::Loaded(batch) => obs.on_loaded(
                &ctx,
                IngestionStats {
                    rows: batch.records.len(),
                    header_row: batch.header_row,
                },
            ),
            FileOutcome::Skipped(reason) => {
                let sev = IngestionSeverity::for_skip(reason);
                obs.on_skipped(&ctx, sev, reason);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, reason);
                }
            }
        }
    }

    outcome
}

fn infer_format_from_path(path: &Path) -> Result<IngestionFormat, LoadError> {
    path.extension()
        .and_then(|s| s.to_str())
        .and_then(IngestionFormat::from_extension)
        .ok_or_else(|| LoadError::UnknownFormat {
            path: path.to_path_buf(),
        })
}

fn load_excel_dispatch(path: &Path) -> Result<Grid, LoadError> {
    #[cfg(feature = "excel")]
    {
        super::excel::load_excel_grid(path)
    }

    #[cfg(not(feature = "excel"))]
    {
        let _ = path;
        Err(LoadError::ExcelDisabled)
    }
}

#[cfg(test)]
mod tests {
    use super::{IngestionFormat, SourceFile};
    use crate::error::LoadError;

    #[test]
    fn format_from_extension_is_case_insensitive() {
        assert_eq!(IngestionFormat::from_extension("CSV"), Some(IngestionFormat::Csv));
        assert_eq!(IngestionFormat::from_extension("xlsx"), Some(IngestionFormat::Excel));
        assert_eq!(IngestionFormat::from_extension("Ods"), Some(IngestionFormat::Excel));
        assert_eq!(IngestionFormat::from_extension("json"), None);
    }

    #[test]
    fn source_file_infers_format() {
        let source = SourceFile::from_path("data/lanes.XLSX").unwrap();
        assert_eq!(source.format, IngestionFormat::Excel);

        let err = SourceFile::from_path("data/readme").unwrap_err();
        assert!(matches!(err, LoadError::UnknownFormat { .. }));
    }
}
