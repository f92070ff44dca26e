use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for whole-run operations (discovery, export).
pub type LaneResult<T> = Result<T, LaneIngestError>;

/// A file could not be turned into a raw grid.
///
/// Load errors are per-file and recoverable: the aggregator skips the file and continues.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-text parse error (including invalid UTF-8).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "excel")]
    /// Spreadsheet parse error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// The workbook opened but contains no worksheet.
    #[error("workbook has no worksheets")]
    NoWorksheet,

    /// A spreadsheet was found but the crate was built without the `excel` feature.
    #[error("excel ingestion not enabled (enable cargo feature 'excel')")]
    ExcelDisabled,

    /// The path's extension does not name a supported format.
    #[error("cannot infer format from path ({})", .path.display())]
    UnknownFormat { path: PathBuf },
}

/// Why a file contributed no records.
///
/// Every variant is a normal, per-file outcome. None of them aborts a run.
#[derive(Debug, Error)]
pub enum SkipReason {
    /// The file could not be read in its declared format.
    #[error("load failed: {0}")]
    Load(#[from] LoadError),

    /// No row contains all marker labels.
    #[error("no row contains all marker labels")]
    HeaderNotFound,

    /// A marker label does not resolve to exactly one column of the header row.
    #[error(
        "header row {header_row}: column '{label}' found {occurrences} times (expected exactly once)"
    )]
    ColumnMissing {
        header_row: usize,
        label: String,
        occurrences: usize,
    },

    /// Every data row below the header is non-numeric in all three lanes.
    #[error("no numeric rows below header row {header_row}")]
    EmptyAfterFilter { header_row: usize },
}

/// The file-discovery step failed. This is the only fatal condition of a run.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The scan directory does not exist.
    #[error("scan path '{}' does not exist", .path.display())]
    RootNotFound { path: PathBuf },

    /// The scan path exists but is not a directory.
    #[error("scan path '{}' is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    /// A discovery glob pattern could not be compiled.
    #[error("invalid discovery pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// A directory entry could not be read while globbing.
    #[error("error reading directory entry: {0}")]
    Glob(#[from] glob::GlobError),
}

/// Top-level error for operations that either complete or abort as a whole.
#[derive(Debug, Error)]
pub enum LaneIngestError {
    /// File discovery failed; the record collection could not be computed.
    #[error("discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    /// Writing an export file failed.
    #[error("failed to write export '{}': {source}", .path.display())]
    ExportIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialising the export failed.
    #[error("failed to serialise export '{}': {source}", .path.display())]
    ExportJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
