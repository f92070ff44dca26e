//! File discovery, grid loading, and per-file ingestion.
//!
//! Most callers should use [`crate::aggregate::ingest_dir`]. The pieces it is built from live
//! here:
//!
//! - [`discover_sources`] lists spreadsheet and CSV files in a directory
//! - [`load_grid`] reads one file into a raw [`crate::types::Grid`]
//! - [`ingest_file`] loads and processes one file, reporting to an [`IngestionObserver`]
//!
//! Format-specific loaders are also available under:
//! - [`csv`]
//! - `excel` (cargo feature `excel`)

pub mod csv;
pub mod discovery;
#[cfg(feature = "excel")]
pub mod excel;
pub mod observability;
pub mod unified;

pub use discovery::discover_sources;
pub use observability::{
    CompositeObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
    TracingObserver,
};
pub use unified::{
    FileOutcome, IngestionFormat, IngestionOptions, SourceFile, ingest_file, load_grid,
};
