//! `lane-ingest` ingests a directory of loosely structured CSV and spreadsheet exports, finds the
//! header row carrying the three lane labels (`UL1`, `UL2`, `UL3` by default) wherever it sits,
//! and turns the rows below it into classified [`types::Record`]s.
//!
//! The primary entrypoint is [`aggregate::ingest_dir`], which discovers input files, processes
//! each one independently, and concatenates the results into a [`types::RecordCollection`].
//!
//! ## What a run does
//!
//! 1. **Discover** `*.xlsx`/`*.xlsm`/`*.xlsb`/`*.xls`/`*.ods` then `*.csv` files in a directory,
//!    each group sorted by path ([`ingestion::discover_sources`]).
//! 2. **Load** each file into a headerless [`types::Grid`] ([`ingestion::load_grid`]).
//! 3. **Locate** the first row containing every marker label ([`processing::locate_header`]).
//! 4. **Normalize**: promote that row to labels, drop everything above it, project the three
//!    lane columns in marker order ([`processing::normalize`]).
//! 5. **Coerce** lanes to numbers (non-numeric content becomes absent) and drop rows where all
//!    three lanes are absent ([`processing::coerce_rows`]).
//! 6. **Classify** each lane: `0` is `Free`, `(0, 22)` is `InUse`, anything else is `Occupied`
//!    ([`processing::classify_value`]).
//!
//! A file without a header, with an ambiguous header, with no numeric rows, or that cannot be
//! parsed is skipped ([`error::SkipReason`]); it never aborts the run. Only a failed discovery
//! step (e.g. a missing directory) is an error.
//!
//! ## Quick example: ingest a directory
//!
//! ```no_run
//! use lane_ingest::aggregate::ingest_dir;
//! use lane_ingest::ingestion::IngestionOptions;
//!
//! # fn main() -> lane_ingest::LaneResult<()> {
//! let run = ingest_dir("./exports", &IngestionOptions::default())?;
//! if let Some(latest) = run.collection.latest() {
//!     println!("{}", serde_json::to_string(&latest).unwrap());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Processing a grid in memory
//!
//! ```rust
//! use lane_ingest::processing::process_grid;
//! use lane_ingest::types::{Grid, LaneStatus, MarkerSet};
//!
//! let grid = Grid::from_text_rows(&[
//!     &["Site 4 export"],
//!     &["time", "UL1", "UL2", "UL3"],
//!     &["08:00", "0", "12", "40"],
//! ]);
//! let batch = process_grid(grid, &MarkerSet::default()).unwrap();
//! assert_eq!(
//!     batch.records[0].statuses,
//!     [Some(LaneStatus::Free), Some(LaneStatus::InUse), Some(LaneStatus::Occupied)]
//! );
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: discovery, grid loading, per-file ingestion and observers
//! - [`processing`]: header location, normalization, coercion, classification
//! - [`aggregate`]: whole-run aggregation and per-file report
//! - [`types`]: grid, marker and record types
//! - [`store`]: atomically replaceable snapshot of the current collection
//! - [`export`]: JSON export
//! - [`service`]: read-only HTTP query service
//! - [`error`]: error types

pub mod aggregate;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod logging;
pub mod processing;
pub mod service;
pub mod store;
pub mod types;

pub use error::{LaneIngestError, LaneResult};
