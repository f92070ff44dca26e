//! Header discovery and row normalization.
//!
//! The processing layer turns a raw [`crate::types::Grid`] into classified
//! [`crate::types::Record`]s. Every stage is a pure function and can be tested without I/O:
//!
//! - [`locate_header()`]: find the first row containing all marker labels
//! - [`normalize()`]: re-anchor to that row and project the lane columns
//! - [`coerce_rows()`]: coerce lanes to numbers, drop all-absent rows
//! - [`classify_row()`]: derive per-lane [`crate::types::LaneStatus`]
//!
//! [`process_grid()`] runs the stages in order.
//!
//! ## Example
//!
//! ```rust
//! use lane_ingest::processing::process_grid;
//! use lane_ingest::types::{Grid, LaneStatus, MarkerSet};
//!
//! let grid = Grid::from_text_rows(&[
//!     &["x", "y"],
//!     &["UL1", "UL2", "UL3"],
//!     &["0", "15", "30"],
//!     &["5", "abc", ""],
//! ]);
//!
//! let batch = process_grid(grid, &MarkerSet::default()).unwrap();
//! assert_eq!(batch.header_row, 1);
//! assert_eq!(batch.records.len(), 2);
//! assert_eq!(batch.records[1].values, [Some(5.0), None, None]);
//! assert_eq!(batch.records[1].statuses, [Some(LaneStatus::InUse), None, None]);
//! ```

pub mod classify;
pub mod coerce;
pub mod locate;
pub mod normalize;

pub use classify::{OCCUPIED_THRESHOLD, classify, classify_row, classify_value};
pub use coerce::{coerce_cell, coerce_rows};
pub use locate::locate_header;
pub use normalize::{ProjectedTable, normalize};

use crate::error::SkipReason;
use crate::types::{Grid, MarkerSet, Record};

/// Records produced from one file, in file row order.
#[derive(Debug, Clone, PartialEq)]
pub struct FileBatch {
    /// Zero-based grid index of the header row that was used.
    pub header_row: usize,
    /// Retained, classified rows. Never empty.
    pub records: Vec<Record>,
}

/// Run locate → normalize → coerce/filter → classify over a grid.
///
/// Every failure is a [`SkipReason`]: the grid contributes nothing, but the caller is
/// expected to carry on with the next file.
pub fn process_grid(grid: Grid, markers: &MarkerSet) -> Result<FileBatch, SkipReason> {
    let header_row = locate_header(&grid, markers).ok_or(SkipReason::HeaderNotFound)?;
    let table = normalize(grid, header_row, markers)?;

    let records: Vec<Record> = coerce_rows(&table).into_iter().map(classify_row).collect();
    if records.is_empty() {
        return Err(SkipReason::EmptyAfterFilter { header_row });
    }

    Ok(FileBatch {
        header_row,
        records,
    })
}
