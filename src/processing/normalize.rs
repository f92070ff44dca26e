//! Re-anchoring a grid to its header row and projecting the lane columns.

use crate::error::SkipReason;
use crate::types::{Cell, Grid, LANE_COUNT, MarkerSet};

/// Data rows below a header, projected to the lane columns in marker order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedTable {
    /// Zero-based grid index of the header row.
    pub header_row: usize,
    /// Projected data rows. Cells missing from short rows are [`Cell::Empty`].
    pub rows: Vec<[Cell; LANE_COUNT]>,
}

/// Promote `header_row` to column labels and project the rows below it onto the markers.
///
/// Rows at or above the header are discarded. Fails with [`SkipReason::ColumnMissing`]
/// when a marker label does not resolve to exactly one header column, and with
/// [`SkipReason::HeaderNotFound`] when `header_row` is outside the grid.
pub fn normalize(
    grid: Grid,
    header_row: usize,
    markers: &MarkerSet,
) -> Result<ProjectedTable, SkipReason> {
    let header = grid.rows.get(header_row).ok_or(SkipReason::HeaderNotFound)?;
    let columns = resolve_columns(header, header_row, markers)?;

    let rows = grid
        .rows
        .into_iter()
        .skip(header_row + 1)
        .map(|mut row| columns.map(|idx| row.get_mut(idx).map(std::mem::take).unwrap_or_default()))
        .collect();

    Ok(ProjectedTable { header_row, rows })
}

fn resolve_columns(
    header: &[Cell],
    header_row: usize,
    markers: &MarkerSet,
) -> Result<[usize; LANE_COUNT], SkipReason> {
    let mut columns = [0usize; LANE_COUNT];
    for (slot, label) in columns.iter_mut().zip(markers.iter()) {
        let positions: Vec<usize> = header
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.as_label() == Some(label))
            .map(|(idx, _)| idx)
            .collect();

        match positions.as_slice() {
            [idx] => *slot = *idx,
            _ => {
                return Err(SkipReason::ColumnMissing {
                    header_row,
                    label: label.to_owned(),
                    occurrences: positions.len(),
                });
            }
        }
    }
    Ok(columns)
}
