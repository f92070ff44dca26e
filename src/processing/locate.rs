//! Header row discovery.

use std::collections::HashSet;

use crate::types::{Cell, Grid, MarkerSet};

/// Returns the index of the first row whose cell labels contain every marker.
///
/// Rows are scanned from index 0. Only the first qualifying row is ever reported; later
/// candidate rows are not considered. Returns `None` when no row qualifies, which is an
/// expected outcome for files that do not carry lane data.
pub fn locate_header(grid: &Grid, markers: &MarkerSet) -> Option<usize> {
    grid.rows
        .iter()
        .position(|row| row_contains_markers(row, markers))
}

fn row_contains_markers(row: &[Cell], markers: &MarkerSet) -> bool {
    let labels: HashSet<&str> = row.iter().filter_map(Cell::as_label).collect();
    markers.iter().all(|marker| labels.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::locate_header;
    use crate::types::{Cell, Grid, MarkerSet};

    #[test]
    fn finds_header_below_preamble() {
        let grid = Grid::from_text_rows(&[
            &["Report", "2024-01-01"],
            &[],
            &["UL1", "UL2", "UL3"],
            &["1", "2", "3"],
        ]);
        assert_eq!(locate_header(&grid, &MarkerSet::default()), Some(2));
    }

    #[test]
    fn first_candidate_wins() {
        let grid = Grid::from_text_rows(&[
            &["x"],
            &["UL3", "UL2", "UL1"],
            &["UL1", "UL2", "UL3"],
        ]);
        assert_eq!(locate_header(&grid, &MarkerSet::default()), Some(1));
    }

    #[test]
    fn header_may_carry_extra_columns_in_any_order() {
        let grid = Grid::from_text_rows(&[&["time", "UL2", "note", "UL3", "UL1"]]);
        assert_eq!(locate_header(&grid, &MarkerSet::default()), Some(0));
    }

    #[test]
    fn partial_marker_rows_do_not_match() {
        let grid = Grid::from_text_rows(&[&["UL1", "UL2"], &["UL2", "UL3", ""], &["a", "b", "c"]]);
        assert_eq!(locate_header(&grid, &MarkerSet::default()), None);
    }

    #[test]
    fn matching_trims_text_but_is_case_sensitive() {
        let markers = MarkerSet::default();
        let padded = Grid::from_text_rows(&[&[" UL1", "UL2 ", "UL3"]]);
        assert_eq!(locate_header(&padded, &markers), Some(0));

        let lower = Grid::from_text_rows(&[&["ul1", "ul2", "ul3"]]);
        assert_eq!(locate_header(&lower, &markers), None);
    }

    #[test]
    fn numeric_cells_never_match_labels() {
        let markers = MarkerSet::new(["1", "2", "3"]);
        let grid = Grid::new(vec![
            vec![Cell::Int(1), Cell::Int(2), Cell::Int(3)],
            vec![
                Cell::Text("1".to_string()),
                Cell::Text("2".to_string()),
                Cell::Text("3".to_string()),
            ],
        ]);
        assert_eq!(locate_header(&grid, &markers), Some(1));
    }

    #[test]
    fn empty_grid_has_no_header() {
        assert_eq!(locate_header(&Grid::default(), &MarkerSet::default()), None);
    }
}
