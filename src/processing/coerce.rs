//! Numeric coercion and row filtering.

use crate::types::{Cell, LaneValues};

use super::normalize::ProjectedTable;

/// Convert a cell to a finite number, or `None` when it is not numeric.
///
/// Coercion is total and never fails:
///
/// - integers and floats map to their value
/// - booleans map to `1.0` / `0.0`
/// - text is trimmed and parsed as a decimal number
/// - empty cells, unparseable text, and non-finite results (`NaN`, `inf`) are absent
pub fn coerce_cell(cell: &Cell) -> Option<f64> {
    let value = match cell {
        Cell::Empty => None,
        Cell::Int(i) => Some(*i as f64),
        Cell::Float(f) => Some(*f),
        Cell::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Cell::Text(s) => s.trim().parse::<f64>().ok(),
    };
    value.filter(|v| v.is_finite())
}

/// Coerce every projected row and drop rows where all lanes are absent.
///
/// Row order is preserved.
pub fn coerce_rows(table: &ProjectedTable) -> Vec<LaneValues> {
    table
        .rows
        .iter()
        .map(|row| row.each_ref().map(coerce_cell))
        .filter(|values| values.iter().any(Option::is_some))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{coerce_cell, coerce_rows};
    use crate::processing::normalize::ProjectedTable;
    use crate::types::Cell;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn numeric_cells_pass_through() {
        assert_eq!(coerce_cell(&Cell::Int(15)), Some(15.0));
        assert_eq!(coerce_cell(&Cell::Float(21.5)), Some(21.5));
        assert_eq!(coerce_cell(&Cell::Bool(true)), Some(1.0));
        assert_eq!(coerce_cell(&Cell::Bool(false)), Some(0.0));
    }

    #[test]
    fn text_is_trimmed_and_parsed() {
        assert_eq!(coerce_cell(&text("0")), Some(0.0));
        assert_eq!(coerce_cell(&text(" 22 ")), Some(22.0));
        assert_eq!(coerce_cell(&text("-3.5")), Some(-3.5));
        assert_eq!(coerce_cell(&text("1e2")), Some(100.0));
    }

    #[test]
    fn non_numeric_content_is_absent() {
        assert_eq!(coerce_cell(&Cell::Empty), None);
        assert_eq!(coerce_cell(&text("")), None);
        assert_eq!(coerce_cell(&text("abc")), None);
        assert_eq!(coerce_cell(&text("1,000")), None);
        assert_eq!(coerce_cell(&text("12 cars")), None);
    }

    #[test]
    fn non_finite_values_are_absent() {
        assert_eq!(coerce_cell(&text("NaN")), None);
        assert_eq!(coerce_cell(&text("inf")), None);
        assert_eq!(coerce_cell(&text("-infinity")), None);
        assert_eq!(coerce_cell(&Cell::Float(f64::NAN)), None);
        assert_eq!(coerce_cell(&Cell::Float(f64::INFINITY)), None);
    }

    #[test]
    fn rows_with_all_lanes_absent_are_dropped_in_order() {
        let table = ProjectedTable {
            header_row: 0,
            rows: vec![
                [text("1"), Cell::Empty, Cell::Empty],
                [text("n/a"), text("-"), Cell::Empty],
                [Cell::Empty, Cell::Empty, text("9")],
                [Cell::Empty, Cell::Empty, Cell::Empty],
            ],
        };
        assert_eq!(
            coerce_rows(&table),
            vec![[Some(1.0), None, None], [None, None, Some(9.0)]]
        );
    }

    #[test]
    fn all_text_rows_coerce_to_nothing() {
        let table = ProjectedTable {
            header_row: 3,
            rows: vec![[text("a"), text("b"), text("c")], [text("d"), text("e"), text("f")]],
        };
        assert!(coerce_rows(&table).is_empty());
    }
}
