#![cfg(feature = "excel")]

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use crate::error::LoadError;
use crate::types::{Cell, Grid};

/// Load the first worksheet of a workbook (`.xlsx`, `.xls`, `.ods`, etc.) into a raw [`Grid`].
///
/// Behavior:
/// - Only the first sheet in workbook order is read
/// - No header row is assumed; every row is data
/// - Grid row 0 is sheet row 1, even when the sheet's used range starts lower
/// - Integer, float and boolean cells keep their type; everything else becomes text
pub fn load_excel_grid(path: impl AsRef<Path>) -> Result<Grid, LoadError> {
    let mut workbook = open_workbook_auto(path)?;

    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(LoadError::NoWorksheet)?;
    let range = workbook.worksheet_range(&first)?;

    Ok(grid_from_range(&range))
}

fn grid_from_range(range: &calamine::Range<Data>) -> Grid {
    let leading_rows = range.start().map(|(row, _)| row as usize).unwrap_or(0);

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); leading_rows];
    rows.extend(range.rows().map(|row| row.iter().map(convert_cell).collect()));
    Grid::new(rows)
}

fn convert_cell(c: &Data) -> Cell {
    match c {
        Data::Empty => Cell::Empty,
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        // Serial dates and error values are never lane readings.
        other => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::convert_cell;
    use crate::types::Cell;
    use calamine::Data;

    #[test]
    fn typed_cells_keep_their_type() {
        assert_eq!(convert_cell(&Data::Int(3)), Cell::Int(3));
        assert_eq!(convert_cell(&Data::Float(2.5)), Cell::Float(2.5));
        assert_eq!(convert_cell(&Data::Bool(true)), Cell::Bool(true));
        assert_eq!(convert_cell(&Data::Empty), Cell::Empty);
        assert_eq!(
            convert_cell(&Data::String("UL1".to_string())),
            Cell::Text("UL1".to_string())
        );
    }

    #[test]
    fn iso_dates_become_text() {
        let cell = convert_cell(&Data::DateTimeIso("2024-05-01T10:00:00".to_string()));
        assert_eq!(cell, Cell::Text("2024-05-01T10:00:00".to_string()));
    }
}
