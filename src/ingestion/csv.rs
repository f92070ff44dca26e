//! Delimited-text grid loading.

use std::path::Path;

use crate::error::LoadError;
use crate::types::{Cell, Grid};

/// Load a CSV file into a raw [`Grid`].
///
/// Rules:
///
/// - No header row is assumed; every record is data.
/// - Records may have different lengths.
/// - Every non-empty field becomes [`Cell::Text`]; empty fields become [`Cell::Empty`].
/// - Blank lines are skipped by the reader.
pub fn load_csv_grid(path: impl AsRef<Path>) -> Result<Grid, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    load_csv_grid_from_reader(&mut rdr)
}

/// Load a raw grid from an existing CSV reader.
///
/// The reader's own header setting is respected; configure it with `has_headers(false)` to
/// keep the first record as data.
pub fn load_csv_grid_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> Result<Grid, LoadError> {
    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(Cell::from_field).collect());
    }
    Ok(Grid::new(rows))
}
