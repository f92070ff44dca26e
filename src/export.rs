//! JSON export of a [`RecordCollection`].

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{LaneIngestError, LaneResult};
use crate::types::RecordCollection;

/// Write the collection as a JSON array of objects to `writer`.
///
/// Each object carries the lane values under the marker labels followed by
/// `<label>_status` fields. Returns the number of records written.
pub fn export_json<W: Write>(
    collection: &RecordCollection,
    writer: W,
    pretty: bool,
) -> Result<usize, serde_json::Error> {
    if pretty {
        serde_json::to_writer_pretty(writer, collection)?;
    } else {
        serde_json::to_writer(writer, collection)?;
    }
    Ok(collection.len())
}

/// Write the collection to `path`, replacing any existing file.
pub fn export_json_to_path(
    collection: &RecordCollection,
    path: impl AsRef<Path>,
    pretty: bool,
) -> LaneResult<usize> {
    let path = path.as_ref();
    let io_err = |source: std::io::Error| LaneIngestError::ExportIo {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    let count = export_json(collection, &mut writer, pretty).map_err(|source| {
        LaneIngestError::ExportJson {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.flush().map_err(io_err)?;

    tracing::info!(path = %path.display(), records = count, "export written");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::{export_json, export_json_to_path};
    use crate::error::LaneIngestError;
    use crate::processing::classify_row;
    use crate::types::{MarkerSet, RecordCollection};

    fn sample() -> RecordCollection {
        RecordCollection::new(
            MarkerSet::default(),
            vec![
                classify_row([Some(0.0), Some(15.0), Some(30.0)]),
                classify_row([Some(5.0), None, None]),
            ],
        )
    }

    #[test]
    fn export_writes_labeled_objects() {
        let mut out = Vec::new();
        let n = export_json(&sample(), &mut out, false).unwrap();
        assert_eq!(n, 2);

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!([
                {
                    "UL1": 0.0, "UL2": 15.0, "UL3": 30.0,
                    "UL1_status": "Free", "UL2_status": "InUse", "UL3_status": "Occupied"
                },
                {
                    "UL1": 5.0, "UL2": null, "UL3": null,
                    "UL1_status": "InUse", "UL2_status": null, "UL3_status": null
                }
            ])
        );
    }

    #[test]
    fn export_to_path_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.json");
        let n = export_json_to_path(&sample(), &path, true).unwrap();
        assert_eq!(n, 2);

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn export_into_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/output.json");
        let err = export_json_to_path(&sample(), &path, false).unwrap_err();
        assert!(matches!(err, LaneIngestError::ExportIo { .. }));
    }
}
