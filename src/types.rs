//! Core data model types.
//!
//! Files are loaded into a headerless [`Grid`] of [`Cell`]s. The processing layer locates the
//! header row described by a [`MarkerSet`], projects the three lane columns, and produces
//! classified [`Record`]s, which are concatenated into a [`RecordCollection`].

use std::fmt;
use std::str::FromStr;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Number of lanes (marker columns) tracked per record.
pub const LANE_COUNT: usize = 3;

/// Marker labels used when none are configured.
pub const DEFAULT_MARKERS: [&str; LANE_COUNT] = ["UL1", "UL2", "UL3"];

/// A single untyped cell of a raw grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cell {
    /// Missing/empty cell.
    #[default]
    Empty,
    /// Integer cell (spreadsheets only).
    Int(i64),
    /// Floating point cell (spreadsheets only).
    Float(f64),
    /// Boolean cell (spreadsheets only).
    Bool(bool),
    /// Text cell. Every non-empty delimited-text field is text.
    Text(String),
}

impl Cell {
    /// Build a cell from a delimited-text field. Empty fields become [`Cell::Empty`].
    pub fn from_field(raw: &str) -> Self {
        if raw.is_empty() {
            Self::Empty
        } else {
            Self::Text(raw.to_owned())
        }
    }

    /// The trimmed text of a text cell, used for header label matching.
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.trim()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// A raw, headerless 2-D grid. Rows may have different lengths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    /// Row-major cell storage, in file order.
    pub rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Build a grid of text cells, mapping `""` to [`Cell::Empty`].
    ///
    /// Mostly useful in tests and examples.
    pub fn from_text_rows(rows: &[&[&str]]) -> Self {
        Self::new(
            rows.iter()
                .map(|row| row.iter().map(|raw| Cell::from_field(raw)).collect())
                .collect(),
        )
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// The three labels whose co-occurrence identifies the header row.
///
/// Declaration order is the output column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSet {
    labels: [String; LANE_COUNT],
}

impl MarkerSet {
    pub fn new<S: Into<String>>(labels: [S; LANE_COUNT]) -> Self {
        Self {
            labels: labels.map(Into::into),
        }
    }

    pub fn labels(&self) -> &[String; LANE_COUNT] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Export key of the status field for lane `idx` (e.g. `UL2_status`).
    pub fn status_key(&self, idx: usize) -> String {
        format!("{}_status", self.labels[idx])
    }
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self::new(DEFAULT_MARKERS)
    }
}

impl fmt::Display for MarkerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.labels.join(","))
    }
}

/// Parses a comma separated list of exactly three distinct, non-empty labels.
impl FromStr for MarkerSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let labels: [&str; LANE_COUNT] = parts.as_slice().try_into().map_err(|_| {
            format!(
                "expected {LANE_COUNT} comma separated marker labels, got {} ('{s}')",
                parts.len()
            )
        })?;
        if labels.iter().any(|l| l.is_empty()) {
            return Err(format!("marker labels must not be empty ('{s}')"));
        }
        if labels[0] == labels[1] || labels[0] == labels[2] || labels[1] == labels[2] {
            return Err(format!("marker labels must be distinct ('{s}')"));
        }
        Ok(Self::new(labels))
    }
}

/// Occupancy status of a single lane value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LaneStatus {
    /// Value is exactly zero.
    Free,
    /// Value is strictly between zero and the occupancy threshold.
    InUse,
    /// Value is at or above the occupancy threshold, or negative.
    Occupied,
}

impl LaneStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::InUse => "InUse",
            Self::Occupied => "Occupied",
        }
    }
}

impl fmt::Display for LaneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric-or-absent values of the three lanes, in marker order.
pub type LaneValues = [Option<f64>; LANE_COUNT];

/// One normalized, classified row.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Lane values in marker order. `None` means the cell was not numeric.
    pub values: LaneValues,
    /// Per-lane status. `None` exactly when the matching value is `None`.
    pub statuses: [Option<LaneStatus>; LANE_COUNT],
}

/// A [`Record`] paired with the marker labels it is serialized under.
///
/// Serializes as `{"UL1": .., "UL2": .., "UL3": .., "UL1_status": .., ...}`.
#[derive(Debug, Clone, Copy)]
pub struct LabeledRecord<'a> {
    pub markers: &'a MarkerSet,
    pub record: &'a Record,
}

impl Serialize for LabeledRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(LANE_COUNT * 2))?;
        for (label, value) in self.markers.iter().zip(self.record.values.iter()) {
            map.serialize_entry(label, value)?;
        }
        for (idx, status) in self.record.statuses.iter().enumerate() {
            map.serialize_entry(&self.markers.status_key(idx), status)?;
        }
        map.end()
    }
}

/// Ordered records aggregated across every contributing file.
///
/// Built once per ingestion run and treated as immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordCollection {
    markers: MarkerSet,
    records: Vec<Record>,
}

impl RecordCollection {
    pub fn new(markers: MarkerSet, records: Vec<Record>) -> Self {
        Self { markers, records }
    }

    /// An empty collection. Empty is a valid, reportable state.
    pub fn empty(markers: MarkerSet) -> Self {
        Self::new(markers, Vec::new())
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent record: the last row of the last contributing file, in discovery order.
    pub fn latest(&self) -> Option<LabeledRecord<'_>> {
        self.records.last().map(|record| self.label(record))
    }

    pub fn labeled(&self) -> impl Iterator<Item = LabeledRecord<'_>> {
        self.records.iter().map(|record| self.label(record))
    }

    /// Append one file's batch, preserving its row order.
    pub(crate) fn extend_batch(&mut self, batch: Vec<Record>) {
        self.records.extend(batch);
    }

    fn label<'a>(&'a self, record: &'a Record) -> LabeledRecord<'a> {
        LabeledRecord {
            markers: &self.markers,
            record,
        }
    }
}

/// Serializes as a JSON-style array of labeled records.
impl Serialize for RecordCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.records.len()))?;
        for record in self.labeled() {
            seq.serialize_element(&record)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(values: LaneValues, statuses: [Option<LaneStatus>; LANE_COUNT]) -> Record {
        Record { values, statuses }
    }

    #[test]
    fn cell_from_field_maps_empty_to_empty() {
        assert_eq!(Cell::from_field(""), Cell::Empty);
        assert_eq!(Cell::from_field(" "), Cell::Text(" ".to_string()));
        assert_eq!(Cell::from_field("UL1"), Cell::Text("UL1".to_string()));
    }

    #[test]
    fn as_label_trims_text_and_ignores_numbers() {
        assert_eq!(Cell::Text(" UL1 ".to_string()).as_label(), Some("UL1"));
        assert_eq!(Cell::Int(1).as_label(), None);
        assert_eq!(Cell::Empty.as_label(), None);
    }

    #[test]
    fn marker_set_parses_comma_list() {
        let markers: MarkerSet = "A, B,C".parse().unwrap();
        assert_eq!(markers, MarkerSet::new(["A", "B", "C"]));
        assert_eq!(markers.status_key(1), "B_status");
        assert_eq!(markers.to_string(), "A,B,C");
    }

    #[test]
    fn marker_set_rejects_wrong_arity_empty_and_duplicates() {
        assert!("A,B".parse::<MarkerSet>().unwrap_err().contains("expected 3"));
        assert!("A,,C".parse::<MarkerSet>().unwrap_err().contains("empty"));
        assert!("A,B,A".parse::<MarkerSet>().unwrap_err().contains("distinct"));
    }

    #[test]
    fn labeled_record_serializes_values_then_statuses_in_marker_order() {
        let markers = MarkerSet::default();
        let rec = record(
            [Some(5.0), None, Some(30.0)],
            [Some(LaneStatus::InUse), None, Some(LaneStatus::Occupied)],
        );
        let json = serde_json::to_string(&LabeledRecord {
            markers: &markers,
            record: &rec,
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"UL1":5.0,"UL2":null,"UL3":30.0,"UL1_status":"InUse","UL2_status":null,"UL3_status":"Occupied"}"#
        );
    }

    #[test]
    fn collection_latest_is_last_record() {
        let markers = MarkerSet::default();
        let first = record([Some(0.0), None, None], [Some(LaneStatus::Free), None, None]);
        let last = record([None, Some(1.0), None], [None, Some(LaneStatus::InUse), None]);
        let mut collection = RecordCollection::empty(markers);
        assert!(collection.latest().is_none());

        collection.extend_batch(vec![first, last.clone()]);
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.latest().map(|l| l.record), Some(&last));
    }

    #[test]
    fn empty_collection_serializes_as_empty_array() {
        let collection = RecordCollection::empty(MarkerSet::default());
        assert_eq!(serde_json::to_string(&collection).unwrap(), "[]");
    }
}
