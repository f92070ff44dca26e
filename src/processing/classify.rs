//! Lane status classification.

use crate::types::{LaneStatus, LaneValues, Record};

/// Values at or above this are [`LaneStatus::Occupied`].
pub const OCCUPIED_THRESHOLD: f64 = 22.0;

/// Classify a present lane value.
///
/// `0` is `Free`, `(0, 22)` is `InUse`, and everything else (including negative values) is
/// `Occupied`.
pub fn classify_value(value: f64) -> LaneStatus {
    if value == 0.0 {
        LaneStatus::Free
    } else if value > 0.0 && value < OCCUPIED_THRESHOLD {
        LaneStatus::InUse
    } else {
        LaneStatus::Occupied
    }
}

/// Classify a numeric-or-absent lane value. Absent values have no status.
pub fn classify(value: Option<f64>) -> Option<LaneStatus> {
    value.map(classify_value)
}

/// Build a [`Record`], classifying each lane independently.
pub fn classify_row(values: LaneValues) -> Record {
    Record {
        values,
        statuses: values.map(classify),
    }
}
