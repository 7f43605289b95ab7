use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// `strftime` pattern for [`EnrichedRecord::timestamp_utc`].
pub const RUN_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One availability row as found in an upstream response, before any name
/// resolution or enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub carpark: String,
    pub parking_option: String,
    pub available_spaces: Option<i64>,
}

/// A persisted availability observation.
///
/// Field order is the column order of the latest and history CSV files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub timestamp_utc: String,
    pub carpark: String,
    pub available_spaces: Option<i64>,
    pub total_spaces: Option<i64>,
    pub occupancy: Option<f64>,
    /// Reserved; the upstream feed does not expose a status yet.
    pub status: String,
    pub parking_option: String,
    /// Reserved; the upstream feed does not expose a last-updated time yet.
    pub source_last_updated: String,
}

impl EnrichedRecord {
    pub const COLUMNS: [&'static str; 8] = [
        "timestamp_utc",
        "carpark",
        "available_spaces",
        "total_spaces",
        "occupancy",
        "status",
        "parking_option",
        "source_last_updated",
    ];

    /// Cell text for `column`, or `None` if `column` is not one of
    /// [`Self::COLUMNS`]. Nulls render as an empty cell.
    #[must_use]
    pub fn field(&self, column: &str) -> Option<String> {
        let value = match column {
            "timestamp_utc" => self.timestamp_utc.clone(),
            "carpark" => self.carpark.clone(),
            "available_spaces" => self.available_spaces.map(|v| v.to_string()).unwrap_or_default(),
            "total_spaces" => self.total_spaces.map(|v| v.to_string()).unwrap_or_default(),
            // Debug keeps a trailing `.0` on whole values, e.g. `1.0`.
            "occupancy" => self.occupancy.map(|v| format!("{v:?}")).unwrap_or_default(),
            "status" => self.status.clone(),
            "parking_option" => self.parking_option.clone(),
            "source_last_updated" => self.source_last_updated.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// All cells in [`Self::COLUMNS`] order.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        Self::COLUMNS
            .iter()
            .map(|column| self.field(column).unwrap_or_default())
            .collect()
    }
}

/// Total space counts keyed by canonical display name.
///
/// Keys are matched exactly; callers must look up the already-canonicalized
/// name, not a normalized key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapacityTable {
    totals: HashMap<String, i64>,
}

impl CapacityTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `total` for `carpark`. Non-positive totals are ignored and a
    /// later insert for the same name replaces the earlier one.
    pub fn insert(&mut self, carpark: impl Into<String>, total: i64) {
        if total > 0 {
            self.totals.insert(carpark.into(), total);
        }
    }

    #[must_use]
    pub fn get(&self, carpark: &str) -> Option<i64> {
        self.totals.get(carpark).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for CapacityTable {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, total) in iter {
            table.insert(name, total);
        }
        table
    }
}
