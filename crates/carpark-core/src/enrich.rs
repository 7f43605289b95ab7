//! Joins extracted rows with name resolution and capacity figures.

use chrono::{DateTime, Utc};

use crate::names::CarparkNames;
use crate::types::{CapacityTable, EnrichedRecord, RawRecord, RUN_TIMESTAMP_FORMAT};

/// Fraction of `total` that is occupied, rounded half-to-even at four
/// decimal places and clamped to `[0, 1]`.
///
/// Returns `None` unless both counts are known, `total` is non-zero and the
/// difference fits in an `i64`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn occupancy(total: Option<i64>, available: Option<i64>) -> Option<f64> {
    let total = total.filter(|t| *t != 0)?;
    let available = available?;
    let occupied = total.checked_sub(available)?;
    let ratio = occupied as f64 / total as f64;
    let rounded = (ratio * 10_000.0).round_ties_even() / 10_000.0;
    Some(rounded.clamp(0.0, 1.0))
}

/// Turn one run's raw rows into persistable records.
///
/// Rows whose name is ignored or stop-collecting are dropped. Every surviving
/// record carries the same `run_at` timestamp.
#[must_use]
pub fn enrich(
    raw_records: &[RawRecord],
    capacity: &CapacityTable,
    names: &CarparkNames,
    run_at: DateTime<Utc>,
) -> Vec<EnrichedRecord> {
    let timestamp_utc = run_at.format(RUN_TIMESTAMP_FORMAT).to_string();

    raw_records
        .iter()
        .filter_map(|raw| {
            let Some(carpark) = names.resolve(&raw.carpark) else {
                tracing::debug!(carpark = %raw.carpark, "dropping suppressed carpark");
                return None;
            };
            let total_spaces = capacity.get(&carpark);
            Some(EnrichedRecord {
                timestamp_utc: timestamp_utc.clone(),
                occupancy: occupancy(total_spaces, raw.available_spaces),
                carpark,
                available_spaces: raw.available_spaces,
                total_spaces,
                status: String::new(),
                parking_option: raw.parking_option.trim().to_string(),
                source_last_updated: String::new(),
            })
        })
        .collect()
}
