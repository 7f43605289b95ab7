//! Capacity lookup table loading.

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;

use carpark_core::CapacityTable;

use crate::error::StoreError;

/// One row of `capacity_lookup.csv`. Other columns are ignored.
#[derive(Debug, Deserialize)]
struct CapacityRow {
    carpark: Option<String>,
    total_spaces: Option<String>,
}

/// Load the `carpark,total_spaces` table at `path`.
///
/// A missing file yields an empty table. Rows without a name, or whose total
/// is not a positive integer, are skipped. Names are trimmed but otherwise
/// kept exactly, since lookups use canonical display names.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the file exists but cannot be opened.
pub fn load_capacity(path: &Path) -> Result<CapacityTable, StoreError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no capacity table; occupancy will be empty");
            return Ok(CapacityTable::new());
        }
        Err(e) => return Err(StoreError::io(path, e)),
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(file);

    let mut table = CapacityTable::new();
    for (idx, row) in reader.deserialize::<CapacityRow>().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                tracing::debug!(line, error = %e, "skipping malformed capacity row");
                continue;
            }
        };

        let Some(name) = row
            .carpark
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        else {
            tracing::debug!(line, "skipping capacity row without a carpark name");
            continue;
        };

        match row
            .total_spaces
            .as_deref()
            .and_then(|s| s.trim().parse::<i64>().ok())
        {
            Some(total) if total > 0 => table.insert(name, total),
            _ => {
                tracing::debug!(line, carpark = name, "skipping capacity row without a usable total");
            }
        }
    }

    tracing::debug!(path = %path.display(), entries = table.len(), "loaded capacity table");
    Ok(table)
}
