//! Latest-snapshot and history CSV output.
//!
//! The history file is rewritten in full on every run: existing rows are
//! read back and the new batch is appended after them. That keeps old rows
//! byte-for-byte (including columns this version no longer writes) but reads
//! the whole file each time, so it is only suitable for modest volumes.

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use tempfile::NamedTempFile;

use carpark_core::EnrichedRecord;

use crate::error::StoreError;

/// Row counts written by [`persist`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistSummary {
    pub latest_rows: usize,
    pub history_rows: usize,
}

/// Overwrite `latest_path` with `records` and append them to `history_path`.
///
/// # Errors
///
/// Returns [`StoreError`] if either file cannot be read or written. The
/// latest snapshot is written first.
pub fn persist(
    records: &[EnrichedRecord],
    latest_path: &Path,
    history_path: &Path,
) -> Result<PersistSummary, StoreError> {
    write_latest(records, latest_path)?;
    let history_rows = append_history(records, history_path)?;
    Ok(PersistSummary {
        latest_rows: records.len(),
        history_rows,
    })
}

/// Replace `path` with exactly `records`. An empty batch writes the header
/// only.
///
/// # Errors
///
/// Returns [`StoreError`] if the file cannot be written.
pub fn write_latest(records: &[EnrichedRecord], path: &Path) -> Result<(), StoreError> {
    let header: Vec<String> = EnrichedRecord::COLUMNS
        .iter()
        .map(ToString::to_string)
        .collect();
    write_csv_atomically(path, &header, records.iter().map(EnrichedRecord::to_row))?;
    tracing::info!(path = %path.display(), rows = records.len(), "wrote latest snapshot");
    Ok(())
}

/// Append `records` to the history file at `path`, creating it if absent.
///
/// Existing columns keep their order; any record column missing from the
/// existing header is added at the end, and old rows get an empty cell for
/// it. Returns the total number of data rows now in the file.
///
/// # Errors
///
/// Returns [`StoreError`] if the existing history cannot be parsed or the
/// file cannot be written. A failed parse leaves the file untouched.
pub fn append_history(records: &[EnrichedRecord], path: &Path) -> Result<usize, StoreError> {
    let (mut header, existing_rows) = read_history(path)?.unwrap_or_default();

    for column in EnrichedRecord::COLUMNS {
        if !header.iter().any(|h| h == column) {
            header.push(column.to_string());
        }
    }

    let width = header.len();
    let previous = existing_rows.len();

    let old_rows = existing_rows.into_iter().map(|row| {
        let mut cells: Vec<String> = row.iter().map(str::to_string).collect();
        if cells.len() < width {
            cells.resize(width, String::new());
        }
        cells
    });
    let new_rows = records.iter().map(|record| {
        header
            .iter()
            .map(|column| record.field(column).unwrap_or_default())
            .collect::<Vec<String>>()
    });
    let rows: Vec<Vec<String>> = old_rows.chain(new_rows).collect();
    let total = rows.len();

    write_csv_atomically(path, &header, rows)?;
    tracing::info!(
        path = %path.display(),
        previous,
        appended = records.len(),
        total,
        "updated history"
    );
    Ok(total)
}

type HistoryContents = (Vec<String>, Vec<csv::StringRecord>);

/// Header and rows of an existing history file, or `None` if the file is
/// missing or empty.
fn read_history(path: &Path) -> Result<Option<HistoryContents>, StoreError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::io(path, e)),
    };

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let header: Vec<String> = reader
        .headers()
        .map_err(|e| StoreError::csv(path, e))?
        .iter()
        .map(str::to_string)
        .collect();

    if header.iter().all(String::is_empty) {
        return Ok(None);
    }

    let rows = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| StoreError::csv(path, e))?;

    Ok(Some((header, rows)))
}

/// Write `header` and `rows` to a temporary file beside `path`, then rename
/// it over `path`.
fn write_csv_atomically<I>(path: &Path, header: &[String], rows: I) -> Result<(), StoreError>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;

    {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(tmp.as_file());
        writer
            .write_record(header)
            .map_err(|e| StoreError::csv(path, e))?;
        for row in rows {
            writer
                .write_record(&row)
                .map_err(|e| StoreError::csv(path, e))?;
        }
        writer.flush().map_err(|e| StoreError::io(path, e))?;
    }

    tmp.as_file()
        .sync_all()
        .map_err(|e| StoreError::io(path, e))?;
    tmp.persist(path)
        .map_err(|e| StoreError::io(path, e.error))?;
    Ok(())
}
