use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::StoreError;

/// Create the data directory (and parents) if it does not exist yet.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the directory cannot be created.
pub fn ensure_data_dir(dir: &Path) -> Result<(), StoreError> {
    std::fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))
}

/// Save a response body verbatim as `raw_<unix-seconds>.html` in `dir`.
///
/// The archive is for manual debugging only and is never read back.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the file cannot be written.
pub fn archive_raw_response(
    dir: &Path,
    body: &str,
    at: DateTime<Utc>,
) -> Result<PathBuf, StoreError> {
    let path = dir.join(format!("raw_{}.html", at.timestamp()));
    std::fs::write(&path, body).map_err(|e| StoreError::io(&path, e))?;
    tracing::debug!(path = %path.display(), bytes = body.len(), "archived raw response");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn archive_names_file_by_unix_seconds() {
        let dir = tempfile::tempdir().unwrap();
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        let path = archive_raw_response(dir.path(), "<html>é</html>", at).unwrap();
        assert_eq!(path, dir.path().join("raw_1714552200.html"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html>é</html>");
    }

    #[test]
    fn ensure_data_dir_creates_nested_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_data_dir(&nested).unwrap();
        assert!(nested.is_dir());
        // Existing directory is fine.
        ensure_data_dir(&nested).unwrap();
    }

    #[test]
    fn archive_into_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = archive_raw_response(&missing, "x", Utc::now()).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }), "got: {err:?}");
    }
}
