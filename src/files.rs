//! On-disk persistence for captured requests.
//!
//! Each record lands in its own pretty-printed JSON file named after the
//! capture instant, e.g. `request_20250114_093012_123456.json`. Two records
//! captured within the same microsecond map to the same path and the later
//! write replaces the earlier one; nothing here guards against that.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::models::ErrorRecord;

/// File name prefix for successfully captured requests.
pub const REQUEST_PREFIX: &str = "request";
/// File name prefix for internal-error records.
pub const ERROR_PREFIX: &str = "error";

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Cannot create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write record {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// ISO-8601 local timestamp with microsecond precision.
pub fn iso_timestamp(at: &DateTime<Local>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// `<prefix>_YYYYMMDD_HHMMSS_ffffff.json`
pub fn record_file_name(prefix: &str, at: &DateTime<Local>) -> String {
    format!("{}_{}.json", prefix, at.format("%Y%m%d_%H%M%S_%6f"))
}

/// Serialize `record` with two-space indentation and write it to
/// `<dir>/<prefix>_<ts>.json`, creating `dir` if needed. Returns the full path.
pub async fn write_record<T: Serialize>(
    dir: &Path,
    prefix: &str,
    at: &DateTime<Local>,
    record: &T,
) -> Result<PathBuf, RecordError> {
    let body = serde_json::to_string_pretty(record)?;

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| RecordError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

    let path = dir.join(record_file_name(prefix, at));
    tokio::fs::write(&path, body)
        .await
        .map_err(|source| RecordError::Write {
            path: path.clone(),
            source,
        })?;

    Ok(path)
}

/// Persist an error record captured at `at`. Failures are logged and
/// swallowed so the caller can still report the original error.
pub async fn write_error_record(
    dir: &Path,
    at: &DateTime<Local>,
    record: &ErrorRecord,
) -> Option<PathBuf> {
    match write_record(dir, ERROR_PREFIX, at, record).await {
        Ok(path) => {
            tracing::info!(path = %path.display(), "error record written");
            Some(path)
        }
        Err(e) => {
            tracing::warn!(error = %record.error, "error record write failed: {}", e);
            None
        }
    }
}

/// Base name of a written record, used in the success response.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
