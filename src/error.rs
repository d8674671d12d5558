use std::path::PathBuf;

use thiserror::Error;

/// Errors that end a logsort run.
///
/// Per-file and per-line problems while reading logs are not errors: they are
/// logged as warnings and the offending input is skipped.
#[derive(Error, Debug)]
pub enum LogsortError {
    /// IO error (stdout closed, unreadable config file, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error while rendering output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid command-line or config input.
    #[error("{0}")]
    InvalidArgs(String),

    /// The `--date` value is not a `YYYY-MM-DD` calendar date.
    #[error("Invalid date format '{0}'; expected YYYY-MM-DD")]
    InvalidDate(String),

    /// None of the input files produced a single valid record.
    #[error("No valid log records could be read from the given files")]
    NoRecords,

    /// The report file could not be written.
    #[error("Failed to write report to {}: {source}", .path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience result type for logsort operations.
pub type Result<T> = std::result::Result<T, LogsortError>;
