//! Convenience prelude for common logsort embedding tasks.

pub use crate::api::{
    aggregate_url_metrics, filter_by_date, parse_log_files, render_metrics, run_report,
    LogRecord, LogsortError, OutputFormat, ReportOptions, Result, UrlMetric,
};
