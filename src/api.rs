//! Stable, supported API surface for embedding logsort.
//!
//! This module re-exports the types and functions intended for external use.
//! Treat the contents of this module as SemVer-stable.

pub use crate::commands::{
    aggregate_url_metrics, collect_metrics, display_url, filter_by_date, parse_target_date,
    ranked, render_csv, render_json, render_metrics, render_table, report_base_name, run_report,
    timestamp_date, unique_report_path, OutputFormat, ReportData, ReportOptions, UrlMetric,
    DEFAULT_TIMESTAMP_FIELD, NO_DATA_MESSAGE,
};
pub use crate::config::{load_config, Config, ReportConfig, ResolvedConfig, ResolvedReportConfig};
pub use crate::error::{LogsortError, Result};
pub use crate::logs::{parse_log_files, LogRecord};
