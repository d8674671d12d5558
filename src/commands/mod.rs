mod analyze;
mod entry_filter;
mod render;
mod report;
mod util;

pub use analyze::{aggregate_url_metrics, UrlMetric};
pub use entry_filter::{
    filter_by_date, parse_target_date, timestamp_date, DEFAULT_TIMESTAMP_FIELD,
};
pub use render::{
    display_url, ranked, render_csv, render_json, render_metrics, render_table, OutputFormat,
    NO_DATA_MESSAGE,
};
pub use report::{collect_metrics, report_base_name, run_report, ReportData, ReportOptions};
pub use util::unique_report_path;
