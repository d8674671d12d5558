use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{LogsortError, Result};
use crate::logs::parse_log_files;

use super::analyze::{aggregate_url_metrics, UrlMetric};
use super::entry_filter::{filter_by_date, parse_target_date, DEFAULT_TIMESTAMP_FIELD};
use super::render::{render_metrics, OutputFormat};
use super::util::unique_report_path;

#[derive(Clone, Debug)]
pub struct ReportOptions {
    /// Base name for the report file.
    pub report: String,
    /// Optional `YYYY-MM-DD` date filter, validated before any file is read.
    pub date: Option<String>,
    /// Write the rendered report to a file instead of stdout.
    pub createfile: bool,
    pub timestamp_field: String,
    pub format: OutputFormat,
    /// Directory the report file is created in.
    pub output_dir: PathBuf,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            report: "report".to_string(),
            date: None,
            createfile: false,
            timestamp_field: DEFAULT_TIMESTAMP_FIELD.to_string(),
            format: OutputFormat::Table,
            output_dir: PathBuf::from("."),
        }
    }
}

/// Result of running the pipeline up to aggregation.
#[derive(Debug, PartialEq)]
pub enum ReportData {
    /// Metrics ready to render.
    Metrics(Vec<UrlMetric>),
    /// A date filter was given and no record matched it.
    NoMatchingDate(NaiveDate),
}

/// Parse, filter and aggregate `files`.
///
/// Fails when no file is given or when no file yields a single valid record.
pub fn collect_metrics(
    files: &[PathBuf],
    date: Option<NaiveDate>,
    timestamp_field: &str,
) -> Result<ReportData> {
    if files.is_empty() {
        return Err(LogsortError::InvalidArgs(
            "No files to process; pass them with --files".to_string(),
        ));
    }

    let records = parse_log_files(files);
    if records.is_empty() {
        return Err(LogsortError::NoRecords);
    }
    log::info!("Parsed {} records from {} files", records.len(), files.len());

    let records = filter_by_date(records, date, timestamp_field);
    if let Some(date) = date {
        if records.is_empty() {
            return Ok(ReportData::NoMatchingDate(date));
        }
        log::info!("{} records match {}", records.len(), date.format("%Y-%m-%d"));
    }

    Ok(ReportData::Metrics(aggregate_url_metrics(&records)))
}

/// Run the whole report: parse, filter, aggregate and render to stdout or to a
/// uniquely named report file.
pub fn run_report(files: &[PathBuf], options: &ReportOptions) -> Result<()> {
    let date = options.date.as_deref().map(parse_target_date).transpose()?;

    let metrics = match collect_metrics(files, date, &options.timestamp_field)? {
        ReportData::Metrics(metrics) => metrics,
        ReportData::NoMatchingDate(date) => {
            eprintln!("No log records match date {}.", date.format("%Y-%m-%d"));
            return Ok(());
        }
    };
    log::debug!(
        "Rendering {} URLs as {}",
        metrics.len(),
        options.format.as_str()
    );

    if !options.createfile {
        let mut out = io::stdout().lock();
        render_metrics(&metrics, options.format, &mut out)?;
        out.flush()?;
        return Ok(());
    }

    let mut buffer = Vec::new();
    render_metrics(&metrics, options.format, &mut buffer)?;

    let path = write_report_file(options, date, &buffer)?;
    let mut out = io::stdout().lock();
    writeln!(out, "Report written to: {}", path.display())?;
    out.flush()?;
    Ok(())
}

/// File stem for the report: `<report>` or `<report>_<YYYY-MM-DD>`.
pub fn report_base_name(report: &str, date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => format!("{}_{}", report, date.format("%Y-%m-%d")),
        None => report.to_string(),
    }
}

fn write_report_file(
    options: &ReportOptions,
    date: Option<NaiveDate>,
    contents: &[u8],
) -> Result<PathBuf> {
    let dir = options.output_dir.as_path();
    fs::create_dir_all(dir).map_err(|source| LogsortError::ReportWrite {
        path: dir.to_path_buf(),
        source,
    })?;

    let base_name = report_base_name(&options.report, date);
    let path = unique_report_path(dir, &base_name, options.format.extension());
    write_new_file(&path, contents).map_err(|source| LogsortError::ReportWrite {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn write_new_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(contents)?;
    file.flush()
}
