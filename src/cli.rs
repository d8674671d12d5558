use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::commands::{OutputFormat, ReportOptions};
use crate::config::ResolvedReportConfig;
use crate::error::{LogsortError, Result};

#[derive(Parser, Debug)]
#[command(name = "logsort")]
#[command(about = "Analyze JSON Lines request logs and report per-URL metrics.")]
#[command(version)]
pub struct Cli {
    /// Path to one or more JSON Lines log files
    #[arg(long, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Base name for the report file (without extension), e.g. "average"
    #[arg(long)]
    pub report: Option<String>,

    /// Only count records from this date (YYYY-MM-DD), read from the timestamp field
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<String>,

    /// Write the report to <report>[_<date>].<ext> instead of stdout; a numeric
    /// suffix is added if the file already exists
    #[arg(long, conflicts_with = "no_createfile")]
    pub createfile: bool,

    /// Print the report to stdout even if the config sets createfile
    #[arg(long = "no-createfile", conflicts_with = "createfile")]
    pub no_createfile: bool,

    /// Record field holding the timestamp used by --date (default: @timestamp)
    #[arg(long, value_name = "FIELD")]
    pub timestamp_field: Option<String>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Directory for report files written with --createfile (default: .)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors; suppresses per-file and per-line warnings
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print the resolved configuration and exit
    #[arg(long)]
    pub print_config: bool,

    /// Generate shell completions and exit
    #[cfg(feature = "completions")]
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}

impl Cli {
    /// Overlay command-line flags on top of config file values.
    pub fn apply(&self, config: &mut ResolvedReportConfig) {
        if let Some(value) = self.timestamp_field.clone() {
            config.timestamp_field = value;
        }
        if self.createfile {
            config.createfile = true;
        } else if self.no_createfile {
            config.createfile = false;
        }
        if let Some(value) = self.format {
            config.format = value;
        }
        if let Some(value) = self.output_dir.clone() {
            config.output_dir = value;
        }
    }

    pub fn report_options(&self, config: ResolvedReportConfig) -> Result<ReportOptions> {
        let report = self.report.clone().ok_or_else(|| {
            LogsortError::InvalidArgs(
                "A report name is required; pass it with --report".to_string(),
            )
        })?;

        Ok(ReportOptions {
            report,
            date: self.date.clone(),
            createfile: config.createfile,
            timestamp_field: config.timestamp_field,
            format: config.format,
            output_dir: config.output_dir,
        })
    }

    pub fn log_level(&self) -> Option<log::LevelFilter> {
        if self.quiet {
            return Some(log::LevelFilter::Error);
        }
        match self.verbose {
            0 => None,
            1 => Some(log::LevelFilter::Info),
            2 => Some(log::LevelFilter::Debug),
            _ => Some(log::LevelFilter::Trace),
        }
    }
}
