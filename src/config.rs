use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::commands::{OutputFormat, DEFAULT_TIMESTAMP_FIELD};
use crate::error::{LogsortError, Result};

const CONFIG_FILE_NAME: &str = "logsort.toml";
const RC_FILE_NAME: &str = ".logsortrc";

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub report: Option<ReportConfig>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ReportConfig {
    pub timestamp_field: Option<String>,
    pub createfile: Option<bool>,
    pub format: Option<OutputFormat>,
    pub output_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ResolvedConfig {
    pub report: ResolvedReportConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedReportConfig {
    pub timestamp_field: String,
    pub createfile: bool,
    pub format: OutputFormat,
    pub output_dir: PathBuf,
}

impl Default for ResolvedReportConfig {
    fn default() -> Self {
        Self {
            timestamp_field: DEFAULT_TIMESTAMP_FIELD.to_string(),
            createfile: false,
            format: OutputFormat::Table,
            output_dir: PathBuf::from("."),
        }
    }
}

impl ResolvedConfig {
    pub fn from_config(config: &Config) -> Self {
        let mut resolved = Self::default();
        if let Some(cfg) = &config.report {
            resolved.report.apply(cfg);
        }
        resolved
    }
}

impl ResolvedReportConfig {
    fn apply(&mut self, cfg: &ReportConfig) {
        if let Some(value) = cfg.timestamp_field.clone() {
            self.timestamp_field = value;
        }
        if let Some(value) = cfg.createfile {
            self.createfile = value;
        }
        if let Some(value) = cfg.format {
            self.format = value;
        }
        if let Some(value) = cfg.output_dir.clone() {
            self.output_dir = value;
        }
    }
}

/// Load and merge every config file on the search path. Missing files are
/// ignored; later files override earlier ones field by field.
pub fn load_config() -> Result<Config> {
    let mut config = Config::default();
    for path in config_search_paths() {
        if !path.is_file() {
            continue;
        }
        log::debug!("Loading config from {}", path.display());
        merge_config(&mut config, parse_config_file(&path)?);
    }
    Ok(config)
}

pub fn parse_config_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)?;
    parse_config_str(&contents).map_err(|err| {
        LogsortError::InvalidArgs(format!(
            "Failed to parse config {}: {}",
            path.display(),
            err
        ))
    })
}

fn parse_config_str(contents: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(contents)
}

fn merge_config(base: &mut Config, other: Config) {
    merge_section(&mut base.report, other.report, ReportConfig::merge);
}

fn merge_section<T>(base: &mut Option<T>, other: Option<T>, merge: fn(&mut T, T)) {
    if let Some(other_section) = other {
        match base {
            Some(existing) => merge(existing, other_section),
            None => *base = Some(other_section),
        }
    }
}

impl ReportConfig {
    fn merge(&mut self, other: ReportConfig) {
        merge_opt(&mut self.timestamp_field, other.timestamp_field);
        merge_opt(&mut self.createfile, other.createfile);
        merge_opt(&mut self.format, other.format);
        merge_opt(&mut self.output_dir, other.output_dir);
    }
}

fn merge_opt<T>(base: &mut Option<T>, other: Option<T>) {
    if other.is_some() {
        *base = other;
    }
}

fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(home) = home_dir() {
        if let Some(config_home) = config_home_dir(&home) {
            paths.push(config_home.join("logsort").join(CONFIG_FILE_NAME));
        }
        if let Some(appdata) = env::var_os("APPDATA") {
            paths.push(PathBuf::from(appdata).join("logsort").join(CONFIG_FILE_NAME));
        }
        paths.push(home.join(RC_FILE_NAME));
    }

    if let Ok(cwd) = env::current_dir() {
        let mut dirs: Vec<&Path> = cwd.ancestors().collect();
        dirs.reverse();
        for dir in dirs {
            paths.push(dir.join(RC_FILE_NAME));
            paths.push(dir.join(CONFIG_FILE_NAME));
        }
    }

    paths
}

fn config_home_dir(home: &Path) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg));
    }
    Some(home.join(".config"))
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("USERPROFILE").map(PathBuf::from))
}

pub fn render_config(config: &ResolvedConfig) -> Result<String> {
    toml::to_string_pretty(config)
        .map_err(|err| LogsortError::InvalidArgs(format!("Failed to render config: {}", err)))
}
