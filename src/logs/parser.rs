use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_json::{Map, Value};

/// One decoded JSON Lines entry. No fixed schema; downstream stages only read
/// the few fields they need and skip records where those are absent.
pub type LogRecord = Map<String, Value>;

/// Parse JSON Lines log files into a flat list of records.
///
/// Files are processed independently and in order. Missing paths, non-file
/// paths and I/O failures are logged and the file is skipped; malformed lines
/// are logged and skipped without aborting the rest of the file.
pub fn parse_log_files<P: AsRef<Path>>(paths: &[P]) -> Vec<LogRecord> {
    let mut records = Vec::new();

    for path in paths {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!("File '{}' not found, skipping", path.display());
            continue;
        }
        if !path.is_file() {
            log::warn!("Path '{}' is not a file, skipping", path.display());
            continue;
        }

        let before = records.len();
        if let Err(err) = read_log_file(path, &mut records) {
            log::warn!("Error reading file '{}': {}", path.display(), err);
            continue;
        }
        log::debug!(
            "Parsed {} records from {}",
            records.len() - before,
            path.display()
        );
    }

    records
}

fn read_log_file(path: &Path, records: &mut Vec<LogRecord>) -> std::io::Result<()> {
    let reader = BufReader::new(File::open(path)?);

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<LogRecord>(line) {
            Ok(record) => records.push(record),
            Err(err) => {
                log::warn!(
                    "Failed to parse line as JSON in '{}': {} ({})",
                    path.display(),
                    line,
                    err
                );
            }
        }
    }

    Ok(())
}
