use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FULL_TABLE: &str = concat!(
    "    handler                           total    avg_response_time\n",
    "--  ------------------------------  -------  -------------------\n",
    " 0  /api/homeworks/?type=1                3                0.040\n",
    " 1  /api/context/?type=1                  2                0.200\n",
    " 2  /api/users                            1                0.500\n",
    " 3  /api/specializations/123456...        1                1.000\n",
);

const DATED_TABLE: &str = concat!(
    "    handler                           total    avg_response_time\n",
    "--  ------------------------------  -------  -------------------\n",
    " 0  /api/homeworks/?type=1                3                0.040\n",
    " 1  /api/context/?type=1                  1                0.100\n",
    " 2  /api/specializations/123456...        1                1.000\n",
);

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Runs logsort inside `dir` with HOME pointed there too, so no user or
/// repository config leaks into the test.
fn logsort_in(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("APPDATA")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help() {
    let tmp = TempDir::new().unwrap();
    logsort_in(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("per-URL metrics"))
        .stdout(predicate::str::contains("--createfile"));
}

#[test]
fn test_version() {
    let tmp = TempDir::new().unwrap();
    logsort_in(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("logsort"));
}

#[test]
fn test_table_to_stdout() {
    let tmp = TempDir::new().unwrap();
    logsort_in(&tmp)
        .arg("--files")
        .arg(fixture("app.jsonl"))
        .args(["--report", "average"])
        .assert()
        .success()
        .stdout(FULL_TABLE)
        .stderr("");

    assert!(fs::read_dir(tmp.path()).unwrap().next().is_none());
}

#[test]
fn test_date_filter() {
    let tmp = TempDir::new().unwrap();
    logsort_in(&tmp)
        .arg("--files")
        .arg(fixture("app.jsonl"))
        .args(["--report", "average", "--date", "2025-06-22"])
        .assert()
        .success()
        .stdout(DATED_TABLE);
}

#[test]
fn test_date_without_matches_exits_cleanly() {
    let tmp = TempDir::new().unwrap();
    logsort_in(&tmp)
        .arg("--files")
        .arg(fixture("app.jsonl"))
        .args(["--report", "average", "--date", "2030-01-01", "--createfile"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("No log records match date 2030-01-01"));

    assert!(fs::read_dir(tmp.path()).unwrap().next().is_none());
}

#[test]
fn test_invalid_date() {
    let tmp = TempDir::new().unwrap();
    logsort_in(&tmp)
        .arg("--files")
        .arg(fixture("app.jsonl"))
        .args(["--report", "average", "--date", "22.06.2025"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid date format '22.06.2025'"));
}

#[test]
fn test_missing_files_argument() {
    let tmp = TempDir::new().unwrap();
    logsort_in(&tmp)
        .args(["--report", "average"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--files"));
}

#[test]
fn test_missing_report_argument() {
    let tmp = TempDir::new().unwrap();
    logsort_in(&tmp)
        .arg("--files")
        .arg(fixture("app.jsonl"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--report"));
}

#[test]
fn test_only_missing_files_is_fatal() {
    let tmp = TempDir::new().unwrap();
    logsort_in(&tmp)
        .args(["--files", "nonexistent.jsonl", "--report", "average"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nonexistent.jsonl"))
        .stderr(predicate::str::contains("not found"))
        .stderr(predicate::str::contains("No valid log records"));
}

#[test]
fn test_directory_path_is_skipped() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("logs")).unwrap();
    logsort_in(&tmp)
        .args(["--files", "logs"])
        .arg(fixture("app.jsonl"))
        .args(["--report", "average"])
        .assert()
        .success()
        .stdout(FULL_TABLE)
        .stderr(predicate::str::contains("is not a file"));
}

#[test]
fn test_malformed_lines_warn_and_continue() {
    let tmp = TempDir::new().unwrap();
    logsort_in(&tmp)
        .arg("--files")
        .arg(fixture("app.jsonl"))
        .arg(fixture("broken.jsonl"))
        .args(["--report", "average"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            " 2  /api/users                            2                0.600\n",
        ))
        .stderr(predicate::str::contains("broken.jsonl"))
        .stderr(predicate::str::contains("this is not json"));
}

#[test]
fn test_quiet_suppresses_warnings() {
    let tmp = TempDir::new().unwrap();
    logsort_in(&tmp)
        .arg("-q")
        .arg("--files")
        .arg(fixture("broken.jsonl"))
        .args(["--report", "average"])
        .assert()
        .success()
        .stderr("");
}

#[test]
fn test_createfile_writes_unique_reports() {
    let tmp = TempDir::new().unwrap();

    for expected in ["average_2025-06-22.txt", "average_2025-06-22_1.txt"] {
        logsort_in(&tmp)
            .arg("--files")
            .arg(fixture("app.jsonl"))
            .args(["--report", "average", "--date", "2025-06-22", "--createfile"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Report written to:"))
            .stdout(predicate::str::contains(expected))
            .stdout(predicate::str::contains("handler").not());

        let contents = fs::read_to_string(tmp.path().join(expected)).unwrap();
        assert_eq!(contents, DATED_TABLE);
    }
}

#[test]
fn test_no_createfile_overrides_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("logsort.toml"), "[report]\ncreatefile = true\n").unwrap();

    logsort_in(&tmp)
        .arg("--files")
        .arg(fixture("app.jsonl"))
        .args(["--report", "average", "--no-createfile"])
        .assert()
        .success()
        .stdout(FULL_TABLE);

    assert!(!tmp.path().join("average.txt").exists());
}

#[cfg(target_os = "linux")]
#[test]
fn test_failed_stdout_write_after_report_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let full = fs::OpenOptions::new().write(true).open("/dev/full").unwrap();

    let output = std::process::Command::new(env!("CARGO_BIN_EXE_logsort"))
        .current_dir(tmp.path())
        .env("HOME", tmp.path())
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("APPDATA")
        .env_remove("RUST_LOG")
        .arg("--files")
        .arg(fixture("app.jsonl"))
        .args(["--report", "average", "--createfile"])
        .stdout(std::process::Stdio::from(full))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "stderr: {stderr}");
    assert!(!stderr.contains("panicked"), "stderr: {stderr}");
    assert!(tmp.path().join("average.txt").exists());
}

#[test]
fn test_createfile_into_output_dir() {
    let tmp = TempDir::new().unwrap();
    logsort_in(&tmp)
        .arg("--files")
        .arg(fixture("app.jsonl"))
        .args([
            "--report",
            "average",
            "--createfile",
            "--format",
            "csv",
            "--output-dir",
            "out",
        ])
        .assert()
        .success();

    let contents = fs::read_to_string(tmp.path().join("out").join("average.csv")).unwrap();
    assert_eq!(
        contents,
        concat!(
            "handler,total,avg_response_time\n",
            "/api/homeworks/?type=1,3,0.040\n",
            "/api/context/?type=1,2,0.200\n",
            "/api/users,1,0.500\n",
            "/api/specializations/1234567890/details,1,1.000\n",
        )
    );
}

#[test]
fn test_json_format() {
    let tmp = TempDir::new().unwrap();
    let output = logsort_in(&tmp)
        .arg("--files")
        .arg(fixture("app.jsonl"))
        .args(["--report", "average", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = parsed.as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["handler"], "/api/homeworks/?type=1");
    assert_eq!(rows[0]["total"], 3);
    assert_eq!(rows[3]["handler"], "/api/specializations/1234567890/details");
}

#[test]
fn test_config_file_sets_defaults() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("logsort.toml"),
        "[report]\nformat = \"csv\"\ntimestamp_field = \"time\"\n",
    )
    .unwrap();
    fs::write(
        tmp.path().join("custom.jsonl"),
        concat!(
            r#"{"time": "2024-03-01T08:00:00Z", "url": "/a", "response_time": 2}"#,
            "\n",
            r#"{"time": "2024-03-02T08:00:00Z", "url": "/b", "response_time": 4}"#,
            "\n",
        ),
    )
    .unwrap();

    logsort_in(&tmp)
        .args(["--files", "custom.jsonl", "--report", "r", "--date", "2024-03-01"])
        .assert()
        .success()
        .stdout("handler,total,avg_response_time\n/a,1,2.000\n");
}

#[test]
fn test_print_config() {
    let tmp = TempDir::new().unwrap();
    logsort_in(&tmp)
        .args(["--print-config", "--timestamp-field", "ts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[report]"))
        .stdout(predicate::str::contains("timestamp_field = \"ts\""));
}
