use std::io::Write;

use clap::ValueEnum;

use crate::error::Result;

use super::analyze::UrlMetric;

pub const NO_DATA_MESSAGE: &str = "No data to display.";

const HEADERS: [&str; 3] = ["handler", "total", "avg_response_time"];
const URL_MAX_WIDTH: usize = 30;
const ELLIPSIS: &str = "...";
const HEADER_MIN_PADDING: usize = 2;
const COLUMN_SEP: &str = "  ";

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }

    /// File extension, including the leading dot, used for report files.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Table => ".txt",
            OutputFormat::Csv => ".csv",
            OutputFormat::Json => ".json",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Render metrics in `format` to `out`, ranked by request count.
pub fn render_metrics(
    metrics: &[UrlMetric],
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    match format {
        OutputFormat::Table => render_table(metrics, out),
        OutputFormat::Csv => render_csv(metrics, out),
        OutputFormat::Json => render_json(metrics, out),
    }
}

/// Sort by `total` descending. The sort is stable, so equal totals keep
/// their input order.
pub fn ranked(metrics: &[UrlMetric]) -> Vec<&UrlMetric> {
    let mut sorted: Vec<&UrlMetric> = metrics.iter().collect();
    sorted.sort_by(|a, b| b.total.cmp(&a.total));
    sorted
}

/// Shorten a URL for display: anything over 30 characters keeps its first 27
/// characters followed by `...`.
pub fn display_url(url: &str) -> String {
    if url.chars().count() <= URL_MAX_WIDTH {
        return url.to_string();
    }
    let mut out: String = url
        .chars()
        .take(URL_MAX_WIDTH - ELLIPSIS.len())
        .collect();
    out.push_str(ELLIPSIS);
    out
}

/// Render the ranked metrics as a plain-text table with a row index column.
///
/// Each column is as wide as its widest cell, and at least two characters
/// wider than its header. Columns are separated by two spaces, and a dashed
/// rule sits under the header.
pub fn render_table(metrics: &[UrlMetric], out: &mut dyn Write) -> Result<()> {
    if metrics.is_empty() {
        writeln!(out, "{NO_DATA_MESSAGE}")?;
        return Ok(());
    }

    let aligns = [Align::Right, Align::Left, Align::Right, Align::Right];
    let header: [&str; 4] = ["", HEADERS[0], HEADERS[1], HEADERS[2]];

    let rows: Vec<[String; 4]> = ranked(metrics)
        .into_iter()
        .enumerate()
        .map(|(i, m)| {
            [
                i.to_string(),
                display_url(&m.url),
                m.total.to_string(),
                format!("{:.3}", m.avg_time),
            ]
        })
        .collect();

    let widths = column_widths(&header, &rows);

    write_table_row(out, header.iter().copied(), &widths, &aligns)?;
    write_table_sep(out, &widths)?;
    for row in &rows {
        write_table_row(out, row.iter().map(|s| s.as_str()), &widths, &aligns)?;
    }

    Ok(())
}

fn column_widths(header: &[&str; 4], rows: &[[String; 4]]) -> [usize; 4] {
    let mut widths = [0usize; 4];
    for (i, width) in widths.iter_mut().enumerate() {
        let cells = rows.iter().map(|r| r[i].chars().count()).max().unwrap_or(0);
        *width = cells.max(header[i].chars().count() + HEADER_MIN_PADDING);
    }
    widths
}

fn write_table_row<'a, I>(
    out: &mut dyn Write,
    fields: I,
    widths: &[usize],
    aligns: &[Align],
) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.write_all(COLUMN_SEP.as_bytes())?;
        }
        let width = widths.get(i).copied().unwrap_or(0);
        match aligns.get(i).copied().unwrap_or(Align::Left) {
            Align::Left => write!(out, "{field:<width$}")?,
            Align::Right => write!(out, "{field:>width$}")?,
        }
    }
    out.write_all(b"\n")?;
    Ok(())
}

fn write_table_sep(out: &mut dyn Write, widths: &[usize]) -> Result<()> {
    for (i, w) in widths.iter().copied().enumerate() {
        if i > 0 {
            out.write_all(COLUMN_SEP.as_bytes())?;
        }
        out.write_all("-".repeat(w).as_bytes())?;
    }
    out.write_all(b"\n")?;
    Ok(())
}

/// Render the ranked metrics as CSV with full, untruncated URLs.
pub fn render_csv(metrics: &[UrlMetric], out: &mut dyn Write) -> Result<()> {
    write_csv_row(out, HEADERS)?;
    for m in ranked(metrics) {
        let total = m.total.to_string();
        let avg = format!("{:.3}", m.avg_time);
        write_csv_row(out, [m.url.as_str(), total.as_str(), avg.as_str()])?;
    }
    Ok(())
}

fn write_csv_row<'a, I>(out: &mut dyn Write, fields: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut first = true;
    for field in fields {
        if !first {
            out.write_all(b",")?;
        }
        first = false;
        write_csv_field(out, field)?;
    }
    out.write_all(b"\n")?;
    Ok(())
}

fn write_csv_field(out: &mut dyn Write, field: &str) -> Result<()> {
    let needs_quotes = field.contains([',', '"', '\n', '\r']);
    if !needs_quotes {
        out.write_all(field.as_bytes())?;
        return Ok(());
    }

    out.write_all(b"\"")?;
    out.write_all(field.replace('"', "\"\"").as_bytes())?;
    out.write_all(b"\"")?;
    Ok(())
}

/// Render the ranked metrics as a JSON array.
pub fn render_json(metrics: &[UrlMetric], out: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, &ranked(metrics))?;
    out.write_all(b"\n")?;
    Ok(())
}
