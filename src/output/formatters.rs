//! Report rendering
//!
//! Every format lists packages in the same order: the order of the rendered
//! text lines (`"<instability>\t<package>"`) under plain byte-wise string
//! comparison. The rendered strings are sorted, not the parsed values.

use crate::error::{InstablError, Result};
use crate::models::{PackageId, StabilityRecord, StatsTable};
use serde::Serialize;

/// One package of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub package: String,
    pub fan_in: u64,
    pub fan_out: u64,
    pub instability: f64,
    #[serde(skip)]
    pub line: String,
}

/// `"<instability with two decimals>\t<package>"`
pub fn format_line(package: &PackageId, record: &StabilityRecord) -> String {
    format!("{:.2}\t{}", record.instability(), package)
}

/// Rows in report order
pub fn report_rows(stats: &StatsTable) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = stats
        .iter()
        .map(|(package, record)| ReportRow {
            package: package.to_string(),
            fan_in: record.fan_in,
            fan_out: record.fan_out,
            instability: record.instability(),
            line: format_line(package, record),
        })
        .collect();
    rows.sort_by(|a, b| a.line.cmp(&b.line));
    rows
}

/// Plain text report: the lines joined by newlines, then one final newline.
///
/// An empty table therefore renders as a single blank line.
pub fn format_stats_text(stats: &StatsTable) -> String {
    let lines: Vec<String> = report_rows(stats).into_iter().map(|row| row.line).collect();
    let mut output = lines.join("\n");
    output.push('\n');
    output
}

/// Format the report as a JSON array
pub fn format_stats_json(stats: &StatsTable, pretty: bool) -> Result<String> {
    let rows = report_rows(stats);
    let mut json = if pretty {
        serde_json::to_string_pretty(&rows)?
    } else {
        serde_json::to_string(&rows)?
    };
    json.push('\n');
    Ok(json)
}

/// Format the report as CSV
pub fn format_stats_csv(stats: &StatsTable) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record(["instability", "package", "fan_in", "fan_out"])?;

    for row in report_rows(stats) {
        writer.write_record([
            format!("{:.2}", row.instability),
            row.package,
            row.fan_in.to_string(),
            row.fan_out.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| InstablError::Analysis {
            message: format!("failed to flush CSV output: {}", e),
        })?;

    String::from_utf8(bytes).map_err(|e| InstablError::Analysis {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}
