//! Output formatting and writing functionality

mod formatters;
mod progress;
mod writers;

pub use self::formatters::{
    format_line, format_stats_csv, format_stats_json, format_stats_text, report_rows, ReportRow,
};
pub use self::progress::{create_progress_callback, ProgressReporter};
pub use self::writers::{create_writer, FileWriter, OutputWriter, StdoutWriter};

use crate::error::Result;
use crate::models::{OutputFormat, StatsTable};

/// Trait for different output formatters
pub trait Formatter {
    /// Format the stats table into a report
    fn format(&self, stats: &StatsTable) -> Result<String>;
}

/// `<instability>\t<package>` lines
pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format(&self, stats: &StatsTable) -> Result<String> {
        Ok(formatters::format_stats_text(stats))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, stats: &StatsTable) -> Result<String> {
        formatters::format_stats_json(stats, self.pretty)
    }
}

/// CSV formatter for spreadsheet analysis
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, stats: &StatsTable) -> Result<String> {
        formatters::format_stats_csv(stats)
    }
}

/// Create a formatter based on the output format
pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}
