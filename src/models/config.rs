//! Configuration-related data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration settings for an analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Repository root to analyze (directory or single `.go` file)
    pub root: PathBuf,

    /// Directory that acts as the root namespace (`$GOPATH/src`)
    pub source_root: Option<PathBuf>,

    /// Explicit repository namespace used for local-import classification
    pub namespace: Option<String>,

    /// Name of the vendored dependency directory directly under the root
    pub vendor_dir: String,

    /// Glob patterns for paths to skip
    pub exclude_patterns: Vec<String>,

    /// Output format (text, json, csv)
    pub output_format: OutputFormat,

    /// Output file path (if not specified, output to stdout)
    pub output_file: Option<PathBuf>,

    /// Whether to parse files on the rayon pool
    pub parallel: bool,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show detailed progress and debug information
    pub verbose: bool,

    /// Whether to draw a progress bar on stderr
    pub show_progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            source_root: None,
            namespace: None,
            vendor_dir: "vendor".to_string(),
            exclude_patterns: Vec::new(),
            output_format: OutputFormat::Text,
            output_file: None,
            parallel: true,
            quiet: false,
            verbose: false,
            show_progress: false,
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `<instability>\t<package>` lines
    Text,
    /// JSON array for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialSettings {
    pub root: Option<PathBuf>,
    pub source_root: Option<PathBuf>,
    pub namespace: Option<String>,
    pub vendor_dir: Option<String>,
    pub exclude_patterns: Option<Vec<String>>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub parallel: Option<bool>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub show_progress: Option<bool>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        if other.root.is_some() {
            self.root = other.root;
        }
        if other.source_root.is_some() {
            self.source_root = other.source_root;
        }
        if other.namespace.is_some() {
            self.namespace = other.namespace;
        }
        if other.vendor_dir.is_some() {
            self.vendor_dir = other.vendor_dir;
        }
        if other.exclude_patterns.is_some() {
            self.exclude_patterns = other.exclude_patterns;
        }
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.output_file.is_some() {
            self.output_file = other.output_file;
        }
        if other.parallel.is_some() {
            self.parallel = other.parallel;
        }
        if other.quiet.is_some() {
            self.quiet = other.quiet;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.show_progress.is_some() {
            self.show_progress = other.show_progress;
        }
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(root) = &self.root {
            settings.root = root.clone();
        }
        if let Some(source_root) = &self.source_root {
            settings.source_root = Some(source_root.clone());
        }
        if let Some(namespace) = &self.namespace {
            settings.namespace = Some(namespace.clone());
        }
        if let Some(vendor_dir) = &self.vendor_dir {
            settings.vendor_dir = vendor_dir.clone();
        }
        if let Some(exclude_patterns) = &self.exclude_patterns {
            settings.exclude_patterns = exclude_patterns.clone();
        }
        if let Some(output_format) = self.output_format {
            settings.output_format = output_format;
        }
        if let Some(output_file) = &self.output_file {
            settings.output_file = Some(output_file.clone());
        }
        if let Some(parallel) = self.parallel {
            settings.parallel = parallel;
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }
        if let Some(show_progress) = self.show_progress {
            settings.show_progress = show_progress;
        }

        settings
    }
}
