//! Command-line argument parsing

use clap::Parser;
use std::path::PathBuf;

use crate::models::OutputFormat;

/// instabl - package instability analyzer for Go source trees
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "instabl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Report the instability of every Go package in a source tree")]
#[command(long_about = "instabl walks a Go source tree, extracts the import declarations of every .go file \
and reports, for each package, the instability metric I = fan_out / (fan_in + fan_out). \
Package identifiers are directory paths relative to the source root ($GOPATH/src unless configured).")]
#[command(after_help = "EXAMPLES:

    # Analyze a repository under GOPATH
    instabl $GOPATH/src/github.com/acme/widgets

    # Use an explicit source root and namespace
    instabl --source-root ~/go/src --namespace github.com/acme ./widgets

    # Skip generated code and write CSV to a file
    instabl --exclude '*_gen.go' --output csv --output-file report.csv ./widgets

    # Create a default configuration file
    instabl --init
")]
pub struct Args {
    /// Repository root: a directory or a single .go file
    #[arg(value_name = "ROOT", required_unless_present = "init")]
    pub root: Option<PathBuf>,

    /// Directory that acts as the root of the package namespace
    #[arg(long, value_name = "DIR", help = "Root of the package namespace (defaults to INSTABL_SOURCE_ROOT, then the first GOPATH entry + /src)")]
    pub source_root: Option<PathBuf>,

    /// Substring that marks an import as local
    #[arg(long, value_name = "NAMESPACE", help = "Imports containing this string count as local (defaults to the package of the directory holding ROOT)")]
    pub namespace: Option<String>,

    /// Exclude paths matching these glob patterns
    #[arg(short, long, value_name = "PATTERN", help = "Glob patterns for files or directories to skip (can be given multiple times)")]
    pub exclude: Vec<String>,

    /// Vendored dependency directory directly under ROOT
    #[arg(long, value_name = "NAME", help = "Name of the vendor directory skipped directly under ROOT (default: vendor)")]
    pub vendor_dir: Option<String>,

    /// Output format (text, json, csv)
    #[arg(short, long, value_enum, help = "Output format: 'text' for '<instability>\\t<package>' lines, 'json' or 'csv' with fan-in and fan-out")]
    pub output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(long, value_name = "FILE", help = "File to write the report to (uses stdout if not specified)")]
    pub output_file: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to configuration file (defaults to .instabl.toml in the current directory)")]
    pub config: Option<PathBuf>,

    /// Disable parallel processing
    #[arg(long, help = "Parse files on a single thread")]
    pub no_parallel: bool,

    /// Draw a progress bar
    #[arg(long, help = "Draw a progress bar on stderr while parsing")]
    pub progress: bool,

    /// Suppress non-essential output
    #[arg(short, long, conflicts_with = "verbose", help = "Only log errors")]
    pub quiet: bool,

    /// Show debug information
    #[arg(short, long, help = "Log debug information to stderr")]
    pub verbose: bool,

    /// Initialize a default configuration file
    #[arg(long, help = "Create a default configuration file (.instabl.toml) in the current directory")]
    pub init: bool,
}

impl Args {
    /// Parse command-line arguments, returning clap's error instead of exiting
    pub fn try_parse_args() -> std::result::Result<Self, clap::Error> {
        Args::try_parse()
    }

    /// Logging level implied by the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}
