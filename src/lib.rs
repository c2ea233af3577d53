//! instabl - package instability analysis for Go source trees
//!
//! Walks a Go repository, extracts every file's import declarations and
//! computes, per package, fan-in, fan-out and the instability metric
//! `I = fan_out / (fan_in + fan_out)`.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{Analysis, AnalysisSummary, Analyzer};
pub use error::{handle_error, ErrorSeverity, InstablError, OptionExt, Result, ResultExt};
pub use models::{config::Settings, PackageId, StabilityRecord, StatsTable};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
