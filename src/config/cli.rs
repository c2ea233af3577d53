//! Command-line argument configuration source

use std::path::PathBuf;

use super::ConfigSource;
use crate::cli::args::Args;
use crate::error::Result;
use crate::models::config::{OutputFormat, PartialSettings};

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    name: String,
}

/// Settings-relevant subset of the command line
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub root: Option<PathBuf>,
    pub source_root: Option<PathBuf>,
    pub namespace: Option<String>,
    pub exclude: Option<Vec<String>>,
    pub vendor_dir: Option<String>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub no_parallel: bool,
    pub progress: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub config: Option<PathBuf>,
}

impl From<&Args> for CliArgs {
    fn from(args: &Args) -> Self {
        CliArgs {
            root: args.root.clone(),
            source_root: args.source_root.clone(),
            namespace: args.namespace.clone(),
            exclude: if args.exclude.is_empty() {
                None
            } else {
                Some(args.exclude.clone())
            },
            vendor_dir: args.vendor_dir.clone(),
            output_format: args.output,
            output_file: args.output_file.clone(),
            no_parallel: args.no_parallel,
            progress: args.progress,
            quiet: args.quiet,
            verbose: args.verbose,
            config: args.config.clone(),
        }
    }
}

impl CliConfig {
    /// Create a new CLI configuration source
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            name: "command-line arguments".to_string(),
        }
    }

    /// Create a CLI configuration source from parsed Args
    pub fn from_args(args: &Args) -> Self {
        Self::new(CliArgs::from(args))
    }

    /// Get the config file path if specified
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let args = &self.args;

        // Flags only override lower layers when given
        Ok(PartialSettings {
            root: args.root.clone(),
            source_root: args.source_root.clone(),
            namespace: args.namespace.clone(),
            vendor_dir: args.vendor_dir.clone(),
            exclude_patterns: args.exclude.clone(),
            output_format: args.output_format,
            output_file: args.output_file.clone(),
            parallel: args.no_parallel.then_some(false),
            quiet: args.quiet.then_some(true),
            verbose: args.verbose.then_some(true),
            show_progress: args.progress.then_some(true),
        })
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }
}
