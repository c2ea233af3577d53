//! Command implementations

use std::path::PathBuf;
use std::sync::Arc;

use super::Args;
use crate::config::{self, CliArgs, DEFAULT_CONFIG_FILE};
use crate::core::Analyzer;
use crate::error::{InstablError, Result};
use crate::output::{create_formatter, create_progress_callback, create_writer, ProgressReporter};

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Analyze the repository named on the command line
    Analyze(Args),
    /// Write a default configuration file
    Init,
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init;
        }

        Command::Analyze(args)
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        match self {
            Command::Analyze(args) => analyze(args),
            Command::Init => init(),
        }
    }

    /// Run the command, reporting failures on stderr, and return the exit code
    pub fn run(&self) -> i32 {
        match self.execute() {
            Ok(()) => 0,
            Err(err) => {
                tracing::debug!(severity = %err.severity(), "command failed: {:?}", err);
                eprintln!("analyze failed: {}", err.user_message());
                err.exit_code()
            }
        }
    }
}

fn analyze(args: &Args) -> Result<()> {
    if args.root.is_none() {
        return Err(InstablError::usage_error("expected exactly one repository root"));
    }

    let settings = config::load_config(CliArgs::from(args))?;
    tracing::debug!(?settings, "resolved settings");

    let analyzer = Analyzer::new(settings.clone())?;

    let reporter = Arc::new(ProgressReporter::new(
        settings.show_progress && !settings.quiet,
    ));
    let analysis = analyzer.analyze_with_progress(create_progress_callback(reporter.clone()));
    reporter.finish();
    let analysis = analysis?;

    let report = create_formatter(settings.output_format).format(&analysis.stats)?;
    create_writer(settings.output_file.as_ref()).write(&report)
}

fn init() -> Result<()> {
    let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);

    if config_path.exists() {
        println!("Configuration file already exists at: {}", config_path.display());
        println!("To overwrite it, delete the file first and run this command again.");
        return Ok(());
    }

    config::create_default_config(&config_path)?;

    println!("Created default configuration file at: {}", config_path.display());
    Ok(())
}
