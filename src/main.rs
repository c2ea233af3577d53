use std::process;

use clap::error::ErrorKind;
use instabl::cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = match Args::try_parse_args() {
        Ok(args) => args,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                let _ = err.print();
                process::exit(1);
            }
        },
    };

    init_logging(args.log_level());

    process::exit(Command::from_args(args).run());
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the flag-derived level
fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
