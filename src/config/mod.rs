//! Configuration management
//!
//! Settings are layered from lowest to highest precedence: built-in defaults,
//! a TOML config file, `INSTABL_*` environment variables, command-line flags.
//! `GOPATH` only fills in the source root when no layer set one.

pub mod cli;
pub mod file;
pub mod parser;
pub mod settings;

use std::path::PathBuf;

use crate::error::{InstablError, Result};
use crate::models::config::{PartialSettings, Settings};

pub use cli::{CliArgs, CliConfig};
pub use file::{EnvConfig, FileConfig, DEFAULT_CONFIG_FILE, ENV_PREFIX};
pub use parser::{create_default_config, find_default_config, parse_config_content, parse_config_file};
pub use settings::SettingsValidator;

/// Trait for configuration sources
pub trait ConfigSource {
    /// Load configuration from this source
    fn load(&self) -> Result<PartialSettings>;

    /// Check if this configuration source is available
    fn is_available(&self) -> bool;

    /// Get the name of this configuration source for logging
    fn name(&self) -> &str;
}

/// Configuration builder for merging multiple sources
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    partial: PartialSettings,
    fallback_source_root: Option<PathBuf>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge settings from a partial configuration
    pub fn merge(mut self, partial: PartialSettings) -> Self {
        self.partial.merge_from(partial);
        self
    }

    /// Load and merge settings from a configuration source
    pub fn load_from<S: ConfigSource>(self, source: &S) -> Result<Self> {
        if !source.is_available() {
            return Ok(self);
        }

        tracing::debug!(source = source.name(), "loading configuration");
        Ok(self.merge(source.load()?))
    }

    /// Add configuration from an explicitly named file, which must exist
    pub fn add_config_file(self, path: &std::path::Path) -> Result<Self> {
        let file_config = FileConfig::with_path(path);
        if !file_config.is_available() {
            return Err(InstablError::ConfigNotFound {
                path: file_config.path().to_path_buf(),
            });
        }
        self.load_from(&file_config)
    }

    /// Merge the first config file found in the default locations, if any
    pub fn add_default_config_file(self) -> Result<Self> {
        match parser::find_default_config()? {
            Some(partial) => Ok(self.merge(partial)),
            None => Ok(self),
        }
    }

    /// Source root to use when no layer sets one
    pub fn with_fallback_source_root(mut self, source_root: Option<PathBuf>) -> Self {
        self.fallback_source_root = source_root;
        self
    }

    /// Build the final settings with validation
    pub fn build(mut self) -> Result<Settings> {
        if self.partial.source_root.is_none() {
            self.partial.source_root = self.fallback_source_root.take();
        }

        let settings = self.partial.to_settings();
        SettingsValidator::validate(&settings)?;

        Ok(settings)
    }
}

/// Load configuration from every source with the documented precedence
pub fn load_config(cli_args: CliArgs) -> Result<Settings> {
    load_config_with_env(cli_args, EnvConfig::new(ENV_PREFIX))
}

/// Same as [`load_config`] with an explicit environment source
pub fn load_config_with_env(cli_args: CliArgs, env_config: EnvConfig) -> Result<Settings> {
    let mut builder = ConfigBuilder::new();

    builder = match &cli_args.config {
        Some(path) => builder.add_config_file(path)?,
        None => builder.add_default_config_file()?,
    };

    builder = builder.load_from(&env_config)?;
    builder = builder.load_from(&CliConfig::new(cli_args))?;

    builder
        .with_fallback_source_root(env_config.gopath_source_root())
        .build()
}
