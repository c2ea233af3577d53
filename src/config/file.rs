//! Config file and environment sources

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{parser, ConfigSource};
use crate::error::{InstablError, Result};
use crate::models::config::PartialSettings;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".instabl.toml";

/// Prefix of the environment variables read by [`EnvConfig`]
pub const ENV_PREFIX: &str = "INSTABL";

/// Configuration file source
pub struct FileConfig {
    path: PathBuf,
    name: String,
}

impl FileConfig {
    /// Create a file configuration source for `path`
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: format!("config file ({})", path.as_ref().display()),
        }
    }

    /// Get the path of this configuration file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        if !self.is_available() {
            return Err(InstablError::ConfigNotFound {
                path: self.path.clone(),
            });
        }

        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Environment variable configuration source
///
/// Reads `<PREFIX>_SOURCE_ROOT`, `<PREFIX>_NAMESPACE`, `<PREFIX>_EXCLUDE`
/// (comma separated) and `<PREFIX>_OUTPUT_FORMAT`, plus `GOPATH`.
pub struct EnvConfig {
    prefix: String,
    name: String,
    vars: Option<HashMap<String, String>>,
}

impl EnvConfig {
    /// Read from the process environment
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
            vars: None,
        }
    }

    /// Read from a fixed set of variables instead of the process environment
    pub fn from_vars<I, K, V>(prefix: impl Into<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut config = Self::new(prefix);
        config.vars = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        config
    }

    fn var(&self, name: &str) -> Option<String> {
        let value = match &self.vars {
            Some(vars) => vars.get(name).cloned(),
            None => std::env::var(name).ok(),
        };
        value.filter(|v| !v.is_empty())
    }

    fn prefixed(&self, key: &str) -> Option<String> {
        self.var(&format!("{}_{}", self.prefix, key))
    }

    /// `<first GOPATH entry>/src`, when `GOPATH` is set
    pub fn gopath_source_root(&self) -> Option<PathBuf> {
        let gopath = self.var("GOPATH")?;
        std::env::split_paths(&gopath)
            .find(|entry| !entry.as_os_str().is_empty())
            .map(|entry| entry.join("src"))
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings::default();

        if let Some(source_root) = self.prefixed("SOURCE_ROOT") {
            settings.source_root = Some(PathBuf::from(source_root));
        }

        if let Some(namespace) = self.prefixed("NAMESPACE") {
            settings.namespace = Some(namespace);
        }

        if let Some(exclude) = self.prefixed("EXCLUDE") {
            settings.exclude_patterns = Some(
                exclude
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            );
        }

        if let Some(format) = self.prefixed("OUTPUT_FORMAT") {
            let output_format = format.parse().map_err(|message: String| {
                InstablError::config_error(format!("{}_OUTPUT_FORMAT: {}", self.prefix, message))
            })?;
            settings.output_format = Some(output_format);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        ["SOURCE_ROOT", "NAMESPACE", "EXCLUDE", "OUTPUT_FORMAT"]
            .iter()
            .any(|key| self.prefixed(key).is_some())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
