//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use super::file::DEFAULT_CONFIG_FILE;
use crate::error::{InstablError, Result};
use crate::models::config::PartialSettings;

/// Parse a TOML configuration file into PartialSettings
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(InstablError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| InstablError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_content(&content, path)
}

/// Parse TOML configuration content into PartialSettings
pub fn parse_config_content<P: AsRef<Path>>(content: &str, path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    let settings: PartialSettings =
        toml::from_str(content).map_err(|source| InstablError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

    validate_partial_settings(&settings, path)?;

    Ok(settings)
}

fn reject_empty_path(value: &Option<PathBuf>, key: &str, path: &Path) -> Result<()> {
    match value {
        Some(value) if value.as_os_str().is_empty() => Err(InstablError::config_error(format!(
            "Invalid empty {} in config file: {}",
            key,
            path.display()
        ))),
        _ => Ok(()),
    }
}

/// Validate partial settings for obvious errors
pub fn validate_partial_settings<P: AsRef<Path>>(settings: &PartialSettings, path: P) -> Result<()> {
    let path = path.as_ref();

    reject_empty_path(&settings.root, "root", path)?;
    reject_empty_path(&settings.source_root, "source_root", path)?;
    reject_empty_path(&settings.output_file, "output_file", path)?;

    if settings.namespace.as_deref() == Some("") {
        return Err(InstablError::config_error(format!(
            "Invalid empty namespace in config file: {}",
            path.display()
        )));
    }

    if settings.vendor_dir.as_deref() == Some("") {
        return Err(InstablError::config_error(format!(
            "Invalid empty vendor_dir in config file: {}",
            path.display()
        )));
    }

    if let Some(patterns) = &settings.exclude_patterns {
        for pattern in patterns {
            if pattern.is_empty() {
                return Err(InstablError::config_error(format!(
                    "Empty exclude pattern in config file: {}",
                    path.display()
                )));
            }

            glob::Pattern::new(pattern).map_err(|e| {
                InstablError::config_error(format!(
                    "Invalid exclude pattern '{}' in config file: {}: {}",
                    pattern,
                    path.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

/// Candidate config file locations, in lookup order
pub fn default_config_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];

    if let Some(home_dir) = dirs::home_dir() {
        locations.push(home_dir.join(DEFAULT_CONFIG_FILE));
    }

    if let Some(config_dir) = dirs::config_dir() {
        locations.push(config_dir.join("instabl").join("config.toml"));
    }

    locations
}

/// Find and load configuration from default locations
pub fn find_default_config() -> Result<Option<PartialSettings>> {
    for location in default_config_locations() {
        if location.is_file() {
            tracing::debug!(path = %location.display(), "found config file");
            return Ok(Some(parse_config_file(location)?));
        }
    }

    Ok(None)
}

/// Create a default configuration file at the specified path
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(InstablError::io_error)?;
        }
    }

    let default_config = include_str!("default_config.toml");

    fs::write(path, default_config).map_err(InstablError::io_error)?;

    Ok(())
}
