//! Validation of fully layered settings

use std::path::Path;

use crate::error::{InstablError, Result, ResultExt};
use crate::models::config::Settings;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &Settings) -> Result<()> {
        if std::fs::metadata(&settings.root).is_err() {
            return Err(InstablError::invalid_root(settings.root.clone()));
        }

        for pattern in &settings.exclude_patterns {
            glob::Pattern::new(pattern)
                .with_context(|| format!("Invalid exclude pattern: {}", pattern))?;
        }

        if settings.namespace.as_deref() == Some("") {
            return Err(InstablError::config_error("namespace must not be empty"));
        }

        if settings.vendor_dir.is_empty() {
            return Err(InstablError::config_error("vendor_dir must not be empty"));
        }

        if let Some(path) = &settings.output_file {
            Self::validate_output_path(path)?;
        }

        Ok(())
    }

    /// The output file's directory must already exist
    fn validate_output_path(path: &Path) -> Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                Err(InstablError::config_error(format!(
                    "output directory '{}' does not exist",
                    parent.display()
                )))
            }
            _ => Ok(()),
        }
    }
}
