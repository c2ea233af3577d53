//! Source tree discovery
//!
//! Enumerates every `.go` file under the root, skipping the root's vendor
//! directory and anything matching an exclude pattern. Unreadable entries
//! are collected as warnings and the walk carries on.

use crate::error::{InstablError, Result};
use crate::models::config::Settings;
use crate::utils::to_slash;
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Extension of the source files that get analyzed
pub const SOURCE_EXTENSION: &str = "go";

/// Files found under a root plus the non-fatal problems met on the way
#[derive(Debug, Default)]
pub struct Discovery {
    /// Source files, sorted
    pub files: Vec<PathBuf>,
    /// Entries that could not be read
    pub errors: Vec<(PathBuf, InstablError)>,
}

/// Directory walker for Go source trees
pub struct Walker {
    settings: Settings,
}

impl Walker {
    /// Create a new walker with the given settings
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Get the current settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Directory whose subtree is never walked
    pub fn vendor_path(&self) -> PathBuf {
        self.settings.root.join(&self.settings.vendor_dir)
    }

    /// Find all source files below the configured root.
    ///
    /// A root that is a single file is returned as-is, whatever its extension.
    pub fn discover(&self) -> Result<Discovery> {
        let root = &self.settings.root;
        let metadata =
            fs::metadata(root).map_err(|_| InstablError::invalid_root(root.clone()))?;

        if !metadata.is_dir() {
            return Ok(Discovery {
                files: vec![root.clone()],
                errors: Vec::new(),
            });
        }

        let patterns = self.compile_exclude_patterns()?;
        let vendor = self.vendor_path();
        let mut discovery = Discovery::default();

        let entries = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0 || !self.is_skipped(entry.path(), &vendor, &patterns)
            });

        for entry in entries {
            match entry {
                Ok(entry) if is_source_file(&entry) => {
                    discovery.files.push(entry.into_path());
                }
                Ok(_) => {}
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| root.clone());
                    discovery.errors.push((path, InstablError::from(err)));
                }
            }
        }

        discovery.files.sort();
        tracing::debug!(
            root = %root.display(),
            files = discovery.files.len(),
            errors = discovery.errors.len(),
            "source discovery finished"
        );

        Ok(discovery)
    }

    /// Compile exclude patterns into glob patterns
    fn compile_exclude_patterns(&self) -> Result<Vec<Pattern>> {
        self.settings
            .exclude_patterns
            .iter()
            .map(|p| Pattern::new(p).map_err(InstablError::from))
            .collect()
    }

    fn is_skipped(&self, path: &Path, vendor: &Path, patterns: &[Pattern]) -> bool {
        path.starts_with(vendor) || self.is_excluded(path, patterns)
    }

    /// Check if a path matches any exclude pattern.
    ///
    /// Patterns are tried against the root-relative slash path and against
    /// every component of it.
    pub fn is_excluded(&self, path: &Path, patterns: &[Pattern]) -> bool {
        if patterns.is_empty() {
            return false;
        }

        let relative = path.strip_prefix(&self.settings.root).unwrap_or(path);
        let relative_str = to_slash(relative);

        patterns.iter().any(|pattern| {
            pattern.matches(&relative_str)
                || relative
                    .components()
                    .any(|c| pattern.matches(&c.as_os_str().to_string_lossy()))
        })
    }
}

fn is_source_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file()
        && entry
            .path()
            .extension()
            .map(|ext| ext == SOURCE_EXTENSION)
            .unwrap_or(false)
}
