//! Repository analysis
//!
//! Ties the walker, the Go import parser and the accumulator together.
//! Parsing may run on the rayon pool; accumulation always runs on the calling
//! thread, in sorted file order, so the stats table has a single owner.

use crate::core::accumulator::DependencyAccumulator;
use crate::core::walker::Walker;
use crate::error::{handle_error, InstablError, OptionExt, Result};
use crate::models::{config::Settings, StatsTable};
use crate::parsers::{FileImports, GoImportParser};
use crate::utils::{ImportClassifier, PackageResolver};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Outcome of one analysis run
#[derive(Debug, Clone)]
pub struct Analysis {
    pub stats: StatsTable,
    pub summary: AnalysisSummary,
}

/// Counters describing what happened during a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisSummary {
    pub files_discovered: usize,
    /// Parsed, but with syntax errors; recovered imports were still used
    pub files_with_syntax_errors: usize,
    /// Could not be read or parsed at all
    pub files_failed: usize,
    /// Directory entries the walk could not access
    pub walk_errors: usize,
    pub packages: usize,
    pub duration: Duration,
}

/// Computes per-package stability statistics for one repository
#[derive(Debug)]
pub struct Analyzer {
    settings: Settings,
    resolver: PackageResolver,
    namespace: String,
}

impl Analyzer {
    /// Create an analyzer, resolving relative paths against the current directory.
    ///
    /// Fails when the root is not an accessible file or directory, or when no
    /// source root is configured. A directory root must also be listable.
    pub fn new(settings: Settings) -> Result<Self> {
        let base_dir =
            std::env::current_dir().map_err(|source| InstablError::CurrentDir { source })?;
        Self::with_base_dir(settings, base_dir)
    }

    /// Create an analyzer that resolves relative paths against `base_dir`
    pub fn with_base_dir(settings: Settings, base_dir: impl AsRef<Path>) -> Result<Self> {
        let root_is_usable = match fs::metadata(&settings.root) {
            Ok(metadata) if metadata.is_dir() => fs::read_dir(&settings.root).is_ok(),
            Ok(metadata) => metadata.is_file(),
            Err(_) => false,
        };
        if !root_is_usable {
            return Err(InstablError::invalid_root(settings.root.clone()));
        }

        let source_root = settings
            .source_root
            .clone()
            .ok_or_error(|| InstablError::MissingSourceRoot)?;
        let resolver = PackageResolver::new(source_root, base_dir);

        // the repository namespace is the identifier of the root path itself
        let namespace = match &settings.namespace {
            Some(namespace) => namespace.clone(),
            None => resolver.package_of(&settings.root).to_string(),
        };

        tracing::debug!(
            root = %settings.root.display(),
            source_root = %resolver.source_root().display(),
            namespace = %namespace,
            "analyzer configured"
        );

        Ok(Self {
            settings,
            resolver,
            namespace,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Substring that marks an import as local
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn resolver(&self) -> &PackageResolver {
        &self.resolver
    }

    /// Walk the repository and collect stability statistics
    pub fn analyze(&self) -> Result<Analysis> {
        self.analyze_with_progress(|_, _| {})
    }

    /// Same as [`Analyzer::analyze`], calling `progress(done, total)` after each parsed file
    pub fn analyze_with_progress<F>(&self, progress: F) -> Result<Analysis>
    where
        F: Fn(usize, usize) + Sync,
    {
        let start_time = Instant::now();
        let mut summary = AnalysisSummary::default();

        let discovery = Walker::new(self.settings.clone()).discover()?;
        summary.files_discovered = discovery.files.len();
        summary.walk_errors = discovery.errors.len();

        for (path, err) in discovery.errors {
            tracing::debug!(path = %path.display(), "walk error");
            if let Some(critical) = handle_error(err) {
                return Err(critical);
            }
        }

        let parsed = self.parse_all(&discovery.files, &progress)?;

        let mut accumulator = DependencyAccumulator::new(
            self.resolver.clone(),
            ImportClassifier::new(self.namespace.clone()),
        );

        for (path, result) in discovery.files.iter().zip(parsed) {
            match result {
                Ok(file) => {
                    if let Some(syntax_error) = &file.syntax_error {
                        summary.files_with_syntax_errors += 1;
                        tracing::warn!(
                            path = %path.display(),
                            recovered_imports = file.imports.len(),
                            "failed parsing {}: {}",
                            path.display(),
                            syntax_error
                        );
                    }
                    accumulator.record_file(path, &file.imports);
                }
                Err(err) => {
                    summary.files_failed += 1;
                    if let Some(critical) = handle_error(err) {
                        return Err(critical);
                    }
                }
            }
        }

        let stats = accumulator.into_table();
        summary.packages = stats.len();
        summary.duration = start_time.elapsed();

        tracing::info!(
            files = summary.files_discovered,
            syntax_errors = summary.files_with_syntax_errors,
            failed = summary.files_failed,
            packages = summary.packages,
            elapsed_ms = summary.duration.as_millis() as u64,
            "analysis complete"
        );

        Ok(Analysis { stats, summary })
    }

    /// Parse every file, keeping results in input order
    fn parse_all<F>(&self, files: &[PathBuf], progress: &F) -> Result<Vec<Result<FileImports>>>
    where
        F: Fn(usize, usize) + Sync,
    {
        let total = files.len();
        let done = AtomicUsize::new(0);
        let tick = || progress(done.fetch_add(1, Ordering::Relaxed) + 1, total);

        if !self.settings.parallel {
            let mut parser = GoImportParser::new()?;
            return Ok(files
                .iter()
                .map(|path| {
                    let result = parser.parse_file(path);
                    tick();
                    result
                })
                .collect());
        }

        // fail fast on a broken grammar instead of once per worker
        GoImportParser::new()?;

        Ok(files
            .par_iter()
            .map_init(GoImportParser::new, |parser, path| {
                let result = match parser {
                    Ok(parser) => parser.parse_file(path),
                    Err(err) => Err(InstablError::ParserSetup {
                        message: err.to_string(),
                    }),
                };
                tick();
                result
            })
            .collect())
    }
}
