//! Fan-in / fan-out accumulation

use crate::models::{PackageId, StatsTable};
use crate::utils::{ImportClassifier, ImportKind, PackageResolver};
use std::path::Path;

/// Owns the stats table while a tree is being analyzed.
///
/// For every local import it bumps the owner's fan-out and the imported
/// package's fan-in as one step. External imports only make sure the owner
/// has a (zeroed) record.
#[derive(Debug)]
pub struct DependencyAccumulator {
    resolver: PackageResolver,
    classifier: ImportClassifier,
    table: StatsTable,
}

impl DependencyAccumulator {
    pub fn new(resolver: PackageResolver, classifier: ImportClassifier) -> Self {
        Self {
            resolver,
            classifier,
            table: StatsTable::new(),
        }
    }

    pub fn resolver(&self) -> &PackageResolver {
        &self.resolver
    }

    pub fn classifier(&self) -> &ImportClassifier {
        &self.classifier
    }

    /// Record every import of `file`. The owner package is resolved once.
    ///
    /// A file without imports leaves the table untouched.
    pub fn record_file<S: AsRef<str>>(&mut self, file: &Path, imports: &[S]) -> PackageId {
        let owner = self.resolver.package_of(file);
        for import in imports {
            self.record_import(&owner, import.as_ref());
        }
        owner
    }

    /// Record a single import made by `owner`
    pub fn record_import(&mut self, owner: &PackageId, import_path: &str) -> ImportKind {
        let kind = self.classifier.classify(import_path);
        match kind {
            ImportKind::External => self.table.touch(owner),
            ImportKind::Local => {
                // the import path is the target's identifier
                let target = PackageId::new(import_path);
                self.table.add_edge(owner, &target);
            }
        }
        kind
    }

    pub fn table(&self) -> &StatsTable {
        &self.table
    }

    pub fn into_table(self) -> StatsTable {
        self.table
    }
}
