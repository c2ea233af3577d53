//! Path and import helpers shared by the analysis core

pub mod import_classifier;
pub mod package_resolver;

pub use import_classifier::{ImportClassifier, ImportKind};
pub use package_resolver::{normalize_path, to_slash, PackageResolver};
