//! Local vs external import classification

/// How an import path relates to the analyzed repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// Refers to a package inside the repository
    Local,
    /// Refers to the standard library or a third-party module
    External,
}

/// Classifies import paths against the repository namespace.
///
/// An import is local when its path *contains* the namespace anywhere, not
/// only as a prefix. `github.com/other/acme-fork` is therefore local to a
/// repository whose namespace is `acme`. This looseness is kept on purpose;
/// pass a more specific namespace to narrow it.
#[derive(Debug, Clone)]
pub struct ImportClassifier {
    namespace: String,
}

impl ImportClassifier {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// `import_path` must already be unquoted
    pub fn classify(&self, import_path: &str) -> ImportKind {
        if self.is_local(import_path) {
            ImportKind::Local
        } else {
            ImportKind::External
        }
    }

    pub fn is_local(&self, import_path: &str) -> bool {
        import_path.contains(self.namespace.as_str())
    }
}
