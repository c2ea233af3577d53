//! Package identity resolution
//!
//! A Go package is identified by the directory its files live in, expressed
//! relative to the source root (the `$GOPATH/src` equivalent). The package
//! clause inside the file is never read: one package per directory is
//! assumed, so every file in a directory resolves to the same identifier.

use crate::models::PackageId;
use std::path::{Component, Path, PathBuf};

/// Maps source file paths to package identifiers.
///
/// The source root and the base directory used to absolutize relative paths
/// are fixed at construction; resolution never consults the process
/// environment.
#[derive(Debug, Clone)]
pub struct PackageResolver {
    source_root: PathBuf,
    base_dir: PathBuf,
}

impl PackageResolver {
    /// Create a resolver. A relative `source_root` is taken relative to `base_dir`.
    pub fn new(source_root: impl AsRef<Path>, base_dir: impl AsRef<Path>) -> Self {
        let base_dir = normalize_path(base_dir.as_ref());
        let source_root = normalize_path(&base_dir.join(source_root.as_ref()));
        Self {
            source_root,
            base_dir,
        }
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Absolute, lexically normalized form of `path`
    pub fn absolute(&self, path: &Path) -> PathBuf {
        normalize_path(&self.base_dir.join(path))
    }

    /// Identifier of the package `file` belongs to.
    ///
    /// Files under the source root get a root-relative identifier such as
    /// `github.com/acme/tool/cmd`; files elsewhere keep their absolute
    /// directory. A file directly in the source root belongs to `"."`.
    pub fn package_of(&self, file: &Path) -> PackageId {
        let absolute = self.absolute(file);
        let relative = absolute
            .strip_prefix(&self.source_root)
            .unwrap_or(&absolute);

        let dir = relative.parent().unwrap_or(relative);
        let id = to_slash(dir);
        if id.is_empty() {
            PackageId::new(".")
        } else {
            PackageId::new(id)
        }
    }
}

/// Lexically clean a path: drop `.` segments and fold `..` into its parent.
///
/// Symlinks are not resolved. `..` directly under the root stays at the root.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }

    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

/// Render a path with `/` separators regardless of platform
pub fn to_slash(path: &Path) -> String {
    let mut out = String::new();

    for component in path.components() {
        let segment = match component {
            Component::Prefix(prefix) => {
                out.push_str(&prefix.as_os_str().to_string_lossy());
                continue;
            }
            Component::RootDir => {
                out.push('/');
                continue;
            }
            Component::CurDir => ".".into(),
            Component::ParentDir => "..".into(),
            Component::Normal(name) => name.to_string_lossy(),
        };

        if !out.is_empty() && !out.ends_with('/') {
            out.push('/');
        }
        out.push_str(&segment);
    }

    out
}
