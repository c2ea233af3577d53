//! Error types and definitions for instabl
//!
//! Every failure the analyzer can hit is a variant of [`InstablError`]. The
//! variants carry a severity so the walk can tell a skipped file apart from a
//! run that has to stop.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - the walk continues without the affected file
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for instabl operations
#[derive(Debug, Error)]
pub enum InstablError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// Wrong command-line usage
    #[error("usage: {message}")]
    Usage { message: String },

    /// The repository root is neither a readable directory nor a file
    #[error("provided repo '{path}' is not a folder or file")]
    InvalidRoot { path: PathBuf },

    /// No source root could be determined from flags, config or environment
    #[error("source root is not set (use --source-root, INSTABL_SOURCE_ROOT or GOPATH)")]
    MissingSourceRoot,

    /// The working directory could not be read
    #[error("cannot determine current directory: {source}")]
    CurrentDir {
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
    },

    /// The Go grammar could not be loaded into the parser
    #[error("Parser setup error: {message}")]
    ParserSetup { message: String },

    /// A source file could not be read or parsed
    #[error("failed parsing {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Directory traversal errors
    #[error("Directory traversal error for {path}: {message}")]
    DirectoryTraversal { path: PathBuf, message: String },

    /// Permission denied errors
    #[error("Permission denied accessing {path}")]
    PermissionDenied { path: PathBuf },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// Generic failure wrapped with context
    #[error("{message}")]
    Analysis { message: String },
}

impl InstablError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Warning level errors - the file or directory is skipped
            InstablError::Parse { .. } => ErrorSeverity::Warning,
            InstablError::DirectoryTraversal { .. } => ErrorSeverity::Warning,
            InstablError::PermissionDenied { .. } => ErrorSeverity::Warning,

            // Critical errors - process should terminate
            InstablError::Usage { .. } => ErrorSeverity::Critical,
            InstablError::InvalidRoot { .. } => ErrorSeverity::Critical,
            InstablError::MissingSourceRoot => ErrorSeverity::Critical,
            InstablError::CurrentDir { .. } => ErrorSeverity::Critical,
            InstablError::Config { .. } => ErrorSeverity::Critical,
            InstablError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            InstablError::ConfigRead { .. } => ErrorSeverity::Critical,
            InstablError::ConfigParse { .. } => ErrorSeverity::Critical,
            InstablError::ParserSetup { .. } => ErrorSeverity::Critical,
            InstablError::StdoutWrite { .. } => ErrorSeverity::Critical,

            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Process exit code for an error that ends the run
    pub fn exit_code(&self) -> i32 {
        match self {
            InstablError::InvalidRoot { .. } => 2,
            _ => 1,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            InstablError::PermissionDenied { path } => {
                format!("Cannot access '{}' due to permission denied.", path.display())
            }
            InstablError::Io { source } => {
                format!("File system error: {}.", source)
            }
            InstablError::InvalidRoot { path } => {
                format!("provided repo '{}' is not a folder or file", path.display())
            }
            InstablError::MissingSourceRoot => {
                "source root is not set; pass --source-root, set INSTABL_SOURCE_ROOT, or export GOPATH"
                    .to_string()
            }
            InstablError::ConfigNotFound { path } => {
                format!("Configuration file not found at '{}'.", path.display())
            }
            _ => self.to_string(),
        }
    }

    /// Create an IO error with context
    pub fn io_error(source: std::io::Error) -> Self {
        InstablError::Io { source }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        InstablError::Config {
            message: message.into(),
        }
    }

    /// Create a usage error
    pub fn usage_error(message: impl Into<String>) -> Self {
        InstablError::Usage {
            message: message.into(),
        }
    }

    /// Create an invalid root error
    pub fn invalid_root(path: impl Into<PathBuf>) -> Self {
        InstablError::InvalidRoot { path: path.into() }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        InstablError::PermissionDenied { path: path.into() }
    }

    /// Create a per-file parse error
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        InstablError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        InstablError::DirectoryTraversal {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for InstablError {
    fn from(err: std::io::Error) -> Self {
        InstablError::io_error(err)
    }
}

impl From<csv::Error> for InstablError {
    fn from(err: csv::Error) -> Self {
        InstablError::Csv { source: err }
    }
}

impl From<glob::PatternError> for InstablError {
    fn from(err: glob::PatternError) -> Self {
        InstablError::GlobPattern { source: err }
    }
}

impl From<serde_json::Error> for InstablError {
    fn from(err: serde_json::Error) -> Self {
        InstablError::JsonSerialize { source: err }
    }
}

impl From<walkdir::Error> for InstablError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
        let denied = err
            .io_error()
            .map(|io| io.kind() == std::io::ErrorKind::PermissionDenied)
            .unwrap_or(false);

        if denied {
            InstablError::permission_denied(path)
        } else {
            InstablError::directory_traversal_error(path, err.to_string())
        }
    }
}

/// Result type alias for instabl operations
pub type Result<T> = std::result::Result<T, InstablError>;
