//! Error context utilities
//!
//! Helpers for attaching context to foreign errors and for deciding whether
//! an error ends the run or is only reported.

use crate::error::{ErrorSeverity, InstablError, Result};
use std::path::Path;

/// Extension trait for Result to add context to errors
pub trait ResultExt<T, E> {
    /// Add context to an error with a custom message
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;

    /// Add file context to an error
    fn with_file_context<P: AsRef<Path>>(self, path: P) -> Result<T>;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|err| InstablError::Analysis {
            message: format!("{}: {}", context(), err),
        })
    }

    fn with_file_context<P: AsRef<Path>>(self, path: P) -> Result<T> {
        self.map_err(|err| {
            let err: &(dyn std::error::Error + 'static) = &err;
            if let Some(io_err) = err.downcast_ref::<std::io::Error>() {
                if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                    return InstablError::PermissionDenied {
                        path: path.as_ref().to_path_buf(),
                    };
                }
            }

            InstablError::Parse {
                path: path.as_ref().to_path_buf(),
                message: err.to_string(),
            }
        })
    }
}

/// Handle an error based on its severity
///
/// Warnings and errors are logged and swallowed; critical errors are logged
/// and handed back to the caller.
pub fn handle_error(err: InstablError) -> Option<InstablError> {
    let message = err.user_message();

    match err.severity() {
        ErrorSeverity::Warning => {
            tracing::warn!("{}", message);
            None
        }
        ErrorSeverity::Error => {
            tracing::error!("{}", message);
            None
        }
        ErrorSeverity::Critical => {
            tracing::error!("critical: {}", message);
            Some(err)
        }
    }
}

/// Extension trait for Option to convert to Result with a custom error
pub trait OptionExt<T> {
    /// Convert Option to Result with a custom error
    fn ok_or_error<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> InstablError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_error<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> InstablError,
    {
        self.ok_or_else(err_fn)
    }
}
