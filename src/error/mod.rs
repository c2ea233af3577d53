//! Error handling for instabl
//!
//! Error types, the crate-wide result alias, and context helpers.

pub mod context;
pub mod types;

pub use context::{handle_error, OptionExt, ResultExt};
pub use types::{ErrorSeverity, InstablError, Result};
