//! Source parsing
//!
//! Only Go import declarations are extracted; nothing else in a file matters
//! to the instability metric.

pub mod import_parser;

pub use import_parser::{FileImports, GoImportParser};
