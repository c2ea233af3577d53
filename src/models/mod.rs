//! Data models and structures for instabl

pub mod config;
pub mod stats;

pub use config::{OutputFormat, PartialSettings, Settings};
pub use stats::{PackageId, StabilityRecord, StatsTable};
