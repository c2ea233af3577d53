//! Core functionality: tree walking, import accumulation and analysis

pub mod accumulator;
pub mod analyzer;
pub mod walker;

pub use accumulator::DependencyAccumulator;
pub use analyzer::{Analysis, AnalysisSummary, Analyzer};
pub use walker::{Discovery, Walker};
