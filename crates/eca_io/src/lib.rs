//! # ECA IO
//!
//! Output layer for simulation runs.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - JSON serialization helpers
//! - Run and survey reports written to a results directory
//! - Grid exports as text and plain PBM

/// Error types and result aliases for I/O operations
pub mod error;
/// Grid text and PBM exports
pub mod export;
/// Run and survey reports and the results directory
pub mod report;
/// JSON serialization helpers
pub mod serialization;

pub use error::{IoError, Result};
pub use export::{grid_from_pbm, grid_from_text, grid_to_pbm, grid_to_text, read_grid, write_grid};
pub use report::{ResultsDir, RunReport, SurveyReport};
pub use serialization::{from_json, read_json_file, to_json, to_json_pretty, write_json_file};
