//! # ECA Data
//!
//! Plain data types shared by the simulation engine, the analyzer and the
//! output layer: rules, rows, space-time grids and metric records.
//!
//! Nothing in this crate evolves or analyzes a grid; it only guarantees that
//! every value is well-formed once constructed.

pub mod data;
pub mod error;

pub use data::grid::Grid;
pub use data::metrics::{
    Autocorrelation, DensityProfile, EntropyReport, MetricsBundle, PatternDistribution, RunStats,
};
pub use data::options::{AnalysisOptions, ColumnSelector};
pub use data::row::Row;
pub use data::rule::{neighborhood_index, pattern_label, Rule, NEIGHBORHOODS};
pub use error::{EcaError, Result};
