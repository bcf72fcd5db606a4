//! # ECA Core
//!
//! Simulation and analysis engine for one-dimensional elementary cellular
//! automata under Wolfram's rule numbering.
//!
//! This crate contains:
//! - The evolution engine (periodic boundaries, optional parallel step)
//! - Initial-condition builders
//! - The statistics analyzer (density, balance, entropy, autocorrelation,
//!   run lengths, pattern distribution, divergence)
//! - Rule-space surveys
//! - Configuration and structured logging
//!
//! Every run is deterministic: the same initial row, rule and generation
//! count always produce a bit-identical grid.
//!
//! ## Example
//!
//! ```
//! use eca_core::{analysis, engine, seed};
//! use eca_data::{AnalysisOptions, Rule};
//!
//! let initial = seed::single_center(101).unwrap();
//! let grid = engine::run(&initial, Rule::RULE_30, 50).unwrap();
//! let metrics = analysis::analyze(&grid, &AnalysisOptions::all(10)).unwrap();
//! assert!(metrics.entropy.unwrap().bits <= 3.0);
//! ```

/// Statistics analyzer over grids and column series
pub mod analysis;
/// Configuration management for runs, analysis and output
pub mod config;
/// Evolution engine and grid fingerprints
pub mod engine;
/// Run metrics collection and logging setup
pub mod metrics;
/// Initial-condition builders
pub mod seed;
/// Rule-space surveys
pub mod survey;

pub use analysis::{analyze, analyze_column, AnalysisInput};
pub use config::AppConfig;
pub use engine::{evolve_step, fingerprint, run, simulate, Engine};
pub use metrics::{init_logging, Metrics};
pub use survey::{survey, RuleSummary};
