//! Elementary cellular automata: simulation, analysis and reporting.
//!
//! The library surface re-exports the member crates and adds [`app`], the
//! command orchestration used by the `eca` binary.

pub mod app;

pub use eca_core;
pub use eca_data;
pub use eca_io;

pub use eca_core::{analyze, run, simulate};
pub use eca_data::{AnalysisOptions, EcaError, Grid, MetricsBundle, Row, Rule};
