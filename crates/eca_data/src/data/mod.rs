pub mod grid;
pub mod metrics;
pub mod options;
pub mod row;
pub mod rule;
