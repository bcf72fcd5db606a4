//! Statistics analyzer.
//!
//! Every metric is a pure function of a grid or a column. [`analyze`]
//! computes the requested subset; with `parallel` set, grid metrics and
//! column metrics are evaluated on separate rayon tasks.

pub mod autocorrelation;
pub mod density;
pub mod divergence;
pub mod entropy;
pub mod runs;

pub use autocorrelation::{
    autocorrelation, lag_correlation, spatial_autocorrelation, MAX_AUTOCORRELATION_LAG,
};
pub use density::{balance, density};
pub use divergence::{divergence, first_divergence};
pub use entropy::{
    entropy, pattern_distribution, ranked_patterns, shannon_entropy, MAX_ENTROPY_BITS,
};
pub use runs::{run_lengths, run_stats};

use eca_data::{AnalysisOptions, EcaError, Grid, MetricsBundle, Result};

/// Input accepted by [`analyze_input`].
#[derive(Debug, Clone, Copy)]
pub enum AnalysisInput<'a> {
    Grid(&'a Grid),
    Column(&'a [bool]),
}

/// Computes the metrics selected in `options` for a grid.
///
/// Column metrics read the column chosen by `options.column`.
pub fn analyze(grid: &Grid, options: &AnalysisOptions) -> Result<MetricsBundle> {
    let column_index = options.column.resolve(grid.width());
    let column = if options.needs_column() {
        Some(grid.column(column_index)?)
    } else {
        None
    };

    let (grid_part, column_part) = if options.parallel {
        join(
            || grid_metrics(grid, options),
            || column_metrics(column.as_deref(), options),
        )
    } else {
        (
            grid_metrics(grid, options),
            column_metrics(column.as_deref(), options),
        )
    };

    let mut bundle = grid_part?;
    let col = column_part?;
    bundle.balance = col.balance;
    bundle.autocorrelation = col.autocorrelation;
    bundle.run_stats = col.run_stats;
    if column.is_some() {
        bundle.column = Some(column_index);
    }
    tracing::debug!(
        generations = grid.generations(),
        width = grid.width(),
        "Analysis complete"
    );
    Ok(bundle)
}

/// Computes the column metrics selected in `options` for a bare series.
///
/// Grid-only metrics (density, entropy, patterns, spatial autocorrelation)
/// cannot be derived from a single series and are rejected.
pub fn analyze_column(column: &[bool], options: &AnalysisOptions) -> Result<MetricsBundle> {
    if options.needs_grid() {
        return Err(EcaError::invalid_parameters(
            "density, entropy, patterns and spatial autocorrelation require a grid, not a column",
        ));
    }
    column_metrics(Some(column), options)
}

/// Dispatches on grid or column input.
pub fn analyze_input(input: AnalysisInput<'_>, options: &AnalysisOptions) -> Result<MetricsBundle> {
    match input {
        AnalysisInput::Grid(grid) => analyze(grid, options),
        AnalysisInput::Column(column) => analyze_column(column, options),
    }
}

fn grid_metrics(grid: &Grid, options: &AnalysisOptions) -> Result<MetricsBundle> {
    let mut bundle = MetricsBundle::default();
    if options.density {
        bundle.density = Some(density(grid));
    }
    if options.entropy || options.patterns {
        let dist = pattern_distribution(grid, options.include_final_generation);
        if options.entropy {
            bundle.entropy = Some(eca_data::EntropyReport {
                bits: shannon_entropy(&dist),
                max_bits: MAX_ENTROPY_BITS,
            });
        }
        if options.patterns {
            bundle.patterns = Some(dist);
        }
    }
    if let Some(max_lag) = options.spatial_autocorrelation {
        bundle.spatial_autocorrelation = Some(spatial_autocorrelation(grid.last(), max_lag));
    }
    Ok(bundle)
}

fn column_metrics(column: Option<&[bool]>, options: &AnalysisOptions) -> Result<MetricsBundle> {
    let mut bundle = MetricsBundle::default();
    let Some(column) = column else {
        return Ok(bundle);
    };
    if options.balance {
        bundle.balance = Some(balance(column)?);
    }
    if let Some(max_lag) = options.autocorrelation {
        bundle.autocorrelation = Some(autocorrelation(column, max_lag)?);
    }
    if options.run_stats {
        bundle.run_stats = Some(run_stats(column)?);
    }
    Ok(bundle)
}

#[cfg(feature = "parallel")]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon::join(a, b)
}

#[cfg(not(feature = "parallel"))]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA,
    B: FnOnce() -> RB,
{
    (a(), b())
}
