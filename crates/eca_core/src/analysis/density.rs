//! Active-cell fractions.

use eca_data::{DensityProfile, EcaError, Grid, Result};

/// Fraction of active cells in each generation and their mean.
#[must_use]
pub fn density(grid: &Grid) -> DensityProfile {
    let per_generation: Vec<f64> = grid.rows().iter().map(|r| r.density()).collect();
    let mean = per_generation.iter().sum::<f64>() / per_generation.len() as f64;
    DensityProfile {
        per_generation,
        mean,
    }
}

/// Raw fraction of `true` entries in a series. Ideal disorder is 0.5.
pub fn balance(column: &[bool]) -> Result<f64> {
    if column.is_empty() {
        return Err(EcaError::invalid_parameters(
            "balance requires a non-empty column",
        ));
    }
    let ones = column.iter().filter(|&&c| c).count();
    Ok(ones as f64 / column.len() as f64)
}
