//! Sensitivity to initial conditions.

use eca_data::{EcaError, Grid, Result};

/// Per-generation fraction of cells that differ between two grids.
pub fn divergence(a: &Grid, b: &Grid) -> Result<Vec<f64>> {
    if !a.same_shape(b) {
        return Err(EcaError::shape_mismatch(
            format!("{}x{}", a.generations(), a.width()),
            format!("{}x{}", b.generations(), b.width()),
        ));
    }
    let width = a.width() as f64;
    Ok(a.rows()
        .iter()
        .zip(b.rows())
        .map(|(ra, rb)| ra.iter().zip(rb.iter()).filter(|(x, y)| x != y).count() as f64 / width)
        .collect())
}

/// First generation at which the grids differ, if any.
pub fn first_divergence(a: &Grid, b: &Grid) -> Result<Option<usize>> {
    Ok(divergence(a, b)?.iter().position(|&d| d > 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::run;
    use crate::seed;
    use eca_data::Rule;

    #[test]
    fn test_identical_grids_never_diverge() {
        let g = run(&seed::single_center(21).unwrap(), Rule::RULE_30, 10).unwrap();
        assert!(divergence(&g, &g).unwrap().iter().all(|&d| d == 0.0));
        assert_eq!(first_divergence(&g, &g).unwrap(), None);
    }

    #[test]
    fn test_rule_30_amplifies_perturbation() {
        let a = run(&seed::single_center(41).unwrap(), Rule::RULE_30, 15).unwrap();
        let b = run(&seed::center_pair(41).unwrap(), Rule::RULE_30, 15).unwrap();
        let profile = divergence(&a, &b).unwrap();
        assert_eq!(first_divergence(&a, &b).unwrap(), Some(0));
        assert!((profile[0] - 1.0 / 41.0).abs() < 1e-12);
        assert!(profile[14] > profile[0]);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = run(&seed::single_center(5).unwrap(), Rule::RULE_30, 3).unwrap();
        let b = run(&seed::single_center(6).unwrap(), Rule::RULE_30, 3).unwrap();
        assert!(matches!(
            divergence(&a, &b),
            Err(EcaError::ShapeMismatch { .. })
        ));
    }
}
