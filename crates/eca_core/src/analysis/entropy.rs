//! Neighbourhood pattern statistics.

use eca_data::{EntropyReport, Grid, PatternDistribution, NEIGHBORHOODS};

/// `log2(8)`: entropy of eight equiprobable patterns.
pub const MAX_ENTROPY_BITS: f64 = 3.0;

/// Counts the periodic neighbourhoods of every generation that has a successor.
///
/// With `include_final_generation` the last generation is counted too.
#[must_use]
pub fn pattern_distribution(grid: &Grid, include_final_generation: bool) -> PatternDistribution {
    let counted = if include_final_generation {
        grid.generations()
    } else {
        grid.generations() - 1
    };
    let mut dist = PatternDistribution::default();
    for row in &grid.rows()[..counted] {
        for i in 0..row.width() {
            dist.counts[row.neighborhood(i) as usize] += 1;
        }
    }
    dist
}

/// `-Σ p·log2(p)` over observed patterns; 0 when nothing was observed.
#[must_use]
pub fn shannon_entropy(dist: &PatternDistribution) -> f64 {
    let total = dist.total();
    if total == 0 {
        return 0.0;
    }
    let mut entropy = 0.0;
    for &count in &dist.counts {
        if count > 0 {
            let p = count as f64 / total as f64;
            entropy -= p * p.log2();
        }
    }
    entropy.clamp(0.0, MAX_ENTROPY_BITS)
}

/// Entropy of the grid's neighbourhood distribution.
#[must_use]
pub fn entropy(grid: &Grid, include_final_generation: bool) -> EntropyReport {
    EntropyReport {
        bits: shannon_entropy(&pattern_distribution(grid, include_final_generation)),
        max_bits: MAX_ENTROPY_BITS,
    }
}

/// Patterns sorted by descending count, ties by pattern.
#[must_use]
pub fn ranked_patterns(dist: &PatternDistribution) -> Vec<(u8, u64)> {
    let mut ranked: Vec<(u8, u64)> = (0..NEIGHBORHOODS as u8)
        .map(|p| (p, dist.counts[p as usize]))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use eca_data::Row;

    fn grid(rows: &[&str]) -> Grid {
        Grid::from_rows(rows.iter().map(|r| Row::from_bits(r).unwrap()).collect()).unwrap()
    }

    #[test]
    fn test_single_generation_has_no_observations() {
        let g = grid(&["00100"]);
        assert_eq!(pattern_distribution(&g, false).total(), 0);
        assert_eq!(entropy(&g, false).bits, 0.0);
        assert_eq!(entropy(&g, false).max_bits, 3.0);
        assert_eq!(pattern_distribution(&g, true).total(), 5);
    }

    #[test]
    fn test_constant_grid_has_zero_entropy() {
        let g = grid(&["0000", "0000", "0000"]);
        let dist = pattern_distribution(&g, false);
        assert_eq!(dist.counts[0], 8);
        assert_eq!(entropy(&g, false).bits, 0.0);
    }

    #[test]
    fn test_de_bruijn_row_reaches_maximum() {
        // Every 3-bit window of the cyclic sequence 00010111 appears once.
        let g = grid(&["00010111", "00000000"]);
        let dist = pattern_distribution(&g, false);
        assert_eq!(dist.counts, [1; 8]);
        assert!((entropy(&g, false).bits - MAX_ENTROPY_BITS).abs() < 1e-12);
    }

    #[test]
    fn test_two_equiprobable_patterns() {
        let dist = PatternDistribution {
            counts: [5, 0, 0, 0, 0, 0, 0, 5],
        };
        assert!((shannon_entropy(&dist) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ranked_patterns() {
        let dist = PatternDistribution {
            counts: [3, 0, 5, 0, 5, 0, 0, 1],
        };
        let ranked = ranked_patterns(&dist);
        assert_eq!(ranked[0], (2, 5));
        assert_eq!(ranked[1], (4, 5));
        assert_eq!(ranked[2], (0, 3));
    }
}
