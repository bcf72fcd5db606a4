//! Evolution engine: one generation at a time on a periodic ring.
//!
//! Generation `t` depends only on generation `t-1`, so a run is a strict
//! chain. Within a generation every cell reads the previous row only, which
//! lets wide rows be evolved in parallel without changing the result.

use crate::metrics::Metrics;
use eca_data::{EcaError, Grid, Result, Row, Rule};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Instant;

/// Rows at least this wide use the parallel step by default.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Applies `rule` once to every cell of `row`.
///
/// The output has the same width as the input. Cell `i` becomes bit
/// `4·row[i-1] + 2·row[i] + row[i+1]` (indices mod W) of the rule number.
#[must_use]
pub fn evolve_step(row: &Row, rule: Rule) -> Row {
    row.map_neighborhoods(|pattern| rule.output(pattern))
}

/// [`evolve_step`] with cells computed on the rayon pool.
#[cfg(feature = "parallel")]
#[must_use]
pub fn evolve_step_parallel(row: &Row, rule: Rule) -> Row {
    row.par_map_neighborhoods(|pattern| rule.output(pattern))
}

/// Evolves `initial` into a grid of `generations` rows, `initial` first.
pub fn run(initial: &Row, rule: Rule, generations: usize) -> Result<Grid> {
    Engine::default().run(initial, rule, generations)
}

/// Like [`run`], validating raw rule and generation numbers first.
///
/// Rule numbers outside `0..=255` are [`EcaError::InvalidRule`]; a
/// non-positive generation count is [`EcaError::InvalidParameters`].
pub fn simulate(initial: &Row, rule_number: i64, generations: i64) -> Result<Grid> {
    let rule = Rule::new(rule_number)?;
    let generations = usize::try_from(generations)
        .ok()
        .filter(|&g| g >= 1)
        .ok_or_else(|| {
            EcaError::invalid_parameters(format!(
                "generation count must be positive, got {generations}"
            ))
        })?;
    run(initial, rule, generations)
}

/// Configurable engine. Runs are independent; the engine holds no grid state.
#[derive(Clone)]
pub struct Engine {
    parallel_threshold: usize,
    metrics: Option<Arc<Metrics>>,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            metrics: None,
        }
    }
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Width from which the parallel step is used. `usize::MAX` disables it.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Records every completed run into `metrics`.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    #[must_use]
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// One generation, choosing the serial or parallel path by width.
    #[must_use]
    pub fn step(&self, row: &Row, rule: Rule) -> Row {
        #[cfg(feature = "parallel")]
        {
            if row.width() >= self.parallel_threshold {
                return evolve_step_parallel(row, rule);
            }
        }
        evolve_step(row, rule)
    }

    /// Evolves `initial` for `generations` rows (generation 0 included).
    pub fn run(&self, initial: &Row, rule: Rule, generations: usize) -> Result<Grid> {
        if generations == 0 {
            return Err(EcaError::invalid_parameters(
                "generation count must be positive, got 0",
            ));
        }
        let started = Instant::now();
        tracing::debug!(
            rule = rule.number(),
            width = initial.width(),
            generations = generations,
            "Starting run"
        );

        let mut rows = Vec::with_capacity(generations);
        rows.push(initial.clone());
        for t in 1..generations {
            let next = self.step(&rows[t - 1], rule);
            tracing::trace!(generation = t, active = next.count_ones(), "Evolved");
            rows.push(next);
        }
        let grid = Grid::from_rows(rows)?;

        if let Some(metrics) = &self.metrics {
            metrics.record_run(rule, grid.width(), grid.generations(), started.elapsed());
        }
        Ok(grid)
    }
}

/// SHA-256 of the grid shape and bits, hex encoded.
///
/// Equal digests mean bit-identical grids; used to check reproducibility.
#[must_use]
pub fn fingerprint(grid: &Grid) -> String {
    let mut hasher = Sha256::new();
    hasher.update((grid.generations() as u64).to_le_bytes());
    hasher.update((grid.width() as u64).to_le_bytes());
    for row in grid.rows() {
        let mut byte = 0u8;
        for (i, cell) in row.iter().enumerate() {
            byte |= (cell as u8) << (i % 8);
            if i % 8 == 7 {
                hasher.update([byte]);
                byte = 0;
            }
        }
        if row.width() % 8 != 0 {
            hasher.update([byte]);
        }
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn row(bits: &str) -> Row {
        Row::from_bits(bits).unwrap()
    }

    #[test]
    fn test_step_preserves_width() {
        for width in [1, 2, 3, 8, 17] {
            let r = seed::single_center(width).unwrap();
            for number in [0u8, 30, 90, 110, 255] {
                assert_eq!(evolve_step(&r, Rule::from(number)).width(), width);
            }
        }
    }

    #[test]
    fn test_rule_30_single_seed_expansion() {
        let next = evolve_step(&row("00000100000"), Rule::RULE_30);
        assert_eq!(next.to_string(), "00001110000");
        let next = evolve_step(&next, Rule::RULE_30);
        assert_eq!(next.to_string(), "00011001000");
    }

    #[test]
    fn test_rule_90_sierpinski() {
        let next = evolve_step(&row("0001000"), Rule::RULE_90);
        assert_eq!(next.to_string(), "0010100");
        let next = evolve_step(&next, Rule::RULE_90);
        assert_eq!(next.to_string(), "0100010");
    }

    #[test]
    fn test_wraparound_uses_opposite_edge() {
        // Only the last cell is set: index 0 sees it as its left neighbour.
        let next = evolve_step(&row("00001"), Rule::from(0b0001_0000));
        // pattern 100 -> 1 only at index 0
        assert_eq!(next.to_string(), "10000");
        // Only the first cell is set: index W-1 sees it as its right neighbour.
        let next = evolve_step(&row("10000"), Rule::from(0b0000_0010));
        assert_eq!(next.to_string(), "00001");
    }

    #[test]
    fn test_run_includes_initial_generation() {
        let initial = row("0010");
        let grid = run(&initial, Rule::RULE_30, 4).unwrap();
        assert_eq!(grid.generations(), 4);
        assert_eq!(grid.initial(), &initial);
        assert_eq!(grid.row(1), Some(&evolve_step(&initial, Rule::RULE_30)));
    }

    #[test]
    fn test_single_generation_is_initial_row() {
        let initial = row("101");
        let grid = run(&initial, Rule::RULE_110, 1).unwrap();
        assert_eq!(grid.generations(), 1);
        assert_eq!(grid.last(), &initial);
    }

    #[test]
    fn test_run_rejects_zero_generations() {
        assert!(matches!(
            run(&row("1"), Rule::RULE_30, 0),
            Err(EcaError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_simulate_validates_inputs() {
        let initial = row("010");
        assert_eq!(
            simulate(&initial, 256, 3).unwrap_err(),
            EcaError::InvalidRule { rule: 256 }
        );
        assert_eq!(
            simulate(&initial, -5, 3).unwrap_err(),
            EcaError::InvalidRule { rule: -5 }
        );
        assert!(matches!(
            simulate(&initial, 30, 0),
            Err(EcaError::InvalidParameters(_))
        ));
        assert!(matches!(
            simulate(&initial, 30, -2),
            Err(EcaError::InvalidParameters(_))
        ));
        assert_eq!(simulate(&initial, 30, 3).unwrap().generations(), 3);
    }

    #[test]
    fn test_parallel_path_matches_serial() {
        let initial = seed::random(300, 7).unwrap();
        let serial = Engine::new()
            .with_parallel_threshold(usize::MAX)
            .run(&initial, Rule::RULE_30, 40)
            .unwrap();
        let parallel = Engine::new()
            .with_parallel_threshold(1)
            .run(&initial, Rule::RULE_30, 40)
            .unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_metrics_recorded() {
        let metrics = Arc::new(Metrics::new());
        let engine = Engine::new().with_metrics(Arc::clone(&metrics));
        engine.run(&row("0100"), Rule::RULE_30, 5).unwrap();
        assert_eq!(metrics.runs(), 1);
        assert_eq!(metrics.cells_evolved(), 20);
    }

    #[test]
    fn test_fingerprint_distinguishes_grids() {
        let a = run(&row("00100"), Rule::RULE_30, 6).unwrap();
        let b = run(&row("00100"), Rule::RULE_30, 6).unwrap();
        let c = run(&row("00100"), Rule::RULE_90, 6).unwrap();
        assert_eq!(fingerprint(&a), fingerprint(&b));
        assert_ne!(fingerprint(&a), fingerprint(&c));
        assert_eq!(fingerprint(&a).len(), 64);
    }
}
