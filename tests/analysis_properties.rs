use eca_lib::eca_core::analysis::{
    autocorrelation, balance, entropy, lag_correlation, pattern_distribution, run_lengths,
    run_stats,
};
use eca_lib::{Grid, Row, Rule};
use proptest::prelude::*;

prop_compose! {
    fn arb_grid(max_width: usize, max_generations: usize)(
        cells in prop::collection::vec(any::<bool>(), 1..max_width),
        rule in any::<u8>(),
        generations in 1..max_generations
    ) -> Grid {
        let row = Row::new(cells).unwrap();
        eca_lib::run(&row, Rule::from(rule), generations).unwrap()
    }
}

fn arb_series(max_len: usize) -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 1..max_len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(150))]

    #[test]
    fn test_entropy_bounds(grid in arb_grid(64, 32)) {
        let report = entropy(&grid, false);
        prop_assert!(report.bits >= 0.0 && report.bits <= 3.0);
        prop_assert_eq!(report.max_bits, 3.0);
    }

    #[test]
    fn test_pattern_counts_cover_predecessor_cells(grid in arb_grid(64, 32)) {
        let counted = pattern_distribution(&grid, false).total() as usize;
        prop_assert_eq!(counted, grid.width() * (grid.generations() - 1));
        let all = pattern_distribution(&grid, true).total() as usize;
        prop_assert_eq!(all, grid.total_cells());
    }

    #[test]
    fn test_balance_matches_count(series in arb_series(200)) {
        let b = balance(&series).unwrap();
        let ones = series.iter().filter(|&&c| c).count();
        prop_assert!((0.0..=1.0).contains(&b));
        prop_assert!((b * series.len() as f64 - ones as f64).abs() < 1e-9);
    }

    #[test]
    fn test_runs_partition_series(series in arb_series(200)) {
        let lengths = run_lengths(&series);
        prop_assert_eq!(lengths.iter().sum::<usize>(), series.len());
        prop_assert!(lengths.iter().all(|&l| l >= 1));

        let stats = run_stats(&series).unwrap();
        prop_assert!(stats.mean >= 1.0 && stats.mean <= series.len() as f64);
        prop_assert!(stats.mode >= 1 && stats.mode <= stats.longest);
        prop_assert!(lengths.contains(&stats.mode));
    }

    #[test]
    fn test_autocorrelation_is_bounded_or_undefined(series in arb_series(120), max_lag in 1usize..20) {
        let ac = autocorrelation(&series, max_lag).unwrap();
        prop_assert_eq!(ac.max_lag(), max_lag);
        for lag in 1..=max_lag {
            let value = ac.values[lag];
            prop_assert!(value.is_nan() || (-1.0..=1.0).contains(&value));
            if series.len() < lag + 2 {
                prop_assert!(value.is_nan());
                prop_assert!(lag_correlation(&series, lag).is_err());
            }
        }
    }

    #[test]
    fn test_analysis_does_not_mutate_input(grid in arb_grid(32, 16)) {
        let before = grid.clone();
        let _ = entropy(&grid, true);
        let column = grid.center_column();
        let _ = run_stats(&column);
        let _ = autocorrelation(&column, 3);
        prop_assert_eq!(grid, before);
    }
}
