//! Run-length statistics.

use eca_data::{EcaError, Result, RunStats};
use std::collections::BTreeMap;

/// Lengths of maximal blocks of identical values, in order.
#[must_use]
pub fn run_lengths(series: &[bool]) -> Vec<usize> {
    let mut lengths = Vec::new();
    let mut iter = series.iter();
    let Some(&first) = iter.next() else {
        return lengths;
    };
    let mut current = first;
    let mut len = 1;
    for &value in iter {
        if value == current {
            len += 1;
        } else {
            lengths.push(len);
            current = value;
            len = 1;
        }
    }
    lengths.push(len);
    lengths
}

/// Mean, mode and longest run of a non-empty series.
pub fn run_stats(series: &[bool]) -> Result<RunStats> {
    if series.is_empty() {
        return Err(EcaError::invalid_parameters(
            "run statistics require a non-empty column",
        ));
    }
    let lengths = run_lengths(series);
    let mean = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;

    let mut freq: BTreeMap<usize, usize> = BTreeMap::new();
    for &len in &lengths {
        *freq.entry(len).or_insert(0) += 1;
    }
    // Ascending iteration with a strict comparison keeps the shortest on ties.
    let mode = freq
        .iter()
        .fold((0, 0), |best, (&len, &count)| {
            if count > best.1 {
                (len, count)
            } else {
                best
            }
        })
        .0;
    let longest = lengths.iter().copied().max().unwrap_or(0);

    Ok(RunStats {
        lengths,
        mean,
        mode,
        longest,
    })
}
