//! Metric records produced by the analyzer.
//!
//! Every record is a fresh value computed from a grid or a column; none of
//! them hold references back into the data they describe.

use crate::data::rule::{Rule, NEIGHBORHOODS};
use serde::{Deserialize, Serialize};

/// Fraction of active cells per generation, plus the mean over generations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityProfile {
    pub per_generation: Vec<f64>,
    pub mean: f64,
}

/// Counts of each encoded neighbourhood `0..8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PatternDistribution {
    pub counts: [u64; NEIGHBORHOODS],
}

impl PatternDistribution {
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Empirical probability per pattern; all zeros when nothing was observed.
    #[must_use]
    pub fn probabilities(&self) -> [f64; NEIGHBORHOODS] {
        let total = self.total();
        let mut p = [0.0; NEIGHBORHOODS];
        if total == 0 {
            return p;
        }
        for (slot, &count) in p.iter_mut().zip(self.counts.iter()) {
            *slot = count as f64 / total as f64;
        }
        p
    }

    /// Splits observations into (patterns the rule maps to 1, patterns it maps to 0).
    #[must_use]
    pub fn split_by_rule(&self, rule: Rule) -> (u64, u64) {
        self.counts
            .iter()
            .enumerate()
            .fold((0, 0), |(on, off), (pattern, &count)| {
                if rule.output(pattern as u8) {
                    (on + count, off)
                } else {
                    (on, off + count)
                }
            })
    }
}

/// Shannon entropy of the neighbourhood distribution, in bits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntropyReport {
    pub bits: f64,
    /// `log2(8)`.
    pub max_bits: f64,
}

impl EntropyReport {
    /// Entropy as a fraction of the theoretical maximum.
    #[must_use]
    pub fn normalized(&self) -> f64 {
        self.bits / self.max_bits
    }
}

/// Correlation of a series with its lagged copy, indexed by lag.
///
/// `values[0]` is lag 0. Undefined lags hold NaN and serialize as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Autocorrelation {
    #[serde(with = "nan_as_null")]
    pub values: Vec<f64>,
}

impl Autocorrelation {
    /// Largest lag in the series.
    #[must_use]
    pub fn max_lag(&self) -> usize {
        self.values.len().saturating_sub(1)
    }

    /// Correlation at `lag`, `None` when undefined or out of range.
    #[must_use]
    pub fn at(&self, lag: usize) -> Option<f64> {
        self.values.get(lag).copied().filter(|v| !v.is_nan())
    }

    /// Lags whose value could not be computed.
    #[must_use]
    pub fn undefined_lags(&self) -> Vec<usize> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_nan())
            .map(|(lag, _)| lag)
            .collect()
    }
}

impl PartialEq for Autocorrelation {
    fn eq(&self, other: &Self) -> bool {
        self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a == b || (a.is_nan() && b.is_nan()))
    }
}

/// Lengths of maximal blocks of identical values in a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub lengths: Vec<usize>,
    pub mean: f64,
    /// Most frequent run length; ties resolve to the shorter length.
    pub mode: usize,
    pub longest: usize,
}

impl RunStats {
    /// Number of runs.
    #[must_use]
    pub fn count(&self) -> usize {
        self.lengths.len()
    }
}

/// The subset of metrics requested from `analyze`.
///
/// Metrics that were not requested stay `None` and are left out of
/// serialized output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsBundle {
    /// Column the column metrics were taken from, when taken from a grid.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub column: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub density: Option<DensityProfile>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub entropy: Option<EntropyReport>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub patterns: Option<PatternDistribution>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub autocorrelation: Option<Autocorrelation>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub run_stats: Option<RunStats>,
    /// Spatial autocorrelation of the final generation, indexed by lag.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub spatial_autocorrelation: Option<Vec<f64>>,
}

mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        values
            .iter()
            .map(|v| if v.is_nan() { None } else { Some(*v) })
            .collect::<Vec<Option<f64>>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        let values = Vec::<Option<f64>>::deserialize(deserializer)?;
        Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }
}
