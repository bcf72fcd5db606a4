//! Selection of metrics for `analyze`.

use serde::{Deserialize, Serialize};

/// Which column the column metrics (balance, autocorrelation, runs) read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnSelector {
    /// Index `W/2`.
    #[default]
    Center,
    Index(usize),
}

impl ColumnSelector {
    /// Resolves the selector against a row width.
    #[must_use]
    pub fn resolve(self, width: usize) -> usize {
        match self {
            ColumnSelector::Center => width / 2,
            ColumnSelector::Index(i) => i,
        }
    }
}

/// Metrics to compute. Anything left `false`/`None` is omitted from the bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    pub density: bool,
    pub balance: bool,
    pub entropy: bool,
    pub patterns: bool,
    /// Largest lag to compute, lags `1..=max_lag`.
    pub autocorrelation: Option<usize>,
    pub run_stats: bool,
    /// Largest lag of the final row's spatial autocorrelation, capped at `W-1`.
    pub spatial_autocorrelation: Option<usize>,
    pub column: ColumnSelector,
    /// Also count neighbourhoods of the last generation, which has no successor.
    pub include_final_generation: bool,
    /// Evaluate independent metrics concurrently.
    pub parallel: bool,
}

impl AnalysisOptions {
    /// Requests nothing.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Requests every metric, both autocorrelations up to `max_lag`.
    #[must_use]
    pub fn all(max_lag: usize) -> Self {
        Self {
            density: true,
            balance: true,
            entropy: true,
            patterns: true,
            autocorrelation: Some(max_lag),
            run_stats: true,
            spatial_autocorrelation: Some(max_lag),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_density(mut self) -> Self {
        self.density = true;
        self
    }

    #[must_use]
    pub fn with_balance(mut self) -> Self {
        self.balance = true;
        self
    }

    #[must_use]
    pub fn with_entropy(mut self) -> Self {
        self.entropy = true;
        self
    }

    #[must_use]
    pub fn with_patterns(mut self) -> Self {
        self.patterns = true;
        self
    }

    #[must_use]
    pub fn with_autocorrelation(mut self, max_lag: usize) -> Self {
        self.autocorrelation = Some(max_lag);
        self
    }

    #[must_use]
    pub fn with_run_stats(mut self) -> Self {
        self.run_stats = true;
        self
    }

    #[must_use]
    pub fn with_spatial_autocorrelation(mut self, max_lag: usize) -> Self {
        self.spatial_autocorrelation = Some(max_lag);
        self
    }

    #[must_use]
    pub fn with_column(mut self, column: ColumnSelector) -> Self {
        self.column = column;
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// True when a metric that needs the whole grid is requested.
    #[must_use]
    pub fn needs_grid(&self) -> bool {
        self.density || self.entropy || self.patterns || self.spatial_autocorrelation.is_some()
    }

    /// True when a metric over a single column is requested.
    #[must_use]
    pub fn needs_column(&self) -> bool {
        self.balance || self.run_stats || self.autocorrelation.is_some()
    }
}
