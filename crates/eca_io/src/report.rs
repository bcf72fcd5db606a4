//! Run and survey reports, and the results directory that holds them.

use crate::error::{IoError, Result};
use crate::export::{extension, write_grid};
use crate::serialization::write_json_file;
use chrono::{DateTime, Utc};
use eca_core::config::GridFormat;
use eca_core::survey::RuleSummary;
use eca_core::analysis::ranked_patterns;
use eca_data::{pattern_label, Grid, MetricsBundle, Rule};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Everything needed to reproduce and interpret one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub rule: Rule,
    pub width: usize,
    pub generations: usize,
    pub seed: String,
    pub config_fingerprint: String,
    pub grid_fingerprint: String,
    pub metrics: MetricsBundle,
}

impl RunReport {
    #[must_use]
    pub fn new(
        rule: Rule,
        grid: &Grid,
        seed: &str,
        config_fingerprint: String,
        metrics: MetricsBundle,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            rule,
            width: grid.width(),
            generations: grid.generations(),
            seed: seed.to_string(),
            config_fingerprint,
            grid_fingerprint: eca_core::fingerprint(grid),
            metrics,
        }
    }

    /// Human-readable metric summary.
    #[must_use]
    pub fn render_summary(&self) -> String {
        let m = &self.metrics;
        let mut lines = vec![format!("── Metrics for {} ─────────────────────────", self.rule)];
        if let Some(e) = &m.entropy {
            lines.push(format!(
                "  Shannon entropy (3-bit patterns): {:.4} bits ({:.1}% of max)",
                e.bits,
                e.normalized() * 100.0
            ));
            lines.push(format!("  Theoretical maximum:              {:.4} bits", e.max_bits));
        }
        if let Some(d) = &m.density {
            lines.push(format!("  Mean active-cell density:         {:.4}", d.mean));
        }
        if let Some(b) = m.balance {
            lines.push(format!("  Fraction of 1s in column:         {b:.4}  (ideal: 0.5)"));
        }
        if let Some(r) = &m.run_stats {
            lines.push(format!("  Mean run length (column):         {:.3}", r.mean));
            lines.push(format!("  Modal run length (column):        {}", r.mode));
        }
        if let Some(a) = &m.autocorrelation {
            let defined = a.max_lag() + 1 - a.undefined_lags().len();
            lines.push(format!(
                "  Autocorrelation lags defined:     {}/{}",
                defined,
                a.max_lag() + 1
            ));
            if let Some(r1) = a.at(1) {
                lines.push(format!("  Autocorrelation at lag 1:         {r1:.4}"));
            }
        }
        if let Some(spatial) = &m.spatial_autocorrelation {
            lines.push(format!(
                "  Spatial autocorrelation lags:     {} (final generation)",
                spatial.len()
            ));
            if let Some(r1) = spatial.get(1) {
                lines.push(format!("  Spatial autocorrelation at lag 1: {r1:.4}"));
            }
        }
        if let Some(p) = &m.patterns {
            let (on, off) = p.split_by_rule(self.rule);
            lines.push(format!("  Patterns producing 1 / 0:         {on} / {off}"));
            let probabilities = p.probabilities();
            lines.extend(ranked_patterns(p).into_iter().map(|(pattern, count)| {
                format!(
                    "    {} -> {}  {:>10}  {:.4}",
                    pattern_label(pattern),
                    u8::from(self.rule.output(pattern)),
                    count,
                    probabilities[pattern as usize]
                )
            }));
        }
        lines.push(format!("  Generations simulated:            {}", self.generations));
        lines.push(format!(
            "  Cells simulated:                  {}",
            self.generations * self.width
        ));
        let short = self.grid_fingerprint.get(..16).unwrap_or(&self.grid_fingerprint);
        lines.push(format!("  Grid fingerprint:                 {short}"));
        lines.join("\n") + "\n"
    }
}

/// Summaries of a rule-space sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyReport {
    pub generated_at: DateTime<Utc>,
    pub width: usize,
    pub generations: usize,
    pub seed: String,
    pub summaries: Vec<RuleSummary>,
}

impl SurveyReport {
    #[must_use]
    pub fn new(width: usize, generations: usize, seed: &str, summaries: Vec<RuleSummary>) -> Self {
        Self {
            generated_at: Utc::now(),
            width,
            generations,
            seed: seed.to_string(),
            summaries,
        }
    }

    /// One line per rule.
    #[must_use]
    pub fn render_table(&self) -> String {
        let rows: Vec<String> = self
            .summaries
            .iter()
            .map(|s| {
                format!(
                    "{:>4}  {:>7.4}  {:>7.4}  {:>7.4}  {:>8.3}  {}\n",
                    s.rule.number(),
                    s.entropy_bits,
                    s.mean_density,
                    s.balance,
                    s.mean_run_length,
                    if s.uniform_final { "yes" } else { "no" }
                )
            })
            .collect();
        format!(
            "rule  entropy  density  balance  mean_run  uniform\n{}",
            rows.join("")
        )
    }
}

/// Output directory for one invocation's artifacts.
#[derive(Debug, Clone)]
pub struct ResultsDir {
    root: PathBuf,
}

impl ResultsDir {
    /// Creates the directory (and parents) when missing.
    pub fn create<P: Into<PathBuf>>(root: P) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| {
            IoError::FileSystem(e).with_context(format!("creating results directory {root:?}"))
        })?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Writes `rule_NNN.json` and, when `grid_format` is set, the grid export.
    /// Returns the written paths.
    pub fn write_run(
        &self,
        report: &RunReport,
        grid: &Grid,
        grid_format: Option<GridFormat>,
    ) -> Result<Vec<PathBuf>> {
        let stem = format!("rule_{:03}", report.rule.number());
        let mut written = Vec::new();

        let json_path = self.root.join(format!("{stem}.json"));
        write_json_file(report, &json_path)?;
        written.push(json_path);

        if let Some(format) = grid_format {
            let grid_path = self.root.join(format!("{stem}.{}", extension(format)));
            write_grid(grid, &grid_path, format)?;
            written.push(grid_path);
        }
        for path in &written {
            tracing::info!(path = %path.display(), "Wrote artifact");
        }
        Ok(written)
    }

    /// Writes `survey.json`.
    pub fn write_survey(&self, report: &SurveyReport) -> Result<PathBuf> {
        let path = self.root.join("survey.json");
        write_json_file(report, &path)?;
        tracing::info!(path = %path.display(), "Wrote artifact");
        Ok(path)
    }
}
