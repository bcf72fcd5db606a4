pub mod state;

pub use state::{App, RunOutcome};

use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

use eca_core::analysis::{self, divergence, first_divergence};
use eca_core::seed::SeedKind;
use eca_core::survey;
use eca_io::{ResultsDir, RunReport, SurveyReport};

/// Result of the `compare` command.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub baseline: RunOutcome,
    pub perturbed: RunOutcome,
    /// Fraction of differing cells per generation.
    pub profile: Vec<f64>,
    pub first_difference: Option<usize>,
}

impl App {
    /// Runs, analyzes and optionally writes the artifacts of one simulation.
    pub fn run_and_report(&self, write: bool) -> Result<(RunOutcome, RunReport, Vec<PathBuf>)> {
        let outcome = self.simulate()?;
        tracing::info!(
            rule = outcome.rule.number(),
            width = outcome.grid.width(),
            generations = outcome.grid.generations(),
            "Simulated"
        );
        let report = self.report(&outcome)?;
        let written = if write {
            self.write_run(&outcome, &report)?
        } else {
            Vec::new()
        };
        Ok((outcome, report, written))
    }

    /// Analyzes a finished run with the configured options.
    pub fn report(&self, outcome: &RunOutcome) -> Result<RunReport> {
        let options = self.config.analysis.to_options();
        let metrics = analysis::analyze(&outcome.grid, &options)?;
        Ok(RunReport::new(
            outcome.rule,
            &outcome.grid,
            &outcome.seed_label,
            self.config.fingerprint(),
            metrics,
        ))
    }

    /// Analyzes a grid file written by a previous run. The rule is only used
    /// to label the report.
    pub fn report_for_file(&self, path: &Path) -> Result<RunReport> {
        let grid = eca_io::read_grid(path)?;
        let outcome = RunOutcome {
            rule: self.config.rule()?,
            seed_label: format!("file:{}", path.display()),
            grid,
        };
        self.report(&outcome)
    }

    fn write_run(&self, outcome: &RunOutcome, report: &RunReport) -> Result<Vec<PathBuf>> {
        let output = &self.config.output;
        let dir = ResultsDir::create(&output.directory)?;
        let format = output.write_grid.then_some(output.grid_format);
        Ok(dir.write_run(report, &outcome.grid, format)?)
    }

    /// Sweeps the configured slice of the rule space.
    pub fn survey(&self, write: bool) -> Result<(SurveyReport, Option<PathBuf>)> {
        let cfg = &self.config.survey;
        let sim = &self.config.simulation;
        let initial = sim.seed.build(cfg.width, sim.random_seed)?;
        let summaries = survey::survey(&self.engine, &cfg.rules(), &initial, cfg.generations)?;
        let report = SurveyReport::new(cfg.width, cfg.generations, sim.seed.label(), summaries);
        let path = if write {
            let dir = ResultsDir::create(&self.config.output.directory)?;
            Some(dir.write_survey(&report)?)
        } else {
            None
        };
        self.metrics.log_summary();
        Ok((report, path))
    }

    /// Runs the configured rule from the configured seed and from `against`,
    /// then measures how far the two grids drift apart.
    pub fn compare(&self, against: &SeedKind) -> Result<Comparison> {
        let baseline = self.simulate()?;
        let sim = &self.config.simulation;
        let initial = against.build(sim.width, sim.random_seed)?;
        let grid = self.engine.run(&initial, baseline.rule, sim.generations)?;
        let perturbed = RunOutcome {
            rule: baseline.rule,
            seed_label: against.label().to_string(),
            grid,
        };
        let profile = divergence(&baseline.grid, &perturbed.grid)?;
        let first_difference = first_divergence(&baseline.grid, &perturbed.grid)?;
        Ok(Comparison {
            baseline,
            perturbed,
            profile,
            first_difference,
        })
    }
}

impl Comparison {
    /// Divergence every `stride` generations plus the final one.
    #[must_use]
    pub fn render(&self, stride: usize) -> String {
        let mut lines = vec![format!(
            "{}: {} seed vs {} seed",
            self.baseline.rule, self.baseline.seed_label, self.perturbed.seed_label
        )];
        lines.push(match self.first_difference {
            Some(t) => format!("  first difference at generation {t}"),
            None => "  grids are identical".to_string(),
        });
        let last = self.profile.len().saturating_sub(1);
        lines.extend(
            self.profile
                .iter()
                .enumerate()
                .filter(|(t, _)| t % stride.max(1) == 0 || *t == last)
                .map(|(t, d)| format!("  gen {t:>5}  differing {d:.4}")),
        );
        lines.join("\n") + "\n"
    }
}
