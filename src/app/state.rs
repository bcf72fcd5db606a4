use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;

use eca_core::config::AppConfig;
use eca_core::{Engine, Metrics};
use eca_data::{Grid, Row, Rule};

/// A finished run: the grid plus what produced it.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub rule: Rule,
    pub seed_label: String,
    pub grid: Grid,
}

/// Validated configuration plus the engine and metrics shared by commands.
pub struct App {
    pub config: AppConfig,
    pub engine: Engine,
    pub metrics: Arc<Metrics>,
}

impl App {
    /// Validates `config` and prepares the engine.
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let metrics = Arc::new(Metrics::new());
        let engine = Engine::new()
            .with_parallel_threshold(config.simulation.parallel_threshold)
            .with_metrics(Arc::clone(&metrics));
        tracing::debug!(fingerprint = %config.fingerprint(), "Config ready");
        Ok(Self {
            config,
            engine,
            metrics,
        })
    }

    /// Initial row described by `[simulation]`.
    pub fn initial_row(&self) -> Result<Row> {
        let sim = &self.config.simulation;
        Ok(sim.seed.build(sim.width, sim.random_seed)?)
    }

    /// Runs the configured rule from the configured initial row.
    pub fn simulate(&self) -> Result<RunOutcome> {
        let rule = self.config.rule()?;
        let initial = self.initial_row()?;
        let grid = self
            .engine
            .run(&initial, rule, self.config.simulation.generations)?;
        Ok(RunOutcome {
            rule,
            seed_label: self.config.simulation.seed.label().to_string(),
            grid,
        })
    }
}
