//! Configuration management for runs, analysis, surveys and output.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impl)
//! 2. `config.toml` file (overrides defaults, missing keys keep defaults)
//! 3. Command-line flags (applied by the binary)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [simulation]
//! rule = 30
//! width = 400
//! generations = 300
//! seed = "center"
//!
//! [analysis]
//! max_lag = 80
//!
//! [survey]
//! step = 8
//! ```

use crate::analysis::{MAX_AUTOCORRELATION_LAG, MAX_ENTROPY_BITS};
use crate::engine::DEFAULT_PARALLEL_THRESHOLD;
use crate::seed::{SeedKind, DEFAULT_RANDOM_SEED};
use eca_data::{AnalysisOptions, ColumnSelector, Rule};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Parameters of a single run.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SimulationConfig {
    /// Rule number, validated into `0..=255`.
    pub rule: i64,
    pub width: usize,
    pub generations: usize,
    pub seed: SeedKind,
    pub random_seed: u64,
    pub parallel_threshold: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rule: 30,
            width: 256,
            generations: 128,
            seed: SeedKind::Center,
            random_seed: DEFAULT_RANDOM_SEED,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Which metrics the analyzer computes.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AnalysisConfig {
    pub density: bool,
    pub balance: bool,
    pub entropy: bool,
    pub patterns: bool,
    pub run_stats: bool,
    pub autocorrelation: bool,
    pub max_lag: usize,
    /// Spatial autocorrelation of the final generation.
    pub spatial_autocorrelation: bool,
    pub spatial_max_lag: usize,
    pub column: ColumnSelector,
    pub include_final_generation: bool,
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            density: true,
            balance: true,
            entropy: true,
            patterns: true,
            run_stats: true,
            autocorrelation: true,
            max_lag: 80,
            spatial_autocorrelation: true,
            spatial_max_lag: 80,
            column: ColumnSelector::Center,
            include_final_generation: false,
            parallel: false,
        }
    }
}

impl AnalysisConfig {
    /// Converts the switches into analyzer options.
    #[must_use]
    pub fn to_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            density: self.density,
            balance: self.balance,
            entropy: self.entropy,
            patterns: self.patterns,
            autocorrelation: self.autocorrelation.then_some(self.max_lag),
            run_stats: self.run_stats,
            spatial_autocorrelation: self
                .spatial_autocorrelation
                .then_some(self.spatial_max_lag),
            column: self.column,
            include_final_generation: self.include_final_generation,
            parallel: self.parallel,
        }
    }
}

/// Sweep over a slice of the rule space.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SurveyConfig {
    pub start: u8,
    pub end: u8,
    pub step: usize,
    pub width: usize,
    pub generations: usize,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            start: 0,
            end: 255,
            step: 8,
            width: 101,
            generations: 50,
        }
    }
}

impl SurveyConfig {
    #[must_use]
    pub fn rules(&self) -> Vec<Rule> {
        crate::survey::rule_range(self.start, self.end, self.step)
    }
}

/// Grid export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridFormat {
    /// `#`/`.` text, one generation per line.
    #[default]
    Text,
    /// Plain portable bitmap (`P1`).
    Pbm,
}

/// Where and how results are written.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub write_grid: bool,
    pub grid_format: GridFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("results"),
            write_grid: true,
            grid_format: GridFormat::Text,
        }
    }
}

/// Top-level configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub simulation: SimulationConfig,
    pub analysis: AnalysisConfig,
    pub survey: SurveyConfig,
    pub output: OutputConfig,
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        let sim = &self.simulation;
        anyhow::ensure!(
            (0..=255).contains(&sim.rule),
            "Rule must be in [0, 255], got {}",
            sim.rule
        );
        anyhow::ensure!(sim.width > 0, "Width must be positive");
        anyhow::ensure!(sim.generations > 0, "Generation count must be positive");
        anyhow::ensure!(
            sim.width.saturating_mul(sim.generations) <= 1 << 28,
            "Grid too large (width x generations must be at most 2^28 cells)"
        );
        anyhow::ensure!(
            sim.parallel_threshold > 0,
            "Parallel threshold must be positive"
        );
        if let SeedKind::Bits(bits) = &sim.seed {
            anyhow::ensure!(
                bits.chars().filter(|c| !c.is_whitespace()).count() == sim.width,
                "Seed bit string length must equal width {}",
                sim.width
            );
        }

        let analysis = &self.analysis;
        anyhow::ensure!(
            !analysis.autocorrelation || analysis.max_lag > 0,
            "Max lag must be positive when autocorrelation is enabled"
        );
        anyhow::ensure!(
            !analysis.autocorrelation || analysis.max_lag <= MAX_AUTOCORRELATION_LAG,
            "Max lag must be at most {}, got {}",
            MAX_AUTOCORRELATION_LAG,
            analysis.max_lag
        );
        if let ColumnSelector::Index(i) = analysis.column {
            anyhow::ensure!(
                i < sim.width,
                "Analysis column {} out of range for width {}",
                i,
                sim.width
            );
        }

        let survey = &self.survey;
        anyhow::ensure!(survey.start <= survey.end, "Survey start must not exceed end");
        anyhow::ensure!(survey.step > 0, "Survey step must be positive");
        anyhow::ensure!(survey.width > 0, "Survey width must be positive");
        anyhow::ensure!(survey.generations > 0, "Survey generations must be positive");

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)
            .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Validated rule.
    pub fn rule(&self) -> anyhow::Result<Rule> {
        Ok(Rule::new(self.simulation.rule)?)
    }

    /// SHA-256 over everything that affects computed results.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.simulation).as_bytes());
        hasher.update(format!("{:?}", self.analysis.to_options()).as_bytes());
        hasher.update(format!("{:?}", self.survey).as_bytes());
        hasher.update(MAX_ENTROPY_BITS.to_le_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rule().unwrap(), Rule::RULE_30);
    }

    #[test]
    fn test_invalid_rule() {
        let config = AppConfig {
            simulation: SimulationConfig {
                rule: 256,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(config.rule().is_err());
    }

    #[test]
    fn test_invalid_width() {
        let config = AppConfig {
            simulation: SimulationConfig {
                width: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_generations() {
        let config = AppConfig {
            simulation: SimulationConfig {
                generations: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_max_lag() {
        let config = AppConfig {
            analysis: AnalysisConfig {
                max_lag: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let disabled = AppConfig {
            analysis: AnalysisConfig {
                max_lag: 0,
                autocorrelation: false,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(disabled.validate().is_ok());
    }

    #[test]
    fn test_huge_max_lag_rejected() {
        let config = AppConfig {
            analysis: AnalysisConfig {
                max_lag: 100_000_000_000,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(AppConfig::from_toml("[analysis]\nmax_lag = 100000000000\n").is_err());

        let at_limit = AppConfig {
            analysis: AnalysisConfig {
                max_lag: MAX_AUTOCORRELATION_LAG,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_spatial_switch_maps_to_options() {
        let mut config = AppConfig::default();
        assert_eq!(config.analysis.to_options().spatial_autocorrelation, Some(80));
        config.analysis.spatial_autocorrelation = false;
        assert_eq!(config.analysis.to_options().spatial_autocorrelation, None);
    }

    #[test]
    fn test_seed_bits_length() {
        let config = AppConfig {
            simulation: SimulationConfig {
                width: 4,
                seed: SeedKind::Bits("010".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [simulation]
            rule = 110
            width = 64

            [analysis]
            max_lag = 10
            column = { index = 3 }

            [output]
            grid_format = "pbm"
            "#,
        )
        .unwrap();
        assert_eq!(config.simulation.rule, 110);
        assert_eq!(config.simulation.width, 64);
        assert_eq!(config.simulation.generations, 128);
        assert_eq!(config.analysis.column, ColumnSelector::Index(3));
        assert_eq!(config.output.grid_format, GridFormat::Pbm);
        assert_eq!(config.analysis.to_options().autocorrelation, Some(10));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(AppConfig::from_toml("[simulation]\nrule = 999\n").is_err());
        assert!(AppConfig::from_toml("[simulation\n").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AppConfig::load(Path::new("definitely/not/here.toml")).unwrap();
        assert_eq!(config.simulation.width, 256);
    }

    #[test]
    fn test_fingerprint_consistency() {
        let config1 = AppConfig::default();
        let config2 = AppConfig::default();
        assert_eq!(config1.fingerprint(), config2.fingerprint());

        let mut config3 = AppConfig::default();
        config3.simulation.rule = 90;
        assert_ne!(config1.fingerprint(), config3.fingerprint());
    }
}
