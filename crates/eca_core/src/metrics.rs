//! Run metrics collection and logging setup.
//!
//! Counters are atomic so one collector can be shared by survey workers.

use eca_data::Rule;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Global metrics collector for engine runs.
pub struct Metrics {
    runs: AtomicU64,
    generations: AtomicU64,
    cells: AtomicU64,
    busy_micros: AtomicU64,
    log_interval: u64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Creates a new metrics collector.
    #[must_use]
    pub fn new() -> Self {
        Self::with_log_interval(64)
    }

    /// Creates a collector that logs a summary every `log_interval` runs.
    #[must_use]
    pub fn with_log_interval(log_interval: u64) -> Self {
        Self {
            runs: AtomicU64::new(0),
            generations: AtomicU64::new(0),
            cells: AtomicU64::new(0),
            busy_micros: AtomicU64::new(0),
            log_interval: log_interval.max(1),
            start_time: Instant::now(),
        }
    }

    /// Records a completed run with its duration.
    pub fn record_run(&self, rule: Rule, width: usize, generations: usize, duration: Duration) {
        let runs = self.runs.fetch_add(1, Ordering::Relaxed) + 1;
        self.generations
            .fetch_add(generations as u64, Ordering::Relaxed);
        self.cells
            .fetch_add((width * generations) as u64, Ordering::Relaxed);
        self.busy_micros
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);

        tracing::debug!(
            rule = rule.number(),
            width = width,
            generations = generations,
            duration_us = duration.as_micros() as u64,
            "Run complete"
        );

        if runs.is_multiple_of(self.log_interval) {
            tracing::info!(
                runs = runs,
                cells = self.cells_evolved(),
                elapsed_ms = self.elapsed().as_millis() as u64,
                "Engine progress"
            );
        }
    }

    #[must_use]
    pub fn runs(&self) -> u64 {
        self.runs.load(Ordering::Relaxed)
    }

    /// Generations produced across all runs, generation 0 included.
    #[must_use]
    pub fn generations(&self) -> u64 {
        self.generations.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn cells_evolved(&self) -> u64 {
        self.cells.load(Ordering::Relaxed)
    }

    /// Sum of recorded run durations.
    #[must_use]
    pub fn busy_time(&self) -> Duration {
        Duration::from_micros(self.busy_micros.load(Ordering::Relaxed))
    }

    /// Gets elapsed time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Logs the totals at info level.
    pub fn log_summary(&self) {
        tracing::info!(
            runs = self.runs(),
            generations = self.generations(),
            cells = self.cells_evolved(),
            busy_ms = self.busy_time().as_millis() as u64,
            elapsed_ms = self.elapsed().as_millis() as u64,
            "Engine summary"
        );
    }
}

/// Initialize tracing subscriber for logging.
///
/// `RUST_LOG` wins when set; otherwise `verbosity` picks the level
/// (0 = warn, 1 = info, 2 = debug, 3+ = trace).
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .ok();
}
