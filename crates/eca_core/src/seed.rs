//! Initial-condition builders.

use eca_data::{EcaError, Result, Row};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Seed used for random rows when none is configured.
pub const DEFAULT_RANDOM_SEED: u64 = 42;

/// Kind of initial row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedKind {
    /// One active cell at `W/2`.
    #[default]
    Center,
    /// Active cells at `W/2` and `W/2 + 1` (mod W).
    Pair,
    /// Uniform random cells from a seeded generator.
    Random,
    /// Explicit `0`/`1` string; its length must equal the width.
    Bits(String),
}

impl SeedKind {
    /// Builds the row for `width`. `random_seed` only affects [`SeedKind::Random`].
    pub fn build(&self, width: usize, random_seed: u64) -> Result<Row> {
        match self {
            SeedKind::Center => single_center(width),
            SeedKind::Pair => center_pair(width),
            SeedKind::Random => random(width, random_seed),
            SeedKind::Bits(bits) => {
                let row = Row::from_bits(bits)?;
                if row.width() != width {
                    return Err(EcaError::shape_mismatch(
                        format!("width {width}"),
                        format!("seed of width {}", row.width()),
                    ));
                }
                Ok(row)
            }
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            SeedKind::Center => "center",
            SeedKind::Pair => "pair",
            SeedKind::Random => "random",
            SeedKind::Bits(_) => "bits",
        }
    }
}

impl FromStr for SeedKind {
    type Err = EcaError;

    /// `center`, `pair`, `random`, or a `0`/`1` string.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "center" | "centre" => Ok(SeedKind::Center),
            "pair" => Ok(SeedKind::Pair),
            "random" => Ok(SeedKind::Random),
            bits => {
                Row::from_bits(bits)?;
                Ok(SeedKind::Bits(bits.to_string()))
            }
        }
    }
}

fn cells(width: usize) -> Result<Vec<bool>> {
    if width == 0 {
        return Err(EcaError::invalid_parameters("row width must be positive"));
    }
    Ok(vec![false; width])
}

/// Single active cell at the centre.
pub fn single_center(width: usize) -> Result<Row> {
    let mut cells = cells(width)?;
    cells[width / 2] = true;
    Row::new(cells)
}

/// Two adjacent active cells at the centre. A width of 1 has one cell.
pub fn center_pair(width: usize) -> Result<Row> {
    let mut cells = cells(width)?;
    cells[width / 2] = true;
    cells[(width / 2 + 1) % width] = true;
    Row::new(cells)
}

/// Uniform random row; the same seed always yields the same row.
pub fn random(width: usize, seed: u64) -> Result<Row> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let cells = cells(width)?.into_iter().map(|_| rng.gen::<bool>()).collect();
    Row::new(cells)
}
