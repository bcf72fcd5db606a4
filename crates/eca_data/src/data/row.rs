//! A single generation of cells on a ring.

use crate::data::rule::neighborhood_index;
use crate::error::{EcaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered, fixed-width sequence of cells with periodic indexing.
///
/// Index `0` and index `W-1` are mutual neighbours. A row of width 1 is its
/// own left and right neighbour.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Row {
    cells: Vec<bool>,
}

impl Row {
    /// Builds a row, rejecting empty input.
    pub fn new(cells: Vec<bool>) -> Result<Self> {
        if cells.is_empty() {
            return Err(EcaError::invalid_parameters("initial row must not be empty"));
        }
        Ok(Self { cells })
    }

    /// All-zero row of the given width.
    pub fn zeros(width: usize) -> Result<Self> {
        Self::new(vec![false; width])
    }

    /// Parses `0`/`1` digits (also accepts `.`/`#`). Whitespace is ignored.
    pub fn from_bits(bits: &str) -> Result<Self> {
        let cells = bits
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                '0' | '.' => Ok(false),
                '1' | '#' => Ok(true),
                other => Err(EcaError::invalid_parameters(format!(
                    "unexpected cell character {other:?}"
                ))),
            })
            .collect::<Result<Vec<bool>>>()?;
        Self::new(cells)
    }

    /// Number of cells.
    #[must_use]
    pub fn width(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Cell state, `None` when `index >= width`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<bool> {
        self.cells.get(index).copied()
    }

    /// Index of the left neighbour of `index` on the ring.
    #[inline]
    #[must_use]
    pub fn left_of(&self, index: usize) -> usize {
        let w = self.cells.len();
        (index % w + w - 1) % w
    }

    /// Index of the right neighbour of `index` on the ring.
    #[inline]
    #[must_use]
    pub fn right_of(&self, index: usize) -> usize {
        (index % self.cells.len() + 1) % self.cells.len()
    }

    /// Encoded neighbourhood `4·left + 2·center + right` around `index`.
    #[inline]
    #[must_use]
    pub fn neighborhood(&self, index: usize) -> u8 {
        neighborhood_index(
            self.cells[self.left_of(index)],
            self.cells[index],
            self.cells[self.right_of(index)],
        )
    }

    /// Builds the row of the same width whose cell `i` is `f(neighborhood(i))`.
    #[must_use]
    pub fn map_neighborhoods<F>(&self, f: F) -> Row
    where
        F: Fn(u8) -> bool,
    {
        Row {
            cells: (0..self.width()).map(|i| f(self.neighborhood(i))).collect(),
        }
    }

    /// Parallel [`Row::map_neighborhoods`]; every cell reads only `self`.
    #[cfg(feature = "parallel")]
    #[must_use]
    pub fn par_map_neighborhoods<F>(&self, f: F) -> Row
    where
        F: Fn(u8) -> bool + Sync + Send,
    {
        use rayon::prelude::*;
        Row {
            cells: (0..self.width())
                .into_par_iter()
                .map(|i| f(self.neighborhood(i)))
                .collect(),
        }
    }

    /// Number of active cells.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Fraction of active cells.
    #[must_use]
    pub fn density(&self) -> f64 {
        self.count_ones() as f64 / self.width() as f64
    }

    /// Cells as `#` (active) and `.` (inactive).
    #[must_use]
    pub fn to_art(&self) -> String {
        self.cells.iter().map(|&c| if c { '#' } else { '.' }).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.cells.iter().copied()
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &c in &self.cells {
            f.write_str(if c { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Row {
    type Err = EcaError;

    fn from_str(s: &str) -> Result<Self> {
        Row::from_bits(s)
    }
}

impl TryFrom<String> for Row {
    type Error = EcaError;

    fn try_from(bits: String) -> Result<Self> {
        Row::from_bits(&bits)
    }
}

impl TryFrom<Vec<bool>> for Row {
    type Error = EcaError;

    fn try_from(cells: Vec<bool>) -> Result<Self> {
        Row::new(cells)
    }
}

impl From<Row> for String {
    fn from(row: Row) -> Self {
        row.to_string()
    }
}
