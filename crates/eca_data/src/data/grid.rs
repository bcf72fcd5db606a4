//! Space-time grids: one row per generation.

use crate::data::row::Row;
use crate::error::{EcaError, Result};
use serde::{Deserialize, Serialize};

/// Ordered generations of equal-width rows, generation 0 first.
///
/// A grid is never empty and never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Row>", into = "Vec<Row>")]
pub struct Grid {
    rows: Vec<Row>,
}

impl Grid {
    /// Builds a grid from rows that all share the width of the first one.
    pub fn from_rows(rows: Vec<Row>) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(EcaError::invalid_parameters(
                "grid must contain at least one generation",
            ));
        };
        let width = first.width();
        if let Some((t, row)) = rows.iter().enumerate().find(|(_, r)| r.width() != width) {
            return Err(EcaError::shape_mismatch(
                format!("width {width}"),
                format!("width {} at generation {t}", row.width()),
            ));
        }
        Ok(Self { rows })
    }

    /// Row width shared by every generation.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows[0].width()
    }

    /// Number of generations, including generation 0.
    #[must_use]
    pub fn generations(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, generation: usize) -> Option<&Row> {
        self.rows.get(generation)
    }

    #[must_use]
    pub fn initial(&self) -> &Row {
        &self.rows[0]
    }

    #[must_use]
    pub fn last(&self) -> &Row {
        &self.rows[self.rows.len() - 1]
    }

    #[must_use]
    pub fn cell(&self, generation: usize, index: usize) -> Option<bool> {
        self.rows.get(generation).and_then(|r| r.get(index))
    }

    /// Time series of one cell position, generation 0 first.
    pub fn column(&self, index: usize) -> Result<Vec<bool>> {
        if index >= self.width() {
            return Err(EcaError::invalid_parameters(format!(
                "column {index} out of range for width {}",
                self.width()
            )));
        }
        Ok(self.rows.iter().map(|r| r.cells()[index]).collect())
    }

    /// Index of the central column, `W/2`.
    #[must_use]
    pub fn center_index(&self) -> usize {
        self.width() / 2
    }

    /// Time series of the central column.
    #[must_use]
    pub fn center_column(&self) -> Vec<bool> {
        let c = self.center_index();
        self.rows.iter().map(|r| r.cells()[c]).collect()
    }

    /// `G × W`.
    #[must_use]
    pub fn total_cells(&self) -> usize {
        self.generations() * self.width()
    }

    /// Total active cells across all generations.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.rows.iter().map(Row::count_ones).sum()
    }

    /// True when both grids have the same number of generations and width.
    #[must_use]
    pub fn same_shape(&self, other: &Grid) -> bool {
        self.generations() == other.generations() && self.width() == other.width()
    }

    /// Multi-line `#`/`.` rendering, one generation per line.
    #[must_use]
    pub fn to_art(&self) -> String {
        self.rows
            .iter()
            .map(Row::to_art)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TryFrom<Vec<Row>> for Grid {
    type Error = EcaError;

    fn try_from(rows: Vec<Row>) -> Result<Self> {
        Grid::from_rows(rows)
    }
}

impl From<Grid> for Vec<Row> {
    fn from(grid: Grid) -> Self {
        grid.rows
    }
}
