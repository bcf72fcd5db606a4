//! Grid exports: `#`/`.` text and plain PBM (`P1`).

use crate::error::{IoError, Result};
use eca_core::config::GridFormat;
use eca_data::{Grid, Row};
use std::path::Path;

const PBM_LINE_LIMIT: usize = 70;

/// One generation per line, `#` for active cells.
#[must_use]
pub fn grid_to_text(grid: &Grid) -> String {
    let mut out = grid.to_art();
    out.push('\n');
    out
}

/// Parses the text format; blank lines are skipped.
pub fn grid_from_text(text: &str) -> Result<Grid> {
    let rows = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(Row::from_bits)
        .collect::<eca_data::Result<Vec<Row>>>()?;
    Ok(Grid::from_rows(rows)?)
}

/// Plain PBM: `1` is black (active). Lines stay within 70 characters.
#[must_use]
pub fn grid_to_pbm(grid: &Grid) -> String {
    let mut out = format!("P1\n{} {}\n", grid.width(), grid.generations());
    for row in grid.rows() {
        let bits = row.to_string();
        let bytes = bits.as_bytes();
        for chunk in bytes.chunks(PBM_LINE_LIMIT) {
            // chunks of an ASCII string stay valid UTF-8
            out.push_str(&String::from_utf8_lossy(chunk));
            out.push('\n');
        }
    }
    out
}

/// Parses plain PBM, ignoring `#` comments.
pub fn grid_from_pbm(text: &str) -> Result<Grid> {
    let mut tokens = text
        .lines()
        .map(|l| l.split('#').next().unwrap_or(""))
        .flat_map(str::split_whitespace);

    if tokens.next() != Some("P1") {
        return Err(IoError::validation("missing P1 magic number"));
    }
    let mut dimension = |name: &str| -> Result<usize> {
        tokens
            .next()
            .and_then(|t| t.parse::<usize>().ok())
            .ok_or_else(|| IoError::validation(format!("missing or invalid {name}")))
    };
    let width = dimension("width")?;
    let height = dimension("height")?;

    let bits: Vec<bool> = tokens
        .flat_map(str::chars)
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => Err(IoError::validation(format!("unexpected pixel {other:?}"))),
        })
        .collect::<Result<Vec<bool>>>()?;
    if width == 0 || height == 0 || bits.len() != width * height {
        return Err(IoError::validation(format!(
            "expected {} pixels for {width}x{height}, found {}",
            width * height,
            bits.len()
        )));
    }
    let rows = bits
        .chunks(width)
        .map(|chunk| Row::new(chunk.to_vec()))
        .collect::<eca_data::Result<Vec<Row>>>()?;
    Ok(Grid::from_rows(rows)?)
}

/// Renders `grid` in `format`.
#[must_use]
pub fn render_grid(grid: &Grid, format: GridFormat) -> String {
    match format {
        GridFormat::Text => grid_to_text(grid),
        GridFormat::Pbm => grid_to_pbm(grid),
    }
}

/// File extension used for `format`.
#[must_use]
pub fn extension(format: GridFormat) -> &'static str {
    match format {
        GridFormat::Text => "txt",
        GridFormat::Pbm => "pbm",
    }
}

/// Writes `grid` to `path` in `format`.
pub fn write_grid<P: AsRef<Path>>(grid: &Grid, path: P, format: GridFormat) -> Result<()> {
    std::fs::write(&path, render_grid(grid, format)).map_err(|e| {
        IoError::FileSystem(e).with_context(format!("writing grid to {:?}", path.as_ref()))
    })
}

/// Reads a grid, choosing the parser from the `.pbm` extension or the magic number.
pub fn read_grid<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let text = std::fs::read_to_string(&path).map_err(|e| {
        IoError::FileSystem(e).with_context(format!("reading grid from {:?}", path.as_ref()))
    })?;
    let is_pbm = path
        .as_ref()
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pbm"))
        || text.trim_start().starts_with("P1");
    if is_pbm {
        grid_from_pbm(&text)
    } else {
        grid_from_text(&text)
    }
}
