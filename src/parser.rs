//! Parsing of the plain-text grid format.
//!
//! A grid is a rectangular block of lines. A space is an [`Unset`](Cell::Unset) cell, and any other character is a pipe endpoint labelled by that character:
//!
//! ```text
//! A A
//! B B
//! C C
//! ```

use std::collections::HashSet;
use std::num::NonZero;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use ndarray::Array2;

use crate::cell::{Cell, Label};
use crate::grid::{Grid, GridError};

/// The character marking an unset cell.
pub const UNSET_CHAR: char = ' ';

/// Reasons parsing a grid may fail.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// There were no rows, or the rows had no cells.
    #[error("grid is empty")]
    Empty,
    /// Every row must have as many cells as the first.
    #[error("not all rows in grid are of equal length: row {row} has {found} cells but row 0 has {expected}")]
    RaggedRows {
        /// Zero-based index of the first offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// The cells were read but do not form a valid grid.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// The file could not be read.
    #[error("failed to read {}", path.display())]
    Io {
        /// The file that was read.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: std::io::Error,
    },
    /// The file was read but its contents are not a valid grid.
    #[error("{} does not contain a valid grid", path.display())]
    InvalidFile {
        /// The file that was read.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: Box<ParseError>,
    },
}

fn cell_from_char(value: char) -> Cell {
    if value == UNSET_CHAR {
        Cell::Unset
    } else {
        Cell::Pipe { label: value }
    }
}

/// Parse a grid from lines of text, one line per row.
pub fn parse_from_lines<I, S>(lines: I) -> Result<Grid, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let rows = lines.into_iter()
        .map(|line| line.as_ref().chars().map(cell_from_char).collect_vec())
        .collect_vec();

    let num_cols = rows.first().map(Vec::len).ok_or(ParseError::Empty)?;
    if let Some((row, cells)) = rows.iter().find_position(|cells| cells.len() != num_cols) {
        return Err(ParseError::RaggedRows { row, expected: num_cols, found: cells.len() });
    }

    let dims = (
        NonZero::new(num_cols).ok_or(ParseError::Empty)?,
        NonZero::new(rows.len()).ok_or(ParseError::Empty)?,
    );
    let pipe_labels: HashSet<Label> = rows.iter().flatten().filter_map(Cell::label).collect();
    let cells = Array2::from_shape_fn((dims.1.get(), dims.0.get()), |(y, x)| rows[y][x]);

    Ok(Grid::new(dims, cells, pipe_labels)?)
}

/// Parse a grid from a block of text, splitting it into rows at line breaks.
pub fn parse_from_str(text: &str) -> Result<Grid, ParseError> {
    parse_from_lines(text.lines())
}

/// Parse a grid from the contents of the file at `path`.
///
/// Any failure to make sense of the contents is wrapped in [`ParseError::InvalidFile`].
pub fn parse_from_file(path: impl AsRef<Path>) -> Result<Grid, ParseError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), "parsing grid file");
    parse_from_str(&text).map_err(|source| ParseError::InvalidFile {
        path: path.to_path_buf(),
        source: Box::new(source),
    })
}
