use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use indexmap::map::Entry;
use indexmap::IndexMap;
use itertools::Itertools;
use ndarray::iter::IndexedIter;
use ndarray::{Array2, ArrayView2, Ix2};

use crate::cell::{Cell, Label};
use crate::location::{Dimension, Location};

/// The two growing ends of a pipe.
///
/// Both start out at the pipe's original endpoint cells; every placement moves whichever end it extended.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Endpoints {
    /// The end first seen in row-major order, or wherever that end has since grown to.
    pub start: Location,
    /// The other end.
    pub end: Location,
}

impl Endpoints {
    /// Whether the gap between the two ends has closed to a single step.
    pub fn are_joined(&self) -> bool {
        self.start.is_neighbor_of(self.end)
    }
}

/// Ways a pipe label can occur the wrong number of times in a freshly constructed grid.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display)]
pub enum PipeCountMalformation {
    /// The label was declared but never occurs.
    #[strum(to_string = "has no endpoints")]
    NoEndpoints,
    /// The label occurs once.
    #[strum(to_string = "has only 1 endpoint")]
    OnlyOneEndpoint,
    /// The label occurs three times or more.
    #[strum(to_string = "has more than 2 endpoints")]
    MoreThanTwoEndpoints,
}

/// Reasons a [`Grid`] operation may fail.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum GridError {
    /// The location lies outside `[0, num_cols) x [0, num_rows)`.
    #[error("position {location:?} is out-of-bounds of the {num_cols}x{num_rows} grid")]
    OutOfBounds {
        /// The offending location.
        location: Location,
        /// Width of the grid.
        num_cols: usize,
        /// Height of the grid.
        num_rows: usize,
    },
    /// The label is not one of the grid's pipes.
    #[error("{0:?} is not a known pipe label")]
    UnknownLabel(Label),
    /// Cells are filled at most once.
    #[error("position {location:?} already has a value {existing:?}")]
    CellAlreadySet {
        /// The cell that was targeted.
        location: Location,
        /// The label already held there.
        existing: Label,
    },
    /// Pipes only grow from one of their two current ends.
    #[error("position {location:?} does not neighbor either endpoint of pipe {label:?}")]
    NotAnEndpointNeighbor {
        /// The cell that was targeted.
        location: Location,
        /// The pipe being extended.
        label: Label,
    },
    /// A label does not occur exactly twice at construction time.
    #[error("pipe {label:?} {malformation}")]
    MalformedPipeCount {
        /// The malformed pipe.
        label: Label,
        /// How it is malformed.
        malformation: PipeCountMalformation,
    },
    /// The cell array's shape, in `(rows, cols)`, disagrees with the declared dimensions.
    #[error("cell array has shape {found:?} but dimensions call for {expected:?}")]
    DimensionMismatch {
        /// `(num_rows, num_cols)` as declared.
        expected: (usize, usize),
        /// The array's actual shape.
        found: (usize, usize),
    },
}

/// A rectangular pipes puzzle.
///
/// Each pipe label starts at exactly two endpoint cells. Pipes grow one neighboring cell at a time through [`Grid::set_cell`]
/// until the two ends of every pipe are adjacent, at which point the grid [is complete](Grid::is_complete).
///
/// Grids can be built with [`GridBuilder`](crate::builder::GridBuilder) or parsed with the functions in [`parser`](crate::parser).
#[derive(Clone, Debug)]
pub struct Grid {
    // width, height
    dims: (Dimension, Dimension),
    // indexed (y, x)
    cells: Array2<Cell>,
    // in the row-major order each label is first seen
    pipe_endpoints: IndexMap<Label, Endpoints>,
}

impl Grid {
    /// Construct a grid from its dimensions `(num_cols, num_rows)`, its cell array and the set of pipe labels found within it.
    ///
    /// `cells` must have shape `(num_rows, num_cols)`.
    /// Every label must occur exactly twice, and every non-[`Unset`](Cell::Unset) cell must carry a label from `pipe_labels`.
    pub fn new(
        dims: (Dimension, Dimension),
        cells: Array2<Cell>,
        pipe_labels: impl IntoIterator<Item = Label>,
    ) -> Result<Self, GridError> {
        let expected = (dims.1.get(), dims.0.get());
        if cells.dim() != expected {
            return Err(GridError::DimensionMismatch { expected, found: cells.dim() });
        }

        let pipe_labels: HashSet<Label> = pipe_labels.into_iter().collect();
        let mut found: IndexMap<Label, (Location, Option<Location>)> = IndexMap::with_capacity(pipe_labels.len());

        // row-major, so the first occurrence becomes the start
        for (index, cell) in cells.indexed_iter() {
            let Some(label) = cell.label() else { continue };
            if !pipe_labels.contains(&label) {
                return Err(GridError::UnknownLabel(label));
            }

            let location = Location::from(index);
            match found.entry(label) {
                Entry::Vacant(entry) => {
                    entry.insert((location, None));
                }
                Entry::Occupied(mut entry) => match entry.get_mut() {
                    (_, end @ None) => *end = Some(location),
                    (_, Some(_)) => return Err(GridError::MalformedPipeCount {
                        label,
                        malformation: PipeCountMalformation::MoreThanTwoEndpoints,
                    }),
                },
            }
        }

        if let Some(label) = pipe_labels.iter().filter(|label| !found.contains_key(*label)).sorted().next() {
            return Err(GridError::MalformedPipeCount {
                label: *label,
                malformation: PipeCountMalformation::NoEndpoints,
            });
        }

        let mut pipe_endpoints = IndexMap::with_capacity(found.len());
        for (label, (start, end)) in found {
            let Some(end) = end else {
                return Err(GridError::MalformedPipeCount {
                    label,
                    malformation: PipeCountMalformation::OnlyOneEndpoint,
                });
            };
            pipe_endpoints.insert(label, Endpoints { start, end });
        }

        tracing::debug!(num_cols = dims.0.get(), num_rows = dims.1.get(), pipes = pipe_endpoints.len(), "constructed grid");

        Ok(Self {
            dims,
            cells,
            pipe_endpoints,
        })
    }

    /// The number of columns, i.e. the width.
    pub fn num_cols(&self) -> usize {
        self.dims.0.get()
    }

    /// The number of rows, i.e. the height.
    pub fn num_rows(&self) -> usize {
        self.dims.1.get()
    }

    /// The dimensions `(num_cols, num_rows)`.
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// Every pipe label, in the row-major order of each pipe's first endpoint.
    pub fn pipe_labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.pipe_endpoints.keys().copied()
    }

    /// Every pipe with its current ends, in the same order as [`Self::pipe_labels`].
    pub fn pipe_endpoints(&self) -> impl Iterator<Item = (Label, Endpoints)> + '_ {
        self.pipe_endpoints.iter().map(|(label, endpoints)| (*label, *endpoints))
    }

    /// The current ends of the pipe named `label`, or [`None`] if there is no such pipe.
    pub fn endpoints(&self, label: Label) -> Option<Endpoints> {
        self.pipe_endpoints.get(&label).copied()
    }

    /// Whether `location` satisfies `0 <= x < num_cols` and `0 <= y < num_rows`.
    #[inline]
    pub fn in_bounds(&self, location: Location) -> bool {
        location.0 < self.num_cols() && location.1 < self.num_rows()
    }

    fn check_bounds(&self, location: Location) -> Result<(), GridError> {
        if self.in_bounds(location) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                location,
                num_cols: self.num_cols(),
                num_rows: self.num_rows(),
            })
        }
    }

    /// Get the value in the cell at `location`.
    pub fn get_cell(&self, location: Location) -> Result<Cell, GridError> {
        self.check_bounds(location)?;
        Ok(self.cells[location.as_index()])
    }

    /// Extend the pipe named `label` into the cell at `location`.
    ///
    /// The cell must be in bounds and [`Unset`](Cell::Unset), and must neighbor one of the pipe's current ends.
    /// The start is tried before the end; whichever neighbors `location` moves onto it and the other end stays put.
    pub fn set_cell(&mut self, location: Location, label: Label) -> Result<(), GridError> {
        self.check_bounds(location)?;

        let endpoints = self.pipe_endpoints.get_mut(&label).ok_or(GridError::UnknownLabel(label))?;
        let cell = &mut self.cells[location.as_index()];
        if let Cell::Pipe { label: existing } = *cell {
            return Err(GridError::CellAlreadySet { location, existing });
        }

        let grown_end = if endpoints.start.is_neighbor_of(location) {
            &mut endpoints.start
        } else if endpoints.end.is_neighbor_of(location) {
            &mut endpoints.end
        } else {
            return Err(GridError::NotAnEndpointNeighbor { location, label });
        };

        *grown_end = location;
        *cell = Cell::Pipe { label };

        tracing::debug!(%label, ?location, "extended pipe");
        Ok(())
    }

    /// Whether the two ends of the pipe named `label` are neighbors.
    pub fn is_pipe_complete(&self, label: Label) -> Result<bool, GridError> {
        self.pipe_endpoints.get(&label)
            .map(Endpoints::are_joined)
            .ok_or(GridError::UnknownLabel(label))
    }

    /// Whether every pipe is complete.
    pub fn is_complete(&self) -> bool {
        self.pipe_endpoints.values().all(Endpoints::are_joined)
    }

    /// A read-only view of the cell array, indexed `(y, x)`.
    pub fn cells(&self) -> ArrayView2<'_, Cell> {
        self.cells.view()
    }

    /// Iterate over every cell in row-major order, yielding its location and value.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter { inner: self.cells.indexed_iter() }
    }
}

/// Row-major iterator over a [`Grid`]'s cells, created by [`Grid::iter`].
pub struct GridIter<'a> {
    inner: IndexedIter<'a, Cell, Ix2>,
}

impl Iterator for GridIter<'_> {
    type Item = (Location, Cell);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(index, cell)| (Location::from(index), *cell))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for GridIter<'_> {}

impl<'a> IntoIterator for &'a Grid {
    type Item = (Location, Cell);
    type IntoIter = GridIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.rows() {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
