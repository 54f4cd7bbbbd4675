//! Programmatic construction of [`Grid`]s.

use std::num::NonZero;
use std::ops::IndexMut;

use ndarray::{Array2, AssignElem};

use crate::cell::{Cell, Label};
use crate::grid::{Grid, GridError};
use crate::location::{Dimension, Location};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// A terminus was inserted outside the bounds specified by `dims` on a builder.
    FeatureOutOfBounds,
    /// A pair of termini was added for a label which already has one.
    DuplicateLabel,
    /// A terminus was placed on a location already holding one, including the other terminus of the same pair.
    LocationOccupied,
}

/// Reasons [`GridBuilder::build`] may fail.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// The builder entered an invalid state along the way.
    #[error("builder is invalid: {0:?}")]
    Invalid(Vec<BuilderInvalidReason>),
    /// The finished cell array was rejected by [`Grid::new`].
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// A builder for [`Grid`]s, placing each pipe's pair of termini by hand.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
#[derive(Clone, Debug)]
pub struct GridBuilder {
    // width, height
    dims: (Dimension, Dimension),
    cells: Array2<Cell>,
    // in insertion order, so pop_termini can undo the latest
    termini: Vec<(Label, (Location, Location))>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self::with_dims((NonZero::<usize>::MIN.saturating_add(4), NonZero::<usize>::MIN.saturating_add(4)))
    }
}

impl GridBuilder {
    /// Construct a new [`Self`] with the specified dimensions, specified in `(x, y)` order. Every cell starts [`Unset`](Cell::Unset).
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            cells: Array2::from_shape_simple_fn((dims.1.get(), dims.0.get()), Cell::default),
            termini: Default::default(),
            invalid_reasons: Default::default(),
        }
    }

    #[inline]
    fn in_bounds(&self, location: Location) -> bool {
        location.0 < self.dims.0.get() && location.1 < self.dims.1.get()
    }

    /// Add the two termini of the pipe named `label`. The order in which `locations` are specified does not matter.
    ///
    /// May cause the builder to enter an invalid state if either location is out of bounds or occupied, or if `label` was already added.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_termini(&mut self, label: Label, locations: (Location, Location)) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if self.termini.iter().any(|(existing, _)| *existing == label) {
            self.invalid_reasons.push(BuilderInvalidReason::DuplicateLabel);
            return self;
        }

        for location in [locations.0, locations.1] {
            if !self.in_bounds(location) {
                self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
                return self;
            }
        }

        if locations.0 == locations.1
            || !self.cells[locations.0.as_index()].is_unset()
            || !self.cells[locations.1.as_index()].is_unset() {
            self.invalid_reasons.push(BuilderInvalidReason::LocationOccupied);
            return self;
        }

        for location in [locations.0, locations.1] {
            self.cells.index_mut(location.as_index()).assign_elem(Cell::Pipe { label });
        }
        self.termini.push((label, locations));

        self
    }

    /// Remove the most recently added pair of termini.
    ///
    /// If the builder is in an invalid state or no termini are present, this function does nothing.
    pub fn pop_termini(&mut self) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if let Some((_, locations)) = self.termini.pop() {
            for location in [locations.0, locations.1] {
                self.cells.index_mut(location.as_index()).assign_elem(Cell::Unset);
            }
        }

        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Grid`].
    pub fn build(&self) -> Result<Grid, BuildError> {
        if !self.invalid_reasons.is_empty() {
            return Err(BuildError::Invalid(self.invalid_reasons.clone()));
        }

        Ok(Grid::new(
            self.dims,
            self.cells.clone(),
            self.termini.iter().map(|(label, _)| *label),
        )?)
    }
}
