#![warn(missing_docs)]

//! # `pipes`
//!
//! A model and stepping solver for the "pipes" connect-the-dots puzzle, a close relative of [Numberlink](https://en.wikipedia.org/wiki/Numberlink).
//! Each pipe label appears at exactly two endpoint cells of a rectangular grid, and pipes grow one adjacent cell at a time until
//! the two ends of every pipe meet.
//!
//! Begin by building a [`Grid`], either with a [`GridBuilder`] or by parsing text with the functions in [`parser`].
//! Then call [`step_solve`] to make one move at a time, or [`solve_with`] to keep going until the grid is complete or stuck.
//!
//! # Internals
//! The [`Grid`] owns the cell array and, for each pipe, the two locations it is currently growing from.
//! It refuses any placement that would overwrite a cell or detach a pipe from its ends, so a pipe is always a connected path.
//!
//! The solver is stateless and only ever makes forced moves: an end of an incomplete pipe whose only unset neighbor must be the next cell of that pipe.
//! It never guesses between candidates, so puzzles that need look-ahead will stall with [`SolverFailure::NoLegalMove`].

pub use builder::GridBuilder;
pub use cell::{Cell, Label};
pub use grid::{Endpoints, Grid, GridError, GridIter, PipeCountMalformation};
pub use location::{Dimension, Location};
pub use solver::{solve_while, solve_with, step_solve, Move, SolverFailure};

pub mod builder;
pub(crate) mod cell;
pub(crate) mod grid;
pub(crate) mod location;
pub mod parser;
pub mod shape;
pub(crate) mod solver;
