use std::ops::ControlFlow;

use itertools::Itertools;

use crate::cell::Label;
use crate::grid::{Grid, GridError};
use crate::location::Location;
use crate::shape::SquareStep;

/// Reasons [`step_solve`] may fail.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SolverFailure {
    /// No incomplete pipe has an end with exactly one unset neighbor.
    /// Either the grid is complete or it cannot be advanced without guessing.
    #[error("could not find a forced move")]
    NoLegalMove,
    /// The grid refused the chosen move.
    /// This should probably never happen.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// A single placement made by the solver.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Move {
    /// The pipe that was extended.
    pub label: Label,
    /// The cell it was extended into.
    pub location: Location,
}

/// The in-bounds, unset neighbors of `location`.
fn unset_neighbors(grid: &Grid, location: Location) -> impl Iterator<Item = Location> + '_ {
    SquareStep::neighbors_of(location)
        .into_iter()
        .map(|(_, neighbor)| neighbor)
        .filter(|neighbor| grid.get_cell(*neighbor).is_ok_and(|cell| cell.is_unset()))
}

/// Find the first forced move, scanning pipes in grid order and each pipe's start before its end.
fn find_forced_move(grid: &Grid) -> Option<Move> {
    for (label, endpoints) in grid.pipe_endpoints() {
        if endpoints.are_joined() {
            continue;
        }

        for end in [endpoints.start, endpoints.end] {
            // more than one candidate is a branch point; never guess
            match unset_neighbors(grid, end).exactly_one() {
                Ok(location) => return Some(Move { label, location }),
                Err(candidates) => tracing::trace!(%label, ?end, candidates = candidates.count(), "no forced move from end"),
            }
        }
    }

    None
}

/// Advance `grid` by exactly one forced move.
///
/// A move is forced when some end of an incomplete pipe has exactly one in-bounds, unset neighbor.
/// The first such move found is made and returned; if there is none, the grid is left untouched and [`SolverFailure::NoLegalMove`] is returned.
/// This is greedy and never looks ahead, so it can stall on puzzles that need a choice to be made.
pub fn step_solve(grid: &mut Grid) -> Result<Move, SolverFailure> {
    let next = find_forced_move(grid).ok_or(SolverFailure::NoLegalMove)?;
    grid.set_cell(next.location, next.label)?;

    tracing::debug!(label = %next.label, location = ?next.location, complete = grid.is_complete(), "solver step");
    Ok(next)
}

/// Repeatedly call [`step_solve`] until `grid` is complete, calling `on_step` after every move.
///
/// Returns the number of moves made, which is zero for an already complete grid.
/// If the solver stalls first, the moves made so far are kept and [`SolverFailure::NoLegalMove`] is returned.
pub fn solve_with<F>(grid: &mut Grid, mut on_step: F) -> Result<usize, SolverFailure>
where
    F: FnMut(&Grid, &Move),
{
    solve_while(grid, |grid, step| {
        on_step(grid, step);
        ControlFlow::Continue(())
    })
}

/// Like [`solve_with`], but `on_step` may stop the loop early by returning [`ControlFlow::Break`].
///
/// Stopping early is not a failure; the number of moves made so far is returned.
pub fn solve_while<F>(grid: &mut Grid, mut on_step: F) -> Result<usize, SolverFailure>
where
    F: FnMut(&Grid, &Move) -> ControlFlow<()>,
{
    let mut steps = 0;
    while !grid.is_complete() {
        let next = step_solve(grid)?;
        steps += 1;
        if on_step(grid, &next).is_break() {
            tracing::debug!(steps, "stopped early");
            break;
        }
    }

    Ok(steps)
}
