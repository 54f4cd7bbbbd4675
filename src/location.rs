use std::num::NonZero;

use ndarray::Ix;

pub(crate) type Coord = usize;
/// A grid extent along one axis; grids are never empty.
pub type Dimension = NonZero<Coord>;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A location `(x, y)` on a grid, `x` being the column and `y` the row. The top left corner is `Location(0, 0)`.
///
/// Locations order lexicographically by `x`, then `y`.
pub struct Location(pub Coord, pub Coord);

impl Location {
    pub(crate) fn as_index(&self) -> (Ix, Ix) {
        (self.1, self.0)
    }

    /// Offset this location by `rhs`, given as `(dx, dy)`.
    ///
    /// Stepping off the top or left edge wraps around to a huge coordinate, which every grid considers out of bounds.
    pub fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// Whether `other` is exactly one step away along a single axis. Diagonals and `self` itself are not neighbors.
    pub fn is_neighbor_of(&self, other: Location) -> bool {
        self.0.abs_diff(other.0) + self.1.abs_diff(other.1) == 1
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}
