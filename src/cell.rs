use std::fmt::{Display, Formatter};

/// The identifier of a pipe, as written in the grid text format.
pub type Label = char;

/// The value held by one grid cell.
///
/// A cell starts either [`Unset`](Cell::Unset) or holding a pipe endpoint, and an `Unset` cell may later be filled exactly once.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Cell {
    /// Part of the pipe named `label`, either an original endpoint or a drawn segment.
    Pipe {
        /// The pipe this cell belongs to.
        label: Label,
    },
    /// Not yet claimed by any pipe.
    #[default]
    Unset,
}

impl Cell {
    /// The pipe label held here, if any.
    pub fn label(&self) -> Option<Label> {
        match self {
            Cell::Pipe { label } => Some(*label),
            Cell::Unset => None,
        }
    }

    /// Whether this cell has not been claimed yet.
    pub fn is_unset(&self) -> bool {
        matches!(self, Cell::Unset)
    }
}

impl From<Label> for Cell {
    fn from(label: Label) -> Self {
        Cell::Pipe { label }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self {
            Cell::Pipe { label } => *label,
            Cell::Unset => '.',
        })
    }
}
