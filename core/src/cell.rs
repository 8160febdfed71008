use serde::{Deserialize, Serialize};

/// State of a single board cell.
///
/// `adjacent_mines` is fixed once mines are placed and never changes
/// afterward. A revealed cell cannot become marked.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) mine: bool,
    pub(crate) adjacent_mines: u8,
    pub(crate) revealed: bool,
    pub(crate) marked: bool,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.mine
    }

    /// Number of mine-bearing cells among the up-to-8 neighbors, in [0, 8].
    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn is_marked(self) -> bool {
        self.marked
    }

    /// A non-mine cell with no mine neighbors; the flood fill expands
    /// through these.
    pub const fn is_blank(self) -> bool {
        !self.mine && self.adjacent_mines == 0
    }
}
