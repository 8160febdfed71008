use std::collections::{BTreeSet, VecDeque};

use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// A rectangular grid of cells with lazily placed mines.
///
/// Construction allocates an all-default grid; mines are placed exactly once,
/// by [`Board::place_mines`], with a caller-supplied safe origin. The board
/// never hands out mutable access to its cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: GameConfig,
    grid: Array2<Cell>,
    mine_positions: BTreeSet<Coord2>,
}

impl Board {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            grid: Array2::default(config.size().to_nd_index()),
            mine_positions: BTreeSet::new(),
        }
    }

    /// Test helper building a board with a fixed mine layout.
    #[cfg(test)]
    pub(crate) fn with_mines(config: GameConfig, mines: &[Coord2]) -> Self {
        let mut board = Self::new(config);
        for &coords in mines {
            assert!(board.in_bounds(coords));
            board.grid[coords.to_nd_index()].mine = true;
            board.mine_positions.insert(coords);
        }
        board.bump_neighbor_counts();
        board
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn rows(&self) -> Coord {
        self.config.rows
    }

    pub fn cols(&self) -> Coord {
        self.config.cols
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn in_bounds(&self, coords: Coord2) -> bool {
        coords.0 < self.config.rows && coords.1 < self.config.cols
    }

    /// In-bounds 8-neighborhood of a cell, in a fixed row-major scan order.
    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// Copy of the cell state at `coords`. Panics when out of bounds.
    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.grid[coords.to_nd_index()]
    }

    pub fn is_mine(&self, coords: Coord2) -> bool {
        self.cell_at(coords).is_mine()
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.cell_at(coords).is_revealed()
    }

    pub fn is_marked(&self, coords: Coord2) -> bool {
        self.cell_at(coords).is_marked()
    }

    pub fn value(&self, coords: Coord2) -> u8 {
        self.cell_at(coords).adjacent_mines()
    }

    pub fn mines_placed(&self) -> bool {
        !self.mine_positions.is_empty()
    }

    pub fn mine_positions(&self) -> &BTreeSet<Coord2> {
        &self.mine_positions
    }

    /// Places all mines, uniformly without replacement, outside the safe
    /// zone around `origin` (the origin plus its in-bounds neighbors).
    ///
    /// Fails with [`GameError::AlreadyPlaced`] on a second invocation and
    /// with [`GameError::MinesDoNotFit`] when the board is too small to hold
    /// the requested mines outside the safe zone. The board is left
    /// untouched on failure.
    pub fn place_mines(&mut self, origin: Coord2, rng: &mut impl Rng) -> Result<()> {
        if self.mines_placed() {
            return Err(GameError::AlreadyPlaced);
        }

        let mut safe_zone: BTreeSet<Coord2> = self.neighbors(origin).collect();
        safe_zone.insert(origin);

        let candidates: Vec<Coord2> = (0..self.config.rows)
            .flat_map(|row| (0..self.config.cols).map(move |col| (row, col)))
            .filter(|coords| !safe_zone.contains(coords))
            .collect();

        let wanted = usize::from(self.config.mines);
        if wanted > candidates.len() {
            return Err(GameError::MinesDoNotFit);
        }

        for index in rand::seq::index::sample(rng, candidates.len(), wanted) {
            let coords = candidates[index];
            self.grid[coords.to_nd_index()].mine = true;
            self.mine_positions.insert(coords);
        }

        self.bump_neighbor_counts();
        Ok(())
    }

    // Mine cells receive increments from adjacent mines too; the value is
    // never read for a mine cell.
    fn bump_neighbor_counts(&mut self) {
        let bounds = self.size();
        for &mine in &self.mine_positions {
            for coords in NeighborIter::new(mine, bounds) {
                self.grid[coords.to_nd_index()].adjacent_mines += 1;
            }
        }
    }

    /// Flood-fill reveal starting at `start`, returning the newly revealed
    /// coordinates in traversal order.
    ///
    /// The result is the maximal region reachable from the start through
    /// zero-value non-mine cells, plus the numbered boundary around it, plus
    /// the start cell itself (even when numbered or a mine). Marked cells
    /// are skipped; an out-of-bounds or already-revealed start yields an
    /// empty result with no side effects.
    pub fn reveal(&mut self, start: Coord2) -> Vec<Coord2> {
        if !self.in_bounds(start) || self.grid[start.to_nd_index()].revealed {
            return Vec::new();
        }

        let mut frontier = VecDeque::from([start]);
        let mut revealed = Vec::new();

        while let Some(coords) = frontier.pop_front() {
            let cell = self.grid[coords.to_nd_index()];
            if cell.revealed || cell.marked {
                continue;
            }

            self.grid[coords.to_nd_index()].revealed = true;
            revealed.push(coords);

            if cell.is_blank() {
                frontier.extend(
                    self.neighbors(coords)
                        .filter(|&pos| !self.grid[pos.to_nd_index()].revealed),
                );
            }
        }

        revealed
    }

    /// Flips the mark on an unrevealed in-bounds cell; silent no-op
    /// otherwise.
    pub fn toggle_mark(&mut self, coords: Coord2) {
        if self.in_bounds(coords) && !self.grid[coords.to_nd_index()].revealed {
            let cell = &mut self.grid[coords.to_nd_index()];
            cell.marked = !cell.marked;
        }
    }

    /// Win condition: every non-mine cell is revealed.
    pub fn all_safe_cells_revealed(&self) -> bool {
        self.grid.iter().all(|cell| cell.mine || cell.revealed)
    }

    /// Forces every cell visible. Used only to display the full board on a
    /// loss.
    pub fn reveal_all(&mut self) {
        for cell in self.grid.iter_mut() {
            cell.revealed = true;
        }
    }
}
