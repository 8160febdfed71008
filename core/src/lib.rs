use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use board::*;
pub use cell::*;
pub use error::*;
pub use game::*;
pub use types::*;

mod analysis;
mod board;
mod cell;
mod error;
mod game;
mod types;

/// Board dimensions and mine count, fixed for the lifetime of a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const BEGINNER: Self = Self::new_unchecked(9, 9, 10);
    pub const INTERMEDIATE: Self = Self::new_unchecked(16, 16, 40);
    pub const EXPERT: Self = Self::new_unchecked(16, 30, 99);

    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    /// Validates the physical constraints: positive dimensions and
    /// `0 < mines < rows * cols`. Domain-specific bounds (preset limits,
    /// maximum board sizes) are the caller's responsibility.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 || mines == 0 || mines >= mult(rows, cols) {
            return Err(GameError::InvalidConfig);
        }
        Ok(Self::new_unchecked(rows, cols, mines))
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_accepts_valid_dimensions() {
        let config = GameConfig::new(9, 9, 10).unwrap();
        assert_eq!(config.size(), (9, 9));
        assert_eq!(config.total_cells(), 81);
    }

    #[test]
    fn config_rejects_impossible_boards() {
        assert_eq!(GameConfig::new(0, 9, 1), Err(GameError::InvalidConfig));
        assert_eq!(GameConfig::new(9, 0, 1), Err(GameError::InvalidConfig));
        assert_eq!(GameConfig::new(9, 9, 0), Err(GameError::InvalidConfig));
        assert_eq!(GameConfig::new(9, 9, 81), Err(GameError::InvalidConfig));
        assert_eq!(GameConfig::new(3, 3, 100), Err(GameError::InvalidConfig));
    }

    #[test]
    fn presets_pass_validation() {
        for preset in [
            GameConfig::BEGINNER,
            GameConfig::INTERMEDIATE,
            GameConfig::EXPERT,
        ] {
            assert!(GameConfig::new(preset.rows, preset.cols, preset.mines).is_ok());
        }
    }
}
