use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - Fresh -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    /// Created, mines not placed yet.
    Fresh,
    /// First click accepted, clock running.
    InProgress,
    /// Terminal, player won.
    Won,
    /// Terminal, player lost.
    Lost,
}

impl GameState {
    pub const fn is_fresh(self) -> bool {
        matches!(self, Self::Fresh)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Fresh
    }
}

/// One play session over a single board, from first click to win or loss.
///
/// Mines are placed on the first accepted click, with that click as the safe
/// origin, so the first reveal can never hit a mine.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    rng: SmallRng,
    state: GameState,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
    click_count: u32,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self::from_rng(config, SmallRng::from_os_rng())
    }

    /// Deterministic construction for tests and batch sampling.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::from_rng(config, SmallRng::seed_from_u64(seed))
    }

    fn from_rng(config: GameConfig, rng: SmallRng) -> Self {
        Self {
            board: Board::new(config),
            rng,
            state: GameState::default(),
            started_at: None,
            ended_at: None,
            click_count: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> GameConfig {
        self.board.config()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn started(&self) -> bool {
        !self.state.is_fresh()
    }

    pub fn won(&self) -> bool {
        matches!(self.state, GameState::Won)
    }

    pub fn lost(&self) -> bool {
        matches!(self.state, GameState::Lost)
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Number of accepted clicks so far.
    pub fn click_count(&self) -> u32 {
        self.click_count
    }

    /// Reveals at `coords`, returning the newly revealed coordinates.
    ///
    /// A click on a marked or revealed cell, out of bounds, or after the
    /// game has ended is an accepted no-op with an empty result. The first
    /// accepted click places the mines with `coords` as the safe origin and
    /// starts the clock; a failing placement (mines do not fit) propagates
    /// and leaves the game fresh.
    pub fn click(&mut self, coords: Coord2) -> Result<Vec<Coord2>> {
        if self.state.is_finished() || !self.board.in_bounds(coords) {
            return Ok(Vec::new());
        }
        if self.board.is_marked(coords) || self.board.is_revealed(coords) {
            return Ok(Vec::new());
        }

        if self.state.is_fresh() {
            self.board.place_mines(coords, &mut self.rng)?;
            self.started_at = Some(Instant::now());
            self.state = GameState::InProgress;
            log::debug!("game started, first click at {coords:?}");
        }

        self.click_count += 1;
        let revealed = self.board.reveal(coords);

        if self.board.is_mine(coords) {
            self.ended_at = Some(Instant::now());
            self.state = GameState::Lost;
            self.board.reveal_all();
            log::debug!("mine hit at {coords:?} after {} clicks", self.click_count);
        } else if self.board.all_safe_cells_revealed() {
            self.ended_at = Some(Instant::now());
            self.state = GameState::Won;
            log::debug!("board cleared after {} clicks", self.click_count);
        }

        Ok(revealed)
    }

    /// Toggles the flag at `coords`. No effect on the state machine, and a
    /// no-op once the game has ended.
    pub fn mark(&mut self, coords: Coord2) {
        if !self.state.is_finished() {
            self.board.toggle_mark(coords);
        }
    }

    /// Seconds since the first accepted click: 0 before the game starts,
    /// frozen at the win/loss transition, monotonic in between.
    pub fn elapsed_secs(&self) -> f64 {
        match self.started_at {
            None => 0.0,
            Some(started_at) => self
                .ended_at
                .unwrap_or_else(Instant::now)
                .duration_since(started_at)
                .as_secs_f64(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rows: Coord, cols: Coord, mines: CellCount) -> GameConfig {
        GameConfig::new(rows, cols, mines).unwrap()
    }

    fn some_mine(game: &Game) -> Coord2 {
        *game.board().mine_positions().iter().next().unwrap()
    }

    /// Clicks every remaining safe cell.
    fn clear_board(game: &mut Game) {
        let (rows, cols) = game.board().size();
        for row in 0..rows {
            for col in 0..cols {
                if !game.board().is_mine((row, col)) {
                    game.click((row, col)).unwrap();
                }
            }
        }
    }

    #[test]
    fn first_click_places_mines_and_starts_the_clock() {
        let mut game = Game::with_seed(config(5, 5, 1), 42);
        assert!(!game.started());
        assert_eq!(game.elapsed_secs(), 0.0);

        let revealed = game.click((2, 2)).unwrap();

        assert!(game.started());
        assert!(game.board().mines_placed());
        assert!(revealed.contains(&(2, 2)));
        assert!(!game.board().is_mine((2, 2)));
        assert_eq!(game.click_count(), 1);
    }

    #[test]
    fn clicking_a_mine_loses_and_reveals_the_full_board() {
        let mut game = Game::with_seed(config(5, 5, 3), 11);
        game.click((2, 2)).unwrap();
        let mine = some_mine(&game);

        game.click(mine).unwrap();

        assert!(game.lost());
        assert!(!game.won());
        let (rows, cols) = game.board().size();
        for row in 0..rows {
            for col in 0..cols {
                assert!(game.board().is_revealed((row, col)));
            }
        }
    }

    #[test]
    fn clearing_every_safe_cell_wins() {
        let mut game = Game::with_seed(config(5, 5, 3), 13);
        game.click((2, 2)).unwrap();
        clear_board(&mut game);

        assert!(game.won());
        assert!(!game.lost());
        assert!(game.board().all_safe_cells_revealed());
    }

    #[test]
    fn elapsed_time_freezes_at_the_terminal_transition() {
        let mut game = Game::with_seed(config(5, 5, 1), 3);
        game.click((2, 2)).unwrap();
        clear_board(&mut game);
        assert!(game.won());

        let frozen = game.elapsed_secs();
        assert_eq!(game.elapsed_secs(), frozen);
        assert!(frozen >= 0.0);
    }

    #[test]
    fn clicks_after_the_game_ends_are_no_ops() {
        let mut game = Game::with_seed(config(5, 5, 3), 11);
        game.click((2, 2)).unwrap();
        let mine = some_mine(&game);
        game.click(mine).unwrap();
        let clicks = game.click_count();

        assert!(game.click((0, 0)).unwrap().is_empty());
        assert_eq!(game.click_count(), clicks);
        assert!(game.lost());
    }

    #[test]
    fn clicking_a_marked_cell_is_rejected_and_does_not_start_the_game() {
        let mut game = Game::with_seed(config(5, 5, 1), 5);
        game.mark((1, 1));

        assert!(game.click((1, 1)).unwrap().is_empty());
        assert!(!game.started());
        assert!(!game.board().mines_placed());
        assert_eq!(game.click_count(), 0);
    }

    #[test]
    fn clicking_an_already_revealed_cell_is_rejected() {
        let mut game = Game::with_seed(config(5, 5, 1), 9);
        game.click((2, 2)).unwrap();
        let clicks = game.click_count();

        assert!(game.click((2, 2)).unwrap().is_empty());
        assert_eq!(game.click_count(), clicks);
    }

    #[test]
    fn out_of_bounds_clicks_are_rejected() {
        let mut game = Game::with_seed(config(5, 5, 1), 9);
        assert!(game.click((5, 0)).unwrap().is_empty());
        assert!(!game.started());
    }

    #[test]
    fn first_click_propagates_placement_failure_and_stays_fresh() {
        // valid config whose mines cannot avoid the center safe zone
        let mut game = Game::with_seed(config(3, 3, 8), 1);

        assert_eq!(game.click((1, 1)), Err(GameError::MinesDoNotFit));
        assert!(!game.started());
        assert_eq!(game.click_count(), 0);
    }
}
