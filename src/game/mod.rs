use crate::core::{Board, Color, GameState, PlayerId};
use crate::error::Result;
use crate::logic::{apply_move, is_terminal};
use crate::solver::{AlphaBetaSearcher, Solution, SolverConfig};
use log::info;
use std::fmt;

/// 対局セッション
///
/// Owns the live position and one search cache for the whole game, so each
/// `solve` after a move reuses everything the previous ones proved.
pub struct Session {
    state: GameState,
    history: Vec<Color>,
    searcher: AlphaBetaSearcher,
    maximizing_is_player1: bool,
}

impl Session {
    pub fn new(board: Board, config: &SolverConfig, maximizing_is_player1: bool) -> Self {
        Session {
            state: GameState::new(board, config.rules),
            history: Vec::new(),
            searcher: AlphaBetaSearcher::new(config.search.clone()),
            maximizing_is_player1,
        }
    }

    pub fn from_grid(
        grid: &[Vec<u8>],
        config: &SolverConfig,
        maximizing_is_player1: bool,
    ) -> Result<Self> {
        Ok(Self::new(Board::new(grid)?, config, maximizing_is_player1))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn history(&self) -> &[Color] {
        &self.history
    }

    /// Plays `color` for the current player and returns the cells gained.
    /// On error the session is left exactly as it was.
    pub fn simulate(&mut self, color: Color) -> Result<usize> {
        let mover = self.state.mover();
        let before = self.state.territory(mover).size();
        let next = apply_move(&self.state, color)?;
        let gained = next.territory(mover).size() - before;

        info!(
            "turn {}: {} plays {} (+{} cells, score {:+})",
            self.state.turn(),
            mover,
            color,
            gained,
            next.score()
        );
        self.state = next;
        self.history.push(color);
        Ok(gained)
    }

    /// `simulate` for a raw color id.
    pub fn simulate_id(&mut self, id: u8) -> Result<usize> {
        let color = Color::for_action(id, self.state.mover())?;
        self.simulate(color)
    }

    pub fn is_ended(&self) -> bool {
        is_terminal(&self.state)
    }

    pub fn current_player(&self) -> PlayerId {
        self.state.mover()
    }

    /// Current differential from the maximizing player's side.
    pub fn score(&self) -> i32 {
        if self.maximizing_is_player1 {
            self.state.score()
        } else {
            -self.state.score()
        }
    }

    pub fn solve(&mut self) -> Solution {
        let outcome = self.searcher.search(&self.state);
        Solution::from_outcome(outcome, self.maximizing_is_player1)
    }

    pub fn render(&self) -> String {
        crate::display::render_plain(&self.state)
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
