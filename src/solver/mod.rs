pub mod alpha_beta;
pub mod config;
pub mod eval;
pub mod tt;

pub use alpha_beta::{AlphaBetaSearcher, SearchOutcome, SearchStats};
pub use config::{SearchConfig, SolverConfig};
pub use tt::{Bound, TTEntry, TranspositionTable};

use crate::core::{Board, Color, GameState};
use crate::error::Result;
use crate::logic::replay;
use serde::Serialize;

/// Optimal remaining line and its final score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    pub actions: Vec<Color>,
    /// Final territory differential from the maximizing player's side.
    pub score: i32,
    /// False when a node budget cut the search short.
    pub complete: bool,
    pub stats: SearchStats,
}

impl Solution {
    pub fn from_outcome(outcome: SearchOutcome, maximizing_is_player1: bool) -> Self {
        let score = if maximizing_is_player1 {
            outcome.score
        } else {
            -outcome.score
        };
        Solution {
            actions: outcome.line,
            score,
            complete: outcome.complete,
            stats: outcome.stats,
        }
    }

    pub fn best(&self) -> Option<Color> {
        self.actions.first().copied()
    }
}

/// One-shot solve with the default configuration.
///
/// Replays `past_actions` (raw color ids) from the seeded start, then
/// searches the resulting position with a fresh cache.
pub fn solve(grid: &[Vec<u8>], maximizing_is_player1: bool, past_actions: &[u8]) -> Result<Solution> {
    solve_with_config(
        grid,
        maximizing_is_player1,
        past_actions,
        &SolverConfig::default(),
    )
}

pub fn solve_with_config(
    grid: &[Vec<u8>],
    maximizing_is_player1: bool,
    past_actions: &[u8],
    config: &SolverConfig,
) -> Result<Solution> {
    let board = Board::new(grid)?;
    let state = replay_from_start(board, config, past_actions)?;
    let mut searcher = AlphaBetaSearcher::new(config.search.clone());
    Ok(Solution::from_outcome(
        searcher.search(&state),
        maximizing_is_player1,
    ))
}

/// The position `solve` searches for this board and history.
pub fn replay_from_start(board: Board, config: &SolverConfig, past_actions: &[u8]) -> Result<GameState> {
    replay(GameState::new(board, config.rules), past_actions)
}
