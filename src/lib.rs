//! Optimal play for the two-player territory game Filler.
//!
//! Each player owns a connected region grown from a corner; a turn picks a
//! color and annexes every reachable cell of it. The solver runs an
//! exhaustive alpha-beta search with a transposition table and returns the
//! optimal remaining line together with the final territory differential.

pub mod core;
pub mod display;
pub mod error;
pub mod game;
pub mod logic;
pub mod solver;


pub use crate::core::{Board, Color, GameState, PlayerId, RuleConfig};
pub use crate::error::{FillerError, IllegalReason, Result};
pub use crate::game::Session;
pub use crate::solver::{solve, solve_with_config, Solution, SolverConfig};
