//! # Evaluation Module
//!
//! Scores are always from `Player1`'s perspective (positive = Player1 ahead).
//!
//! - **Terminal score**: territory size differential.
//! - **Heuristic score**: used only when a node budget stops the search
//!   early. Size differential plus a weighted mobility term, the number of
//!   growing moves for the mover minus those for the opponent, signed so
//!   that it still favours Player1 when positive.

use crate::core::GameState;
use crate::logic::mobility;

/// size(T1) - size(T2)
pub fn terminal_score(state: &GameState) -> i32 {
    state.score()
}

pub fn heuristic_score(state: &GameState, mobility_weight: i32) -> i32 {
    let mover = state.mover();
    let own = mobility(state, mover) as i32;
    let theirs = mobility(state, mover.opponent()) as i32;
    state.score() + mobility_weight * (own - theirs) * mover.sign()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, Color, RuleConfig};
    use crate::logic::apply_move;

    #[test]
    fn test_heuristic_adds_oriented_mobility() {
        // P1 at (0,0) touches RED and GREEN, P2 at (2,2) touches only BLUE
        let board = Board::new(&[
            vec![5, 0, 3],
            vec![1, 3, 3],
            vec![3, 3, 4],
        ])
        .unwrap();
        let state = GameState::new(board, RuleConfig::default());
        assert_eq!(terminal_score(&state), 0);
        assert_eq!(heuristic_score(&state, 1), 1);
        assert_eq!(heuristic_score(&state, 3), 3);
        assert_eq!(heuristic_score(&state, 0), 0);

        // P2 to move: same position, same sign convention
        let next = apply_move(&state, Color::RED).unwrap();
        assert_eq!(terminal_score(&next), 1);
        let p1_mob = mobility(&next, crate::core::PlayerId::Player1) as i32;
        let p2_mob = mobility(&next, crate::core::PlayerId::Player2) as i32;
        assert_eq!(heuristic_score(&next, 2), 1 + 2 * (p1_mob - p2_mob));
    }
}
