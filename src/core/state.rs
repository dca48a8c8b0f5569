use super::board::Board;
use super::color::Color;
use super::territory::Territory;
use super::types::{Cell, PlayerId, RuleConfig};

/// Canonical identity of a position for the transposition table.
///
/// The ply counter is deliberately absent: the same partition reached
/// through a different move order is the same position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateKey {
    pub owned: [u64; 2],
    pub colors: [Color; 2],
    pub mover: PlayerId,
    pub idle: u8,
}

/// Immutable game snapshot. Moves produce a new value, see `logic::apply_move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    territories: [Territory; 2],
    turn: u16,
    idle: u8,
    rules: RuleConfig,
}

impl GameState {
    /// Seeds Player1 at (0, 0) and Player2 at (R-1, C-1).
    ///
    /// On a 1x1 board the seeds coincide; the cell then stays neutral and
    /// both territories start empty.
    pub fn new(board: Board, rules: RuleConfig) -> Self {
        let p1_seed = Cell::new(0, 0);
        let p2_seed = Cell::new(board.rows() - 1, board.cols() - 1);
        let (p1_cells, p2_cells) = if p1_seed == p2_seed {
            (0, 0)
        } else {
            (board.bit(p1_seed), board.bit(p2_seed))
        };

        GameState {
            board,
            territories: [
                Territory::new(PlayerId::Player1, p1_cells, board.color_at(p1_seed)),
                Territory::new(PlayerId::Player2, p2_cells, board.color_at(p2_seed)),
            ],
            turn: 0,
            idle: 0,
            rules,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    pub fn territory(&self, player: PlayerId) -> &Territory {
        &self.territories[player.index()]
    }

    pub fn turn(&self) -> u16 {
        self.turn
    }

    /// Consecutive plies that gained no cell.
    pub fn idle_turns(&self) -> u8 {
        self.idle
    }

    /// 手番 (turn parity, starting from `rules.first_player`)
    pub fn mover(&self) -> PlayerId {
        if self.turn % 2 == 0 {
            self.rules.first_player
        } else {
            self.rules.first_player.opponent()
        }
    }

    pub fn turn_cap(&self) -> u16 {
        self.rules
            .turn_cap
            .unwrap_or(self.board.cell_count() as u16)
    }

    pub fn neutral_mask(&self) -> u64 {
        self.board.full_mask() & !(self.territories[0].cells | self.territories[1].cells)
    }

    pub fn neutral_count(&self) -> usize {
        self.neutral_mask().count_ones() as usize
    }

    /// size(T1) - size(T2)
    pub fn score(&self) -> i32 {
        self.territories[0].size() as i32 - self.territories[1].size() as i32
    }

    pub fn owner_at(&self, cell: Cell) -> Option<PlayerId> {
        self.territories
            .iter()
            .find(|t| t.contains(&self.board, cell))
            .map(|t| t.owner)
    }

    pub fn key(&self) -> StateKey {
        StateKey {
            owned: [self.territories[0].cells, self.territories[1].cells],
            colors: [self.territories[0].color, self.territories[1].color],
            mover: self.mover(),
            idle: self.idle,
        }
    }

    /// Next snapshot after the mover's territory became `claimed`.
    pub(crate) fn advance(&self, claimed: Territory, gained: usize) -> GameState {
        let mut next = *self;
        next.territories[claimed.owner.index()] = claimed;
        next.turn = self.turn.saturating_add(1);
        next.idle = if gained == 0 {
            self.idle.saturating_add(1)
        } else {
            0
        };
        next
    }
}
