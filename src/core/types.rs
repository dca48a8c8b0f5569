use serde::{Deserialize, Serialize};
use std::fmt;

/// プレイヤーID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    Player1, // (0, 0) から開始
    Player2, // (R-1, C-1) から開始
}

impl Default for PlayerId {
    fn default() -> Self {
        PlayerId::Player1
    }
}

impl PlayerId {
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::Player1 => PlayerId::Player2,
            PlayerId::Player2 => PlayerId::Player1,
        }
    }

    /// Slot in per-player arrays.
    pub fn index(self) -> usize {
        match self {
            PlayerId::Player1 => 0,
            PlayerId::Player2 => 1,
        }
    }

    /// +1 for Player1, -1 for Player2. Scores are always Player1-positive.
    pub fn sign(self) -> i32 {
        match self {
            PlayerId::Player1 => 1,
            PlayerId::Player2 => -1,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlayerId::Player1 => write!(f, "Player 1"),
            PlayerId::Player2 => write!(f, "Player 2"),
        }
    }
}

/// 盤面座標 (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// ルール設定
///
/// Switches for the points where Filler variants disagree. Stored in every
/// `GameState`, so a state always knows which game it is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Who moves on turn 0.
    pub first_player: PlayerId,
    /// Also forbid the opponent's active color (classic Filler rule).
    pub forbid_opponent_color: bool,
    /// Consecutive plies without growth that end the game.
    pub stall_limit: u8,
    /// Ply limit. `None` means rows * cols.
    pub turn_cap: Option<u16>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        RuleConfig {
            first_player: PlayerId::Player1,
            forbid_opponent_color: false,
            stall_limit: 2,
            turn_cap: None,
        }
    }
}

impl RuleConfig {
    pub fn classic() -> Self {
        RuleConfig {
            forbid_opponent_color: true,
            ..Self::default()
        }
    }
}
