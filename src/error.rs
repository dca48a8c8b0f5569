use crate::core::PlayerId;
use std::fmt;
use thiserror::Error;

/// Why a color could not be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalReason {
    /// The mover's own active color: never changes anything.
    OwnColor,
    /// Forbidden by the opponent-color rule.
    OpponentColor,
    /// Not a palette id.
    OutOfRange,
}

impl fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IllegalReason::OwnColor => write!(f, "already the active color"),
            IllegalReason::OpponentColor => write!(f, "held by the opponent"),
            IllegalReason::OutOfRange => write!(f, "not a palette color"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FillerError {
    /// Bad dimensions or out-of-range color values
    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("illegal action for {player}: color {color} is {reason}")]
    IllegalAction {
        player: PlayerId,
        color: u8,
        reason: IllegalReason,
    },

    /// Informational: the game has already ended.
    #[error("no legal move: the game is over")]
    NoLegalMove,
}

pub type Result<T> = std::result::Result<T, FillerError>;
