use super::board::Board;
use super::color::Color;
use super::types::{Cell, PlayerId};

/// A player's owned region.
///
/// Every owned cell counts as `color` for adjacency, whatever the board
/// stores underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Territory {
    pub owner: PlayerId,
    pub cells: u64,
    pub color: Color,
}

impl Territory {
    pub fn new(owner: PlayerId, cells: u64, color: Color) -> Self {
        Territory {
            owner,
            cells,
            color,
        }
    }

    pub fn size(&self) -> usize {
        self.cells.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.cells == 0
    }

    pub fn contains(&self, board: &Board, cell: Cell) -> bool {
        board.contains(cell) && self.cells & board.bit(cell) != 0
    }

    /// Neutral cells touching this territory.
    pub fn frontier(&self, board: &Board, opponent: &Territory) -> u64 {
        board.expand(self.cells) & !self.cells & !opponent.cells
    }
}
