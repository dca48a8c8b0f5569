use super::color::{Color, COLOR_COUNT};
use super::types::Cell;
use crate::error::{FillerError, Result};
use serde::{Deserialize, Serialize};

/// 標準盤面サイズ
pub const STANDARD_ROWS: usize = 7;
pub const STANDARD_COLS: usize = 8;
/// One bit per cell.
pub const MAX_CELLS: usize = 64;

/// 盤面
///
/// Stored as one bitboard per palette color; bit `row * cols + col` is the
/// cell at `(row, col)`. The stored colors never change during a game, owned
/// cells are tracked by the territories instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<Vec<Color>>",
    into = "Vec<Vec<Color>>"
)]
pub struct Board {
    rows: usize,
    cols: usize,
    layers: [u64; COLOR_COUNT],
    full: u64,
    first_col: u64,
    last_col: u64,
}

impl Board {
    /// Builds a board from a grid of color ids.
    pub fn new(grid: &[Vec<u8>]) -> Result<Self> {
        let rows = grid.len();
        let cols = grid.first().map(Vec::len).unwrap_or(0);
        let mut colors = Vec::with_capacity(rows);
        for (row, line) in grid.iter().enumerate() {
            let mut out = Vec::with_capacity(line.len());
            for (col, &id) in line.iter().enumerate() {
                let color = Color::new(id).ok_or_else(|| {
                    FillerError::InvalidBoard(format!(
                        "color id {} at ({}, {}) is outside 0..{}",
                        id, row, col, COLOR_COUNT
                    ))
                })?;
                out.push(color);
            }
            colors.push(out);
        }
        if colors.iter().any(|line| line.len() != cols) {
            return Err(FillerError::InvalidBoard(format!(
                "rows must all have {} columns",
                cols
            )));
        }
        Self::from_colors(&colors)
    }

    /// Same as `new`, restricted to the 7x8 game contract.
    pub fn standard(grid: &[Vec<u8>]) -> Result<Self> {
        let cols = grid.first().map(Vec::len).unwrap_or(0);
        if grid.len() != STANDARD_ROWS || cols != STANDARD_COLS {
            return Err(FillerError::InvalidBoard(format!(
                "expected {}x{} grid, got {}x{}",
                STANDARD_ROWS,
                STANDARD_COLS,
                grid.len(),
                cols
            )));
        }
        Self::new(grid)
    }

    pub fn from_colors(grid: &[Vec<Color>]) -> Result<Self> {
        let rows = grid.len();
        let cols = grid.first().map(Vec::len).unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(FillerError::InvalidBoard("empty grid".to_string()));
        }
        if grid.iter().any(|line| line.len() != cols) {
            return Err(FillerError::InvalidBoard(format!(
                "rows must all have {} columns",
                cols
            )));
        }
        if rows * cols > MAX_CELLS {
            return Err(FillerError::InvalidBoard(format!(
                "{}x{} exceeds {} cells",
                rows, cols, MAX_CELLS
            )));
        }

        let cells = rows * cols;
        let full = if cells == MAX_CELLS {
            u64::MAX
        } else {
            (1u64 << cells) - 1
        };
        let mut board = Board {
            rows,
            cols,
            layers: [0; COLOR_COUNT],
            full,
            first_col: 0,
            last_col: 0,
        };
        for (row, line) in grid.iter().enumerate() {
            for (col, color) in line.iter().enumerate() {
                let bit = board.bit(Cell::new(row, col));
                board.layers[color.index()] |= bit;
                if col == 0 {
                    board.first_col |= bit;
                }
                if col == cols - 1 {
                    board.last_col |= bit;
                }
            }
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn full_mask(&self) -> u64 {
        self.full
    }

    /// Cells currently holding `color`.
    pub fn layer(&self, color: Color) -> u64 {
        self.layers[color.index()]
    }

    pub fn bit(&self, cell: Cell) -> u64 {
        1u64 << (cell.row * self.cols + cell.col)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    pub fn color_at(&self, cell: Cell) -> Color {
        let bit = self.bit(cell);
        Color::all()
            .find(|c| self.layers[c.index()] & bit != 0)
            .unwrap_or(Color::RED)
    }

    /// `mask` grown by one step in the four grid directions.
    pub fn expand(&self, mask: u64) -> u64 {
        let up = mask >> self.cols;
        let down = mask.checked_shl(self.cols as u32).unwrap_or(0);
        let left = (mask & !self.first_col) >> 1;
        let right = (mask & !self.last_col) << 1;
        (mask | up | down | left | right) & self.full
    }

    /// Cells of `mask` in row-major order.
    pub fn cells(&self, mask: u64) -> impl Iterator<Item = Cell> + '_ {
        let mut rest = mask & self.full;
        std::iter::from_fn(move || {
            if rest == 0 {
                return None;
            }
            let index = rest.trailing_zeros() as usize;
            rest &= rest - 1;
            Some(Cell::new(index / self.cols, index % self.cols))
        })
    }

    pub fn to_grid(&self) -> Vec<Vec<Color>> {
        (0..self.rows)
            .map(|row| {
                (0..self.cols)
                    .map(|col| self.color_at(Cell::new(row, col)))
                    .collect()
            })
            .collect()
    }
}

impl TryFrom<Vec<Vec<Color>>> for Board {
    type Error = FillerError;

    fn try_from(grid: Vec<Vec<Color>>) -> Result<Self> {
        Board::from_colors(&grid)
    }
}

impl From<Board> for Vec<Vec<Color>> {
    fn from(board: Board) -> Self {
        board.to_grid()
    }
}
