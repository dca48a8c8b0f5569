pub mod board;
pub mod color;
pub mod serialization;
pub mod state;
pub mod territory;
pub mod types;

pub use board::{Board, STANDARD_COLS, STANDARD_ROWS};
pub use color::{Color, COLOR_COUNT, PALETTE};
pub use serialization::{board_from_json, board_to_json};
pub use state::{GameState, StateKey};
pub use territory::Territory;
pub use types::{Cell, PlayerId, RuleConfig};
