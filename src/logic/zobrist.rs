use crate::core::{StateKey, COLOR_COUNT};
use crate::core::board::MAX_CELLS;
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// 定数
const PLAYERS: usize = 2;
const IDLE_SLOTS: usize = 8;
const SEED: u64 = 0x0F11_1E45_0F11_1E45;

// Zobrist Hash用の乱数テーブル
struct ZobristTable {
    cells: [[u64; MAX_CELLS]; PLAYERS],
    colors: [[u64; COLOR_COUNT]; PLAYERS],
    idle: [u64; IDLE_SLOTS],
    side_to_move: u64,
}

// Fixed seed: hashes are identical from run to run.
static ZOBRIST_TABLE: Lazy<ZobristTable> = Lazy::new(|| {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut table = ZobristTable {
        cells: [[0; MAX_CELLS]; PLAYERS],
        colors: [[0; COLOR_COUNT]; PLAYERS],
        idle: [0; IDLE_SLOTS],
        side_to_move: rng.gen(),
    };

    for p in 0..PLAYERS {
        for i in 0..MAX_CELLS {
            table.cells[p][i] = rng.gen();
        }
        for c in 0..COLOR_COUNT {
            table.colors[p][c] = rng.gen();
        }
    }
    for slot in table.idle.iter_mut() {
        *slot = rng.gen();
    }

    table
});

pub struct ZobristHasher;

impl ZobristHasher {
    pub fn compute_hash(key: &StateKey) -> u64 {
        let table = &*ZOBRIST_TABLE;
        let mut hash = 0;

        for p in 0..PLAYERS {
            let mut rest = key.owned[p];
            while rest != 0 {
                let i = rest.trailing_zeros() as usize;
                hash ^= table.cells[p][i];
                rest &= rest - 1;
            }
            hash ^= table.colors[p][key.colors[p].index()];
        }

        // 手番
        if key.mover.index() == 1 {
            hash ^= table.side_to_move;
        }
        hash ^= table.idle[(key.idle as usize).min(IDLE_SLOTS - 1)];

        hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, Color, GameState, RuleConfig};
    use crate::logic::apply_move;

    fn board() -> Board {
        Board::new(&[
            vec![0, 1, 2, 3],
            vec![1, 2, 3, 4],
            vec![2, 3, 4, 5],
        ])
        .unwrap()
    }

    #[test]
    fn test_same_partition_same_hash() {
        let start = GameState::new(board(), RuleConfig::default());
        let a = apply_move(&start, Color::GREEN).unwrap();
        let b = apply_move(&start, Color::GREEN).unwrap();
        assert_eq!(
            ZobristHasher::compute_hash(&a.key()),
            ZobristHasher::compute_hash(&b.key())
        );
    }

    #[test]
    fn test_mover_and_color_change_hash() {
        let start = GameState::new(board(), RuleConfig::default());
        let key = start.key();
        let base = ZobristHasher::compute_hash(&key);

        let mut other_mover = key;
        other_mover.mover = key.mover.opponent();
        assert_ne!(base, ZobristHasher::compute_hash(&other_mover));

        let mut other_color = key;
        other_color.colors[0] = Color::GRAY;
        assert_ne!(base, ZobristHasher::compute_hash(&other_color));
    }
}
