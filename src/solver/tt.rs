use crate::core::{Color, StateKey};
use crate::logic::zobrist::ZobristHasher;
use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Bound {
    Exact,
    Lower, // Beta cut: the true value is at least `score`
    Upper, // Alpha cut: the true value is at most `score`
}

#[derive(Clone, Copy, Debug)]
pub struct TTEntry {
    pub key: StateKey,
    /// Plies left before the turn cap when this node was searched.
    pub depth: u8,
    /// Longest line actually searched below this node.
    pub plies: u8,
    /// Some searched line was cut by the turn cap or a depth horizon.
    pub capped: bool,
    pub score: i32,
    pub bound: Bound,
    pub best: Option<Color>,
}

impl TTEntry {
    /// Whether this result holds for a node with `depth` plies left.
    ///
    /// An uncapped result only depends on the position, as long as every
    /// searched line still fits. A capped one is tied to its exact horizon.
    pub fn covers(&self, depth: u8) -> bool {
        if self.capped {
            self.depth == depth
        } else {
            depth >= self.plies
        }
    }
}

/// Search cache keyed by Zobrist hash, verified against the full key.
///
/// Unbounded: a Filler board has at most 64 cells and the whole session
/// shares one table. Territories only grow, so entries never go stale.
#[derive(Default)]
pub struct TranspositionTable {
    entries: HashMap<u64, TTEntry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, key: &StateKey) -> Option<TTEntry> {
        let hash = ZobristHasher::compute_hash(key);
        self.entries
            .get(&hash)
            .filter(|entry| entry.key == *key)
            .copied()
    }

    /// Stores a result. An exact entry is only ever replaced by another
    /// exact one, so principal variations stay walkable.
    pub fn store(&mut self, entry: TTEntry) {
        let hash = ZobristHasher::compute_hash(&entry.key);
        if let Some(existing) = self.entries.get(&hash) {
            if existing.key == entry.key && !Self::replaces(existing, &entry) {
                return;
            }
        }
        self.entries.insert(hash, entry);
    }

    fn replaces(old: &TTEntry, new: &TTEntry) -> bool {
        match (old.bound, new.bound) {
            (Bound::Exact, Bound::Exact) => old.capped || !new.capped,
            (Bound::Exact, _) => false,
            _ => true,
        }
    }

    /// Copies another table in, with the same replacement rules.
    pub fn absorb(&mut self, other: TranspositionTable) {
        for (_, entry) in other.entries {
            self.store(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    fn key(bits: u64) -> StateKey {
        StateKey {
            owned: [bits, 1 << 40],
            colors: [Color::RED, Color::BLUE],
            mover: PlayerId::Player1,
            idle: 0,
        }
    }

    fn entry(bits: u64, depth: u8, score: i32, bound: Bound) -> TTEntry {
        TTEntry {
            key: key(bits),
            depth,
            plies: depth,
            capped: false,
            score,
            bound,
            best: Some(Color::GREEN),
        }
    }

    #[test]
    fn test_exact_entries_survive_bounds() {
        let mut tt = TranspositionTable::new();
        tt.store(entry(1, 4, 3, Bound::Exact));
        tt.store(entry(1, 9, 7, Bound::Lower));
        let hit = tt.get(&key(1)).unwrap();
        assert_eq!(hit.bound, Bound::Exact);
        assert_eq!(hit.score, 3);

        tt.store(entry(1, 6, 5, Bound::Exact));
        assert_eq!(tt.get(&key(1)).unwrap().score, 5);
        assert_eq!(tt.len(), 1);
    }

    #[test]
    fn test_bounds_upgrade_to_exact() {
        let mut tt = TranspositionTable::new();
        tt.store(entry(2, 9, -1, Bound::Upper));
        tt.store(entry(2, 1, 0, Bound::Exact));
        assert_eq!(tt.get(&key(2)).unwrap().bound, Bound::Exact);
        assert!(tt.get(&key(3)).is_none());

        tt.clear();
        assert!(tt.is_empty());
    }

    #[test]
    fn test_capped_entries_only_cover_their_horizon() {
        let mut e = entry(4, 6, 2, Bound::Exact);
        e.plies = 5;
        assert!(e.covers(5));
        assert!(e.covers(20));
        assert!(!e.covers(4));

        e.capped = true;
        assert!(e.covers(6));
        assert!(!e.covers(5));
        assert!(!e.covers(7));
    }
}
