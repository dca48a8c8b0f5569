use super::config::SearchConfig;
use super::eval::{heuristic_score, terminal_score};
use super::tt::{Bound, TTEntry, TranspositionTable};
use crate::core::{Color, GameState, PlayerId, StateKey};
use crate::logic::{apply_move, is_terminal, ordered_moves, Candidate};
use log::{debug, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub nodes: u64,
    pub tt_hits: u64,
    pub cutoffs: u64,
    pub tt_entries: usize,
    pub elapsed_ms: u128,
}

impl SearchStats {
    fn merge(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.tt_hits += other.tt_hits;
        self.cutoffs += other.cutoffs;
    }
}

/// Result of one search, scored from Player1's perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub line: Vec<Color>,
    pub score: i32,
    /// False when the node budget ran out; `score` is then heuristic and
    /// `line` may stop before the end of the game.
    pub complete: bool,
    pub stats: SearchStats,
}

/// What a subtree search proved.
#[derive(Debug, Clone, Copy)]
struct Eval {
    score: i32,
    best: Option<Color>,
    /// Longest searched line.
    plies: u8,
    /// Some line stopped at the turn cap or a horizon instead of a real end.
    capped: bool,
}

impl Eval {
    fn leaf(score: i32, capped: bool) -> Self {
        Eval {
            score,
            best: None,
            plies: 0,
            capped,
        }
    }

    fn from_entry(entry: &TTEntry) -> Self {
        Eval {
            score: entry.score,
            best: entry.best,
            plies: entry.plies,
            capped: entry.capped,
        }
    }

    fn entry(&self, key: StateKey, depth: u8, bound: Bound) -> TTEntry {
        TTEntry {
            key,
            depth,
            plies: self.plies,
            capped: self.capped,
            score: self.score,
            bound,
            best: self.best,
        }
    }
}

/// Minimax with alpha-beta pruning over a persistent transposition table.
///
/// Player1 maximizes the territory differential, Player2 minimizes it.
/// Children are always visited in `ordered_moves` order and a child only
/// replaces the current best when strictly better, so the chosen line is
/// the first optimal one in move order whatever the cache holds.
pub struct AlphaBetaSearcher {
    config: SearchConfig,
    tt: TranspositionTable,
    budget: Option<u64>,
    stats: SearchStats,
    aborted: bool,
}

impl AlphaBetaSearcher {
    pub fn new(config: SearchConfig) -> Self {
        let budget = config.node_budget;
        Self::with_budget(config, budget)
    }

    fn with_budget(config: SearchConfig, budget: Option<u64>) -> Self {
        Self {
            config,
            tt: TranspositionTable::new(),
            budget,
            stats: SearchStats::default(),
            aborted: false,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    pub fn clear(&mut self) {
        self.tt.clear();
    }

    // --- Search Root ---
    pub fn search(&mut self, state: &GameState) -> SearchOutcome {
        let start_time = Instant::now();
        self.stats = SearchStats::default();
        self.aborted = false;

        if is_terminal(state) {
            return SearchOutcome {
                line: Vec::new(),
                score: terminal_score(state),
                complete: true,
                stats: self.stats,
            };
        }

        let limit = window(state);
        let depth = horizon(state);

        let cached = self
            .tt
            .get(&state.key())
            .filter(|e| e.bound == Bound::Exact && e.covers(depth));
        let eval = match cached {
            Some(entry) => {
                self.stats.tt_hits += 1;
                Eval::from_entry(&entry)
            }
            None if self.config.parallel_root => {
                self.search_root_parallel(state, depth, -limit - 1, limit + 1)
            }
            None => self.alpha_beta(state, depth, -limit - 1, limit + 1),
        };
        let score = eval.score;

        let line = self.principal_variation(state, eval.best);
        self.stats.tt_entries = self.tt.len();
        self.stats.elapsed_ms = start_time.elapsed().as_millis();

        if self.aborted {
            warn!(
                "node budget {:?} exhausted after {} nodes; returning heuristic line",
                self.budget, self.stats.nodes
            );
        }
        debug!(
            "search turn {}: score {} line {:?} ({} nodes, {} tt hits, {} cutoffs, {} entries, {} ms)",
            state.turn(),
            score,
            line.iter().map(|c| c.name()).collect::<Vec<_>>(),
            self.stats.nodes,
            self.stats.tt_hits,
            self.stats.cutoffs,
            self.stats.tt_entries,
            self.stats.elapsed_ms
        );

        SearchOutcome {
            line,
            score,
            complete: !self.aborted,
            stats: self.stats,
        }
    }

    /// Root children on the rayon pool, each with a full window and a
    /// private table. Exact child values make the merge identical to the
    /// sequential search.
    fn search_root_parallel(
        &mut self,
        state: &GameState,
        depth: u8,
        alpha: i32,
        beta: i32,
    ) -> Eval {
        self.stats.nodes += 1;
        let children = self.children(state);
        let config = self.config.clone();
        let share = self
            .budget
            .map(|b| (b / children.len().max(1) as u64).max(1));

        let workers: Vec<(Eval, AlphaBetaSearcher)> = children
            .par_iter()
            .map(|child| {
                let mut worker = AlphaBetaSearcher::with_budget(config.clone(), share);
                let eval = worker.alpha_beta(&child.result, depth - 1, alpha, beta);
                (eval, worker)
            })
            .collect();

        let maximizing = state.mover() == PlayerId::Player1;
        let mut node = Eval::leaf(if maximizing { i32::MIN } else { i32::MAX }, false);
        for (child, (eval, worker)) in children.iter().zip(workers) {
            let better = if maximizing {
                eval.score > node.score
            } else {
                eval.score < node.score
            };
            if better {
                node.score = eval.score;
                node.best = Some(child.color);
            }
            node.plies = node.plies.max(eval.plies.saturating_add(1));
            node.capped |= eval.capped;
            self.stats.merge(&worker.stats);
            self.aborted |= worker.aborted;
            self.tt.absorb(worker.tt);
        }

        if !self.aborted {
            self.tt.store(node.entry(state.key(), depth, Bound::Exact));
        }
        node
    }

    // --- Alpha-Beta Search ---
    fn alpha_beta(&mut self, state: &GameState, depth: u8, mut alpha: i32, mut beta: i32) -> Eval {
        self.stats.nodes += 1;
        if let Some(budget) = self.budget {
            if self.stats.nodes > budget {
                self.aborted = true;
            }
        }

        if is_terminal(state) {
            let capped = state.turn() >= state.turn_cap();
            return Eval::leaf(terminal_score(state), capped);
        }
        if depth == 0 || self.aborted {
            let score = heuristic_score(state, self.config.mobility_weight);
            return Eval::leaf(score, true);
        }

        // TT Lookup
        let key = state.key();
        if let Some(entry) = self.tt.get(&key) {
            if entry.covers(depth) {
                let usable = match entry.bound {
                    Bound::Exact => true,
                    Bound::Lower => entry.score >= beta,
                    Bound::Upper => entry.score <= alpha,
                };
                if usable {
                    self.stats.tt_hits += 1;
                    return Eval::from_entry(&entry);
                }
            }
        }

        let alpha_orig = alpha;
        let beta_orig = beta;
        let maximizing = state.mover() == PlayerId::Player1;
        let mut node = Eval::leaf(if maximizing { i32::MIN } else { i32::MAX }, false);

        for child in self.children(state) {
            let eval = self.alpha_beta(&child.result, depth - 1, alpha, beta);
            node.plies = node.plies.max(eval.plies.saturating_add(1));
            node.capped |= eval.capped;

            if maximizing {
                if eval.score > node.score {
                    node.score = eval.score;
                    node.best = Some(child.color);
                }
                alpha = alpha.max(eval.score);
            } else {
                if eval.score < node.score {
                    node.score = eval.score;
                    node.best = Some(child.color);
                }
                beta = beta.min(eval.score);
            }

            if self.aborted {
                break;
            }
            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        // A truncated subtree proves nothing
        if !self.aborted {
            let bound = if node.score <= alpha_orig {
                Bound::Upper
            } else if node.score >= beta_orig {
                Bound::Lower
            } else {
                Bound::Exact
            };
            self.tt.store(node.entry(key, depth, bound));
        }

        node
    }

    /// Moves worth searching: growing moves only when pruning, or a single
    /// forced pass when none grows.
    fn children(&self, state: &GameState) -> Vec<Candidate> {
        let mut moves = ordered_moves(state);
        if self.config.prune_zero_growth {
            if moves.first().map_or(false, |c| c.growth > 0) {
                moves.retain(|c| c.growth > 0);
            } else {
                moves.truncate(1);
            }
        }
        moves
    }

    /// Walks best-move links from `root` until the game ends. `first` is
    /// the root's own choice.
    fn principal_variation(&mut self, root: &GameState, first: Option<Color>) -> Vec<Color> {
        let mut line = Vec::new();
        let mut state = *root;
        let mut next = first;

        while !is_terminal(&state) {
            let color = match next.take().or_else(|| self.best_move_at(&state)) {
                Some(color) => color,
                None => break,
            };
            match apply_move(&state, color) {
                Ok(after) => {
                    line.push(color);
                    state = after;
                }
                Err(_) => break,
            }
        }
        line
    }

    /// Best move of a line node: the cached exact entry when it covers the
    /// node's horizon, otherwise a fresh full-window search of that node.
    fn best_move_at(&mut self, state: &GameState) -> Option<Color> {
        let depth = horizon(state);
        let cached = self
            .tt
            .get(&state.key())
            .filter(|e| e.bound == Bound::Exact && e.covers(depth));
        if let Some(entry) = cached {
            return entry.best;
        }
        if self.aborted {
            return None;
        }
        let limit = window(state);
        self.alpha_beta(state, depth, -limit - 1, limit + 1).best
    }
}

/// Plies left before the turn cap.
fn horizon(state: &GameState) -> u8 {
    state
        .turn_cap()
        .saturating_sub(state.turn())
        .min(u8::MAX as u16) as u8
}

/// Every score lies in [-cells, cells]; a window just outside it keeps the
/// searched node exact.
fn window(state: &GameState) -> i32 {
    state.board().cell_count() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, RuleConfig};
    use crate::logic::{is_terminal, legal_moves};

    fn board(grid: &[&[u8]]) -> Board {
        let rows: Vec<Vec<u8>> = grid.iter().map(|r| r.to_vec()).collect();
        Board::new(&rows).unwrap()
    }

    fn small_board() -> Board {
        board(&[
            &[0, 1, 2, 3],
            &[2, 3, 4, 0],
            &[4, 0, 1, 2],
        ])
    }

    /// Plain minimax, no pruning and no cache.
    fn brute_force(state: &GameState, prune: bool) -> i32 {
        if is_terminal(state) {
            return state.score();
        }
        let mut moves = ordered_moves(state);
        if prune {
            if moves[0].growth > 0 {
                moves.retain(|c| c.growth > 0);
            } else {
                moves.truncate(1);
            }
        }
        let scores = moves.iter().map(|c| brute_force(&c.result, prune));
        if state.mover() == PlayerId::Player1 {
            scores.max().unwrap()
        } else {
            scores.min().unwrap()
        }
    }

    fn play_out(state: &GameState, line: &[Color]) -> GameState {
        line.iter()
            .fold(*state, |s, &c| apply_move(&s, c).unwrap())
    }

    #[test]
    fn test_matches_brute_force() {
        for rules in [RuleConfig::default(), RuleConfig::classic()] {
            let state = GameState::new(small_board(), rules);
            let mut searcher = AlphaBetaSearcher::new(SearchConfig::default());
            let outcome = searcher.search(&state);
            assert!(outcome.complete);
            assert_eq!(outcome.score, brute_force(&state, true));

            let end = play_out(&state, &outcome.line);
            assert!(is_terminal(&end));
            assert_eq!(end.score(), outcome.score);
        }
    }

    #[test]
    fn test_without_pruning_matches_brute_force() {
        let rules = RuleConfig {
            turn_cap: Some(6),
            ..RuleConfig::default()
        };
        let state = GameState::new(board(&[&[0, 1, 2], &[3, 4, 5], &[1, 0, 3]]), rules);
        let config = SearchConfig {
            prune_zero_growth: false,
            ..SearchConfig::default()
        };
        let outcome = AlphaBetaSearcher::new(config).search(&state);
        assert_eq!(outcome.score, brute_force(&state, false));
        assert_eq!(play_out(&state, &outcome.line).score(), outcome.score);
    }

    #[test]
    fn test_parallel_root_is_identical() {
        let state = GameState::new(small_board(), RuleConfig::default());
        let sequential = AlphaBetaSearcher::new(SearchConfig::default()).search(&state);
        let parallel = AlphaBetaSearcher::new(SearchConfig {
            parallel_root: true,
            ..SearchConfig::default()
        })
        .search(&state);
        assert_eq!(sequential.line, parallel.line);
        assert_eq!(sequential.score, parallel.score);
    }

    #[test]
    fn test_cache_reuse_keeps_line() {
        let state = GameState::new(small_board(), RuleConfig::default());
        let mut searcher = AlphaBetaSearcher::new(SearchConfig::default());
        let first = searcher.search(&state);
        let entries = searcher.tt().len();
        assert!(entries > 0);

        let second = searcher.search(&state);
        assert_eq!(first.line, second.line);
        assert_eq!(first.score, second.score);
        assert!(second.stats.nodes < first.stats.nodes.max(2));

        // Following the line, the cached continuation is the same line
        let after = apply_move(&state, first.line[0]).unwrap();
        let rest = searcher.search(&after);
        assert_eq!(rest.line, first.line[1..].to_vec());
        assert_eq!(rest.score, first.score);
    }

    #[test]
    fn test_budget_returns_partial_legal_line() {
        let state = GameState::new(small_board(), RuleConfig::default());
        let mut searcher = AlphaBetaSearcher::new(SearchConfig {
            node_budget: Some(5),
            ..SearchConfig::default()
        });
        let outcome = searcher.search(&state);
        assert!(!outcome.complete);
        assert!(!outcome.line.is_empty());
        assert!(legal_moves(&state, state.mover()).contains(&outcome.line[0]));
        assert!(outcome.stats.nodes <= 6);
    }

    #[test]
    fn test_terminal_root_has_empty_line() {
        let state = GameState::new(board(&[&[3]]), RuleConfig::default());
        let outcome = AlphaBetaSearcher::new(SearchConfig::default()).search(&state);
        assert_eq!(outcome.line, Vec::<Color>::new());
        assert_eq!(outcome.score, 0);
        assert!(outcome.complete);
    }
}
