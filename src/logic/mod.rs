pub mod zobrist;

use crate::core::{Board, Color, GameState, PlayerId, Territory};
use crate::error::{FillerError, IllegalReason, Result};
use std::cmp::Reverse;

/// 合法手とその試行結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub color: Color,
    /// Cells the move adds to the mover's territory.
    pub growth: usize,
    pub result: GameState,
}

/// Flood-fills `territory` into every reachable cell of `color`.
///
/// Traversal starts from all owned cells and passes through owned cells or
/// cells storing `color`; opponent cells always block. The claimed territory
/// takes `color` as its active color even when nothing is gained.
pub fn claim(
    territory: &Territory,
    board: &Board,
    opponent: &Territory,
    color: Color,
) -> Result<(Territory, usize)> {
    if color == territory.color {
        return Err(FillerError::IllegalAction {
            player: territory.owner,
            color: color.id(),
            reason: IllegalReason::OwnColor,
        });
    }

    let passable = territory.cells | (board.layer(color) & !opponent.cells);
    let mut region = territory.cells;
    loop {
        let next = board.expand(region) & passable;
        if next == region {
            break;
        }
        region = next;
    }

    let gained = (region & !territory.cells).count_ones() as usize;
    Ok((Territory::new(territory.owner, region, color), gained))
}

/// Checks whether `player` may pick `color` in `state`.
pub fn check_action(state: &GameState, player: PlayerId, color: Color) -> Result<()> {
    let reason = if color == state.territory(player).color {
        Some(IllegalReason::OwnColor)
    } else if state.rules().forbid_opponent_color
        && color == state.territory(player.opponent()).color
    {
        Some(IllegalReason::OpponentColor)
    } else {
        None
    };

    match reason {
        Some(reason) => Err(FillerError::IllegalAction {
            player,
            color: color.id(),
            reason,
        }),
        None => Ok(()),
    }
}

/// 合法手生成: every palette color `player` may pick, ascending by id.
pub fn legal_moves(state: &GameState, player: PlayerId) -> Vec<Color> {
    legal_iter(state, player).collect()
}

fn legal_iter(state: &GameState, player: PlayerId) -> impl Iterator<Item = Color> + '_ {
    Color::all().filter(move |&c| check_action(state, player, c).is_ok())
}

/// Plays `color` for the mover. The input state is never modified.
pub fn apply_move(state: &GameState, color: Color) -> Result<GameState> {
    if is_terminal(state) {
        return Err(FillerError::NoLegalMove);
    }
    let player = state.mover();
    check_action(state, player, color)?;

    let (claimed, gained) = claim(
        state.territory(player),
        state.board(),
        state.territory(player.opponent()),
        color,
    )?;
    Ok(state.advance(claimed, gained))
}

/// Replays raw color ids from `initial`.
pub fn replay(initial: GameState, actions: &[u8]) -> Result<GameState> {
    actions.iter().try_fold(initial, |state, &id| {
        let color = Color::for_action(id, state.mover())?;
        apply_move(&state, color)
    })
}

/// Legal moves of the mover, largest growth first, ties by ascending color id.
///
/// Each candidate carries the state it leads to, so the search never
/// recomputes the flood fill.
pub fn ordered_moves(state: &GameState) -> Vec<Candidate> {
    let player = state.mover();
    let own = state.territory(player);
    let opponent = state.territory(player.opponent());

    let mut moves: Vec<Candidate> = legal_moves(state, player)
        .into_iter()
        .filter_map(|color| {
            let (claimed, growth) = claim(own, state.board(), opponent, color).ok()?;
            Some(Candidate {
                color,
                growth,
                result: state.advance(claimed, growth),
            })
        })
        .collect();
    // stable: equal growth keeps ascending color order
    moves.sort_by_key(|c| Reverse(c.growth));
    moves
}

/// Number of legal colors that would gain `player` at least one cell.
pub fn mobility(state: &GameState, player: PlayerId) -> usize {
    let own = state.territory(player);
    let frontier = own.frontier(state.board(), state.territory(player.opponent()));
    if frontier == 0 {
        return 0;
    }
    legal_iter(state, player)
        .filter(|&c| frontier & state.board().layer(c) != 0)
        .count()
}

pub fn can_grow(state: &GameState, player: PlayerId) -> bool {
    mobility(state, player) > 0
}

/// 終局判定
///
/// Over when no neutral cell is left, when neither side can gain a cell,
/// after `stall_limit` consecutive plies without growth, or at the ply cap.
pub fn is_terminal(state: &GameState) -> bool {
    state.neutral_count() == 0
        || state.idle_turns() >= state.rules().stall_limit
        || state.turn() >= state.turn_cap()
        || (!can_grow(state, PlayerId::Player1) && !can_grow(state, PlayerId::Player2))
}
