use crate::core::{Cell, Color, GameState, PlayerId};
use crossterm::style::{self, Stylize};
use std::fmt::Write;

/// Color a cell is treated as: its territory's active color when owned.
fn shown_color(state: &GameState, cell: Cell) -> (Color, Option<PlayerId>) {
    match state.owner_at(cell) {
        Some(owner) => (state.territory(owner).color, Some(owner)),
        None => (state.board().color_at(cell), None),
    }
}

fn status_line(state: &GameState) -> String {
    let t1 = state.territory(PlayerId::Player1);
    let t2 = state.territory(PlayerId::Player2);
    format!(
        "P1 {} cells ({}) | P2 {} cells ({}) | neutral {} | score {:+}",
        t1.size(),
        t1.color,
        t2.size(),
        t2.color,
        state.neutral_count(),
        state.score()
    )
}

/// Plain-text board: `[c]` owned by Player 1, `<c>` by Player 2, ` c `
/// neutral, where `c` is the color id the cell counts as.
pub fn render_plain(state: &GameState) -> String {
    let board = state.board();
    let mut out = String::new();
    let _ = writeln!(out, "Turn {}: {}", state.turn() + 1, state.mover());
    for row in 0..board.rows() {
        for col in 0..board.cols() {
            let (color, owner) = shown_color(state, Cell::new(row, col));
            let (open, close) = match owner {
                Some(PlayerId::Player1) => ('[', ']'),
                Some(PlayerId::Player2) => ('<', '>'),
                None => (' ', ' '),
            };
            let _ = write!(out, "{}{}{}", open, color.id(), close);
        }
        out.push('\n');
    }
    out.push_str(&status_line(state));
    out
}

/// 盤面描画 (terminal, palette colors as cell backgrounds)
pub fn print_state(state: &GameState) {
    let board = state.board();
    println!("Turn {}: {}", state.turn() + 1, state.mover());

    print!("   ");
    for col in 0..board.cols() {
        print!(" {} ", col);
    }
    println!();

    for row in 0..board.rows() {
        print!("{:2} ", row);
        for col in 0..board.cols() {
            let (color, owner) = shown_color(state, Cell::new(row, col));
            let (r, g, b) = color.rgb();
            let text = match owner {
                Some(PlayerId::Player1) => " 1 ",
                Some(PlayerId::Player2) => " 2 ",
                None => "   ",
            };
            print!(
                "{}",
                text.with(style::Color::White)
                    .on(style::Color::Rgb { r, g, b })
                    .bold()
            );
        }
        println!();
    }
    println!("{}", status_line(state).yellow());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, RuleConfig};
    use crate::logic::apply_move;

    #[test]
    fn test_plain_render_marks_owners() {
        let board = Board::new(&[vec![0, 1, 2], vec![3, 1, 5]]).unwrap();
        let state = GameState::new(board, RuleConfig::default());
        let state = apply_move(&state, Color::GREEN).unwrap();
        let text = render_plain(&state);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Turn 2: Player 2");
        assert_eq!(lines[1], "[1][1] 2 ");
        assert_eq!(lines[2], " 3 [1]<5>");
        assert_eq!(
            lines[3],
            "P1 3 cells (GREEN) | P2 1 cells (GRAY) | neutral 2 | score +2"
        );
    }
}
