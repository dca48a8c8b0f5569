use anyhow::Context;
use filler_solver::core::{board_from_json, Color, STANDARD_COLS, STANDARD_ROWS};
use filler_solver::display::print_state;
use filler_solver::{Session, SolverConfig};
use log::warn;
use std::env;
use std::io::{self, BufRead, Write};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: filler-solve <board.json>");
        std::process::exit(1);
    }

    let path = &args[1];
    let text = std::fs::read_to_string(path).with_context(|| format!("File not found: {}", path))?;
    let board = board_from_json(&text)?;
    if board.rows() != STANDARD_ROWS || board.cols() != STANDARD_COLS {
        warn!(
            "board is {}x{}, the game is played on {}x{}",
            board.rows(),
            board.cols(),
            STANDARD_ROWS,
            STANDARD_COLS
        );
    }

    let config = SolverConfig::load_or_default();
    let mut session = Session::new(board, &config, true);
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        println!("---");
        print_state(session.state());
        if session.is_ended() {
            println!("Game over, score {:+}", session.score());
            break;
        }

        let solution = session.solve();
        let hint = solution.best().map(Color::name).unwrap_or("-");
        let prompt = format!(
            "{} [best={}{:+}]: ",
            session.current_player(),
            hint,
            solution.score
        );

        let color = match read_color(&mut input, &prompt)? {
            Some(color) => color,
            None => break, // EOF
        };
        if let Err(e) = session.simulate(color) {
            println!("{}", e);
        }
    }

    Ok(())
}

/// Prompts until a palette name is entered. `None` on end of input.
fn read_color(input: &mut impl BufRead, prompt: &str) -> anyhow::Result<Option<Color>> {
    loop {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match line.parse::<Color>() {
            Ok(color) => return Ok(Some(color)),
            Err(msg) => println!("{}", msg),
        }
    }
}
