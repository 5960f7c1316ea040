//! Interactive terminal game against the engine.
//!
//! The human plays white by default. `pass` hands the current side to the
//! engine and swaps sides.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::Position;
use crate::move_generation::legal_move_checks::{is_move_legal, position_state, PositionState};
use crate::search::board_scoring::{HeuristicScorer, Score};
use crate::search::iterative_deepening::search;
use crate::search::search_control::NoHooks;
use crate::search::time_management::SearchLimits;
use crate::utils::long_algebraic::long_algebraic_to_move;

const BANNER: &str = "
This is Slate!

Enter moves in simplified long algebraic notation. e.g.:
    d2d4   for a queen's pawn opening
    e8g8   for black short castling
    g7g8n  to promote to a knight
    pass   to let Slate move and switch sides
    quit   to leave
";

enum Prompt {
    Moved,
    Pass,
    Quit,
}

/// Plays a game from the starting position.
pub fn run_cli<R: BufRead, W: Write>(input: R, output: W, think_time_ms: u64) -> ChessResult<()> {
    play_cli(Position::new_game(), input, output, think_time_ms)
}

/// Plays a game from `start` until it ends, the user quits, or input closes.
pub fn play_cli<R: BufRead, W: Write>(
    start: Position,
    mut input: R,
    mut output: W,
    think_time_ms: u64,
) -> ChessResult<()> {
    writeln!(output, "{BANNER}")?;

    let mut position = start;
    let mut engine_turn = false;

    loop {
        writeln!(output, "{position}\n")?;

        if report_game_over(&position, engine_turn, &mut output)? {
            break;
        }

        if !engine_turn {
            match prompt_user_move(&mut position, &mut input, &mut output)? {
                Prompt::Moved => {
                    engine_turn = true;
                    continue;
                }
                Prompt::Pass => {}
                Prompt::Quit => break,
            }
        }

        engine_turn = false;
        if !engine_move(&mut position, &mut output, think_time_ms)? {
            break;
        }
    }

    output.flush()?;
    Ok(())
}

fn prompt_user_move<R: BufRead, W: Write>(
    position: &mut Position,
    input: &mut R,
    output: &mut W,
) -> ChessResult<Prompt> {
    let mv = loop {
        write!(output, "Enter move: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output, "\nInput closed. Exiting.")?;
            return Ok(Prompt::Quit);
        }

        match line.trim() {
            "pass" => return Ok(Prompt::Pass),
            "quit" => return Ok(Prompt::Quit),
            text => {
                let Ok(mv) = long_algebraic_to_move(text, position.side_to_move) else {
                    writeln!(output, "Invalid move!")?;
                    continue;
                };
                if !is_move_legal(position, &mv) {
                    writeln!(output, "Illegal move!")?;
                    continue;
                }
                break mv;
            }
        }
    };

    debug!(%mv, "user move");
    writeln!(output)?;
    position.apply_move(&mv);
    Ok(Prompt::Moved)
}

/// Returns `false` when the engine found nothing to play.
fn engine_move<W: Write>(position: &mut Position, output: &mut W, think_time_ms: u64) -> ChessResult<bool> {
    writeln!(output, "Thinking...")?;
    output.flush()?;

    let outcome = search(
        position,
        &HeuristicScorer,
        SearchLimits::movetime(think_time_ms),
        &mut NoHooks,
    );
    let Some(mv) = outcome.best_move() else {
        return Ok(false);
    };

    info!(%mv, score = outcome.score, depth = outcome.depth, "engine move");
    writeln!(
        output,
        "My move: {mv}  {}  depth {}\n",
        format_pawns(outcome.score),
        outcome.depth
    )?;
    position.apply_move(&mv);
    Ok(true)
}

/// Centipawns as signed pawns, e.g. `+1.25` or `-0.07`.
fn format_pawns(score: Score) -> String {
    let sign = if score > 0 { '+' } else { '-' };
    let magnitude = score.unsigned_abs();
    format!("{sign}{}.{:02}", magnitude / 100, magnitude % 100)
}

fn report_game_over<W: Write>(position: &Position, engine_turn: bool, output: &mut W) -> ChessResult<bool> {
    match position_state(position) {
        PositionState::Normal => Ok(false),
        PositionState::Check => {
            let who = if engine_turn { "Slate is" } else { "You are" };
            writeln!(output, "{who} in check.")?;
            Ok(false)
        }
        PositionState::Checkmate => {
            let winner = if position.side_to_move.is_white() { "Black" } else { "White" };
            writeln!(output, "Checkmate. {winner} wins.")?;
            Ok(true)
        }
        PositionState::Stalemate => {
            writeln!(output, "Stalemate. The game is a draw.")?;
            Ok(true)
        }
    }
}
