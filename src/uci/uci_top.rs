//! UCI protocol front-end and command loop.
//!
//! A reader thread forwards stdin lines over a channel. The session handles
//! them one at a time; while a search runs, the search hooks drain the same
//! channel so `stop`, `quit` and `isready` are answered without a second
//! search thread.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Instant;

use tracing::{debug, info, trace, warn};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Position;
use crate::move_generation::legal_move_checks::is_move_legal;
use crate::moves::chess_move::Move;
use crate::moves::move_list::format_line;
use crate::search::board_scoring::{mate_in_moves, HeuristicScorer};
use crate::search::iterative_deepening::{search, SearchOutcome};
use crate::search::search_control::SearchHooks;
use crate::search::time_management::{resolve_search_limits, GoParams};
use crate::utils::fen_parser::parse_fen;
use crate::utils::long_algebraic::long_algebraic_to_move;

const UCI_ENGINE_NAME: &str = "Slate Chess";
const UCI_ENGINE_AUTHOR: &str = "the slate_chess developers";

pub fn run_stdio_loop() -> io::Result<()> {
    let (sender, receiver) = mpsc::channel::<String>();

    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if sender.send(line).is_err() {
                break;
            }
        }
    });

    let mut session = UciSession::new(io::stdout());
    while let Ok(line) = receiver.recv() {
        if session.handle_command(&line, &receiver)? {
            return Ok(());
        }
    }

    debug!("uci input closed");
    Ok(())
}

/// Protocol state between commands.
pub struct UciSession<W: Write> {
    out: W,
    position: Position,
    scorer: HeuristicScorer,
}

impl<W: Write> UciSession<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            position: Position::new_game(),
            scorer: HeuristicScorer,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Handles one command line. `input` is polled for further commands
    /// while a `go` is searching. Returns `true` when the session should end.
    pub fn handle_command(&mut self, line: &str, input: &Receiver<String>) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        debug!(command = trimmed, "uci command");
        let cmd = trimmed.split_whitespace().next().unwrap_or_default();

        let quit = match cmd {
            "uci" => {
                self.send(&format!("id name {UCI_ENGINE_NAME}"))?;
                self.send(&format!("id author {UCI_ENGINE_AUTHOR}"))?;
                self.send("uciok")?;
                false
            }
            "isready" => {
                self.send("readyok")?;
                false
            }
            "ucinewgame" => {
                self.position = Position::new_game();
                false
            }
            "position" => {
                if let Err(err) = self.handle_position(trimmed) {
                    warn!(%err, "rejected position command");
                    self.send(&format!("info string position error: {err}"))?;
                }
                false
            }
            "go" => self.handle_go(trimmed, input)?,
            "quit" => true,
            _ => {
                // stop outside a search and unknown commands are ignored
                false
            }
        };

        self.out.flush()?;
        Ok(quit)
    }

    fn send(&mut self, line: &str) -> io::Result<()> {
        trace!(line, "uci out");
        writeln!(self.out, "{line}")
    }

    fn handle_position(&mut self, line: &str) -> ChessResult<()> {
        let mut tokens = line.split_whitespace().peekable();
        let _ = tokens.next(); // "position"

        let mut position = match tokens.next() {
            Some("startpos") => Position::new_game(),
            Some("fen") => {
                let mut fen_parts = Vec::<&str>::new();
                while let Some(&next) = tokens.peek() {
                    if next == "moves" {
                        break;
                    }
                    fen_parts.push(next);
                    tokens.next();
                }
                parse_fen(&fen_parts.join(" "))?
            }
            Some(other) => return Err(ChessError::fen(format!("unsupported position token '{other}'"))),
            None => return Err(ChessError::fen("incomplete position command")),
        };

        if tokens.next() == Some("moves") {
            for lan in tokens {
                let mv = long_algebraic_to_move(lan, position.side_to_move)?;
                if !is_move_legal(&position, &mv) {
                    return Err(ChessError::IllegalMove(lan.to_owned()));
                }
                position.apply_move(&mv);
            }
        }

        self.position = position;
        Ok(())
    }

    fn handle_go(&mut self, line: &str, input: &Receiver<String>) -> io::Result<bool> {
        let params = parse_go_params(line);
        let limits = resolve_search_limits(&params, self.position.side_to_move);
        info!(?limits, "go");

        let mut hooks = UciSearchHooks {
            input,
            out: &mut self.out,
            start: Instant::now(),
            stopped: false,
            quit: false,
            ready_pending: false,
            write_error: None,
        };
        let outcome = search(&self.position, &self.scorer, limits, &mut hooks);

        let UciSearchHooks {
            quit,
            ready_pending,
            write_error,
            ..
        } = hooks;
        if let Some(err) = write_error {
            return Err(err);
        }

        let best = outcome.best_move().unwrap_or(Move::NULL);
        info!(bestmove = %best, depth = outcome.depth, score = outcome.score, "search finished");
        self.send(&format!("bestmove {best}"))?;
        if ready_pending {
            self.send("readyok")?;
        }
        Ok(quit)
    }
}

/// Drains pending input during a search and reports completed depths.
struct UciSearchHooks<'a, W: Write> {
    input: &'a Receiver<String>,
    out: &'a mut W,
    start: Instant,
    stopped: bool,
    quit: bool,
    ready_pending: bool,
    write_error: Option<io::Error>,
}

impl<W: Write> SearchHooks for UciSearchHooks<'_, W> {
    fn keep_going(&mut self) -> bool {
        while !self.stopped {
            match self.input.try_recv() {
                Ok(line) => self.handle_search_command(&line),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!("uci input closed during search");
                    self.quit = true;
                    self.stopped = true;
                }
            }
        }
        !self.stopped
    }

    fn depth_complete(&mut self, outcome: &SearchOutcome) {
        if self.write_error.is_some() {
            return;
        }
        let elapsed_ms = self.start.elapsed().as_millis();
        let line = format_info_line(outcome, elapsed_ms);
        trace!(line = line.as_str(), "uci out");
        if let Err(err) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            self.write_error = Some(err);
            self.stopped = true;
        }
    }
}

impl<W: Write> UciSearchHooks<'_, W> {
    fn handle_search_command(&mut self, line: &str) {
        let cmd = line.split_whitespace().next().unwrap_or_default();
        match cmd {
            "stop" => self.stopped = true,
            "quit" => {
                self.quit = true;
                self.stopped = true;
            }
            "isready" => self.ready_pending = true,
            "position" | "go" | "ucinewgame" => {
                warn!(command = line.trim(), "ignoring command received while searching");
            }
            _ => {}
        }
    }
}

fn format_info_line(outcome: &SearchOutcome, elapsed_ms: u128) -> String {
    let score = match mate_in_moves(outcome.score) {
        Some(moves) => format!("mate {moves}"),
        None => format!("cp {}", outcome.score),
    };
    format!(
        "info depth {} score {} nodes {} time {} pv {}",
        outcome.depth,
        score,
        outcome.nodes,
        elapsed_ms,
        format_line(&outcome.pv)
    )
}

fn parse_go_params(line: &str) -> GoParams {
    let mut params = GoParams::default();
    let tokens = line.split_whitespace().collect::<Vec<_>>();
    let mut i = 0usize;
    while i < tokens.len() {
        match tokens[i] {
            "depth" => {
                i += 1;
                params.depth = tokens.get(i).and_then(|x| x.parse::<u32>().ok());
            }
            "nodes" => {
                i += 1;
                params.nodes = tokens.get(i).and_then(|x| x.parse::<u64>().ok());
            }
            "mate" => {
                i += 1;
                params.mate = tokens.get(i).and_then(|x| x.parse::<u32>().ok());
            }
            "movetime" => {
                i += 1;
                params.movetime_ms = tokens.get(i).and_then(|x| x.parse::<u64>().ok());
            }
            "ponder" => params.ponder = true,
            "infinite" => params.infinite = true,
            "wtime" => {
                i += 1;
                params.wtime_ms = tokens.get(i).and_then(|x| x.parse::<u64>().ok());
            }
            "btime" => {
                i += 1;
                params.btime_ms = tokens.get(i).and_then(|x| x.parse::<u64>().ok());
            }
            "winc" => {
                i += 1;
                params.winc_ms = tokens.get(i).and_then(|x| x.parse::<u64>().ok());
            }
            "binc" => {
                i += 1;
                params.binc_ms = tokens.get(i).and_then(|x| x.parse::<u64>().ok());
            }
            "movestogo" => {
                i += 1;
                params.movestogo = tokens.get(i).and_then(|x| x.parse::<u32>().ok());
            }
            "searchmoves" => {
                i += 1;
                while i < tokens.len() && !is_go_keyword(tokens[i]) {
                    params.searchmoves.push(tokens[i].to_owned());
                    i += 1;
                }
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    params
}

fn is_go_keyword(token: &str) -> bool {
    matches!(
        token,
        "depth"
            | "movetime"
            | "wtime"
            | "btime"
            | "winc"
            | "binc"
            | "movestogo"
            | "searchmoves"
            | "nodes"
            | "mate"
            | "ponder"
            | "infinite"
    )
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Sender};

    use super::*;
    use crate::game_state::chess_types::Color;
    use crate::utils::fen_generator::generate_fen;

    struct Harness {
        session: UciSession<Vec<u8>>,
        sender: Sender<String>,
        receiver: Receiver<String>,
    }

    impl Harness {
        fn new() -> Self {
            let (sender, receiver) = mpsc::channel();
            Self {
                session: UciSession::new(Vec::new()),
                sender,
                receiver,
            }
        }

        fn send(&mut self, line: &str) -> bool {
            self.session
                .handle_command(line, &self.receiver)
                .expect("writing to a Vec cannot fail")
        }

        fn queue(&self, line: &str) {
            self.sender.send(line.to_owned()).expect("receiver is alive");
        }

        fn output(&self) -> String {
            String::from_utf8(self.session.output().clone()).expect("output is UTF-8")
        }
    }

    #[test]
    fn uci_handshake_and_isready() {
        let mut harness = Harness::new();
        assert!(!harness.send("uci"));
        assert!(!harness.send("isready"));
        let output = harness.output();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], format!("id name {UCI_ENGINE_NAME}"));
        assert!(lines[1].starts_with("id author "));
        assert_eq!(lines[2], "uciok");
        assert_eq!(lines[3], "readyok");
    }

    #[test]
    fn quit_ends_the_session_and_unknown_commands_are_ignored() {
        let mut harness = Harness::new();
        assert!(!harness.send("xyzzy 1 2 3"));
        assert!(!harness.send("stop"));
        assert!(!harness.send("   "));
        assert!(harness.send("quit"));
        assert!(harness.output().is_empty());
    }

    #[test]
    fn position_startpos_with_moves_updates_state() {
        let mut harness = Harness::new();
        harness.send("position startpos moves e2e4 e7e5 g1f3");
        assert_eq!(harness.session.position().side_to_move, Color::Black);
        assert_eq!(
            generate_fen(harness.session.position()),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 0 1"
        );
    }

    #[test]
    fn position_fen_without_moves_updates_state() {
        let mut harness = Harness::new();
        harness.send("position fen 4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
        assert_eq!(generate_fen(harness.session.position()), "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
    }

    #[test]
    fn bad_position_commands_keep_the_previous_position() {
        let mut harness = Harness::new();
        harness.send("position startpos moves e2e4");
        let before = *harness.session.position();

        harness.send("position startpos moves e2e5");
        harness.send("position fen 8/8/8 w - - 0 1");
        harness.send("position sideways");
        assert_eq!(*harness.session.position(), before);
        let output = harness.output();
        assert_eq!(output.matches("info string position error").count(), 3);
        assert!(output.contains("illegal move 'e2e5'"));
    }

    #[test]
    fn ucinewgame_resets_the_position() {
        let mut harness = Harness::new();
        harness.send("position startpos moves d2d4");
        harness.send("ucinewgame");
        assert_eq!(*harness.session.position(), Position::new_game());
    }

    #[test]
    fn go_depth_reports_each_depth_then_bestmove() {
        let mut harness = Harness::new();
        harness.send("position fen 7k/8/6K1/8/8/8/8/R7 w - - 0 1");
        assert!(!harness.send("go depth 2"));
        let output = harness.output();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("info depth 1 score "));
        assert!(lines[1].starts_with("info depth 2 score mate 1 nodes "));
        assert!(lines[1].contains(" pv a1a8"));
        assert_eq!(lines[2], "bestmove a1a8");
    }

    #[test]
    fn go_without_moves_prints_null_bestmove() {
        let mut harness = Harness::new();
        harness.send("position fen 3Q2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        harness.send("go depth 3");
        assert_eq!(harness.output(), "bestmove 0000\n");
    }

    #[test]
    fn stop_and_isready_are_handled_while_searching() {
        let mut harness = Harness::new();
        harness.queue("isready");
        harness.queue("go depth 1");
        harness.queue("stop");
        assert!(!harness.send("go infinite"));
        let output = harness.output();
        let lines: Vec<&str> = output.lines().collect();
        let bestmove = lines
            .iter()
            .position(|line| line.starts_with("bestmove "))
            .expect("search should report a best move");
        assert_ne!(lines[bestmove], "bestmove 0000");
        assert_eq!(lines[bestmove + 1], "readyok");
        assert_eq!(lines.len(), bestmove + 2);
    }

    #[test]
    fn quit_and_closed_input_end_a_search() {
        let mut harness = Harness::new();
        harness.queue("quit");
        assert!(harness.send("go infinite"));

        let (sender, receiver) = mpsc::channel::<String>();
        drop(sender);
        let mut session = UciSession::new(Vec::new());
        assert!(session.handle_command("go infinite", &receiver).expect("Vec output"));
        let output = String::from_utf8(session.output().clone()).expect("output is UTF-8");
        assert!(output.contains("bestmove "));
    }

    #[test]
    fn parse_go_params_keeps_clock_fields_without_forcing_movetime() {
        let params = parse_go_params("go wtime 120000 btime 60000 winc 1000 binc 1000");
        assert_eq!(params.movetime_ms, None);
        assert_eq!(params.wtime_ms, Some(120_000));
        assert_eq!(params.btime_ms, Some(60_000));
        assert_eq!(params.winc_ms, Some(1_000));
        assert_eq!(params.binc_ms, Some(1_000));
    }

    #[test]
    fn parse_go_params_parses_movestogo_and_searchmoves() {
        let params = parse_go_params("go movestogo 24 searchmoves e2e4 d2d4 depth 6");
        assert_eq!(params.movestogo, Some(24));
        assert_eq!(params.depth, Some(6));
        assert_eq!(params.searchmoves, vec!["e2e4".to_owned(), "d2d4".to_owned()]);
    }

    #[test]
    fn parse_go_params_parses_nodes_mate_and_modes() {
        let params = parse_go_params("go nodes 50000 mate 3 ponder infinite movetime 250");
        assert_eq!(params.nodes, Some(50_000));
        assert_eq!(params.mate, Some(3));
        assert_eq!(params.movetime_ms, Some(250));
        assert!(params.ponder);
        assert!(params.infinite);
    }

    #[test]
    fn info_line_uses_mate_distance() {
        let mut outcome = SearchOutcome {
            score: crate::search::board_scoring::MATE_BY_WHITE - 4,
            depth: 4,
            nodes: 99,
            ..SearchOutcome::default()
        };
        assert_eq!(format_info_line(&outcome, 12), "info depth 4 score mate 2 nodes 99 time 12 pv ");
        outcome.score = -35;
        assert!(format_info_line(&outcome, 0).contains("score cp -35 "));
    }
}
