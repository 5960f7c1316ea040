//! Crate root module declarations for the Slate chess engine.
//!
//! Exposes the mailbox position model, pseudo-legal move generation with
//! king-capture legality, the alpha-beta search, and the UCI and terminal
//! front ends.

pub mod chess_errors;
pub mod config;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod coords;
    pub mod position;
}

pub mod moves {
    pub mod chess_move;
    pub mod move_list;
    pub mod piece_steps;
}

pub mod move_generation {
    pub mod legal_move_checks;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod move_ordering;
    pub mod search_control;
    pub mod time_management;
}

pub mod uci {
    pub mod uci_top;
}

pub mod cli {
    pub mod cli_top;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod random_playout;
    pub mod render_game_state;
}
