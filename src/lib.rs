//! Crate root module declarations for the DGT board driver.
//!
//! The crate decodes the byte stream of a DGT electronic chessboard, tracks
//! the game being played on it with a bitboard move generator, and emits
//! completed games with SAN, coordinate and PGN renderings.

pub mod config;
pub mod errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod position;
    pub mod zobrist;
}

pub mod moves {
    pub mod chess_move;
    pub mod leaper_attacks;
    pub mod slider_attacks;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_moves_king;
    pub mod legal_moves_pawn;
    pub mod legal_moves_pieces;
    pub mod move_generator;
    pub mod perft;
}

pub mod protocol {
    pub mod clock_commands;
    pub mod clock_time;
    pub mod dgt_constants;
    pub mod driver;
    pub mod frame_encoding;
    pub mod framer;
    pub mod messages;
}

pub mod reconstruction {
    #[cfg(test)]
    pub(crate) mod board_simulator;
    pub mod game_reconstructor;
    pub mod played_game;
    pub mod reachable_positions;
    pub mod result_signal;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod pgn;
    pub mod render_position;
    pub mod san;
}
