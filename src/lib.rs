//! Crate root module declarations for the Oleg Chess engine project.
//!
//! This file exposes all top-level subsystems (position model, move
//! generation, search, engines, the game session and utility helpers) so the
//! binary, benchmarks and external tooling can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod board_geometry;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
}

pub mod moves {
    pub mod move_descriptions;
    pub mod piece_offsets;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod move_ordering;
    pub mod negamax;
    pub mod zobrist;
}

pub mod tables {
    pub mod piece_square_tables;
}

pub mod engines {
    pub mod engine_negamax;
    pub mod engine_random;
    pub mod engine_semi_random;
    pub mod engine_trait;
}

pub mod session {
    pub mod game_session;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
}
