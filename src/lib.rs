//! Crate root module declarations for the Regicide match simulator.
//!
//! This file exposes all top-level subsystems (game model, move generation,
//! evaluation, agents, match orchestration, and utility helpers) so binaries,
//! tests, and external tooling can import stable module paths.

pub mod game {
    pub mod board;
    pub mod chess_move;
    pub mod chess_types;
    pub mod state;
}

pub mod movegen {
    pub mod generator;
    pub mod masks;
}

pub mod eval {
    pub mod heuristic;
}

pub mod agents {
    pub mod agent_minimax;
    pub mod agent_random;
    pub mod agent_trait;
}

pub mod arena {
    pub mod chess_match;
    pub mod series;
}

pub mod utils {
    pub mod algebraic;
    pub mod render_board;
}

pub mod chess_errors;
