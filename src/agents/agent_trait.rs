//! Agent abstraction layer used by the match orchestrator.
//!
//! An agent is a polymorphic decision strategy: handed the side to move, the
//! legal candidate set, and an immutable state snapshot, it must return one
//! element of that set. Agents look ahead through `State` expansion only and
//! never see the live match board.

use crate::chess_errors::ChessErrors;
use crate::game::chess_move::Move;
use crate::game::chess_types::Color;
use crate::game::state::State;

pub trait Agent: Send {
    /// Human-readable strategy name for outcome lines and logs.
    fn name(&self) -> &str;

    /// Select exactly one element of `legal_moves`.
    ///
    /// An empty candidate set must yield `ChessErrors::NoLegalMoves`; the
    /// match maps that to a no-winner interruption instead of crashing.
    fn choose_move(
        &mut self,
        mover: Color,
        legal_moves: &[Move],
        state: &State,
    ) -> Result<Move, ChessErrors>;
}
