//! Errors used throughout the match simulator.
//!
//! This module defines the canonical error type returned by game logic,
//! move application, agents, and the match orchestration layer. The enum
//! `ChessErrors` is used as the single error type across the crate to
//! simplify propagation and matching.

use std::fmt;

use crate::game::chess_types::{Color, Square};

/// Unified error type for the match simulator.
///
/// Each variant corresponds to a specific, identifiable failure mode that can
/// occur while manipulating the board, running an agent, or driving a match.
/// Variants carry contextual payloads where useful so callers can log or
/// display precise diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessErrors {
    /// A square index outside `0..=63` was supplied.
    OutOfBounds(Square),

    /// A move failed shape validation: its mask does not hold exactly two
    /// bits, its origin is not occupied by the stated piece, or its
    /// destination is occupied by an allied piece.
    MalformedMove,

    /// An agent returned a move that is not a member of the legal set it was
    /// handed for the current ply.
    IllegalMoveReturned,

    /// No legal moves are available for the side to move. Agents surface
    /// this instead of crashing on an empty candidate set; the match maps it
    /// to a no-winner interruption.
    NoLegalMoves,

    /// An agent was constructed with an unusable parameter (for example a
    /// zero search depth). Payload names the offending parameter.
    MisconfiguredAgent(&'static str),

    /// An agent panicked while choosing a move; the panic was contained to
    /// its match.
    AgentPanicked,

    /// `start()` or `subscribe()` was called on a match that already left
    /// the prepared state.
    MatchAlreadyStarted,

    /// The match worker thread panicked; the match is resolved as
    /// interrupted with no winner.
    MatchWorkerPanicked,

    /// The agent factory was asked for a name it does not know.
    ///
    /// Payload: the unrecognized name as supplied.
    UnknownAgentName(String),

    /// A match ended in a state the orchestrator does not recognize; payload
    /// carries the winning color slot it failed to reconcile.
    InconsistentOutcome(Option<Color>),
}

impl fmt::Display for ChessErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessErrors::OutOfBounds(square) => {
                write!(f, "square index {square} is outside the 8x8 board")
            }
            ChessErrors::MalformedMove => write!(f, "move failed shape validation"),
            ChessErrors::IllegalMoveReturned => {
                write!(f, "agent returned a move outside the legal set")
            }
            ChessErrors::NoLegalMoves => write!(f, "no legal moves for the side to move"),
            ChessErrors::MisconfiguredAgent(what) => {
                write!(f, "agent misconfigured: {what}")
            }
            ChessErrors::AgentPanicked => {
                write!(f, "agent panicked while choosing a move")
            }
            ChessErrors::MatchAlreadyStarted => write!(f, "match was already started"),
            ChessErrors::MatchWorkerPanicked => write!(f, "match worker thread panicked"),
            ChessErrors::UnknownAgentName(name) => write!(f, "unknown agent name '{name}'"),
            ChessErrors::InconsistentOutcome(winner) => {
                write!(f, "match ended in an unrecognized state (winner: {winner:?})")
            }
        }
    }
}

impl std::error::Error for ChessErrors {}
