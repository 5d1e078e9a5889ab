//! Depth-limited minimax agent with alpha-beta pruning.
//!
//! For each root candidate the agent expands the state and searches from the
//! opponent's perspective, alternating `max_value`/`min_value` until the
//! depth limit or a terminal state. The set of moves achieving the maximal
//! root score is tracked and the tie is broken uniformly at random, not
//! first-found. Naive exhaustive branching: no move ordering, no
//! transposition table, no iterative deepening.

use crate::agents::agent_random::RandomAgent;
use crate::agents::agent_trait::Agent;
use crate::chess_errors::ChessErrors;
use crate::eval::heuristic::{Heuristic, MAX_SCORE, MIN_SCORE};
use crate::game::chess_move::Move;
use crate::game::chess_types::Color;
use crate::game::state::State;

pub struct MiniMaxAgent<H: Heuristic> {
    depth_limit: u8,
    heuristic: H,
    tie_break: RandomAgent,
    name: String,
}

impl<H: Heuristic> MiniMaxAgent<H> {
    /// Build an agent searching `depth_limit` plies deep.
    ///
    /// A zero depth limit cannot produce a decision and is rejected at
    /// construction.
    pub fn new(depth_limit: u8, heuristic: H) -> Result<Self, ChessErrors> {
        Self::build(depth_limit, heuristic, RandomAgent::new())
    }

    /// Like `new`, with a seeded tie-break RNG for reproducible decisions.
    pub fn with_seed(depth_limit: u8, heuristic: H, seed: u64) -> Result<Self, ChessErrors> {
        Self::build(depth_limit, heuristic, RandomAgent::with_seed(seed))
    }

    fn build(depth_limit: u8, heuristic: H, tie_break: RandomAgent) -> Result<Self, ChessErrors> {
        if depth_limit == 0 {
            return Err(ChessErrors::MisconfiguredAgent(
                "depth limit must be at least 1",
            ));
        }
        Ok(Self {
            depth_limit,
            heuristic,
            tie_break,
            name: format!("minimax(depth {depth_limit})"),
        })
    }

    /// Maximizing node: the root player is to move in `state`.
    fn max_value(&self, player: Color, state: &State, mut alpha: i32, beta: i32, depth: u8) -> i32 {
        if state.is_terminal() || depth >= self.depth_limit {
            return self.heuristic.score(player, state);
        }
        let moves = state.legal_moves(player);
        if moves.is_empty() {
            return self.heuristic.score(player, state);
        }

        let mut value = MIN_SCORE;
        for mv in moves {
            let child = self.min_value(player, &state.expand_from(mv), alpha, beta, depth + 1);
            if child > value {
                value = child;
            }
            // Beta cutoff.
            if value >= beta {
                return value;
            }
            if value > alpha {
                alpha = value;
            }
        }
        value
    }

    /// Minimizing node: the opponent is to move in `state`.
    fn min_value(&self, player: Color, state: &State, alpha: i32, mut beta: i32, depth: u8) -> i32 {
        if state.is_terminal() || depth >= self.depth_limit {
            return self.heuristic.score(player, state);
        }
        let moves = state.legal_moves(player.opposite());
        if moves.is_empty() {
            return self.heuristic.score(player, state);
        }

        let mut value = MAX_SCORE;
        for mv in moves {
            let child = self.max_value(player, &state.expand_from(mv), alpha, beta, depth + 1);
            if child < value {
                value = child;
            }
            // Alpha cutoff.
            if value <= alpha {
                return value;
            }
            if value < beta {
                beta = value;
            }
        }
        value
    }
}

impl<H: Heuristic> Agent for MiniMaxAgent<H> {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(
        &mut self,
        mover: Color,
        legal_moves: &[Move],
        state: &State,
    ) -> Result<Move, ChessErrors> {
        if legal_moves.is_empty() {
            return Err(ChessErrors::NoLegalMoves);
        }

        // Each root candidate gets a fresh full window so ties keep exact
        // scores and the maximal set stays complete.
        let mut best_score = MIN_SCORE;
        let mut tied = Vec::new();
        for mv in legal_moves {
            let score = self.min_value(mover, &state.expand_from(mv), MIN_SCORE, MAX_SCORE, 1);
            if score > best_score {
                best_score = score;
                tied.clear();
                tied.push(*mv);
            } else if score == best_score {
                tied.push(*mv);
            }
        }

        self.tie_break.pick(&tied).copied()
    }
}
