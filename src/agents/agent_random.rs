//! Uniform-random agent.
//!
//! Selects uniformly from the candidate set and is primarily used for
//! diagnostics, baseline opposition, and tie-breaking inside the minimax
//! agent. Seedable for reproducible matches.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::agents::agent_trait::Agent;
use crate::chess_errors::ChessErrors;
use crate::game::chess_move::Move;
use crate::game::chess_types::Color;
use crate::game::state::State;

pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    /// OS-entropy seeded agent.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic agent for reproducible matches and tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform choice over an arbitrary candidate slice, shared with the
    /// minimax tie-break.
    pub fn pick<'a>(&mut self, candidates: &'a [Move]) -> Result<&'a Move, ChessErrors> {
        candidates
            .choose(&mut self.rng)
            .ok_or(ChessErrors::NoLegalMoves)
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(
        &mut self,
        _mover: Color,
        legal_moves: &[Move],
        _state: &State,
    ) -> Result<Move, ChessErrors> {
        self.pick(legal_moves).copied()
    }
}
