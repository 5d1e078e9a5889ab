//! Immutable position snapshots for search.
//!
//! A `State` is derived from a board copy and never mutated afterwards. The
//! copy-per-expansion discipline is the sole mechanism keeping speculative
//! search from corrupting the live match board.

use crate::game::board::Board;
use crate::game::chess_move::Move;
use crate::game::chess_types::Color;
use crate::movegen::generator::moves_for_color;

/// Snapshot of a position: board copy, occupancy aggregates, per-color
/// pseudo-legal move lists, and the terminal flag.
#[derive(Debug, Clone)]
pub struct State {
    board: Board,
    occupancy: [u64; 2],
    moves: [Vec<Move>; 2],
    terminal: bool,
}

impl State {
    /// Snapshot the board as it stands.
    pub fn capture(board: &Board) -> Self {
        let board = board.clone();
        let occupancy = [board.occupancy(Color::Light), board.occupancy(Color::Dark)];
        let terminal = board.king_missing(Color::Light) || board.king_missing(Color::Dark);
        // A terminal position has no continuations worth enumerating.
        let moves = if terminal {
            [Vec::new(), Vec::new()]
        } else {
            [
                moves_for_color(&board, Color::Light),
                moves_for_color(&board, Color::Dark),
            ]
        };
        Self {
            board,
            occupancy,
            moves,
            terminal,
        }
    }

    /// Snapshot the successor position reached by playing `mv` on a copy of
    /// `board`. The live board is never touched.
    pub fn expand(board: &Board, mv: &Move) -> Self {
        let mut successor = board.clone();
        // Generator output is shape-correct by construction.
        successor.apply_move_unchecked(mv);
        Self::capture(&successor)
    }

    /// Successor of this state, for recursion inside search.
    pub fn expand_from(&self, mv: &Move) -> Self {
        Self::expand(&self.board, mv)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> u64 {
        self.occupancy[color.index()]
    }

    #[inline]
    pub fn legal_moves(&self, color: Color) -> &[Move] {
        &self.moves[color.index()]
    }

    /// True iff either king's bitboard is empty.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }
}
