//! Pluggable position evaluation.
//!
//! Agents stay modular by delegating static scoring to this trait, allowing
//! alternate heuristics to be swapped without altering search code. Scores
//! are from the perspective of a named player, higher is better, and every
//! implementation must be a pure function of the state.

use crate::game::chess_types::{Color, Piece, PieceKind};
use crate::game::state::State;

/// Score awarded for a terminal state in the scoring player's favor. Large
/// but finite, with headroom below the search sentinels so alpha-beta
/// arithmetic can never overflow.
pub const WIN_SCORE: i32 = 1_000_000;

/// Search window sentinels. Strictly outside any reachable score.
pub const MIN_SCORE: i32 = -2_000_000;
pub const MAX_SCORE: i32 = 2_000_000;

pub trait Heuristic: Send + Sync {
    /// Desirability of `state` for `player`.
    fn score(&self, player: Color, state: &State) -> i32;
}

/// Classic material count: weighted piece tally for the player minus the
/// same tally for the opponent.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialHeuristic;

impl MaterialHeuristic {
    #[inline]
    pub const fn piece_weight(kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 100_000,
        }
    }

    fn material_for(state: &State, color: Color) -> i32 {
        let mut total = 0i32;
        for kind in PieceKind::ALL {
            let count = state.board().bitboard(Piece::new(color, kind)).count_ones() as i32;
            total += Self::piece_weight(kind) * count;
        }
        total
    }
}

impl Heuristic for MaterialHeuristic {
    fn score(&self, player: Color, state: &State) -> i32 {
        if state.is_terminal() {
            return if state.board().king_missing(player.opposite()) {
                WIN_SCORE
            } else {
                -WIN_SCORE
            };
        }
        Self::material_for(state, player) - Self::material_for(state, player.opposite())
    }
}

#[cfg(test)]
mod tests {
    use super::{Heuristic, MaterialHeuristic, MAX_SCORE, MIN_SCORE, WIN_SCORE};
    use crate::game::board::Board;
    use crate::game::chess_types::{Color, Piece, PieceKind};
    use crate::game::state::State;

    fn kings_and(pieces: &[(Color, PieceKind, u8)]) -> State {
        let mut board = Board::new_empty();
        board
            .place(Piece::new(Color::Light, PieceKind::King), 4)
            .expect("place light king");
        board
            .place(Piece::new(Color::Dark, PieceKind::King), 60)
            .expect("place dark king");
        for (color, kind, square) in pieces {
            board
                .place(Piece::new(*color, *kind), *square)
                .expect("place piece");
        }
        State::capture(&board)
    }

    #[test]
    fn starting_position_is_balanced() {
        let state = State::capture(&Board::standard());
        let heuristic = MaterialHeuristic;
        assert_eq!(heuristic.score(Color::Light, &state), 0);
        assert_eq!(heuristic.score(Color::Dark, &state), 0);
    }

    #[test]
    fn queen_advantage_counts_nine_points() {
        let state = kings_and(&[(Color::Light, PieceKind::Queen, 3)]);
        let heuristic = MaterialHeuristic;
        assert_eq!(heuristic.score(Color::Light, &state), 9);
        assert_eq!(heuristic.score(Color::Dark, &state), -9);
    }

    #[test]
    fn material_score_is_antisymmetric_on_non_terminal_states() {
        let heuristic = MaterialHeuristic;
        let samples = [
            State::capture(&Board::standard()),
            kings_and(&[
                (Color::Light, PieceKind::Rook, 0),
                (Color::Dark, PieceKind::Knight, 57),
                (Color::Dark, PieceKind::Pawn, 48),
            ]),
            kings_and(&[(Color::Dark, PieceKind::Queen, 59)]),
        ];
        for state in &samples {
            assert_eq!(
                heuristic.score(Color::Light, state),
                -heuristic.score(Color::Dark, state)
            );
        }
    }

    #[test]
    fn captured_king_scores_the_finite_win_value() {
        let mut board = Board::new_empty();
        board
            .place(Piece::new(Color::Light, PieceKind::King), 4)
            .expect("place light king");
        let state = State::capture(&board);

        let heuristic = MaterialHeuristic;
        assert_eq!(heuristic.score(Color::Light, &state), WIN_SCORE);
        assert_eq!(heuristic.score(Color::Dark, &state), -WIN_SCORE);
        assert!(WIN_SCORE < MAX_SCORE);
        assert!(-WIN_SCORE > MIN_SCORE);
    }
}
