//! Algebraic square names and long-algebraic move text.
//!
//! Used for outcome lines and event logs; parsing is limited to single
//! square names since no external move input exists.

use crate::chess_errors::ChessErrors;
use crate::game::board::Board;
use crate::game::chess_move::Move;
use crate::game::chess_types::{PieceKind, Square};

/// `0 == a1`, `63 == h8`.
pub fn square_to_algebraic(square: Square) -> Result<String, ChessErrors> {
    if square > 63 {
        return Err(ChessErrors::OutOfBounds(square));
    }
    let file = char::from(b'a' + square % 8);
    let rank = char::from(b'1' + square / 8);
    Ok(format!("{file}{rank}"))
}

pub fn algebraic_to_square(name: &str) -> Result<Square, ChessErrors> {
    let bytes = name.as_bytes();
    if bytes.len() != 2
        || !(b'a'..=b'h').contains(&bytes[0])
        || !(b'1'..=b'8').contains(&bytes[1])
    {
        return Err(ChessErrors::MalformedMove);
    }
    Ok((bytes[1] - b'1') * 8 + (bytes[0] - b'a'))
}

/// Long-algebraic rendering of a move against the board it is about to be
/// played on, e.g. `Ng1f3` or `e2e4`.
pub fn move_to_long_algebraic(mv: &Move, board: &Board) -> Result<String, ChessErrors> {
    let own_bb = board.bitboard(mv.piece);
    if !mv.has_two_square_shape() || mv.origin_kernel(own_bb).count_ones() != 1 {
        return Err(ChessErrors::MalformedMove);
    }
    let (from, to) = mv.endpoints(own_bb);
    let prefix = match mv.piece.kind {
        PieceKind::Pawn => "",
        PieceKind::Knight => "N",
        PieceKind::Bishop => "B",
        PieceKind::Rook => "R",
        PieceKind::Queen => "Q",
        PieceKind::King => "K",
    };
    Ok(format!(
        "{prefix}{}{}",
        square_to_algebraic(from)?,
        square_to_algebraic(to)?
    ))
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, move_to_long_algebraic, square_to_algebraic};
    use crate::game::board::Board;
    use crate::game::chess_move::Move;
    use crate::game::chess_types::{Color, Piece, PieceKind};

    #[test]
    fn square_names_round_trip() {
        for square in 0..64 {
            let name = square_to_algebraic(square).expect("valid square");
            assert_eq!(algebraic_to_square(&name).expect("valid name"), square);
        }
        assert!(square_to_algebraic(64).is_err());
        assert!(algebraic_to_square("i9").is_err());
        assert!(algebraic_to_square("e99").is_err());
    }

    #[test]
    fn long_algebraic_renders_piece_prefix_and_squares() {
        let board = Board::standard();
        let knight = Piece::new(Color::Light, PieceKind::Knight);
        let pawn = Piece::new(Color::Light, PieceKind::Pawn);

        let knight_move = Move::from_squares(knight, 6, 21);
        assert_eq!(
            move_to_long_algebraic(&knight_move, &board).expect("well formed"),
            "Ng1f3"
        );

        let pawn_move = Move::from_squares(pawn, 12, 28);
        assert_eq!(
            move_to_long_algebraic(&pawn_move, &board).expect("well formed"),
            "e2e4"
        );
    }
}
