//! Mutable board representation: twelve bitboards, one per (color, kind).
//!
//! The board is the authoritative, in-place-mutated state of a running match.
//! Search never touches it directly; speculative exploration works on full
//! copies taken through `State::expand`.

use crate::chess_errors::ChessErrors;
use crate::game::chess_move::Move;
use crate::game::chess_types::{kernel, Color, Piece, PieceKind, Square, PIECE_SLOTS};
use crate::movegen::masks::{RANK_2, RANK_7};

/// Twelve-slot bitboard array. Invariants: at most one slot has any given
/// bit set, and each king slot holds at most one bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub bitboards: [u64; PIECE_SLOTS],
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    #[inline]
    pub const fn new_empty() -> Self {
        Self {
            bitboards: [0; PIECE_SLOTS],
        }
    }

    /// Standard chess starting layout.
    pub const fn standard() -> Self {
        let mut board = Self::new_empty();
        board.bitboards[Piece::new(Color::Light, PieceKind::Pawn).slot()] = RANK_2;
        board.bitboards[Piece::new(Color::Light, PieceKind::Rook).slot()] = 0x81;
        board.bitboards[Piece::new(Color::Light, PieceKind::Knight).slot()] = 0x42;
        board.bitboards[Piece::new(Color::Light, PieceKind::Bishop).slot()] = 0x24;
        board.bitboards[Piece::new(Color::Light, PieceKind::Queen).slot()] = 0x08;
        board.bitboards[Piece::new(Color::Light, PieceKind::King).slot()] = 0x10;

        board.bitboards[Piece::new(Color::Dark, PieceKind::Pawn).slot()] = RANK_7;
        board.bitboards[Piece::new(Color::Dark, PieceKind::Rook).slot()] = 0x81 << 56;
        board.bitboards[Piece::new(Color::Dark, PieceKind::Knight).slot()] = 0x42 << 56;
        board.bitboards[Piece::new(Color::Dark, PieceKind::Bishop).slot()] = 0x24 << 56;
        board.bitboards[Piece::new(Color::Dark, PieceKind::Queen).slot()] = 0x08 << 56;
        board.bitboards[Piece::new(Color::Dark, PieceKind::King).slot()] = 0x10 << 56;
        board
    }

    #[inline]
    pub const fn bitboard(&self, piece: Piece) -> u64 {
        self.bitboards[piece.slot()]
    }

    /// Aggregate occupancy for one color.
    #[inline]
    pub fn occupancy(&self, color: Color) -> u64 {
        let base = color.index() * 6;
        self.bitboards[base..base + 6]
            .iter()
            .fold(0u64, |acc, bb| acc | bb)
    }

    #[inline]
    pub fn occupancy_all(&self) -> u64 {
        self.occupancy(Color::Light) | self.occupancy(Color::Dark)
    }

    /// The piece occupying `square`, if any.
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        let mask = kernel(square);
        for slot in 0..PIECE_SLOTS {
            if self.bitboards[slot] & mask != 0 {
                return Some(Piece::from_slot(slot));
            }
        }
        None
    }

    /// Place a piece on an empty square. Intended for composing test and
    /// scenario layouts.
    pub fn place(&mut self, piece: Piece, square: Square) -> Result<(), ChessErrors> {
        if square > 63 {
            return Err(ChessErrors::OutOfBounds(square));
        }
        let mask = kernel(square);
        if self.occupancy_all() & mask != 0 {
            return Err(ChessErrors::MalformedMove);
        }
        self.bitboards[piece.slot()] |= mask;
        Ok(())
    }

    /// True when `color`'s king bitboard is empty (the king was captured).
    #[inline]
    pub fn king_missing(&self, color: Color) -> bool {
        self.bitboard(Piece::new(color, PieceKind::King)) == 0
    }

    /// True when the two kings are the only pieces left.
    pub fn kings_only(&self) -> bool {
        let kings = self.bitboard(Piece::new(Color::Light, PieceKind::King))
            | self.bitboard(Piece::new(Color::Dark, PieceKind::King));
        kings != 0 && self.occupancy_all() == kings
    }

    /// True when no square bit is set in more than one of the twelve slots.
    pub fn slots_are_disjoint(&self) -> bool {
        let mut seen = 0u64;
        for bb in self.bitboards {
            if seen & bb != 0 {
                return false;
            }
            seen |= bb;
        }
        true
    }

    /// Validate and apply a move.
    ///
    /// Rejects moves whose mask is not exactly two kernels, whose origin is
    /// not occupied by the stated piece, or whose destination holds an allied
    /// piece. Generator output always passes; agent-supplied moves may not.
    pub fn apply_move(&mut self, mv: &Move) -> Result<(), ChessErrors> {
        if !mv.has_two_square_shape() {
            return Err(ChessErrors::MalformedMove);
        }
        let own_bb = self.bitboard(mv.piece);
        if mv.origin_kernel(own_bb).count_ones() != 1 {
            return Err(ChessErrors::MalformedMove);
        }
        let destination = mv.destination_kernel(own_bb);
        if self.occupancy(mv.piece.color) & destination != 0 {
            return Err(ChessErrors::MalformedMove);
        }
        self.apply_move_unchecked(mv);
        Ok(())
    }

    /// Apply a move without validation.
    ///
    /// The mask toggle clears the origin and sets the destination in one XOR;
    /// the destination bit is then cleared from every opposing slot, which
    /// captures at most one piece. Callers must guarantee the move shape.
    pub fn apply_move_unchecked(&mut self, mv: &Move) {
        let destination = mv.destination_kernel(self.bitboard(mv.piece));
        self.bitboards[mv.piece.slot()] ^= mv.mask;

        let enemy = mv.piece.color.opposite();
        for kind in PieceKind::ALL {
            self.bitboards[Piece::new(enemy, kind).slot()] &= !destination;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::chess_errors::ChessErrors;
    use crate::game::chess_move::Move;
    use crate::game::chess_types::{kernel, Color, Piece, PieceKind};

    #[test]
    fn standard_layout_is_disjoint_with_full_back_ranks() {
        let board = Board::standard();
        assert!(board.slots_are_disjoint());
        assert_eq!(board.occupancy(Color::Light).count_ones(), 16);
        assert_eq!(board.occupancy(Color::Dark).count_ones(), 16);
        assert_eq!(
            board.piece_on(4),
            Some(Piece::new(Color::Light, PieceKind::King))
        );
        assert_eq!(
            board.piece_on(59),
            Some(Piece::new(Color::Dark, PieceKind::Queen))
        );
        assert_eq!(board.piece_on(27), None);
    }

    #[test]
    fn quiet_move_toggles_origin_and_destination() {
        let mut board = Board::standard();
        let knight = Piece::new(Color::Light, PieceKind::Knight);
        let mv = Move::from_squares(knight, 6, 21);

        board.apply_move(&mv).expect("knight move should apply");
        assert_eq!(board.bitboard(knight), kernel(1) | kernel(21));
        assert!(board.slots_are_disjoint());
    }

    #[test]
    fn reapplying_a_quiet_move_restores_the_board() {
        let mut board = Board::standard();
        let before = board.clone();
        let knight = Piece::new(Color::Light, PieceKind::Knight);
        let mv = Move::from_squares(knight, 6, 21);

        // The same mask resolves in reverse once the knight has moved.
        board.apply_move(&mv).expect("outbound move should apply");
        board.apply_move(&mv).expect("inverse move should apply");
        assert_eq!(board, before);
    }

    #[test]
    fn capture_clears_exactly_the_destination_bit() {
        let mut board = Board::new_empty();
        let rook = Piece::new(Color::Light, PieceKind::Rook);
        let pawn = Piece::new(Color::Dark, PieceKind::Pawn);
        board.place(rook, 0).expect("place rook");
        board.place(pawn, 24).expect("place pawn");
        board.place(pawn, 25).expect("place second pawn");

        board
            .apply_move(&Move::from_squares(rook, 0, 24))
            .expect("rook capture should apply");

        assert_eq!(board.bitboard(rook), kernel(24));
        assert_eq!(board.bitboard(pawn), kernel(25));
        assert!(board.slots_are_disjoint());
    }

    #[test]
    fn malformed_moves_are_rejected() {
        let mut board = Board::standard();
        let rook = Piece::new(Color::Light, PieceKind::Rook);

        // Origin square does not hold a light rook.
        assert_eq!(
            board.apply_move(&Move::from_squares(rook, 27, 35)),
            Err(ChessErrors::MalformedMove)
        );
        // Destination holds an allied pawn.
        assert_eq!(
            board.apply_move(&Move::from_squares(rook, 0, 8)),
            Err(ChessErrors::MalformedMove)
        );
        // Mask degenerates to a single kernel.
        assert_eq!(
            board.apply_move(&Move::from_squares(rook, 0, 0)),
            Err(ChessErrors::MalformedMove)
        );
    }

    #[test]
    fn kings_only_detection() {
        let mut board = Board::new_empty();
        board
            .place(Piece::new(Color::Light, PieceKind::King), 4)
            .expect("place light king");
        board
            .place(Piece::new(Color::Dark, PieceKind::King), 60)
            .expect("place dark king");
        assert!(board.kings_only());

        board
            .place(Piece::new(Color::Light, PieceKind::Pawn), 12)
            .expect("place pawn");
        assert!(!board.kings_only());
        assert!(!Board::standard().kings_only());
    }

    #[test]
    fn capturing_the_king_empties_its_slot() {
        let mut board = Board::new_empty();
        let queen = Piece::new(Color::Dark, PieceKind::Queen);
        board.place(queen, 12).expect("place queen");
        board
            .place(Piece::new(Color::Light, PieceKind::King), 4)
            .expect("place king");

        board
            .apply_move(&Move::from_squares(queen, 12, 4))
            .expect("queen takes king");
        assert!(board.king_missing(Color::Light));
        assert_eq!(board.bitboard(queen), kernel(4));
    }
}
