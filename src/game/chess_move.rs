//! Compact move representation: a piece plus a two-kernel bitmask.
//!
//! The mask holds the origin and destination squares OR-ed together. Which of
//! the two bits is the origin is only decidable against the mover's bitboard,
//! so the accessors here take that bitboard as a parameter.

use crate::game::chess_types::{kernel, Piece, Square};

/// A pseudo-legal move: `mask` is the bitwise OR of exactly two square
/// kernels, one of which is currently occupied by `piece`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub piece: Piece,
    pub mask: u64,
}

impl Move {
    #[inline]
    pub const fn new(piece: Piece, mask: u64) -> Self {
        Self { piece, mask }
    }

    /// Build a move from explicit origin and destination squares.
    #[inline]
    pub const fn from_squares(piece: Piece, from: Square, to: Square) -> Self {
        Self {
            piece,
            mask: kernel(from) | kernel(to),
        }
    }

    /// True when the mask has the required two-bit shape.
    #[inline]
    pub const fn has_two_square_shape(self) -> bool {
        self.mask.count_ones() == 2
    }

    /// Kernel of the square the piece currently occupies.
    ///
    /// `piece_bitboard` must be the mover's own bitboard slot.
    #[inline]
    pub const fn origin_kernel(self, piece_bitboard: u64) -> u64 {
        self.mask & piece_bitboard
    }

    /// Kernel of the square the piece moves to: the bit of the two that the
    /// piece does not already occupy.
    #[inline]
    pub const fn destination_kernel(self, piece_bitboard: u64) -> u64 {
        (self.mask & piece_bitboard) ^ self.mask
    }

    /// (from, to) square indices resolved against the mover's bitboard.
    #[inline]
    pub fn endpoints(self, piece_bitboard: u64) -> (Square, Square) {
        let from = self.origin_kernel(piece_bitboard).trailing_zeros() as Square;
        let to = self.destination_kernel(piece_bitboard).trailing_zeros() as Square;
        (from, to)
    }
}
