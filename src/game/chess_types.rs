//! Core value types shared across the board, move generation, and agents.
//!
//! A piece is a (color, kind) pair mapping to exactly one of the twelve
//! bitboard slots; a square is a row-major index into the 8x8 grid.

/// Board square index (`0..=63`), row-major with `0 == a1` and `63 == h8`.
pub type Square = u8;

/// Number of bitboard slots (6 piece kinds for each of 2 colors).
pub const PIECE_SLOTS: usize = 12;

/// Single-square bitboard mask ("kernel") for `square`.
#[inline]
pub const fn kernel(square: Square) -> u64 {
    1u64 << square
}

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }
}

/// Piece kind (color is represented separately in `Piece`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }
}

/// A concrete piece: one of the twelve (color, kind) combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Bitboard slot for this piece: light slots `0..=5`, dark slots `6..=11`.
    #[inline]
    pub const fn slot(self) -> usize {
        self.color.index() * 6 + self.kind.index()
    }

    /// Inverse of `slot`.
    #[inline]
    pub const fn from_slot(slot: usize) -> Self {
        let color = if slot < 6 { Color::Light } else { Color::Dark };
        let kind = match slot % 6 {
            0 => PieceKind::Pawn,
            1 => PieceKind::Knight,
            2 => PieceKind::Bishop,
            3 => PieceKind::Rook,
            4 => PieceKind::Queen,
            _ => PieceKind::King,
        };
        Piece { color, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, Piece, PieceKind, PIECE_SLOTS};

    #[test]
    fn slots_cover_all_twelve_pieces_exactly_once() {
        let mut seen = [false; PIECE_SLOTS];
        for color in [Color::Light, Color::Dark] {
            for kind in PieceKind::ALL {
                let slot = Piece::new(color, kind).slot();
                assert!(!seen[slot], "slot {slot} assigned twice");
                seen[slot] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn from_slot_round_trips() {
        for slot in 0..PIECE_SLOTS {
            assert_eq!(Piece::from_slot(slot).slot(), slot);
        }
    }

    #[test]
    fn opposite_color_flips_both_ways() {
        assert_eq!(Color::Light.opposite(), Color::Dark);
        assert_eq!(Color::Dark.opposite(), Color::Light);
    }
}
