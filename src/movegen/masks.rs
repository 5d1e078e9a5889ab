//! Precomputed boundary masks and single-square stepping.
//!
//! All generation works by shifting square kernels. Shifting a kernel on the
//! a- or h-file can wrap onto the opposite file of an adjacent rank, so every
//! sideways step first clears the files that would wrap. Vertical overflow
//! falls off the end of the u64 and needs no mask.

pub const FILE_A: u64 = 0x0101_0101_0101_0101;
pub const FILE_B: u64 = FILE_A << 1;
pub const FILE_G: u64 = FILE_A << 6;
pub const FILE_H: u64 = FILE_A << 7;
pub const FILE_AB: u64 = FILE_A | FILE_B;
pub const FILE_GH: u64 = FILE_G | FILE_H;

pub const RANK_2: u64 = 0x0000_0000_0000_FF00;
pub const RANK_7: u64 = 0x00FF_0000_0000_0000;

/// One of the eight compass step directions on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ROOK: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub const BISHOP: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    pub const QUEEN: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Shift a mask one square in this direction, returning 0 when the step
    /// leaves the board.
    #[inline]
    pub const fn step(self, mask: u64) -> u64 {
        match self {
            Direction::North => mask << 8,
            Direction::South => mask >> 8,
            Direction::East => (mask & !FILE_H) << 1,
            Direction::West => (mask & !FILE_A) >> 1,
            Direction::NorthEast => (mask & !FILE_H) << 9,
            Direction::NorthWest => (mask & !FILE_A) << 7,
            Direction::SouthEast => (mask & !FILE_H) >> 7,
            Direction::SouthWest => (mask & !FILE_A) >> 9,
        }
    }
}

/// The eight knight jump targets from `origin`, each independently masked
/// against file wraparound. Entries are 0 where the jump leaves the board.
#[inline]
pub const fn knight_targets(origin: u64) -> [u64; 8] {
    [
        (origin & !FILE_H) << 17,
        (origin & !FILE_A) << 15,
        (origin & !FILE_GH) << 10,
        (origin & !FILE_AB) << 6,
        (origin & !FILE_GH) >> 6,
        (origin & !FILE_AB) >> 10,
        (origin & !FILE_H) >> 15,
        (origin & !FILE_A) >> 17,
    ]
}

/// The eight adjacent king step targets from `origin`, edge-masked the same
/// way.
#[inline]
pub const fn king_targets(origin: u64) -> [u64; 8] {
    [
        Direction::North.step(origin),
        Direction::South.step(origin),
        Direction::East.step(origin),
        Direction::West.step(origin),
        Direction::NorthEast.step(origin),
        Direction::NorthWest.step(origin),
        Direction::SouthEast.step(origin),
        Direction::SouthWest.step(origin),
    ]
}

#[cfg(test)]
mod tests {
    use super::{king_targets, knight_targets, Direction, FILE_A, FILE_H};
    use crate::game::chess_types::kernel;

    fn target_count(targets: [u64; 8]) -> u32 {
        targets.iter().map(|t| t.count_ones()).sum()
    }

    #[test]
    fn east_step_does_not_wrap_off_the_h_file() {
        let h1 = kernel(7);
        assert_eq!(Direction::East.step(h1), 0);
        assert_eq!(Direction::NorthEast.step(h1 & FILE_H), 0);
    }

    #[test]
    fn west_step_does_not_wrap_off_the_a_file() {
        let a4 = kernel(24);
        assert_eq!(Direction::West.step(a4), 0);
        assert_eq!(Direction::SouthWest.step(a4 & FILE_A), 0);
    }

    #[test]
    fn knight_targets_from_center_and_corner() {
        let d4 = kernel(27);
        assert_eq!(target_count(knight_targets(d4)), 8);

        let a1 = kernel(0);
        assert_eq!(target_count(knight_targets(a1)), 2);

        let h8 = kernel(63);
        assert_eq!(target_count(knight_targets(h8)), 2);
    }

    #[test]
    fn king_targets_from_center_edge_and_corner() {
        assert_eq!(target_count(king_targets(kernel(27))), 8);
        assert_eq!(target_count(king_targets(kernel(4))), 5);
        assert_eq!(target_count(king_targets(kernel(0))), 3);
    }
}
