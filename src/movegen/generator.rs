//! Pseudo-legal move generation.
//!
//! Moves obey piece-movement and capture rules but are not filtered for
//! leaving one's own king capturable, and captured pieces include the king.
//! Each piece kind has a pure generation function; dispatch goes through a
//! kind-indexed table instead of virtual calls.

use crate::game::board::Board;
use crate::game::chess_move::Move;
use crate::game::chess_types::{kernel, Color, Piece, PieceKind, Square};
use crate::movegen::masks::{king_targets, knight_targets, Direction, RANK_2, RANK_7};

/// Pure per-kind generation function: emits every candidate move for one
/// piece occupying one square.
pub type KindGenerator = fn(&Board, Piece, Square, &mut Vec<Move>);

/// Generation functions indexed by `PieceKind::index()`.
pub const KIND_GENERATORS: [KindGenerator; 6] = [
    generate_pawn_moves,
    generate_knight_moves,
    generate_bishop_moves,
    generate_rook_moves,
    generate_queen_moves,
    generate_king_moves,
];

/// Candidate moves for one piece on one square.
pub fn moves_for_square(board: &Board, piece: Piece, square: Square) -> Vec<Move> {
    let mut moves = Vec::new();
    KIND_GENERATORS[piece.kind.index()](board, piece, square, &mut moves);
    moves
}

/// Every pseudo-legal move for `color` against the current board.
///
/// Scans all 64 squares for each of the color's six kinds, AND-testing
/// occupancy before invoking the per-kind generator.
pub fn moves_for_color(board: &Board, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    for kind in PieceKind::ALL {
        let piece = Piece::new(color, kind);
        let bb = board.bitboard(piece);
        if bb == 0 {
            continue;
        }
        let generate = KIND_GENERATORS[kind.index()];
        for square in 0..64u8 {
            if bb & kernel(square) != 0 {
                generate(board, piece, square, &mut moves);
            }
        }
    }
    moves
}

/// Pawn pushes and captures. No en passant, no promotion: a pawn reaching
/// the last rank simply stops generating forward moves.
fn generate_pawn_moves(board: &Board, piece: Piece, square: Square, out: &mut Vec<Move>) {
    let origin = kernel(square);
    let empty = !board.occupancy_all();
    let enemy = board.occupancy(piece.color.opposite());

    let (forward, start_rank, capture_east, capture_west) = match piece.color {
        Color::Light => (
            Direction::North,
            RANK_2,
            Direction::NorthEast,
            Direction::NorthWest,
        ),
        Color::Dark => (
            Direction::South,
            RANK_7,
            Direction::SouthEast,
            Direction::SouthWest,
        ),
    };

    let single = forward.step(origin);
    if single & empty != 0 {
        out.push(Move::new(piece, origin | single));

        // Double push only from the starting rank, through an empty square.
        if origin & start_rank != 0 {
            let double = forward.step(single);
            if double & empty != 0 {
                out.push(Move::new(piece, origin | double));
            }
        }
    }

    for diagonal in [capture_east, capture_west] {
        let target = diagonal.step(origin);
        if target & enemy != 0 {
            out.push(Move::new(piece, origin | target));
        }
    }
}

fn generate_knight_moves(board: &Board, piece: Piece, square: Square, out: &mut Vec<Move>) {
    let origin = kernel(square);
    let own = board.occupancy(piece.color);
    for target in knight_targets(origin) {
        if target != 0 && target & own == 0 {
            out.push(Move::new(piece, origin | target));
        }
    }
}

fn generate_bishop_moves(board: &Board, piece: Piece, square: Square, out: &mut Vec<Move>) {
    generate_slider_moves(board, piece, square, &Direction::BISHOP, out);
}

fn generate_rook_moves(board: &Board, piece: Piece, square: Square, out: &mut Vec<Move>) {
    generate_slider_moves(board, piece, square, &Direction::ROOK, out);
}

fn generate_queen_moves(board: &Board, piece: Piece, square: Square, out: &mut Vec<Move>) {
    generate_slider_moves(board, piece, square, &Direction::QUEEN, out);
}

fn generate_king_moves(board: &Board, piece: Piece, square: Square, out: &mut Vec<Move>) {
    let origin = kernel(square);
    let own = board.occupancy(piece.color);
    for target in king_targets(origin) {
        if target != 0 && target & own == 0 {
            out.push(Move::new(piece, origin | target));
        }
    }
}

/// Shared ray scan for bishop, rook, and queen.
///
/// Per direction: stop without emitting on an off-board or allied square,
/// emit and continue on empty, emit and stop on an enemy square.
fn generate_slider_moves(
    board: &Board,
    piece: Piece,
    square: Square,
    directions: &[Direction],
    out: &mut Vec<Move>,
) {
    let origin = kernel(square);
    let own = board.occupancy(piece.color);
    let enemy = board.occupancy(piece.color.opposite());

    for direction in directions {
        let mut cursor = direction.step(origin);
        while cursor != 0 && cursor & own == 0 {
            out.push(Move::new(piece, origin | cursor));
            if cursor & enemy != 0 {
                break;
            }
            cursor = direction.step(cursor);
        }
    }
}
