//! Direct attack queries that scan board cells outward from a square.
//!
//! These do not rely on piece lists or detector annotations, so callers may
//! edit cells speculatively (lifting the king, playing an en-passant capture)
//! and ask again.

use board88_core::square::{DIAGONAL_DIRS, KING_DIRS, KNIGHT_DIRS, ORTHOGONAL_DIRS};
use board88_core::{Color, Piece, Square};

use crate::board::{Board, Cell};

/// Returns true if any piece of `by` attacks `sq`.
pub fn is_square_attacked(board: &Board, sq: Square, by: Color) -> bool {
    let cell = |s: Square| board.cells[s.index() as usize];

    // A pawn of `by` attacks `sq` from one capture step behind it.
    let pawn = Cell::new(Piece::Pawn, by);
    for step in by.pawn_captures() {
        if sq.offset(-step).is_some_and(|from| cell(from) == pawn) {
            return true;
        }
    }

    let knight = Cell::new(Piece::Knight, by);
    if KNIGHT_DIRS
        .iter()
        .any(|&d| sq.offset(d).is_some_and(|from| cell(from) == knight))
    {
        return true;
    }

    let king = Cell::new(Piece::King, by);
    if KING_DIRS
        .iter()
        .any(|&d| sq.offset(d).is_some_and(|from| cell(from) == king))
    {
        return true;
    }

    let queen = Cell::new(Piece::Queen, by);
    let bishop = Cell::new(Piece::Bishop, by);
    if DIAGONAL_DIRS.iter().any(|&d| {
        first_piece_along(board, sq, d).is_some_and(|c| c == bishop || c == queen)
    }) {
        return true;
    }

    let rook = Cell::new(Piece::Rook, by);
    ORTHOGONAL_DIRS.iter().any(|&d| {
        first_piece_along(board, sq, d).is_some_and(|c| c == rook || c == queen)
    })
}

/// Returns true if the king of `color` is attacked.
pub fn is_king_attacked(board: &Board, color: Color) -> bool {
    is_square_attacked(board, board.king_square(color), color.opposite())
}

/// First occupied cell stepping from `from` in direction `dir`.
fn first_piece_along(board: &Board, from: Square, dir: i8) -> Option<Cell> {
    let mut cur = from;
    while let Some(next) = cur.offset(dir) {
        let cell = board.cells[next.index() as usize];
        if !cell.is_empty() {
            return Some(cell);
        }
        cur = next;
    }
    None
}
