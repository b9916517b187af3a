//! Legal move generation.
//!
//! Moves are generated directly as legal moves; nothing is played out and
//! filtered afterwards. A detector pass ([`pins`]) first annotates the board
//! with check-block squares, pin rays and forbidden king escapes. Each
//! non-king move is then accepted or rejected by looking up its source and
//! destination annotations, and king moves are checked with a cell-scanning
//! attack query while the king is lifted off the board.

mod attacks;
mod pawns;
pub mod perft;
pub(crate) mod pins;

use board88_core::square::{DIAGONAL_DIRS, KING_DIRS, KNIGHT_DIRS, ORTHOGONAL_DIRS};
use board88_core::{Move, MoveFlag, Piece, Square};

use crate::board::{Board, Cell, Check, Info};
use crate::castling::CastlePath;

pub use attacks::{is_king_attacked, is_square_attacked};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of legal moves in any chess position.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Returns true if the list holds exactly this move (flag included).
    pub fn contains(&self, m: Move) -> bool {
        self.as_slice().contains(&m)
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates all legal moves for the side to move.
///
/// Takes the board mutably: the detector rewrites the annotations and the
/// king and en-passant checks edit cells speculatively. The position itself
/// is unchanged on return.
///
/// # Panics
///
/// If the side to move has no king.
pub fn generate_moves(board: &mut Board) -> MoveList {
    assert!(
        board.kings[board.side_to_move.index()].is_on_board(),
        "move generation needs a king for the side to move"
    );

    let mut moves = MoveList::new();
    pins::detect(board);

    generate_king_moves(board, &mut moves);
    if board.check == Check::Double {
        return moves;
    }

    generate_knight_moves(board, &mut moves);
    generate_slider_moves(board, Piece::Bishop, &DIAGONAL_DIRS, &mut moves);
    generate_slider_moves(board, Piece::Rook, &ORTHOGONAL_DIRS, &mut moves);
    generate_slider_moves(board, Piece::Queen, &KING_DIRS, &mut moves);
    pawns::generate_pawn_moves(board, &mut moves);

    moves
}

/// Whether a non-king piece on `from` may legally land on `to`, judged
/// from the detector annotations.
#[inline]
pub(crate) fn annotated_legal(board: &Board, from: Square, to: Square) -> bool {
    let in_check = board.check != Check::None;
    let target = board.info[to.index() as usize];
    match board.info[from.index() as usize] {
        Info::Pin(dir) => !in_check && target == Info::Pin(dir),
        _ => !in_check || target == Info::CheckBlock,
    }
}

fn generate_king_moves(board: &mut Board, moves: &mut MoveList) {
    let us = board.side_to_move;
    let them = us.opposite();
    let from = board.kings[us.index()];
    let home = from.index() as usize;

    // Lift the king so sliders attack through its square.
    let king = board.cells[home];
    board.cells[home] = Cell::EMPTY;
    for &dir in &KING_DIRS {
        let Some(to) = from.offset(dir) else {
            continue;
        };
        let slot = to.index() as usize;
        if board.cells[slot].is_color(us) || board.info[slot] == Info::NoEscape {
            continue;
        }
        if !is_square_attacked(board, to, them) {
            moves.push(Move::normal(from, to));
        }
    }
    board.cells[home] = king;

    if board.check == Check::None {
        for kingside in [true, false] {
            let path = CastlePath::of(us, kingside);
            if can_castle(board, &path) {
                let flag = if kingside {
                    MoveFlag::CastleKingside
                } else {
                    MoveFlag::CastleQueenside
                };
                moves.push(Move::new(path.king_from, path.king_to, flag));
            }
        }
    }
}

fn can_castle(board: &Board, path: &CastlePath) -> bool {
    let us = path.color;
    let cell = |sq: Square| board.cells[sq.index() as usize];

    board.castling.has(us, path.kingside)
        && board.kings[us.index()] == path.king_from
        && cell(path.rook_from) == Cell::new(Piece::Rook, us)
        && path.between.iter().all(|&sq| cell(sq).is_empty())
        && path
            .king_walk
            .iter()
            .all(|&sq| !is_square_attacked(board, sq, us.opposite()))
}

fn generate_knight_moves(board: &Board, moves: &mut MoveList) {
    let us = board.side_to_move;
    for &from in board.squares_of(Piece::Knight, us) {
        // A pinned knight can never stay on its pin line.
        if matches!(board.info[from.index() as usize], Info::Pin(_)) {
            continue;
        }
        for &jump in &KNIGHT_DIRS {
            let Some(to) = from.offset(jump) else {
                continue;
            };
            if !board.cells[to.index() as usize].is_color(us) && annotated_legal(board, from, to) {
                moves.push(Move::normal(from, to));
            }
        }
    }
}

fn generate_slider_moves(board: &Board, piece: Piece, dirs: &[i8], moves: &mut MoveList) {
    let us = board.side_to_move;
    for &from in board.squares_of(piece, us) {
        for &dir in dirs {
            let mut cur = from;
            while let Some(to) = cur.offset(dir) {
                let cell = board.cells[to.index() as usize];
                if cell.is_color(us) {
                    break;
                }
                if annotated_legal(board, from, to) {
                    moves.push(Move::normal(from, to));
                }
                if !cell.is_empty() {
                    break;
                }
                cur = to;
            }
        }
    }
}
