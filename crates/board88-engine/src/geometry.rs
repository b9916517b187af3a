//! Attack geometry on the 0x88 grid.
//!
//! On a 0x88 board the difference between two square addresses uniquely
//! identifies their relative displacement, so a single 240-entry table
//! indexed by `0x77 + from - to` answers two questions in O(1):
//!
//! - which piece types could travel from one square to the other on an
//!   empty board ([`reachable_by`]), as an OR of [`Piece::bit`] masks;
//! - which unit step leads from `from` towards `to` ([`direction`]). For
//!   knight displacements the knight offset itself is stored.
//!
//! Pawns are not encoded; their captures are handled by the callers.

use board88_core::{Piece, Square};

const TABLE_SIZE: usize = 240;
const CENTER: i32 = 0x77;

const KING: u8 = Piece::King.bit();
const KNIGHT: u8 = Piece::Knight.bit();
const DIAGONAL: u8 = Piece::Bishop.bit() | Piece::Queen.bit();
const ORTHOGONAL: u8 = Piece::Rook.bit() | Piece::Queen.bit();

struct Geometry {
    pieces: [u8; TABLE_SIZE],
    directions: [i8; TABLE_SIZE],
}

static GEOMETRY: Geometry = build();

const fn signum(x: i32) -> i32 {
    if x > 0 {
        1
    } else if x < 0 {
        -1
    } else {
        0
    }
}

const fn build() -> Geometry {
    let mut pieces = [0u8; TABLE_SIZE];
    let mut directions = [0i8; TABLE_SIZE];

    // Walk every displacement (df, dr) reachable between two on-board
    // squares; the slot of a pair depends on nothing else.
    let mut dr = -7;
    while dr <= 7 {
        let mut df = -7;
        while df <= 7 {
            if df != 0 || dr != 0 {
                let delta = dr * 16 + df;
                let slot = (CENTER - delta) as usize;
                let (adf, adr) = (df.abs(), dr.abs());

                let mut mask = 0u8;
                let mut step = 0i32;
                if adf == adr {
                    mask |= DIAGONAL;
                    step = signum(dr) * 16 + signum(df);
                } else if adf == 0 || adr == 0 {
                    mask |= ORTHOGONAL;
                    step = signum(dr) * 16 + signum(df);
                } else if (adf == 1 && adr == 2) || (adf == 2 && adr == 1) {
                    mask |= KNIGHT;
                    step = delta;
                }
                if adf <= 1 && adr <= 1 {
                    mask |= KING;
                }

                pieces[slot] = mask;
                directions[slot] = step as i8;
            }
            df += 1;
        }
        dr += 1;
    }

    Geometry { pieces, directions }
}

#[inline]
fn slot(from: Square, to: Square) -> usize {
    (CENTER + from.index() as i32 - to.index() as i32) as usize
}

/// Piece-type mask of every piece that could move from `from` to `to` on
/// an empty board. Zero when no piece can, or when the squares coincide.
#[inline]
pub fn reachable_by(from: Square, to: Square) -> u8 {
    GEOMETRY.pieces[slot(from, to)]
}

/// Whether a piece of type `piece` could move from `from` to `to` on an
/// empty board. Always false for pawns.
#[inline]
pub fn can_reach(piece: Piece, from: Square, to: Square) -> bool {
    reachable_by(from, to) & piece.bit() != 0
}

/// Unit step (or knight offset) leading from `from` towards `to`, 0 if the
/// squares share no line and are not a knight jump apart.
#[inline]
pub fn direction(from: Square, to: Square) -> i8 {
    GEOMETRY.directions[slot(from, to)]
}
