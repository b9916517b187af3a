//! Check and pin detection for the side to move.
//!
//! One pass over the enemy piece lists annotates the board's `info` array:
//!
//! - [`Info::CheckBlock`] on every square a non-king move may land on to
//!   resolve a single check (the checker itself and any interposing square);
//! - [`Info::Pin`] on every square of a pin ray, from just beyond the king
//!   up to and including the pinning slider;
//! - [`Info::NoEscape`] on the square behind the king on a slider's check
//!   ray.
//!
//! and records the [`Check`] descriptor. Scanning stops as soon as a second
//! checker is found, since only king moves remain in double check.

use std::ops::ControlFlow;

use board88_core::{Color, Piece, Square};

use crate::board::{Board, Cell, Check, Info};
use crate::geometry;

#[derive(Default)]
struct Scan {
    checks: u8,
    checker: Option<Square>,
    check_ray: Option<i8>,
}

impl Scan {
    fn add_check(&mut self, sq: Square) -> ControlFlow<()> {
        self.checks += 1;
        self.checker = Some(sq);
        if self.checks > 1 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

/// Recomputes the annotations and check descriptor for the side to move.
pub(crate) fn detect(board: &mut Board) {
    board.info = [Info::None; 128];
    board.check = Check::None;

    let us = board.side_to_move;
    let king = board.kings[us.index()];
    let mut scan = Scan::default();

    let flow = scan_all(board, king, us, &mut scan);

    board.check = match (flow, scan.checker) {
        (ControlFlow::Break(()), _) => Check::Double,
        (ControlFlow::Continue(()), Some(sq)) => Check::Single(sq),
        (ControlFlow::Continue(()), None) => Check::None,
    };

    if let (Check::Single(_), Some(dir)) = (board.check, scan.check_ray) {
        if let Some(behind) = king.offset(-dir) {
            if !board.cells[behind.index() as usize].is_color(us) {
                board.info[behind.index() as usize] = Info::NoEscape;
            }
        }
    }
}

fn scan_all(board: &mut Board, king: Square, us: Color, scan: &mut Scan) -> ControlFlow<()> {
    scan_knights(board, king, us, scan)?;
    scan_pawns(board, king, us, scan)?;
    scan_sliders(board, king, us, scan)
}

fn scan_knights(board: &mut Board, king: Square, us: Color, scan: &mut Scan) -> ControlFlow<()> {
    let knights = board.pieces[us.opposite().index()][Piece::Knight.index()];
    for &sq in knights.iter() {
        if geometry::can_reach(Piece::Knight, sq, king) {
            board.info[sq.index() as usize] = Info::CheckBlock;
            scan.add_check(sq)?;
        }
    }
    ControlFlow::Continue(())
}

fn scan_pawns(board: &mut Board, king: Square, us: Color, scan: &mut Scan) -> ControlFlow<()> {
    let them = us.opposite();
    let pawn = Cell::new(Piece::Pawn, them);
    for step in them.pawn_captures() {
        let Some(sq) = king.offset(-step) else {
            continue;
        };
        if board.cells[sq.index() as usize] == pawn {
            board.info[sq.index() as usize] = Info::CheckBlock;
            scan.add_check(sq)?;
        }
    }
    ControlFlow::Continue(())
}

fn scan_sliders(board: &mut Board, king: Square, us: Color, scan: &mut Scan) -> ControlFlow<()> {
    let them = us.opposite();
    for piece in [Piece::Bishop, Piece::Rook, Piece::Queen] {
        let sliders = board.pieces[them.index()][piece.index()];
        for &sq in sliders.iter() {
            if !geometry::can_reach(piece, sq, king) {
                continue;
            }
            let dir = geometry::direction(king, sq);
            match walk_ray(board, king, sq, dir, us) {
                Ray::Blocked => {}
                Ray::Check => {
                    mark_ray(board, king, sq, dir, Info::CheckBlock);
                    scan.check_ray = Some(dir);
                    scan.add_check(sq)?;
                }
                Ray::Pin => mark_ray(board, king, sq, dir, Info::Pin(dir)),
            }
        }
    }
    ControlFlow::Continue(())
}

enum Ray {
    Check,
    Pin,
    Blocked,
}

/// Classifies the squares strictly between the king and a slider.
fn walk_ray(board: &Board, king: Square, slider: Square, dir: i8, us: Color) -> Ray {
    let mut candidate = false;
    let mut cur = king;
    while let Some(next) = cur.offset(dir) {
        if next == slider {
            return if candidate { Ray::Pin } else { Ray::Check };
        }
        let cell = board.cells[next.index() as usize];
        if !cell.is_empty() {
            if candidate || !cell.is_color(us) {
                return Ray::Blocked;
            }
            candidate = true;
        }
        cur = next;
    }
    Ray::Blocked
}

/// Annotates king-exclusive to slider-inclusive.
fn mark_ray(board: &mut Board, king: Square, slider: Square, dir: i8, info: Info) {
    let mut cur = king;
    while let Some(next) = cur.offset(dir) {
        board.info[next.index() as usize] = info;
        if next == slider {
            break;
        }
        cur = next;
    }
}
