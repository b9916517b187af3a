//! Pawn moves: pushes, captures, promotions and en passant.

use board88_core::{Move, MoveFlag, Piece, Square};

use super::{annotated_legal, is_square_attacked, MoveList};
use crate::board::{Board, Cell};

/// Promotion flags in generation order.
const PROMOTIONS: [MoveFlag; 4] = [
    MoveFlag::PromoteQueen,
    MoveFlag::PromoteRook,
    MoveFlag::PromoteBishop,
    MoveFlag::PromoteKnight,
];

pub(super) fn generate_pawn_moves(board: &mut Board, moves: &mut MoveList) {
    let us = board.side_to_move;
    let them = us.opposite();
    let push = us.pawn_push();
    let pawns = board.pieces[us.index()][Piece::Pawn.index()];

    for &from in pawns.iter() {
        if let Some(to) = from.offset(push) {
            if board.cells[to.index() as usize].is_empty() {
                if annotated_legal(board, from, to) {
                    push_pawn_move(moves, from, to, us.promotion_rank());
                }
                if from.rank_index() == us.pawn_rank() {
                    if let Some(two) = to.offset(push) {
                        if board.cells[two.index() as usize].is_empty()
                            && annotated_legal(board, from, two)
                        {
                            moves.push(Move::new(from, two, MoveFlag::DoublePush));
                        }
                    }
                }
            }
        }

        for step in us.pawn_captures() {
            let Some(to) = from.offset(step) else {
                continue;
            };
            if board.cells[to.index() as usize].is_color(them) && annotated_legal(board, from, to) {
                push_pawn_move(moves, from, to, us.promotion_rank());
            }
        }
    }

    if let Some(target) = board.en_passant {
        generate_en_passant(board, target, moves);
    }
}

fn push_pawn_move(moves: &mut MoveList, from: Square, to: Square, promotion_rank: u8) {
    if to.rank_index() == promotion_rank {
        for flag in PROMOTIONS {
            moves.push(Move::new(from, to, flag));
        }
    } else {
        moves.push(Move::normal(from, to));
    }
}

/// Finds capturers by stepping back from the target square, then plays each
/// capture on the cells to see whether it exposes the king.
fn generate_en_passant(board: &mut Board, target: Square, moves: &mut MoveList) {
    let us = board.side_to_move;
    let them = us.opposite();
    let Some(victim) = target.offset(-us.pawn_push()) else {
        return;
    };
    let pawn = Cell::new(Piece::Pawn, us);
    if !board.cells[target.index() as usize].is_empty()
        || board.cells[victim.index() as usize] != Cell::new(Piece::Pawn, them)
    {
        return;
    }

    for step in us.pawn_captures() {
        let Some(from) = target.offset(-step) else {
            continue;
        };
        if board.cells[from.index() as usize] != pawn {
            continue;
        }
        if en_passant_is_safe(board, from, target, victim) {
            moves.push(Move::new(from, target, MoveFlag::EnPassant));
        }
    }
}

fn en_passant_is_safe(board: &mut Board, from: Square, to: Square, victim: Square) -> bool {
    let us = board.side_to_move;
    let (from_i, to_i, victim_i) = (
        from.index() as usize,
        to.index() as usize,
        victim.index() as usize,
    );
    let (mover, captured) = (board.cells[from_i], board.cells[victim_i]);

    board.cells[from_i] = Cell::EMPTY;
    board.cells[victim_i] = Cell::EMPTY;
    board.cells[to_i] = mover;
    let safe = !is_square_attacked(board, board.kings[us.index()], us.opposite());
    board.cells[to_i] = Cell::EMPTY;
    board.cells[victim_i] = captured;
    board.cells[from_i] = mover;

    safe
}
