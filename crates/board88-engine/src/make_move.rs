//! Applying a move to a board in place.

use board88_core::{Color, Move, MoveFlag, Piece};

use crate::board::{Board, Cell, Check};
use crate::castling::CastlePath;

impl Board {
    /// Plays `m`, which must come from [`crate::generate_moves`] for this
    /// position.
    ///
    /// There is no unmake; keep a copy of the board to take a move back.
    ///
    /// # Panics
    ///
    /// If the source square is empty.
    pub fn make_move(&mut self, m: Move) {
        let us = self.side_to_move;
        let them = us.opposite();
        let (from, to, flag) = (m.from(), m.to(), m.flag());

        let (piece, _) = self
            .piece_at(from)
            .expect("make_move called with an empty source square");

        let victim_sq = match flag {
            MoveFlag::EnPassant => to
                .offset(-us.pawn_push())
                .expect("en-passant victim is on the board"),
            _ => to,
        };
        let captured = self.cells[victim_sq.index() as usize].get();
        if let Some((victim, _)) = captured {
            self.cells[victim_sq.index() as usize] = Cell::EMPTY;
            self.list_mut(victim, them).remove(victim_sq);
            if victim == Piece::Rook {
                self.castling.remove_rook_home(victim_sq);
            }
        }

        self.cells[from.index() as usize] = Cell::EMPTY;
        match flag.promotion_piece() {
            Some(promoted) => {
                self.list_mut(Piece::Pawn, us).remove(from);
                self.put_piece(to, promoted, us);
            }
            None => {
                self.cells[to.index() as usize] = Cell::new(piece, us);
                match piece {
                    Piece::King => {
                        self.kings[us.index()] = to;
                        self.castling.remove_color(us);
                    }
                    _ => {
                        self.list_mut(piece, us).relocate(from, to);
                    }
                }
            }
        }

        if flag.is_castling() {
            let path = CastlePath::of(us, flag == MoveFlag::CastleKingside);
            self.cells[path.rook_from.index() as usize] = Cell::EMPTY;
            self.cells[path.rook_to.index() as usize] = Cell::new(Piece::Rook, us);
            self.list_mut(Piece::Rook, us)
                .relocate(path.rook_from, path.rook_to);
        }
        if piece == Piece::Rook {
            self.castling.remove_rook_home(from);
        }

        self.en_passant = match flag {
            MoveFlag::DoublePush => from.offset(us.pawn_push()),
            _ => None,
        };

        if piece == Piece::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if us == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = them;
        self.check = Check::None;
    }
}
