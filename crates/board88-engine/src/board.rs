//! Board state on the 0x88 grid.

use std::fmt;

use board88_core::{Color, FenError, FenRecord, Move, MoveFlag, Piece, Square};
use thiserror::Error;

use crate::castling::CastlingRights;
use crate::movegen::{generate_moves, is_square_attacked};
use crate::piece_list::PieceList;

/// Errors raised while setting up a board or resolving move text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid FEN: {0}")]
    Fen(#[from] FenError),

    #[error("no {0} king on the board")]
    MissingKing(Color),

    #[error("more than one {0} king on the board")]
    DuplicateKing(Color),

    #[error("too many {0} pieces: at most 16 per side")]
    TooManyPieces(Color),

    #[error("{0} is in check with the other side to move")]
    OpponentInCheck(Color),

    #[error("invalid move text: {0}")]
    InvalidMoveText(String),

    #[error("illegal move: {0}")]
    IllegalMove(String),
}

/// Contents of one board square, packed into a byte.
///
/// Zero is empty; otherwise the low three bits hold the piece kind plus one
/// and bit 3 holds the color.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell(u8);

impl Cell {
    pub const EMPTY: Cell = Cell(0);
    const KIND_MASK: u8 = 0b0111;
    const BLACK_BIT: u8 = 0b1000;

    #[inline]
    pub const fn new(piece: Piece, color: Color) -> Self {
        let color_bit = match color {
            Color::White => 0,
            Color::Black => Self::BLACK_BIT,
        };
        Cell((piece as u8 + 1) | color_bit)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when the cell holds a piece of `color`.
    #[inline]
    pub const fn is_color(self, color: Color) -> bool {
        !self.is_empty() && (self.0 & Self::BLACK_BIT != 0) == matches!(color, Color::Black)
    }

    #[inline]
    pub const fn piece(self) -> Option<Piece> {
        match self.0 & Self::KIND_MASK {
            0 => None,
            kind => Piece::from_index(kind - 1),
        }
    }

    #[inline]
    pub const fn color(self) -> Option<Color> {
        if self.is_empty() {
            None
        } else if self.0 & Self::BLACK_BIT != 0 {
            Some(Color::Black)
        } else {
            Some(Color::White)
        }
    }

    #[inline]
    pub fn get(self) -> Option<(Piece, Color)> {
        Some((self.piece()?, self.color()?))
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some((piece, color)) => write!(f, "Cell({})", piece.to_fen_char(color)),
            None => write!(f, "Cell(.)"),
        }
    }
}

/// Per-square annotation written by the check/pin detector.
///
/// Only valid for the side that was to move when the detector last ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Info {
    #[default]
    None,
    /// Moving here captures the checker or interposes on its ray.
    CheckBlock,
    /// Square behind the king on a slider's check ray.
    NoEscape,
    /// On a pin ray leading from the king in this direction, pinner
    /// included.
    Pin(i8),
}

/// How the side to move is being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Check {
    #[default]
    None,
    /// Checked by the piece on this square.
    Single(Square),
    Double,
}

/// How a game ended when the side to move has no legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
}

const NON_KING: usize = 5;

/// A chess position on a 0x88 board.
///
/// `Board` is `Copy`; callers that need to take a move back keep a copy
/// from before [`Board::make_move`] and restore it.
#[derive(Clone, Copy)]
pub struct Board {
    pub(crate) cells: [Cell; 128],
    pub(crate) info: [Info; 128],
    pub(crate) kings: [Square; 2],
    pub(crate) pieces: [[PieceList; NON_KING]; 2],
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) side_to_move: Color,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) check: Check,
}

impl Board {
    /// A board with no pieces, White to move.
    ///
    /// Not a legal position: move generation needs both kings.
    pub fn empty() -> Self {
        Board {
            cells: [Cell::EMPTY; 128],
            info: [Info::None; 128],
            kings: [Square::OTB; 2],
            pieces: [[PieceList::new(); NON_KING]; 2],
            castling: CastlingRights::NONE,
            en_passant: None,
            side_to_move: Color::White,
            halfmove_clock: 0,
            fullmove_number: 1,
            check: Check::None,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_record(&FenRecord::default()).expect("starting position is valid")
    }

    /// Loads a board from a parsed FEN record.
    pub fn from_record(record: &FenRecord) -> Result<Self, BoardError> {
        let mut board = Board::empty();
        let mut counts = [0usize; 2];

        for index in 0..64u8 {
            let Some(sq) = Square::from_index64(index) else {
                continue;
            };
            let Some((piece, color)) = record.piece_at(sq) else {
                continue;
            };
            counts[color.index()] += 1;
            if counts[color.index()] > PieceList::CAPACITY {
                return Err(BoardError::TooManyPieces(color));
            }
            if piece == Piece::King && board.kings[color.index()].is_on_board() {
                return Err(BoardError::DuplicateKing(color));
            }
            board.put_piece(sq, piece, color);
        }

        for color in Color::ALL {
            if !board.kings[color.index()].is_on_board() {
                return Err(BoardError::MissingKing(color));
            }
        }

        let them = record.side_to_move.opposite();
        if is_square_attacked(&board, board.kings[them.index()], record.side_to_move) {
            return Err(BoardError::OpponentInCheck(them));
        }

        board.side_to_move = record.side_to_move;
        board.castling = record.castling.into();
        board.en_passant = record.en_passant;
        board.halfmove_clock = record.halfmove_clock;
        board.fullmove_number = record.fullmove_number;
        Ok(board)
    }

    /// Dumps the board into a FEN record.
    pub fn to_record(&self) -> FenRecord {
        let mut record = FenRecord::empty();
        for index in 0..64u8 {
            if let Some(sq) = Square::from_index64(index) {
                record.placement[index as usize] = self.piece_at(sq);
            }
        }
        record.side_to_move = self.side_to_move;
        record.castling = self.castling.into();
        record.en_passant = self.en_passant;
        record.halfmove_clock = self.halfmove_clock;
        record.fullmove_number = self.fullmove_number;
        record
    }

    /// Creates a board from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        Self::from_record(&FenRecord::parse(fen)?)
    }

    /// Converts the board to a FEN string.
    pub fn to_fen(&self) -> String {
        self.to_record().to_fen()
    }

    /// Replaces this board with the position in `fen`.
    ///
    /// On error the board is left untouched.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), BoardError> {
        *self = Self::from_fen(fen)?;
        Ok(())
    }

    /// Returns the piece and color at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.cells[sq.index() as usize].get()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    /// Squares holding pieces of the given type and color, in no
    /// particular order.
    pub fn squares_of(&self, piece: Piece, color: Color) -> &[Square] {
        match piece {
            Piece::King => std::slice::from_ref(&self.kings[color.index()]),
            _ => self.pieces[color.index()][piece.index()].as_slice(),
        }
    }

    /// Check state found by the most recent move generation.
    ///
    /// Reset to [`Check::None`] by [`Board::make_move`]; use
    /// [`Board::in_check`] for a query that needs no generation pass.
    #[inline]
    pub fn check(&self) -> Check {
        self.check
    }

    /// Returns true if the side to move is in check.
    pub fn in_check(&self) -> bool {
        let us = self.side_to_move;
        is_square_attacked(self, self.kings[us.index()], us.opposite())
    }

    /// Returns how the game ended, or `None` while the side to move has a
    /// legal move.
    pub fn outcome(&mut self) -> Option<Outcome> {
        if !generate_moves(self).is_empty() {
            return None;
        }
        Some(match self.check {
            Check::None => Outcome::Stalemate,
            Check::Single(_) | Check::Double => Outcome::Checkmate {
                winner: self.side_to_move.opposite(),
            },
        })
    }

    /// Resolves move text against the legal moves of this position.
    ///
    /// Accepts UCI coordinates ("e2e4", "e7e8q") and the castling forms
    /// "0-0" / "0-0-0".
    pub fn parse_move(&mut self, text: &str) -> Result<Move, BoardError> {
        let legal = generate_moves(self);
        let found = match text {
            "0-0" | "O-O" => legal
                .iter()
                .find(|m| m.flag() == MoveFlag::CastleKingside)
                .copied(),
            "0-0-0" | "O-O-O" => legal
                .iter()
                .find(|m| m.flag() == MoveFlag::CastleQueenside)
                .copied(),
            _ => {
                let wanted = Move::from_uci(text)
                    .ok_or_else(|| BoardError::InvalidMoveText(text.to_string()))?;
                legal
                    .iter()
                    .find(|m| {
                        m.from() == wanted.from()
                            && m.to() == wanted.to()
                            && m.flag().promotion_piece() == wanted.flag().promotion_piece()
                    })
                    .copied()
            }
        };
        found.ok_or_else(|| BoardError::IllegalMove(text.to_string()))
    }

    /// Parses `text` and plays it.
    pub fn apply_text_move(&mut self, text: &str) -> Result<Move, BoardError> {
        let m = self.parse_move(text)?;
        self.make_move(m);
        Ok(m)
    }

    #[inline]
    pub(crate) fn list_mut(&mut self, piece: Piece, color: Color) -> &mut PieceList {
        debug_assert!(piece != Piece::King);
        &mut self.pieces[color.index()][piece.index()]
    }

    pub(crate) fn put_piece(&mut self, sq: Square, piece: Piece, color: Color) {
        self.cells[sq.index() as usize] = Cell::new(piece, color);
        match piece {
            Piece::King => self.kings[color.index()] = sq,
            _ => self.list_mut(piece, color).push(sq),
        }
    }

    /// Verifies that cells, piece lists and king trackers agree.
    pub fn check_consistency(&self) -> Result<(), String> {
        let mut listed = 0;
        for color in Color::ALL {
            let king = self.kings[color.index()];
            if king.is_on_board() {
                if self.piece_at(king) != Some((Piece::King, color)) {
                    return Err(format!("{} king tracker {} is stale", color, king));
                }
                listed += 1;
            }
            for piece in &Piece::ALL[..NON_KING] {
                for &sq in self.pieces[color.index()][piece.index()].iter() {
                    if self.piece_at(sq) != Some((*piece, color)) {
                        return Err(format!("{} {} listed on {} but not there", color, piece, sq));
                    }
                    listed += 1;
                }
            }
        }

        let mut occupied = 0;
        for index in 0..128u8 {
            let cell = self.cells[index as usize];
            if cell.is_empty() {
                continue;
            }
            if Square::from_index(index).is_none() {
                return Err(format!("off-board cell {:#04x} is occupied", index));
            }
            occupied += 1;
        }

        if occupied != listed {
            return Err(format!("{} occupied cells but {} listed pieces", occupied, listed));
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl PartialEq for Board {
    /// Boards are equal when they describe the same position; annotations
    /// and piece-list order are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
            && self.side_to_move == other.side_to_move
            && self.castling == other.castling
            && self.en_passant == other.en_passant
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let c = Square::from_index(rank * 16 + file)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', |(piece, color)| piece.to_fen_char(color));
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn cell_packing() {
        for piece in Piece::ALL {
            for color in Color::ALL {
                let cell = Cell::new(piece, color);
                assert!(!cell.is_empty());
                assert_eq!(cell.get(), Some((piece, color)));
                assert!(cell.is_color(color));
                assert!(!cell.is_color(color.opposite()));
            }
        }
        assert_eq!(Cell::EMPTY.get(), None);
        assert!(!Cell::EMPTY.is_color(Color::White));
        assert!(!Cell::EMPTY.is_color(Color::Black));
    }

    #[test]
    fn startpos_fen_roundtrip() {
        let board = Board::startpos();
        assert_eq!(board.to_fen(), FenRecord::STARTPOS);
        assert_eq!(board.king_square(Color::White), Square::E1);
        assert_eq!(board.king_square(Color::Black), Square::E8);
        assert_eq!(board.squares_of(Piece::Pawn, Color::White).len(), 8);
        assert_eq!(board.squares_of(Piece::Knight, Color::Black).len(), 2);
        board.check_consistency().unwrap();
    }

    #[test]
    fn custom_fen_roundtrip() {
        for fen in [
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
            KIWIPETE,
            "r2qkbnr/pp2p1Pp/1np1b3/3pPp2/3P4/8/PPP2PP1/RNBQKBNR w KQkq f6 0 8",
            "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1",
        ] {
            let board = Board::from_fen(fen).unwrap();
            assert_eq!(board.to_fen(), fen);
            board.check_consistency().unwrap();
        }
    }

    #[test]
    fn piece_at() {
        let board = Board::startpos();
        assert_eq!(board.piece_at(Square::E1), Some((Piece::King, Color::White)));
        assert_eq!(board.piece_at(Square::D8), Some((Piece::Queen, Color::Black)));
        assert_eq!(board.piece_at(sq("e4")), None);
    }

    #[test]
    fn setup_errors() {
        assert!(matches!(
            Board::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(BoardError::MissingKing(Color::Black))
        ));
        assert!(matches!(
            Board::from_fen("4k3/8/8/8/8/8/8/8 w - - 0 1"),
            Err(BoardError::MissingKing(Color::White))
        ));
        assert!(matches!(
            Board::from_fen("4k3/8/8/8/8/8/8/K3K3 w - - 0 1"),
            Err(BoardError::DuplicateKing(Color::White))
        ));
        assert!(matches!(
            Board::from_fen("4k3/8/8/8/PPPPPPPP/PPPPPPPP/P7/4K3 w - - 0 1"),
            Err(BoardError::TooManyPieces(Color::White))
        ));
        assert!(matches!(
            Board::from_fen("not a fen"),
            Err(BoardError::Fen(FenError::InvalidPartCount(3)))
        ));
        assert!(matches!(
            Board::from_fen("4k3/8/8/8/8/8/8/r3K3 b - - 0 1"),
            Err(BoardError::OpponentInCheck(Color::White))
        ));
        assert!(matches!(
            Board::from_fen("4k3/8/8/8/8/3n4/8/4K3 b - - 0 1"),
            Err(BoardError::OpponentInCheck(Color::White))
        ));
        // The same placements are fine with the checked side to move.
        assert!(Board::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").is_ok());
    }

    #[test]
    fn set_fen_keeps_board_on_error() {
        let mut board = Board::from_fen(KIWIPETE).unwrap();
        assert!(board.set_fen("8/8/8/8 w - - 0 1").is_err());
        assert_eq!(board.to_fen(), KIWIPETE);
        board.set_fen(FenRecord::STARTPOS).unwrap();
        assert_eq!(board, Board::startpos());
    }

    #[test]
    fn in_check_and_outcome() {
        let mut mated =
            Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        assert!(mated.in_check());
        assert_eq!(
            mated.outcome(),
            Some(Outcome::Checkmate {
                winner: Color::Black
            })
        );

        let mut stalemate = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(!stalemate.in_check());
        assert_eq!(stalemate.outcome(), Some(Outcome::Stalemate));

        let mut start = Board::startpos();
        assert!(!start.in_check());
        assert_eq!(start.outcome(), None);
    }

    #[test]
    fn parse_move_resolves_flags() {
        let mut board = Board::from_fen(KIWIPETE).unwrap();
        assert_eq!(board.parse_move("e1g1").unwrap().flag(), MoveFlag::CastleKingside);
        assert_eq!(board.parse_move("0-0-0").unwrap().flag(), MoveFlag::CastleQueenside);
        assert_eq!(board.parse_move("a2a4").unwrap().flag(), MoveFlag::DoublePush);
        assert_eq!(board.parse_move("e2a6").unwrap().flag(), MoveFlag::Normal);
        assert!(matches!(
            board.parse_move("e2e9"),
            Err(BoardError::InvalidMoveText(_))
        ));
        assert!(matches!(
            board.parse_move("a2a5"),
            Err(BoardError::IllegalMove(_))
        ));
    }

    #[test]
    fn parse_move_needs_promotion_piece() {
        let mut board = Board::from_fen("n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1").unwrap();
        assert_eq!(
            board.parse_move("g2g1n").unwrap().flag(),
            MoveFlag::PromoteKnight
        );
        assert!(matches!(
            board.parse_move("g2g1"),
            Err(BoardError::IllegalMove(_))
        ));
    }

    #[test]
    fn apply_text_move_plays_sequence() {
        let mut board = Board::startpos();
        for text in ["e2e4", "e7e5", "g1f3"] {
            board.apply_text_move(text).unwrap();
        }
        assert_eq!(
            board.to_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
        );
        board.check_consistency().unwrap();
    }

    #[test]
    fn display_shows_diagram() {
        let text = Board::startpos().to_string();
        assert!(text.starts_with("8  r n b q k b n r"));
        assert!(text.contains("   a b c d e f g h"));
        assert!(text.ends_with(FenRecord::STARTPOS));
    }
}
