//! Move representation.

use crate::{Piece, Square};
use std::fmt;

/// Flags for special move types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    /// Normal move or capture.
    Normal = 0,
    /// Pawn double push from starting rank.
    DoublePush = 1,
    /// Kingside castling (0-0).
    CastleKingside = 2,
    /// Queenside castling (0-0-0).
    CastleQueenside = 3,
    /// En passant capture.
    EnPassant = 4,
    PromoteKnight = 5,
    PromoteBishop = 6,
    PromoteRook = 7,
    PromoteQueen = 8,
}

impl MoveFlag {
    /// Returns the promotion piece if this is a promotion move.
    #[inline]
    pub const fn promotion_piece(self) -> Option<Piece> {
        match self {
            MoveFlag::PromoteKnight => Some(Piece::Knight),
            MoveFlag::PromoteBishop => Some(Piece::Bishop),
            MoveFlag::PromoteRook => Some(Piece::Rook),
            MoveFlag::PromoteQueen => Some(Piece::Queen),
            _ => None,
        }
    }

    /// Flag promoting to `piece`, or `None` for pawns and kings.
    #[inline]
    pub const fn promote_to(piece: Piece) -> Option<Self> {
        match piece {
            Piece::Knight => Some(MoveFlag::PromoteKnight),
            Piece::Bishop => Some(MoveFlag::PromoteBishop),
            Piece::Rook => Some(MoveFlag::PromoteRook),
            Piece::Queen => Some(MoveFlag::PromoteQueen),
            Piece::Pawn | Piece::King => None,
        }
    }

    /// Returns true if this is a promotion move.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(
            self,
            MoveFlag::PromoteKnight
                | MoveFlag::PromoteBishop
                | MoveFlag::PromoteRook
                | MoveFlag::PromoteQueen
        )
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::CastleKingside | MoveFlag::CastleQueenside)
    }

    const fn from_bits(bits: u32) -> Self {
        match bits {
            1 => MoveFlag::DoublePush,
            2 => MoveFlag::CastleKingside,
            3 => MoveFlag::CastleQueenside,
            4 => MoveFlag::EnPassant,
            5 => MoveFlag::PromoteKnight,
            6 => MoveFlag::PromoteBishop,
            7 => MoveFlag::PromoteRook,
            8 => MoveFlag::PromoteQueen,
            _ => MoveFlag::Normal,
        }
    }
}

const SQUARE_MASK: u32 = 0x7F;
const TO_SHIFT: u32 = 7;
const FLAG_SHIFT: u32 = 14;

/// A chess move.
///
/// Packed into 32 bits: bits 0-6 hold the 0x88 source square, bits 7-13 the
/// destination and bits 14-17 the [`MoveFlag`]. Moves compare equal only
/// when all three fields match.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u32);

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square, flag: MoveFlag) -> Self {
        let encoded = (from.index() as u32 & SQUARE_MASK)
            | ((to.index() as u32 & SQUARE_MASK) << TO_SHIFT)
            | ((flag as u32) << FLAG_SHIFT);
        Move(encoded)
    }

    /// Creates a normal move (no special flags).
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveFlag::Normal)
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        square_from_bits(self.0 & SQUARE_MASK)
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        square_from_bits((self.0 >> TO_SHIFT) & SQUARE_MASK)
    }

    /// Returns the move flag.
    #[inline]
    pub const fn flag(self) -> MoveFlag {
        MoveFlag::from_bits(self.0 >> FLAG_SHIFT)
    }

    /// Raw packed value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the UCI notation for this move (e.g., "e2e4", "e7e8q").
    ///
    /// [`Move::NULL`] renders as "0000".
    pub fn to_uci(self) -> String {
        if self == Move::NULL {
            return "0000".to_string();
        }
        match self.flag().promotion_piece() {
            Some(piece) => format!("{}{}{}", self.from(), self.to(), piece.to_char()),
            None => format!("{}{}", self.from(), self.to()),
        }
    }

    /// Human-facing text: castling as "0-0" / "0-0-0", otherwise UCI form.
    pub fn to_display(self) -> String {
        match self.flag() {
            MoveFlag::CastleKingside => "0-0".to_string(),
            MoveFlag::CastleQueenside => "0-0-0".to_string(),
            _ => self.to_uci(),
        }
    }

    /// Parses a move from UCI notation.
    ///
    /// Only the promotion flag can be read off the text. Castling, en
    /// passant and double pushes are resolved against a position by the
    /// engine.
    pub fn from_uci(s: &str) -> Option<Self> {
        if s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(s.get(0..2)?)?;
        let to = Square::from_algebraic(s.get(2..4)?)?;
        let flag = match s.get(4..)?.chars().next() {
            None => MoveFlag::Normal,
            Some(c) => {
                let (piece, _) = Piece::from_fen_char(c)?;
                MoveFlag::promote_to(piece)?
            }
        };
        Some(Move::new(from, to, flag))
    }

    /// A null move (used as placeholder, not a legal move).
    pub const NULL: Move = Move(0);
}

const fn square_from_bits(bits: u32) -> Square {
    match Square::from_index(bits as u8) {
        Some(sq) => sq,
        None => Square::OTB,
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{File, Rank};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn move_encoding() {
        let m = Move::new(sq("e2"), sq("e4"), MoveFlag::DoublePush);

        assert_eq!(m.from(), sq("e2"));
        assert_eq!(m.to(), sq("e4"));
        assert_eq!(m.flag(), MoveFlag::DoublePush);
    }

    #[test]
    fn move_encoding_uses_bit_layout() {
        let m = Move::new(Square::H8, Square::A1, MoveFlag::PromoteQueen);
        assert_eq!(m.raw() & 0x7F, 0x77);
        assert_eq!((m.raw() >> 7) & 0x7F, 0x00);
        assert_eq!(m.raw() >> 14, 8);
    }

    #[test]
    fn moves_differing_only_in_flag_are_distinct() {
        let a = Move::new(sq("g7"), sq("h8"), MoveFlag::PromoteQueen);
        let b = Move::new(sq("g7"), sq("h8"), MoveFlag::PromoteKnight);
        assert_ne!(a, b);
    }

    #[test]
    fn move_uci() {
        let m = Move::normal(
            Square::new(File::E, Rank::R2),
            Square::new(File::E, Rank::R4),
        );
        assert_eq!(m.to_uci(), "e2e4");

        let promo = Move::new(sq("e7"), sq("e8"), MoveFlag::PromoteQueen);
        assert_eq!(promo.to_uci(), "e7e8q");
    }

    #[test]
    fn move_display_castling() {
        let short = Move::new(Square::E1, Square::G1, MoveFlag::CastleKingside);
        let long = Move::new(Square::E8, Square::C8, MoveFlag::CastleQueenside);
        assert_eq!(short.to_display(), "0-0");
        assert_eq!(long.to_display(), "0-0-0");
        assert_eq!(short.to_uci(), "e1g1");
        assert_eq!(Move::normal(sq("g1"), sq("f3")).to_display(), "g1f3");
    }

    #[test]
    fn move_from_uci() {
        let m = Move::from_uci("e2e4").unwrap();
        assert_eq!(m.from().to_algebraic(), "e2");
        assert_eq!(m.to().to_algebraic(), "e4");
        assert_eq!(m.flag(), MoveFlag::Normal);

        let promo = Move::from_uci("e7e8q").unwrap();
        assert_eq!(promo.flag(), MoveFlag::PromoteQueen);

        assert!(Move::from_uci("invalid").is_none());
        assert!(Move::from_uci("e2e9").is_none());
    }

    #[test]
    fn move_flag_promotion_piece() {
        assert_eq!(MoveFlag::Normal.promotion_piece(), None);
        assert_eq!(MoveFlag::DoublePush.promotion_piece(), None);
        assert_eq!(MoveFlag::CastleKingside.promotion_piece(), None);
        assert_eq!(MoveFlag::EnPassant.promotion_piece(), None);
        for piece in Piece::PROMOTIONS {
            let flag = MoveFlag::promote_to(piece).unwrap();
            assert_eq!(flag.promotion_piece(), Some(piece));
            assert!(flag.is_promotion());
        }
        assert_eq!(MoveFlag::promote_to(Piece::King), None);
        assert_eq!(MoveFlag::promote_to(Piece::Pawn), None);
    }

    #[test]
    fn move_flag_is_castling() {
        assert!(!MoveFlag::Normal.is_castling());
        assert!(!MoveFlag::DoublePush.is_castling());
        assert!(MoveFlag::CastleKingside.is_castling());
        assert!(MoveFlag::CastleQueenside.is_castling());
        assert!(!MoveFlag::EnPassant.is_castling());
        assert!(!MoveFlag::PromoteQueen.is_castling());
    }

    #[test]
    fn move_all_promotions_uci() {
        let (e7, e8) = (sq("e7"), sq("e8"));

        assert_eq!(Move::new(e7, e8, MoveFlag::PromoteKnight).to_uci(), "e7e8n");
        assert_eq!(Move::new(e7, e8, MoveFlag::PromoteBishop).to_uci(), "e7e8b");
        assert_eq!(Move::new(e7, e8, MoveFlag::PromoteRook).to_uci(), "e7e8r");
        assert_eq!(Move::new(e7, e8, MoveFlag::PromoteQueen).to_uci(), "e7e8q");
    }

    #[test]
    fn move_from_uci_all_promotions() {
        for (text, flag) in [
            ("e7e8n", MoveFlag::PromoteKnight),
            ("e7e8N", MoveFlag::PromoteKnight),
            ("e7e8b", MoveFlag::PromoteBishop),
            ("e7e8B", MoveFlag::PromoteBishop),
            ("e7e8r", MoveFlag::PromoteRook),
            ("e7e8R", MoveFlag::PromoteRook),
            ("e7e8q", MoveFlag::PromoteQueen),
            ("e7e8Q", MoveFlag::PromoteQueen),
        ] {
            assert_eq!(Move::from_uci(text).unwrap().flag(), flag, "{text}");
        }
        assert!(Move::from_uci("e7e8x").is_none());
        assert!(Move::from_uci("e7e8k").is_none());
        assert!(Move::from_uci("e7e8p").is_none());
    }

    #[test]
    fn move_null() {
        assert_eq!(Move::NULL.from(), Square::A1);
        assert_eq!(Move::NULL.to(), Square::A1);
        assert_eq!(Move::NULL.to_uci(), "0000");
    }

    #[test]
    fn move_debug_display() {
        let m = Move::normal(sq("e2"), sq("e4"));
        assert_eq!(format!("{:?}", m), "Move(e2e4)");
        assert_eq!(format!("{}", m), "e2e4");
    }

    #[test]
    fn move_from_uci_edge_cases() {
        assert!(Move::from_uci("e2").is_none());
        assert!(Move::from_uci("e2e").is_none());
        assert!(Move::from_uci("e2e4qq").is_none());
        assert!(Move::from_uci("é2e4").is_none());
    }
}
