//! Player color representation.

use crate::square::{DOWN, DOWN_LEFT, DOWN_RIGHT, UP, UP_LEFT, UP_RIGHT};

/// Represents the two players in chess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Both colors, White first.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Returns the opposite color.
    #[inline]
    pub const fn opposite(self) -> Self {
        match (self as u8) ^ 1 {
            0 => Color::White,
            _ => Color::Black,
        }
    }

    /// Returns the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 0x88 offset of a single pawn push for this color.
    #[inline]
    pub const fn pawn_push(self) -> i8 {
        match self {
            Color::White => UP,
            Color::Black => DOWN,
        }
    }

    /// 0x88 offsets of the two pawn capture directions for this color.
    #[inline]
    pub const fn pawn_captures(self) -> [i8; 2] {
        match self {
            Color::White => [UP_LEFT, UP_RIGHT],
            Color::Black => [DOWN_LEFT, DOWN_RIGHT],
        }
    }

    /// Returns the back rank for this color (0 for White, 7 for Black).
    #[inline]
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Rank index pawns of this color start on.
    #[inline]
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank index on which pawns of this color promote.
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// FEN side-to-move letter.
    #[inline]
    pub const fn to_fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_color() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite(), Color::White);
        assert_eq!(Color::White.opposite().opposite(), Color::White);
    }

    #[test]
    fn color_index() {
        assert_eq!(Color::White.index(), 0);
        assert_eq!(Color::Black.index(), 1);
    }

    #[test]
    fn pawn_offsets() {
        assert_eq!(Color::White.pawn_push(), 16);
        assert_eq!(Color::Black.pawn_push(), -16);
        assert_eq!(Color::White.pawn_captures(), [15, 17]);
        assert_eq!(Color::Black.pawn_captures(), [-17, -15]);
    }

    #[test]
    fn ranks() {
        assert_eq!(Color::White.back_rank(), 0);
        assert_eq!(Color::Black.back_rank(), 7);
        assert_eq!(Color::White.pawn_rank(), 1);
        assert_eq!(Color::Black.pawn_rank(), 6);
        assert_eq!(Color::White.promotion_rank(), 7);
        assert_eq!(Color::Black.promotion_rank(), 0);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Color::White), "White");
        assert_eq!(format!("{}", Color::Black), "Black");
    }
}
