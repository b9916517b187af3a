//! Board square representation on the 0x88 grid.

use std::fmt;

/// One rank up.
pub const UP: i8 = 16;
/// One rank down.
pub const DOWN: i8 = -16;
/// One file towards the a-file.
pub const LEFT: i8 = -1;
/// One file towards the h-file.
pub const RIGHT: i8 = 1;
pub const UP_LEFT: i8 = UP + LEFT;
pub const UP_RIGHT: i8 = UP + RIGHT;
pub const DOWN_LEFT: i8 = DOWN + LEFT;
pub const DOWN_RIGHT: i8 = DOWN + RIGHT;

/// The four diagonal unit steps.
pub const DIAGONAL_DIRS: [i8; 4] = [UP_LEFT, UP_RIGHT, DOWN_LEFT, DOWN_RIGHT];

/// The four orthogonal unit steps.
pub const ORTHOGONAL_DIRS: [i8; 4] = [LEFT, UP, RIGHT, DOWN];

/// All eight unit steps a king can take.
pub const KING_DIRS: [i8; 8] = [
    LEFT, UP_LEFT, UP, UP_RIGHT, RIGHT, DOWN_RIGHT, DOWN, DOWN_LEFT,
];

/// The eight knight jumps.
pub const KNIGHT_DIRS: [i8; 8] = [
    UP + UP_LEFT,
    UP + UP_RIGHT,
    RIGHT + UP_RIGHT,
    RIGHT + DOWN_RIGHT,
    DOWN + DOWN_RIGHT,
    DOWN + DOWN_LEFT,
    LEFT + DOWN_LEFT,
    LEFT + UP_LEFT,
];

/// A file (column) on the chess board, from A to H.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// All files in order.
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    /// Creates a file from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(File::A),
            1 => Some(File::B),
            2 => Some(File::C),
            3 => Some(File::D),
            4 => Some(File::E),
            5 => Some(File::F),
            6 => Some(File::G),
            7 => Some(File::H),
            _ => None,
        }
    }

    /// Creates a file from a character ('a'-'h' or 'A'-'H').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'a' => Some(File::A),
            'b' => Some(File::B),
            'c' => Some(File::C),
            'd' => Some(File::D),
            'e' => Some(File::E),
            'f' => Some(File::F),
            'g' => Some(File::G),
            'h' => Some(File::H),
            _ => None,
        }
    }

    /// Returns the index (0-7).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the character representation.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A rank (row) on the chess board, from 1 to 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    /// All ranks in order.
    pub const ALL: [Rank; 8] = [
        Rank::R1,
        Rank::R2,
        Rank::R3,
        Rank::R4,
        Rank::R5,
        Rank::R6,
        Rank::R7,
        Rank::R8,
    ];

    /// Creates a rank from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Rank::R1),
            1 => Some(Rank::R2),
            2 => Some(Rank::R3),
            3 => Some(Rank::R4),
            4 => Some(Rank::R5),
            5 => Some(Rank::R6),
            6 => Some(Rank::R7),
            7 => Some(Rank::R8),
            _ => None,
        }
    }

    /// Creates a rank from a character ('1'-'8').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Rank::R1),
            '2' => Some(Rank::R2),
            '3' => Some(Rank::R3),
            '4' => Some(Rank::R4),
            '5' => Some(Rank::R5),
            '6' => Some(Rank::R6),
            '7' => Some(Rank::R7),
            '8' => Some(Rank::R8),
            _ => None,
        }
    }

    /// Returns the index (0-7).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the character representation.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A square on the 0x88 board.
///
/// The low nibble holds the file (0-7) and the high nibble the rank (0-7).
/// Any address with a bit of `0x88` set lies off the board, so the edge
/// test after stepping in some direction is a single mask:
///
/// ```text
///   +------------------------+
/// 8 |70 71 72 73 74 75 76 77 | 78 .. 7f
/// 7 |60 61 62 63 64 65 66 67 | 68 .. 6f
/// ...
/// 1 |00 01 02 03 04 05 06 07 | 08 .. 0f
///   +------------------------+
///     a  b  c  d  e  f  g  h
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Sentinel for "no square" (off the board).
    pub const OTB: Square = Square(0x88);

    /// Creates a square from file and rank.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Square(rank.index() * 16 + file.index())
    }

    /// Creates a square from a raw 0x88 address, if it lies on the board.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index & 0x88 == 0 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Creates a square from a dense 0-63 index (a1 = 0, h8 = 63).
    #[inline]
    pub const fn from_index64(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square((index >> 3) * 16 + (index & 7)))
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = match File::from_char(bytes[0] as char) {
            Some(f) => f,
            None => return None,
        };
        let rank = match Rank::from_char(bytes[1] as char) {
            Some(r) => r,
            None => return None,
        };
        Some(Square::new(file, rank))
    }

    /// Returns the raw 0x88 address.
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the dense 0-63 index.
    #[inline]
    pub const fn index64(self) -> u8 {
        (self.0 >> 4) * 8 + (self.0 & 7)
    }

    /// Returns true unless this is the [`Square::OTB`] sentinel.
    #[inline]
    pub const fn is_on_board(self) -> bool {
        self.0 & 0x88 == 0
    }

    /// Steps `delta` away on the 0x88 grid, returning `None` off the board.
    #[inline]
    pub const fn offset(self, delta: i8) -> Option<Self> {
        Square::from_index(self.0.wrapping_add(delta as u8))
    }

    /// Rank index (0-7).
    #[inline]
    pub const fn rank_index(self) -> u8 {
        self.0 >> 4
    }

    /// File index (0-7).
    #[inline]
    pub const fn file_index(self) -> u8 {
        self.0 & 7
    }

    /// Returns the file of this square.
    #[inline]
    pub const fn file(self) -> File {
        match File::from_index(self.0 & 7) {
            Some(f) => f,
            None => unreachable!(),
        }
    }

    /// Returns the rank of this square.
    #[inline]
    pub const fn rank(self) -> Rank {
        match Rank::from_index((self.0 >> 4) & 7) {
            Some(r) => r,
            None => unreachable!(),
        }
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        if !self.is_on_board() {
            return "-".to_string();
        }
        format!("{}{}", self.file(), self.rank())
    }

    pub const A1: Square = Square(0x00);
    pub const B1: Square = Square(0x01);
    pub const C1: Square = Square(0x02);
    pub const D1: Square = Square(0x03);
    pub const E1: Square = Square(0x04);
    pub const F1: Square = Square(0x05);
    pub const G1: Square = Square(0x06);
    pub const H1: Square = Square(0x07);
    pub const A8: Square = Square(0x70);
    pub const B8: Square = Square(0x71);
    pub const C8: Square = Square(0x72);
    pub const D8: Square = Square(0x73);
    pub const E8: Square = Square(0x74);
    pub const F8: Square = Square(0x75);
    pub const G8: Square = Square(0x76);
    pub const H8: Square = Square(0x77);
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn square_new() {
        let e4 = Square::new(File::E, Rank::R4);
        assert_eq!(e4.file(), File::E);
        assert_eq!(e4.rank(), Rank::R4);
        assert_eq!(e4.index(), 0x34);
        assert_eq!(e4.index64(), 28);
    }

    #[test]
    fn square_from_algebraic() {
        assert_eq!(Square::from_algebraic("a1"), Some(Square::A1));
        assert_eq!(
            Square::from_algebraic("e4"),
            Some(Square::new(File::E, Rank::R4))
        );
        assert_eq!(Square::from_algebraic("h8"), Some(Square::H8));
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic(""), None);
    }

    #[test]
    fn square_to_algebraic() {
        assert_eq!(Square::A1.to_algebraic(), "a1");
        assert_eq!(Square::H8.to_algebraic(), "h8");
        assert_eq!(Square::new(File::E, Rank::R4).to_algebraic(), "e4");
        assert_eq!(Square::OTB.to_algebraic(), "-");
    }

    #[test]
    fn off_board_addresses() {
        assert!(Square::from_index(0x08).is_none());
        assert!(Square::from_index(0x78).is_none());
        assert!(Square::from_index(0x80).is_none());
        assert!(!Square::OTB.is_on_board());
        assert!(Square::H8.is_on_board());
    }

    #[test]
    fn offset_stops_at_edges() {
        assert_eq!(Square::A1.offset(LEFT), None);
        assert_eq!(Square::A1.offset(DOWN), None);
        assert_eq!(Square::H1.offset(RIGHT), None);
        assert_eq!(Square::H8.offset(UP_RIGHT), None);
        assert_eq!(Square::A1.offset(UP_RIGHT), Square::from_algebraic("b2"));
        assert_eq!(Square::G1.offset(UP + UP_RIGHT), Square::from_algebraic("h3"));
        assert_eq!(Square::B1.offset(LEFT + DOWN_LEFT), None);
    }

    #[test]
    fn knight_dirs_reach_eight_squares_from_center() {
        let d4 = Square::from_algebraic("d4").unwrap();
        let reached = KNIGHT_DIRS.iter().filter_map(|&d| d4.offset(d)).count();
        assert_eq!(reached, 8);
        let reached = KNIGHT_DIRS.iter().filter_map(|&d| Square::A1.offset(d)).count();
        assert_eq!(reached, 2);
    }

    proptest! {
        #[test]
        fn dense_index_roundtrip(i in 0u8..64) {
            let sq = Square::from_index64(i).unwrap();
            prop_assert!(sq.is_on_board());
            prop_assert_eq!(sq.index64(), i);
        }

        #[test]
        fn offset_matches_file_rank_arithmetic(i in 0u8..64, d in 0usize..8) {
            let sq = Square::from_index64(i).unwrap();
            let step = KING_DIRS[d];
            let df = match step.rem_euclid(16) { 15 => -1, 0 => 0, _ => 1 };
            let dr = (step - df as i8) / 16;
            let file = sq.file_index() as i8 + df as i8;
            let rank = sq.rank_index() as i8 + dr;
            let expected = (0..8).contains(&file) && (0..8).contains(&rank);
            prop_assert_eq!(sq.offset(step).is_some(), expected);
        }
    }
}
