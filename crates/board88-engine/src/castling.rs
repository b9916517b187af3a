//! Castling rights and the fixed squares each castle touches.

use board88_core::{Color, FenCastling, Square};

/// Castling rights flags.
///
/// Rights are only ever cleared once a board is set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    const fn flag(color: Color, kingside: bool) -> u8 {
        match (color, kingside) {
            (Color::White, true) => Self::WHITE_KINGSIDE,
            (Color::White, false) => Self::WHITE_QUEENSIDE,
            (Color::Black, true) => Self::BLACK_KINGSIDE,
            (Color::Black, false) => Self::BLACK_QUEENSIDE,
        }
    }

    /// Returns true if the given side still holds the right to castle on
    /// the given wing.
    #[inline]
    pub const fn has(self, color: Color, kingside: bool) -> bool {
        self.0 & Self::flag(color, kingside) != 0
    }

    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        self.has(color, true)
    }

    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        self.has(color, false)
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.0 &= !(Self::flag(color, true) | Self::flag(color, false));
    }

    /// Removes the right tied to a rook home square, if `sq` is one.
    pub fn remove_rook_home(&mut self, sq: Square) {
        for path in CastlePath::ALL {
            if path.rook_from == sq {
                self.0 &= !Self::flag(path.color, path.kingside);
            }
        }
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl From<FenCastling> for CastlingRights {
    fn from(fen: FenCastling) -> Self {
        let mut flags = 0;
        for (held, flag) in [
            (fen.white_kingside, Self::WHITE_KINGSIDE),
            (fen.white_queenside, Self::WHITE_QUEENSIDE),
            (fen.black_kingside, Self::BLACK_KINGSIDE),
            (fen.black_queenside, Self::BLACK_QUEENSIDE),
        ] {
            if held {
                flags |= flag;
            }
        }
        CastlingRights(flags)
    }
}

impl From<CastlingRights> for FenCastling {
    fn from(rights: CastlingRights) -> Self {
        FenCastling {
            white_kingside: rights.can_castle_kingside(Color::White),
            white_queenside: rights.can_castle_queenside(Color::White),
            black_kingside: rights.can_castle_kingside(Color::Black),
            black_queenside: rights.can_castle_queenside(Color::Black),
        }
    }
}

/// The squares involved in one of the four castles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlePath {
    pub color: Color,
    pub kingside: bool,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares between king and rook that must be empty.
    pub between: &'static [Square],
    /// King start, pass-through and landing squares.
    pub king_walk: [Square; 3],
}

impl CastlePath {
    pub const WHITE_KINGSIDE: CastlePath = CastlePath {
        color: Color::White,
        kingside: true,
        king_from: Square::E1,
        king_to: Square::G1,
        rook_from: Square::H1,
        rook_to: Square::F1,
        between: &[Square::F1, Square::G1],
        king_walk: [Square::E1, Square::F1, Square::G1],
    };

    pub const WHITE_QUEENSIDE: CastlePath = CastlePath {
        color: Color::White,
        kingside: false,
        king_from: Square::E1,
        king_to: Square::C1,
        rook_from: Square::A1,
        rook_to: Square::D1,
        between: &[Square::B1, Square::C1, Square::D1],
        king_walk: [Square::E1, Square::D1, Square::C1],
    };

    pub const BLACK_KINGSIDE: CastlePath = CastlePath {
        color: Color::Black,
        kingside: true,
        king_from: Square::E8,
        king_to: Square::G8,
        rook_from: Square::H8,
        rook_to: Square::F8,
        between: &[Square::F8, Square::G8],
        king_walk: [Square::E8, Square::F8, Square::G8],
    };

    pub const BLACK_QUEENSIDE: CastlePath = CastlePath {
        color: Color::Black,
        kingside: false,
        king_from: Square::E8,
        king_to: Square::C8,
        rook_from: Square::A8,
        rook_to: Square::D8,
        between: &[Square::B8, Square::C8, Square::D8],
        king_walk: [Square::E8, Square::D8, Square::C8],
    };

    pub const ALL: [CastlePath; 4] = [
        Self::WHITE_KINGSIDE,
        Self::WHITE_QUEENSIDE,
        Self::BLACK_KINGSIDE,
        Self::BLACK_QUEENSIDE,
    ];

    /// The path for `color` castling on the given wing.
    #[inline]
    pub const fn of(color: Color, kingside: bool) -> CastlePath {
        match (color, kingside) {
            (Color::White, true) => Self::WHITE_KINGSIDE,
            (Color::White, false) => Self::WHITE_QUEENSIDE,
            (Color::Black, true) => Self::BLACK_KINGSIDE,
            (Color::Black, false) => Self::BLACK_QUEENSIDE,
        }
    }
}
