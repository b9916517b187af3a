//! FEN (Forsyth-Edwards Notation) parsing and serialization.

use crate::{Color, Piece, Square};
use std::fmt::Write as _;
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// Castling availability as written in the third FEN field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FenCastling {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl FenCastling {
    /// All four rights held.
    pub const ALL: FenCastling = FenCastling {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    fn parse(field: &str) -> Result<Self, FenError> {
        let mut rights = FenCastling::default();
        if field == "-" {
            return Ok(rights);
        }
        for c in field.chars() {
            let slot = match c {
                'K' => &mut rights.white_kingside,
                'Q' => &mut rights.white_queenside,
                'k' => &mut rights.black_kingside,
                'q' => &mut rights.black_queenside,
                _ => {
                    return Err(FenError::InvalidCastlingRights(format!(
                        "invalid character '{}'",
                        c
                    )))
                }
            };
            *slot = true;
        }
        Ok(rights)
    }

    fn write_to(&self, out: &mut String) {
        let start = out.len();
        for (held, c) in [
            (self.white_kingside, 'K'),
            (self.white_queenside, 'Q'),
            (self.black_kingside, 'k'),
            (self.black_queenside, 'q'),
        ] {
            if held {
                out.push(c);
            }
        }
        if out.len() == start {
            out.push('-');
        }
    }
}

/// A parsed FEN record.
///
/// Every field is validated and typed; the engine loads a board from it
/// and dumps a board back into one. Placement is indexed by the dense
/// 0-63 square index (a1 = 0, h8 = 63).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenRecord {
    pub placement: [Option<(Piece, Color)>; 64],
    pub side_to_move: Color,
    pub castling: FenCastling,
    pub en_passant: Option<Square>,
    /// Halfmove clock (for 50-move rule)
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl FenRecord {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// A record with no pieces, White to move, no rights, move 1.
    pub fn empty() -> Self {
        FenRecord {
            placement: [None; 64],
            side_to_move: Color::White,
            castling: FenCastling::default(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let placement = parse_placement(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = FenCastling::parse(parts[2])?;
        let en_passant = parse_en_passant(parts[3])?;

        let halfmove_clock = parts[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;

        let fullmove_number = parts[5]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;

        Ok(FenRecord {
            placement,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Piece on a square, if any.
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.placement.get(sq.index64() as usize).copied().flatten()
    }

    /// Serializes to canonical FEN.
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);

        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match self.placement[(rank * 8 + file) as usize] {
                    Some((piece, color)) => {
                        if empty > 0 {
                            let _ = write!(fen, "{}", empty);
                            empty = 0;
                        }
                        fen.push(piece.to_fen_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                let _ = write!(fen, "{}", empty);
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(self.side_to_move.to_fen_char());
        fen.push(' ');
        self.castling.write_to(&mut fen);
        fen.push(' ');
        match self.en_passant {
            Some(sq) => fen.push_str(&sq.to_algebraic()),
            None => fen.push('-'),
        }
        let _ = write!(fen, " {} {}", self.halfmove_clock, self.fullmove_number);
        fen
    }
}

impl Default for FenRecord {
    fn default() -> Self {
        let mut record = FenRecord::empty();
        let back = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in back.into_iter().enumerate() {
            record.placement[file] = Some((piece, Color::White));
            record.placement[8 + file] = Some((Piece::Pawn, Color::White));
            record.placement[48 + file] = Some((Piece::Pawn, Color::Black));
            record.placement[56 + file] = Some((piece, Color::Black));
        }
        record.castling = FenCastling::ALL;
        record
    }
}

fn parse_placement(field: &str) -> Result<[Option<(Piece, Color)>; 64], FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::InvalidPiecePlacement(format!(
            "expected 8 ranks, got {}",
            ranks.len()
        )));
    }

    let mut placement = [None; 64];
    for (i, rank_text) in ranks.iter().enumerate() {
        let rank = 7 - i;
        let mut file = 0usize;
        for c in rank_text.chars() {
            if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += skip as usize;
            } else if let Some(pc) = Piece::from_fen_char(c) {
                if file < 8 {
                    placement[rank * 8 + file] = Some(pc);
                }
                file += 1;
            } else {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "invalid character '{}' in rank {}",
                    c,
                    8 - i
                )));
            }
        }
        if file != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "rank {} has {} squares, expected 8",
                8 - i,
                file
            )));
        }
    }
    Ok(placement)
}

fn parse_en_passant(field: &str) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    match Square::from_algebraic(field) {
        Some(sq) if sq.rank_index() == 2 || sq.rank_index() == 5 => Ok(Some(sq)),
        _ => Err(FenError::InvalidEnPassantSquare(field.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    #[test]
    fn parse_startpos() {
        let fen = FenRecord::parse(FenRecord::STARTPOS).unwrap();
        assert_eq!(fen.side_to_move, Color::White);
        assert_eq!(fen.castling, FenCastling::ALL);
        assert_eq!(fen.en_passant, None);
        assert_eq!(fen.halfmove_clock, 0);
        assert_eq!(fen.fullmove_number, 1);
        assert_eq!(fen.piece_at(Square::E1), Some((Piece::King, Color::White)));
        assert_eq!(fen.piece_at(Square::D8), Some((Piece::Queen, Color::Black)));
        assert_eq!(fen.piece_at(Square::from_algebraic("e4").unwrap()), None);
    }

    #[test]
    fn parse_custom_position() {
        let fen =
            FenRecord::parse("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3")
                .unwrap();
        assert_eq!(fen.side_to_move, Color::White);
        assert_eq!(fen.halfmove_clock, 2);
        assert_eq!(fen.fullmove_number, 3);
        assert_eq!(
            fen.piece_at(Square::from_algebraic("c6").unwrap()),
            Some((Piece::Knight, Color::Black))
        );
    }

    #[test]
    fn roundtrip() {
        for original in [
            FenRecord::STARTPOS,
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            KIWIPETE,
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r3k2r/8/8/8/8/8/8/R3K2R b Kq - 7 42",
        ] {
            assert_eq!(FenRecord::parse(original).unwrap().to_fen(), original);
        }
    }

    #[test]
    fn castling_serializes_in_canonical_order() {
        let fen = FenRecord::parse("8/8/8/8/8/8/8/8 w qkQK - 0 1").unwrap();
        assert_eq!(fen.castling, FenCastling::ALL);
        assert!(fen.to_fen().contains(" KQkq "));
    }

    #[test]
    fn default_is_startpos() {
        assert_eq!(FenRecord::default().to_fen(), FenRecord::STARTPOS);
        assert_eq!(FenRecord::empty().to_fen(), "8/8/8/8/8/8/8/8 w - - 0 1");
    }

    #[test]
    fn invalid_fen() {
        assert!(matches!(
            FenRecord::parse("invalid"),
            Err(FenError::InvalidPartCount(1))
        ));
        assert!(matches!(
            FenRecord::parse("8/8/8/8/8/8/8/8 x KQkq - 0 1"),
            Err(FenError::InvalidActiveColor(_))
        ));
    }

    #[test]
    fn invalid_piece_placement_rank_count() {
        assert!(matches!(
            FenRecord::parse("8/8/8/8/8/8/8 w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_piece_placement_invalid_char() {
        assert!(matches!(
            FenRecord::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn empty_runs_must_be_one_to_eight() {
        for fen in [
            "rnbqkbnr/pppp0pppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/9 w KQkq - 0 1",
            "rnbqkbnr/pppppppp/08/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        ] {
            assert!(
                matches!(FenRecord::parse(fen), Err(FenError::InvalidPiecePlacement(_))),
                "{}",
                fen
            );
        }
    }

    #[test]
    fn invalid_piece_placement_wrong_squares() {
        assert!(matches!(
            FenRecord::parse("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            FenRecord::parse("rnbqkbn/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            FenRecord::parse("9/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_castling_rights() {
        assert!(matches!(
            FenRecord::parse("8/8/8/8/8/8/8/8 w XYZ - 0 1"),
            Err(FenError::InvalidCastlingRights(_))
        ));
    }

    #[test]
    fn invalid_en_passant() {
        for ep in ["abc", "x3", "e4", "e9"] {
            let fen = format!("8/8/8/8/8/8/8/8 w - {} 0 1", ep);
            assert!(
                matches!(FenRecord::parse(&fen), Err(FenError::InvalidEnPassantSquare(_))),
                "{ep}"
            );
        }
    }

    #[test]
    fn en_passant_ranks() {
        let fen = FenRecord::parse("8/8/8/8/8/8/8/8 b - d6 0 1").unwrap();
        assert_eq!(fen.en_passant, Square::from_algebraic("d6"));
        let fen = FenRecord::parse("8/8/8/8/8/8/8/8 w - a3 0 1").unwrap();
        assert_eq!(fen.en_passant, Square::from_algebraic("a3"));
    }

    #[test]
    fn invalid_counters() {
        assert!(matches!(
            FenRecord::parse("8/8/8/8/8/8/8/8 w - - abc 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            FenRecord::parse("8/8/8/8/8/8/8/8 w - - -1 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            FenRecord::parse("8/8/8/8/8/8/8/8 w - - 0 xyz"),
            Err(FenError::InvalidFullmoveNumber(_))
        ));
    }

    #[test]
    fn fen_error_display() {
        let err = FenError::InvalidPartCount(3);
        assert!(format!("{}", err).contains("3"));

        let err = FenError::InvalidActiveColor("x".to_string());
        assert!(format!("{}", err).contains("x"));

        let err = FenError::InvalidEnPassantSquare("z9".to_string());
        assert!(format!("{}", err).contains("z9"));
    }
}
