//! Legal move generation on a 0x88 board.
//!
//! This crate provides:
//! - [`Board`] - 0x88 cells, piece lists, king trackers and game state
//! - [`generate_moves`] - strictly legal move generation driven by check and
//!   pin annotations
//! - [`Board::make_move`] - in-place move application
//! - [`perft`](movegen::perft) - leaf counting for validating the generator
//!
//! # Architecture
//!
//! Squares live on a 16x8 grid where every address with a bit of `0x88`
//! set is off the board, so stepping off an edge is a single mask test.
//! A compile-time geometry table maps any square pair to the piece types
//! that could travel between them and the connecting step, which lets the
//! detector find checks and pins by walking only the rays that matter.
//!
//! `Board` is `Copy`; take a move back by restoring a saved copy.
//!
//! # Example
//!
//! ```
//! use board88_engine::{generate_moves, Board};
//!
//! let mut board = Board::startpos();
//! let moves = generate_moves(&mut board);
//! println!("Legal moves from starting position: {}", moves.len());
//!
//! let saved = board;
//! let e4 = board.parse_move("e2e4").unwrap();
//! board.make_move(e4);
//! board.apply_text_move("e7e5").unwrap();
//! println!("Position after 1.e4 e5: {}", board.to_fen());
//! board = saved;
//! assert_eq!(board, Board::startpos());
//! ```

mod board;
mod castling;
pub mod geometry;
mod make_move;
pub mod movegen;
mod piece_list;

pub use board::{Board, BoardError, Cell, Check, Info, Outcome};
pub use castling::{CastlePath, CastlingRights};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{generate_moves, is_king_attacked, is_square_attacked, MoveList};
pub use piece_list::PieceList;

pub use board88_core::{Color, FenError, FenRecord, Move, MoveFlag, Piece, Square};
