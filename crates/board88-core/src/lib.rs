//! Core types for the 0x88 chess engine.
//!
//! This crate provides the fundamental types used across the workspace:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for coordinates on the 0x88 grid,
//!   together with the direction offsets used to step between squares
//! - [`Move`] for packed move representation
//! - [`FenRecord`] for FEN parsing and serialization

mod color;
mod fen;
mod mov;
mod piece;
pub mod square;

pub use color::Color;
pub use fen::{FenCastling, FenError, FenRecord};
pub use mov::{Move, MoveFlag};
pub use piece::Piece;
pub use square::{File, Rank, Square};
