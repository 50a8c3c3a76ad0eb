//! FEN parsing functionality

pub mod fen;

pub use fen::{parse_fen, FenError, ParsedFen, PlacedPiece, START_FEN};
