//! The board renderer widget and its interaction layer

pub mod board;

pub use board::{BoardProps, BoardWidget, PieceMovedCallback};
