//! Board model: pieces and square/pixel geometry

pub mod geometry;
pub mod piece;

pub use geometry::BoardGeometry;
pub use piece::{Color, Piece, Role};
