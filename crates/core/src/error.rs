//! Error types for fenview-core

use thiserror::Error;

use crate::parser::fen::FenError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("FEN parsing failed: {0}")]
    Fen(#[from] FenError),

    #[error("mount target '{0}' could not be resolved")]
    MountNotFound(String),

    #[error("coordinates ({x}, {y}) are outside the board surface")]
    OutsideBoard { x: i32, y: i32 },
}

pub type Result<T> = std::result::Result<T, Error>;
