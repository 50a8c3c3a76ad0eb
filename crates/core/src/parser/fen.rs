//! Forsyth-Edwards Notation parsing
//!
//! Only the first two FEN fields are consumed: piece placement and side to
//! move. Castling rights, en passant and the move clocks mean nothing to a
//! renderer, so trailing fields are accepted and ignored.

use thiserror::Error;

use crate::board::piece::{Color, Piece};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// The decoded placement field plus side to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFen {
    pub placements: Vec<PlacedPiece>,
    pub side_to_move: Color,
}

/// A piece at its placement-scan position: 0 is the leftmost column of the
/// first-listed rank, 63 the rightmost column of the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedPiece {
    pub piece: Piece,
    pub scan_col: usize,
}

impl ParsedFen {
    pub fn piece_count(&self) -> usize {
        self.placements.len()
    }

    pub fn piece_at_scan(&self, scan_col: usize) -> Option<Piece> {
        self.placements
            .iter()
            .find(|p| p.scan_col == scan_col)
            .map(|p| p.piece)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("missing piece placement field")]
    MissingPlacement,

    #[error("missing side-to-move field")]
    MissingSideToMove,

    #[error("invalid side to move '{0}'")]
    InvalidSideToMove(String),

    #[error("invalid character '{ch}' in rank {rank}")]
    InvalidCharacter { rank: usize, ch: char },

    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} describes {width} columns, expected 8")]
    RankWidth { rank: usize, width: usize },
}

/// Parses the placement and side-to-move fields of a FEN string.
///
/// Each rank must describe exactly 8 columns; a digit `0`-`8` is a run of
/// that many empty squares and a piece letter occupies one column. Anything
/// else fails fast rather than mis-rendering.
pub fn parse_fen(fen: &str) -> Result<ParsedFen, FenError> {
    let mut fields = fen.split_whitespace();
    let placement = fields.next().ok_or(FenError::MissingPlacement)?;
    let side = fields.next().ok_or(FenError::MissingSideToMove)?;

    let side_to_move =
        Color::from_fen(side).ok_or_else(|| FenError::InvalidSideToMove(side.to_string()))?;

    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut placements = Vec::new();
    for (rank_idx, rank) in ranks.iter().enumerate() {
        let mut width = 0usize;
        for ch in rank.chars() {
            match ch {
                '0'..='8' => width += (ch as u8 - b'0') as usize,
                _ => {
                    let piece = Piece::from_fen_char(ch).ok_or(FenError::InvalidCharacter {
                        rank: rank_idx + 1,
                        ch,
                    })?;
                    placements.push(PlacedPiece {
                        piece,
                        scan_col: rank_idx * 8 + width,
                    });
                    width += 1;
                }
            }
        }
        if width != 8 {
            return Err(FenError::RankWidth {
                rank: rank_idx + 1,
                width,
            });
        }
    }

    Ok(ParsedFen {
        placements,
        side_to_move,
    })
}
