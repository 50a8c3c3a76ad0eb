//! Piece, color and glyph definitions

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Parses the FEN side-to-move field.
    pub fn from_fen(field: &str) -> Option<Self> {
        match field {
            "w" => Some(Color::White),
            "b" => Some(Color::Black),
            _ => None,
        }
    }

    pub fn fen_char(&self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Role {
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Pawn => "Pawn",
            Role::Knight => "Knight",
            Role::Bishop => "Bishop",
            Role::Rook => "Rook",
            Role::Queen => "Queen",
            Role::King => "King",
        }
    }
}

/// A piece as it appears in the FEN placement field: uppercase letters are
/// white, lowercase are black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub role: Role,
}

impl Piece {
    pub fn from_fen_char(ch: char) -> Option<Self> {
        let role = match ch.to_ascii_lowercase() {
            'p' => Role::Pawn,
            'n' => Role::Knight,
            'b' => Role::Bishop,
            'r' => Role::Rook,
            'q' => Role::Queen,
            'k' => Role::King,
            _ => return None,
        };
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece { color, role })
    }

    pub fn fen_char(&self) -> char {
        let ch = match self.role {
            Role::Pawn => 'p',
            Role::Knight => 'n',
            Role::Bishop => 'b',
            Role::Rook => 'r',
            Role::Queen => 'q',
            Role::King => 'k',
        };
        match self.color {
            Color::White => ch.to_ascii_uppercase(),
            Color::Black => ch,
        }
    }

    /// The figurine glyph rendered inside a piece element.
    pub fn glyph(&self) -> char {
        match (self.color, self.role) {
            (Color::White, Role::King) => '\u{2654}',
            (Color::White, Role::Queen) => '\u{2655}',
            (Color::White, Role::Rook) => '\u{2656}',
            (Color::White, Role::Bishop) => '\u{2657}',
            (Color::White, Role::Knight) => '\u{2658}',
            (Color::White, Role::Pawn) => '\u{2659}',
            (Color::Black, Role::King) => '\u{265A}',
            (Color::Black, Role::Queen) => '\u{265B}',
            (Color::Black, Role::Rook) => '\u{265C}',
            (Color::Black, Role::Bishop) => '\u{265D}',
            (Color::Black, Role::Knight) => '\u{265E}',
            (Color::Black, Role::Pawn) => '\u{265F}',
        }
    }
}
