//! Host-side game logic
//!
//! The widget reports drops as bare square indices and never judges them;
//! legality, the resulting FEN and the re-render are this session's job.

use shakmaty::{
    fen::Fen, CastlingMode, Chess, Color, EnPassantMode, File, Move, Position, Role, Square,
};

pub struct GameSession {
    fen: String,
    position: Chess,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            fen: fenview_core::START_FEN.to_string(),
            position: Chess::default(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, String> {
        let parsed: Fen = fen.parse().map_err(|e| format!("Invalid FEN: {}", e))?;
        let position = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| format!("Invalid position: {}", e))?;
        Ok(Self {
            fen: fen.to_string(),
            position,
        })
    }

    pub fn fen(&self) -> &str {
        &self.fen
    }

    pub fn black_to_move(&self) -> bool {
        self.position.turn() == Color::Black
    }

    pub fn side_to_move(&self) -> &'static str {
        if self.black_to_move() {
            "black"
        } else {
            "white"
        }
    }

    pub fn piece_count(&self) -> u32 {
        self.position.board().occupied().count() as u32
    }

    /// Applies a move given as widget square indices (a1 = 0 .. h8 = 63,
    /// the numbering shakmaty shares). Promotions auto-queen.
    pub fn apply_move(&mut self, from: u8, to: u8) -> Result<(), String> {
        if from > 63 || to > 63 {
            return Err(format!("square index out of range: {} -> {}", from, to));
        }
        let from = Square::new(from as u32);
        let to = Square::new(to as u32);

        let mv = self
            .position
            .legal_moves()
            .into_iter()
            .find(|m| {
                let promotes_ok = match m {
                    Move::Normal { promotion, .. } => {
                        promotion.is_none() || *promotion == Some(Role::Queen)
                    }
                    _ => true,
                };
                move_source(m) == Some(from) && move_destination(m) == to && promotes_ok
            })
            .ok_or_else(|| format!("illegal move: {} -> {}", from, to))?;

        self.position = self
            .position
            .clone()
            .play(mv)
            .map_err(|e| format!("illegal move: {}", e))?;
        self.fen = Fen::from_position(&self.position, EnPassantMode::Legal).to_string();
        Ok(())
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

fn move_source(mv: &Move) -> Option<Square> {
    match mv {
        Move::Normal { from, .. } | Move::EnPassant { from, .. } => Some(*from),
        Move::Castle { king, .. } => Some(*king),
        Move::Put { .. } => None,
    }
}

/// Where the moved piece visibly lands; for castling that is the king's
/// destination, not the rook square shakmaty stores.
fn move_destination(mv: &Move) -> Square {
    match mv {
        Move::Normal { to, .. } | Move::EnPassant { to, .. } | Move::Put { to, .. } => *to,
        Move::Castle { king, rook } => {
            if rook.file() > king.file() {
                Square::from_coords(File::G, king.rank())
            } else {
                Square::from_coords(File::C, king.rank())
            }
        }
    }
}
