use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use fenview_core::{render_position, BoardGeometry, BoardProps};

use crate::game::GameSession;
use crate::AppState;

const SQUARE_SIZE: u32 = 45;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub title: String,
    pub board_html: String,
    pub fen: String,
    pub side_to_move: String,
}

pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let game = state.game.lock().unwrap();

    let props = BoardProps {
        css_path: "/static/chess.css".to_string(),
        square_size: SQUARE_SIZE,
        ..Default::default()
    };
    let board_html = match render_position(game.fen(), props) {
        Ok(html) => html,
        Err(e) => {
            eprintln!("Failed to render board: {}", e);
            String::new()
        }
    };

    let template = IndexTemplate {
        title: "Fen Viewer".to_string(),
        board_html,
        fen: game.fen().to_string(),
        side_to_move: game.side_to_move().to_string(),
    };
    Html(template.render().unwrap())
}

#[derive(Deserialize)]
pub struct MoveRequest {
    pub from_x: i32,
    pub from_y: i32,
    pub to_x: i32,
    pub to_y: i32,
}

#[derive(Serialize)]
pub struct MoveResponse {
    pub ok: bool,
    pub fen: String,
    pub error: Option<String>,
}

/// Receives a drag/drop as pixel coordinates relative to the board surface
/// and resolves both ends through the board's inverse mapping.
pub async fn move_piece(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MoveRequest>,
) -> Json<MoveResponse> {
    let mut game = state.game.lock().unwrap();
    // The page renders with the default flip-on-black setting, so the
    // inverse mapping has to match.
    let geometry = BoardGeometry::new(SQUARE_SIZE, game.black_to_move());

    let squares = geometry
        .square_at(req.from_x, req.from_y)
        .and_then(|from| geometry.square_at(req.to_x, req.to_y).map(|to| (from, to)));

    let result = match squares {
        Ok((from, to)) => game.apply_move(from, to),
        Err(e) => Err(e.to_string()),
    };

    match result {
        Ok(()) => Json(MoveResponse {
            ok: true,
            fen: game.fen().to_string(),
            error: None,
        }),
        Err(e) => {
            eprintln!("Move rejected: {}", e);
            Json(MoveResponse {
                ok: false,
                fen: game.fen().to_string(),
                error: Some(e),
            })
        }
    }
}

pub async fn new_game(State(state): State<Arc<AppState>>) -> Redirect {
    *state.game.lock().unwrap() = GameSession::new();
    Redirect::to("/")
}

#[derive(Deserialize)]
pub struct LoadForm {
    pub fen: String,
}

pub async fn load_position(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoadForm>,
) -> Redirect {
    let fen = form.fen.trim();
    if fen.is_empty() {
        return Redirect::to("/");
    }

    match GameSession::from_fen(fen) {
        Ok(session) => *state.game.lock().unwrap() = session,
        Err(e) => eprintln!("Failed to load FEN: {}", e),
    }
    Redirect::to("/")
}

#[derive(Serialize)]
pub struct PositionResponse {
    pub fen: String,
    pub side_to_move: String,
    pub piece_count: u32,
}

pub async fn position_state(State(state): State<Arc<AppState>>) -> Json<PositionResponse> {
    let game = state.game.lock().unwrap();
    Json(PositionResponse {
        fen: game.fen().to_string(),
        side_to_move: game.side_to_move().to_string(),
        piece_count: game.piece_count(),
    })
}

pub async fn health() -> &'static str {
    "OK"
}
