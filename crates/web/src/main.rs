use axum::{
    routing::{get, post},
    Router,
};
use std::sync::{Arc, Mutex};
use tower_http::services::ServeDir;

use crate::game::GameSession;

mod game;
mod routes;

pub struct AppState {
    pub game: Mutex<GameSession>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let state = Arc::new(AppState {
        game: Mutex::new(GameSession::new()),
    });

    let app = Router::new()
        .route("/", get(routes::index))
        .route("/move", post(routes::move_piece))
        .route("/new", post(routes::new_game))
        .route("/load", post(routes::load_position))
        .route("/api/position", get(routes::position_state))
        .route("/health", get(routes::health))
        .nest_service("/static", ServeDir::new("crates/web/static"))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000")
        .await
        .unwrap();

    println!("Server running at http://localhost:3000");

    axum::serve(listener, app).await.unwrap();
}
