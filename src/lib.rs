pub mod appresult;
pub mod brawls;
pub mod client;
pub mod config;
pub mod db;

use axum::{extract::FromRef, Router};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use appresult::{AppError, AppResult};
pub use brawls::{Brawl, NewSong, Song};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
}

impl AppState {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }
}

/// The full HTTP surface: `/api/brawls/...` with permissive CORS and request tracing.
pub fn app(app_state: AppState) -> Router {
    Router::new()
        .nest("/api/brawls", brawls::router())
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
