use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;

/// Shared state available to all handlers via Axum's state extractor.
/// Built once at startup; handlers never reach for global clients.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub media: Arc<dyn media::MediaStore>,
    pub config: config::Config,
}

/// App routes. Merged with the CORS and trace layers in lib.rs.
pub fn routes() -> Router<AppState> {
    Router::new().merge(features::projects::routes())
}

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod features;
pub mod media;
