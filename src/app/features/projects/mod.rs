mod delete;
mod helpers;
mod show;
mod update;

pub mod reconcile;

use axum::Router;

use crate::app::AppState;

pub use reconcile::{reconcile, ProjectUpdate, Reconciled};

/// Project routes (delete, update, show).
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(delete::routes())
        .merge(update::routes())
        .merge(show::routes())
}
