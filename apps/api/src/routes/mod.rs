pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::compare::handlers as compare;
use crate::directory::handlers as directory;
use crate::genome::handlers as genome;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/genome/:username", get(genome::handle_get_genome))
        .route("/api/search", get(directory::handle_search))
        .route("/api/users/all", get(directory::handle_all_users))
        .route("/api/radar/:username", get(compare::handle_radar))
        .route("/api/compare/import", post(compare::handle_import))
        .with_state(state)
}
