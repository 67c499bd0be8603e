//! API route configuration.

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Player data
        .route("/api/v1/friends", get(handlers::get_friends))
        .route("/api/v1/summaries", get(handlers::get_summaries))
        .route("/api/v1/ownedGames", get(handlers::get_owned_games))
        // Comparison and ranking
        .route(
            "/api/v1/ownedGames/compare",
            get(handlers::compare_owned_games),
        )
        .route(
            "/api/v1/friends/ranking",
            get(handlers::get_affinity_ranking),
        )
        .with_state(state)
}
