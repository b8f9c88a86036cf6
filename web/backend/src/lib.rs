pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod spotify;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/moods", get(handlers::list_moods))
        .route("/api/recommendations/params", get(handlers::recommendation_params))
        .route("/api/graph", post(handlers::build_graph))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
