use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::default_pool_apr))
        .route("/health", get(handlers::health_check))
        .route("/pools", get(handlers::list_pools))
        .route("/pools/{id}/apr", get(handlers::pool_apr))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
