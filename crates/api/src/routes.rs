use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// Creates all API routes with state
pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/dns-query", get(handlers::dns_query))
        .route("/dkim-lookup", get(handlers::dkim_lookup))
        .route("/check", get(handlers::check_domain))
        .route("/generate", post(handlers::generate_records))
        .with_state(state)
}
