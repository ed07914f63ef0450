pub mod auth;
pub mod backend;
pub mod config;
pub mod dtos;
pub mod error;
pub mod export;
pub mod extract;
pub mod handlers;
pub mod listing;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod transmission;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// The service under its `/api` base path, ready to serve.
pub fn app(state: AppState) -> Router {
    let api = routes::create_router(&state)
        .route("/", get(|| async { "Store Transmission API" }))
        .route("/health", get(health_check));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub use state::AppState;

async fn health_check() -> &'static str {
    "OK"
}
