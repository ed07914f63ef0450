use axum::{
    routing::get,
    Router,
};
use crate::state::AppState;
use crate::handlers::store;
use crate::middleware::auth::require_auth;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/stores", get(store::list_stores))
        .route("/stores/{id}/stock", get(store::list_store_stock))
        .route("/currency-rates", get(store::list_currency_rates))
        .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_auth))
}
