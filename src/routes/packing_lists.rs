use axum::{
    routing::get,
    Router,
};
use crate::state::AppState;
use crate::handlers::packing_list;
use crate::middleware::auth::require_auth;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        // All routes require authentication
        .route("/packing-lists", get(packing_list::list_packing_lists))
        .route("/packing-lists/{id}", get(packing_list::get_packing_list))
        .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_auth))
}
