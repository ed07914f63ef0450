use axum::{
    routing::{get, post, put},
    Router, middleware,
};
use crate::state::AppState;
use crate::handlers::transmission::{
    cancel_transmission, execute_transmission, export_transmission, get_transmission,
    open_transmission, set_destination, set_exchange_rate, set_item_dealer_price,
    set_item_margin,
};
use crate::middleware::auth::require_auth;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/transmissions", post(open_transmission))
        .route("/transmissions/{id}", get(get_transmission).delete(cancel_transmission))
        .route("/transmissions/{id}/exchange-rate", put(set_exchange_rate))
        .route("/transmissions/{id}/items/{index}/margin", put(set_item_margin))
        .route("/transmissions/{id}/items/{index}/dealer-price", put(set_item_dealer_price))
        .route("/transmissions/{id}/destination", put(set_destination))
        .route("/transmissions/{id}/export", get(export_transmission))
        .route("/transmissions/{id}/execute", post(execute_transmission))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
}
