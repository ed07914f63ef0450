pub mod packing_lists;
pub mod stores;
pub mod transmissions;

use axum::Router;
use crate::state::AppState;

pub fn create_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(packing_lists::routes(state))
        .merge(stores::routes(state))
        .merge(transmissions::routes(state))
}
