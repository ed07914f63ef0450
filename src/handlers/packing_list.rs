use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::{error, instrument};

use crate::error::AppError;
use crate::listing::{query_packing_lists, PackingListQuery, Paginated};
use crate::models::packing_list::PackingList;
use crate::state::AppState;

// GET /packing-lists - Filtered, sorted and paginated listing
#[instrument(skip(state))]
pub async fn list_packing_lists(
    State(state): State<AppState>,
    Query(query): Query<PackingListQuery>,
) -> Result<Json<Paginated<PackingList>>, AppError> {
    match state.backend.list_packing_lists().await {
        Ok(lists) => Ok(Json(query_packing_lists(lists, &query))),
        Err(e) => {
            error!(error = %e, "Failed to fetch packing lists");
            Err(e.into())
        }
    }
}

// GET /packing-lists/{id} - Single packing list
#[instrument(skip(state))]
pub async fn get_packing_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PackingList>, AppError> {
    let list = state.backend.get_packing_list(&id).await?;
    Ok(Json(list))
}
