use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::instrument;

use crate::dtos::store::StoreQuery;
use crate::error::AppError;
use crate::models::currency::CurrencyRate;
use crate::models::store::Store;
use crate::models::store_stock::StoreStock;
use crate::state::AppState;

// GET /stores?role=biller - Destination pickers only offer biller stores
#[instrument(skip(state))]
pub async fn list_stores(
    State(state): State<AppState>,
    Query(query): Query<StoreQuery>,
) -> Result<Json<Vec<Store>>, AppError> {
    let mut stores = state.backend.list_stores().await?;
    if let Some(role) = query.role {
        stores.retain(|s| s.has_role(role));
    }
    stores.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Json(stores))
}

// GET /stores/{id}/stock
#[instrument(skip(state))]
pub async fn list_store_stock(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<Json<Vec<StoreStock>>, AppError> {
    Ok(Json(state.backend.list_store_stock(&store_id).await?))
}

// GET /currency-rates
#[instrument(skip(state))]
pub async fn list_currency_rates(
    State(state): State<AppState>,
) -> Result<Json<Vec<CurrencyRate>>, AppError> {
    Ok(Json(state.backend.list_currency_rates().await?))
}
