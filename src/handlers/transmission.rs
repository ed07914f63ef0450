use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use tracing::{info, instrument, warn};

use crate::dtos::transmission::{
    DealerPriceRequest, DestinationRequest, ExchangeRateRequest, ExecuteTransmissionRequest,
    MarginRequest, OpenTransmissionRequest, TransmissionResponse,
};
use crate::error::AppError;
use crate::export::transmission_csv;
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthContext;
use crate::models::packing_list::PackingListStatus;
use crate::state::AppState;
use crate::transmission::{self, TransmissionError, TransmissionForm, TransmissionReport};

fn no_open_transmission(id: &str) -> AppError {
    AppError::not_found(format!("No open transmission for packing list {id}"))
}

// ==================== Open ====================

#[instrument(skip(state, auth, req), fields(user = %auth.username, user_id = %auth.user_id))]
pub async fn open_transmission(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppJson(req): AppJson<OpenTransmissionRequest>,
) -> Result<(StatusCode, Json<TransmissionResponse>), AppError> {
    auth.require_transmit_role()?;

    let packing_list_id = req.packing_list_id.trim();
    if packing_list_id.is_empty() {
        return Err(AppError::validation("packingListId is required"));
    }

    if let Some(existing) = state.sessions.get(packing_list_id) {
        return Ok((StatusCode::OK, Json(existing.into())));
    }

    let packing_list = state.backend.get_packing_list(packing_list_id).await?;
    if packing_list.status == PackingListStatus::Uae {
        return Err(AppError::conflict("Packing list has already been transmitted"));
    }
    if !packing_list.status.is_transmittable() {
        return Err(AppError::conflict(format!(
            "Packing list is {} and cannot be transmitted",
            packing_list.status
        )));
    }

    let source_store = packing_list.store_id();
    if source_store.is_empty() {
        return Err(AppError::validation("Packing list has no source store"));
    }
    let store_stock = state.backend.list_store_stock(source_store).await?;

    let form = TransmissionForm::from_packing_list(&packing_list, &store_stock);
    let (form, created) = state.sessions.open(form);
    info!(packing_list_id, items = form.items.len(), created, "Opened transmission");

    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(form.into())))
}

// ==================== Read / Edit ====================

pub async fn get_transmission(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> Result<Json<TransmissionResponse>, AppError> {
    state
        .sessions
        .get(&id)
        .map(|form| Json(form.into()))
        .ok_or_else(|| no_open_transmission(&id))
}

pub async fn set_exchange_rate(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppPath(id): AppPath<String>,
    AppJson(req): AppJson<ExchangeRateRequest>,
) -> Result<Json<TransmissionResponse>, AppError> {
    auth.require_transmit_role()?;
    let form = state
        .sessions
        .update(&id, |form| {
            form.set_exchange_rate(req.exchange_rate);
            form.clone()
        })
        .ok_or_else(|| no_open_transmission(&id))?;
    Ok(Json(form.into()))
}

pub async fn set_item_margin(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppPath((id, index)): AppPath<(String, usize)>,
    AppJson(req): AppJson<MarginRequest>,
) -> Result<Json<TransmissionResponse>, AppError> {
    auth.require_transmit_role()?;
    let form = state
        .sessions
        .update(&id, |form| {
            form.set_item_margin(index, req.margin)?;
            Ok::<_, AppError>(form.clone())
        })
        .ok_or_else(|| no_open_transmission(&id))??;
    Ok(Json(form.into()))
}

pub async fn set_item_dealer_price(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppPath((id, index)): AppPath<(String, usize)>,
    AppJson(req): AppJson<DealerPriceRequest>,
) -> Result<Json<TransmissionResponse>, AppError> {
    auth.require_transmit_role()?;
    let form = state
        .sessions
        .update(&id, |form| {
            form.set_item_dealer_price(index, req.dp_price)?;
            Ok::<_, AppError>(form.clone())
        })
        .ok_or_else(|| no_open_transmission(&id))??;
    Ok(Json(form.into()))
}

pub async fn set_destination(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppPath(id): AppPath<String>,
    AppJson(req): AppJson<DestinationRequest>,
) -> Result<Json<TransmissionResponse>, AppError> {
    auth.require_transmit_role()?;
    let form = state
        .sessions
        .update(&id, |form| {
            form.set_destination_store(req.to_store_id.trim());
            form.clone()
        })
        .ok_or_else(|| no_open_transmission(&id))?;
    Ok(Json(form.into()))
}

pub async fn export_transmission(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let form = state.sessions.get(&id).ok_or_else(|| no_open_transmission(&id))?;
    let body = transmission_csv(&form)
        .map_err(|e| AppError::internal(format!("CSV export failed: {e}")))?;
    let disposition = format!("attachment; filename=\"transmission-{id}.csv\"");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(body),
    ))
}

// ==================== Execute / Cancel ====================

#[instrument(skip(state, auth, body), fields(user = %auth.username, user_id = %auth.user_id))]
pub async fn execute_transmission(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppPath(id): AppPath<String>,
    body: Bytes,
) -> Result<Json<TransmissionReport>, AppError> {
    auth.require_transmit_role()?;

    // The body is optional; an empty one means "use the form's destination".
    let req: ExecuteTransmissionRequest = if body.is_empty() {
        ExecuteTransmissionRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?
    };

    // Taken out before any upstream call: one run per open form.
    let form = state.sessions.close(&id).ok_or_else(|| no_open_transmission(&id))?;
    let to_store_id = req
        .to_store_id
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| form.to_store_id.clone());

    match transmission::execute(&form, &to_store_id, state.backend.as_ref()).await {
        Ok(report) => Ok(Json(report)),
        Err(TransmissionError::MissingDestination) => {
            // Nothing went out; the dialog stays open for a destination to be picked.
            warn!(packing_list_id = %id, "Execute without destination store");
            state.sessions.open(form);
            Err(TransmissionError::MissingDestination.into())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn cancel_transmission(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppPath(id): AppPath<String>,
) -> Result<StatusCode, AppError> {
    auth.require_transmit_role()?;
    state
        .sessions
        .close(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| no_open_transmission(&id))
}
