//! Typed access to the upstream inventory REST backend.

pub mod http;

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::currency::CurrencyRate;
use crate::models::packing_list::{PackingList, PackingListUpdate};
use crate::models::store::Store;
use crate::models::store_stock::{NewStoreStock, StoreStock};

pub use self::http::HttpBackend;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend responded {status}: {body}")]
    Status { status: ::http::StatusCode, body: String },
    #[error("could not decode backend response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl BackendError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::Status { status, .. } if *status == ::http::StatusCode::NOT_FOUND)
    }
}

/// The service wrappers the transmission page talks through.
#[async_trait]
pub trait InventoryBackend: Send + Sync {
    async fn list_packing_lists(&self) -> Result<Vec<PackingList>, BackendError>;

    async fn get_packing_list(&self, id: &str) -> Result<PackingList, BackendError>;

    async fn update_packing_list(
        &self,
        id: &str,
        update: &PackingListUpdate,
    ) -> Result<PackingList, BackendError>;

    async fn list_store_stock(&self, store_id: &str) -> Result<Vec<StoreStock>, BackendError>;

    async fn save_store_stock(&self, stock: &NewStoreStock) -> Result<StoreStock, BackendError>;

    async fn list_stores(&self) -> Result<Vec<Store>, BackendError>;

    async fn list_currency_rates(&self) -> Result<Vec<CurrencyRate>, BackendError>;
}

/// Responses come back either bare or wrapped as `{ "data": ... }`
/// (paginated listings carry a sibling `pagination` object we ignore).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub(crate) fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(inner) => inner,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpstreamPagination {
    #[serde(default)]
    pub(crate) has_next_page: bool,
}

/// One page of a listing. Bare arrays are the whole collection.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum PageEnvelope<T> {
    Paged {
        data: Vec<T>,
        #[serde(default)]
        pagination: Option<UpstreamPagination>,
    },
    Bare(Vec<T>),
}

impl<T> PageEnvelope<T> {
    /// Rows on this page and whether the backend has more after it.
    pub(crate) fn into_parts(self) -> (Vec<T>, bool) {
        match self {
            PageEnvelope::Paged { data, pagination } => {
                let more = pagination.map(|p| p.has_next_page).unwrap_or(false);
                (data, more)
            }
            PageEnvelope::Bare(data) => (data, false),
        }
    }
}
