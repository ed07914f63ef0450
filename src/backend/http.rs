use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::{BackendError, Envelope, InventoryBackend, PageEnvelope};
use crate::models::currency::CurrencyRate;
use crate::models::packing_list::{PackingList, PackingListUpdate};
use crate::models::store::Store;
use crate::models::store_stock::{NewStoreStock, StoreStock};

/// Rows requested per page when walking a paginated listing.
const PAGE_SIZE: u32 = 100;
/// Upper bound on pages fetched for one listing.
const MAX_PAGES: u32 = 500;

/// `InventoryBackend` over the inventory REST API.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBackend {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Decodes the body exactly as `T`, with no envelope unwrapping.
    async fn send_raw<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, BackendError> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status { status, body });
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, BackendError> {
        Self::send_raw::<Envelope<T>>(builder)
            .await
            .map(Envelope::into_inner)
    }

    /// Walks a listing page by page until the backend reports no next page.
    async fn fetch_all<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, BackendError> {
        let mut rows = Vec::new();
        let limit = PAGE_SIZE.to_string();

        for page in 1..=MAX_PAGES {
            let page_param = page.to_string();
            let builder = self
                .request(Method::GET, path)
                .query(query)
                .query(&[("page", page_param.as_str()), ("limit", limit.as_str())]);
            let (data, more) = Self::send_raw::<PageEnvelope<T>>(builder).await?.into_parts();
            let empty = data.is_empty();
            rows.extend(data);
            if !more || empty {
                return Ok(rows);
            }
        }

        warn!(path, pages = MAX_PAGES, "Stopped paging listing at the page limit");
        Ok(rows)
    }
}

#[async_trait]
impl InventoryBackend for HttpBackend {
    #[instrument(skip(self))]
    async fn list_packing_lists(&self) -> Result<Vec<PackingList>, BackendError> {
        self.fetch_all("packing-lists", &[]).await
    }

    #[instrument(skip(self))]
    async fn get_packing_list(&self, id: &str) -> Result<PackingList, BackendError> {
        Self::send(self.request(Method::GET, &format!("packing-lists/{id}"))).await
    }

    #[instrument(skip(self, update), fields(status = %update.status))]
    async fn update_packing_list(
        &self,
        id: &str,
        update: &PackingListUpdate,
    ) -> Result<PackingList, BackendError> {
        Self::send(
            self.request(Method::PUT, &format!("packing-lists/{id}"))
                .json(update),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn list_store_stock(&self, store_id: &str) -> Result<Vec<StoreStock>, BackendError> {
        self.fetch_all("store-stock", &[("storeId", store_id)]).await
    }

    #[instrument(skip(self, stock), fields(product_id = %stock.product_id, store_id = %stock.store_id))]
    async fn save_store_stock(&self, stock: &NewStoreStock) -> Result<StoreStock, BackendError> {
        debug!(quantity = stock.quantity, unit_price = stock.unit_price, "Saving store stock");
        Self::send(self.request(Method::POST, "store-stock").json(stock)).await
    }

    #[instrument(skip(self))]
    async fn list_stores(&self) -> Result<Vec<Store>, BackendError> {
        Self::send(self.request(Method::GET, "stores")).await
    }

    #[instrument(skip(self))]
    async fn list_currency_rates(&self) -> Result<Vec<CurrencyRate>, BackendError> {
        Self::send(self.request(Method::GET, "currency-rates")).await
    }
}
