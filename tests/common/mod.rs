#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use store_transmission::backend::{BackendError, InventoryBackend};
use store_transmission::models::currency::CurrencyRate;
use store_transmission::models::packing_list::{
    PackingList, PackingListItem, PackingListStatus, PackingListUpdate, ProductRef,
    ProductSummary,
};
use store_transmission::models::store::{Store, StoreRef};
use store_transmission::models::store_stock::{NewStoreStock, StoreStock};

pub const SOURCE_STORE: &str = "st-kochi";
pub const DEST_STORE: &str = "st-dubai";

/// In-memory backend that records every call in order.
#[derive(Default)]
pub struct RecordingBackend {
    pub packing_lists: Mutex<HashMap<String, PackingList>>,
    pub stock: Mutex<Vec<StoreStock>>,
    pub stores: Vec<Store>,
    pub created: Mutex<Vec<NewStoreStock>>,
    pub updates: Mutex<Vec<(String, PackingListUpdate)>>,
    pub calls: Mutex<Vec<String>>,
    pub failing_products: HashSet<String>,
    pub fail_packing_list_update: bool,
    /// Hand control back to the runtime inside every save, so a concurrent
    /// request can run while a transmission is half done.
    pub yield_on_save: bool,
}

fn unavailable() -> BackendError {
    BackendError::Status {
        status: http::StatusCode::SERVICE_UNAVAILABLE,
        body: "down".to_string(),
    }
}

impl RecordingBackend {
    pub fn with_packing_list(list: PackingList) -> Self {
        let backend = Self::default();
        backend
            .packing_lists
            .lock()
            .unwrap()
            .insert(list.id.clone(), list);
        backend
    }

    pub fn with_stock(self, stock: Vec<StoreStock>) -> Self {
        *self.stock.lock().unwrap() = stock;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<NewStoreStock> {
        self.created.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<(String, PackingListUpdate)> {
        self.updates.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait]
impl InventoryBackend for RecordingBackend {
    async fn list_packing_lists(&self) -> Result<Vec<PackingList>, BackendError> {
        self.record("GET packing-lists");
        Ok(self.packing_lists.lock().unwrap().values().cloned().collect())
    }

    async fn get_packing_list(&self, id: &str) -> Result<PackingList, BackendError> {
        self.record(format!("GET packing-lists/{id}"));
        self.packing_lists
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or(BackendError::Status {
                status: http::StatusCode::NOT_FOUND,
                body: "not found".to_string(),
            })
    }

    async fn update_packing_list(
        &self,
        id: &str,
        update: &PackingListUpdate,
    ) -> Result<PackingList, BackendError> {
        self.record(format!("PUT packing-lists/{id}"));
        if self.fail_packing_list_update {
            return Err(unavailable());
        }
        self.updates
            .lock()
            .unwrap()
            .push((id.to_string(), update.clone()));
        let mut lists = self.packing_lists.lock().unwrap();
        let list = lists.get_mut(id).ok_or_else(unavailable)?;
        list.status = update.status;
        list.to_store_id = Some(update.to_store_id.clone());
        Ok(list.clone())
    }

    async fn list_store_stock(&self, store_id: &str) -> Result<Vec<StoreStock>, BackendError> {
        self.record(format!("GET store-stock?storeId={store_id}"));
        Ok(self
            .stock
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.store_id == store_id)
            .cloned()
            .collect())
    }

    async fn save_store_stock(&self, stock: &NewStoreStock) -> Result<StoreStock, BackendError> {
        self.record(format!("POST store-stock {}", stock.product_id));
        if self.yield_on_save {
            tokio::task::yield_now().await;
        }
        if self.failing_products.contains(&stock.product_id) {
            return Err(unavailable());
        }
        let mut created = self.created.lock().unwrap();
        created.push(stock.clone());
        Ok(StoreStock {
            id: Some(format!("ss-{}", created.len())),
            product: ProductRef::Id(stock.product_id.clone()),
            store_id: stock.store_id.clone(),
            quantity: stock.quantity,
            margin: stock.margin,
            currency: stock.currency.clone(),
            unit_price: stock.unit_price,
        })
    }

    async fn list_stores(&self) -> Result<Vec<Store>, BackendError> {
        self.record("GET stores");
        Ok(self.stores.clone())
    }

    async fn list_currency_rates(&self) -> Result<Vec<CurrencyRate>, BackendError> {
        self.record("GET currency-rates");
        Ok(vec![CurrencyRate {
            id: None,
            from: "INR".to_string(),
            to: "AED".to_string(),
            rate: 0.044,
        }])
    }
}

pub fn product(id: &str, name: &str) -> ProductRef {
    ProductRef::Populated(ProductSummary {
        id: id.to_string(),
        name: name.to_string(),
        code: id.to_uppercase(),
    })
}

pub fn source_stock(product_id: &str, unit_price: f64) -> StoreStock {
    StoreStock {
        id: Some(format!("src-{product_id}")),
        product: ProductRef::Id(product_id.to_string()),
        store_id: SOURCE_STORE.to_string(),
        quantity: 100,
        margin: 0.0,
        currency: "INR".to_string(),
        unit_price,
    }
}

pub fn packing_list(id: &str, lines: &[(&str, i64)]) -> PackingList {
    PackingList {
        id: id.to_string(),
        box_number: format!("BOX-{id}"),
        items: lines
            .iter()
            .map(|(product_id, quantity)| PackingListItem {
                product: Some(product(product_id, &format!("Product {product_id}"))),
                quantity: *quantity,
            })
            .collect(),
        store: Some(StoreRef::Id(SOURCE_STORE.to_string())),
        to_store_id: None,
        status: PackingListStatus::Approved,
        created_at: None,
    }
}
