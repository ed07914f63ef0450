// src/models/store_stock.rs
use serde::{Deserialize, Serialize};

use super::packing_list::ProductRef;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStock {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub product: ProductRef,
    #[serde(default, alias = "store")]
    pub store_id: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub margin: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub unit_price: f64,
}

/// Body of `POST store-stock` for one transmitted product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStoreStock {
    pub product_id: String,
    pub store_id: String,
    pub quantity: i64,
    pub margin: f64,
    pub currency: String,
    pub unit_price: f64,
    #[serde(rename = "unitPriceAED")]
    pub unit_price_aed: f64,
    pub packing_list_id: String,
    pub dp_price: f64,
    pub exchange_rate: f64,
    pub final_price: f64,
}
