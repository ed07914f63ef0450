// src/models/packing_list.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::store::StoreRef;

/// Where a packing list sits in the India -> UAE shipment flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackingListStatus {
    India,
    Uae,
    Pending,
    InTransit,
    Approved,
    Shipped,
    Rejected,
}

impl PackingListStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackingListStatus::India => "india",
            PackingListStatus::Uae => "uae",
            PackingListStatus::Pending => "pending",
            PackingListStatus::InTransit => "in_transit",
            PackingListStatus::Approved => "approved",
            PackingListStatus::Shipped => "shipped",
            PackingListStatus::Rejected => "rejected",
        }
    }

    /// Only lists still on the Indian side can be opened for transmission.
    pub fn is_transmittable(&self) -> bool {
        matches!(self, PackingListStatus::Approved | PackingListStatus::India)
    }
}

impl fmt::Display for PackingListStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product reference as the backend sends it: a bare id, or populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductRef {
    Id(String),
    Populated(ProductSummary),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
}

impl ProductRef {
    pub fn id(&self) -> &str {
        match self {
            ProductRef::Id(id) => id,
            ProductRef::Populated(p) => &p.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ProductRef::Id(_) => "",
            ProductRef::Populated(p) => &p.name,
        }
    }

    pub fn code(&self) -> &str {
        match self {
            ProductRef::Id(_) => "",
            ProductRef::Populated(p) => &p.code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingListItem {
    #[serde(default)]
    pub product: Option<ProductRef>,
    #[serde(default)]
    pub quantity: i64,
}

impl PackingListItem {
    pub fn product_id(&self) -> &str {
        self.product.as_ref().map(ProductRef::id).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingList {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub box_number: String,
    #[serde(default)]
    pub items: Vec<PackingListItem>,
    #[serde(default)]
    pub store: Option<StoreRef>,
    #[serde(default, alias = "toStore", skip_serializing_if = "Option::is_none")]
    pub to_store_id: Option<String>,
    pub status: PackingListStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl PackingList {
    pub fn store_id(&self) -> &str {
        self.store.as_ref().map(StoreRef::id).unwrap_or_default()
    }

    pub fn store_name(&self) -> &str {
        self.store.as_ref().map(StoreRef::name).unwrap_or_default()
    }
}

/// Body of `PUT packing-lists/{id}` issued once a transmission finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingListUpdate {
    pub status: PackingListStatus,
    pub to_store_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_populated_and_bare_product_refs() {
        let list: PackingList = serde_json::from_value(json!({
            "_id": "pl-1",
            "boxNumber": "BOX-7",
            "status": "approved",
            "store": { "_id": "st-in", "name": "Kochi Depot" },
            "items": [
                { "product": { "_id": "p-1", "name": "Cardamom", "code": "CRD" }, "quantity": 4 },
                { "product": "p-2", "quantity": 2 },
                { "quantity": 1 }
            ]
        }))
        .unwrap();

        assert_eq!(list.store_id(), "st-in");
        assert_eq!(list.store_name(), "Kochi Depot");
        assert_eq!(list.items[0].product_id(), "p-1");
        assert_eq!(list.items[0].product.as_ref().unwrap().code(), "CRD");
        assert_eq!(list.items[1].product_id(), "p-2");
        assert_eq!(list.items[2].product_id(), "");
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(
            serde_json::to_value(PackingListStatus::InTransit).unwrap(),
            json!("in_transit")
        );
        assert!(PackingListStatus::India.is_transmittable());
        assert!(!PackingListStatus::Uae.is_transmittable());
    }
}
