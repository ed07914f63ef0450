use serde::{Deserialize, Serialize};
use tracing::warn;

use super::parse::{apply_margin, parse_amount, to_aed};
use super::TransmissionError;
use crate::models::packing_list::PackingList;
use crate::models::store_stock::StoreStock;

/// One packing-list line being priced for the destination store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransmissionItem {
    pub packing_list_id: String,
    pub product_id: String,
    pub product_name: String,
    pub product_code: String,
    pub quantity: i64,
    /// INR price at the source store.
    pub original_price: f64,
    /// Raw percent text as typed.
    pub margin: String,
    /// INR price after margin.
    pub unit_price: f64,
    #[serde(rename = "unitPriceAED")]
    pub unit_price_aed: f64,
    /// Raw dealer price text (AED) as typed.
    pub dp_price: String,
    pub final_price: f64,
}

impl TransmissionItem {
    fn refresh_aed(&mut self, exchange_rate: f64) {
        self.unit_price_aed = to_aed(self.unit_price, exchange_rate);
    }

    fn refresh_final_price(&mut self) {
        self.final_price = if self.dp_price.trim().is_empty() {
            0.0
        } else {
            parse_amount(&self.dp_price)
        };
    }
}

/// Client-side state of an open transmission dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransmissionForm {
    pub packing_list_id: String,
    pub from_store_id: String,
    pub to_store_id: String,
    pub exchange_rate: String,
    pub items: Vec<TransmissionItem>,
}

impl TransmissionForm {
    /// Builds the priced rows for `packing_list` using the INR unit prices
    /// found in the source store's stock. Lines without a matching stock
    /// record start at a zero price.
    pub fn from_packing_list(packing_list: &PackingList, store_stock: &[StoreStock]) -> Self {
        let items = packing_list
            .items
            .iter()
            .map(|line| {
                let product_id = line.product_id().to_string();
                let matched = store_stock
                    .iter()
                    .find(|stock| !product_id.is_empty() && stock.product.id() == product_id);

                let original_price = match matched {
                    Some(stock) => stock.unit_price,
                    None => {
                        warn!(
                            packing_list_id = %packing_list.id,
                            product_id = %product_id,
                            "No source stock price for product, defaulting to 0"
                        );
                        0.0
                    }
                };

                // Prefer the packing list's populated product, fall back to the stock record's.
                let product = line
                    .product
                    .as_ref()
                    .filter(|p| !p.name().is_empty())
                    .or(matched.map(|s| &s.product));

                TransmissionItem {
                    packing_list_id: packing_list.id.clone(),
                    product_id,
                    product_name: product.map(|p| p.name().to_string()).unwrap_or_default(),
                    product_code: product.map(|p| p.code().to_string()).unwrap_or_default(),
                    quantity: line.quantity,
                    original_price,
                    margin: String::new(),
                    unit_price: original_price,
                    unit_price_aed: 0.0,
                    dp_price: String::new(),
                    final_price: 0.0,
                }
            })
            .collect();

        Self {
            packing_list_id: packing_list.id.clone(),
            from_store_id: packing_list.store_id().to_string(),
            to_store_id: packing_list.to_store_id.clone().unwrap_or_default(),
            exchange_rate: String::new(),
            items,
        }
    }

    pub fn exchange_rate_value(&self) -> f64 {
        parse_amount(&self.exchange_rate)
    }

    /// Re-derives every item's AED price from its current INR unit price.
    /// Dealer prices are left as typed.
    pub fn set_exchange_rate(&mut self, rate: impl Into<String>) {
        self.exchange_rate = rate.into();
        let rate = self.exchange_rate_value();
        for item in &mut self.items {
            item.refresh_aed(rate);
            item.refresh_final_price();
        }
    }

    pub fn set_item_margin(
        &mut self,
        index: usize,
        margin: impl Into<String>,
    ) -> Result<&TransmissionItem, TransmissionError> {
        let rate = self.exchange_rate_value();
        let item = self.item_mut(index)?;
        item.margin = margin.into();
        item.unit_price = apply_margin(item.original_price, parse_amount(&item.margin));
        item.refresh_aed(rate);
        item.refresh_final_price();
        Ok(item)
    }

    /// The only way a final price is set; the computed AED price never
    /// fills it in.
    pub fn set_item_dealer_price(
        &mut self,
        index: usize,
        dp_price: impl Into<String>,
    ) -> Result<&TransmissionItem, TransmissionError> {
        let item = self.item_mut(index)?;
        item.dp_price = dp_price.into();
        item.refresh_final_price();
        Ok(item)
    }

    pub fn set_destination_store(&mut self, to_store_id: impl Into<String>) {
        self.to_store_id = to_store_id.into();
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut TransmissionItem, TransmissionError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(TransmissionError::ItemIndexOutOfRange { index, len })
    }
}
