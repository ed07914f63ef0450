use serde::{Deserialize, Serialize};

use crate::transmission::TransmissionForm;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenTransmissionRequest {
    pub packing_list_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateRequest {
    pub exchange_rate: String,
}

#[derive(Debug, Deserialize)]
pub struct MarginRequest {
    pub margin: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerPriceRequest {
    pub dp_price: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationRequest {
    pub to_store_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteTransmissionRequest {
    #[serde(default)]
    pub to_store_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransmissionResponse {
    #[serde(flatten)]
    pub form: TransmissionForm,
    pub summary: TransmissionSummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransmissionSummary {
    pub product_lines: usize,
    pub total_quantity: i64,
    pub priced_lines: usize,
    pub total_final_price: f64,
}

// Convert from form state to Response DTO
impl From<TransmissionForm> for TransmissionResponse {
    fn from(form: TransmissionForm) -> Self {
        let summary = TransmissionSummary {
            product_lines: form.items.len(),
            total_quantity: form.items.iter().map(|i| i.quantity).sum(),
            priced_lines: form.items.iter().filter(|i| i.final_price > 0.0).count(),
            total_final_price: form
                .items
                .iter()
                .map(|i| i.final_price * i.quantity as f64)
                .sum(),
        };
        Self { form, summary }
    }
}
