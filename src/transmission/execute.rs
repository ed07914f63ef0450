use tracing::{error, info, instrument, warn};

use super::form::{TransmissionForm, TransmissionItem};
use super::parse::parse_amount;
use super::report::{CreatedStock, ItemProblem, Notice, TransmissionReport};
use super::TransmissionError;
use crate::backend::InventoryBackend;
use crate::models::packing_list::{PackingListStatus, PackingListUpdate};
use crate::models::store_stock::{NewStoreStock, StoreStock};

pub const TRANSMITTED_CURRENCY: &str = "AED";

/// Pushes every priced row of `form` into `to_store_id` as a new AED stock
/// record, one call at a time, then marks the packing list as arrived in
/// the UAE.
///
/// A bad row or a failed save is reported and skipped; the remaining rows
/// still go out and the packing list is updated regardless. Nothing is
/// rolled back, and running the same form twice creates the rows twice.
#[instrument(skip(form, backend), fields(packing_list_id = %form.packing_list_id, items = form.items.len()))]
pub async fn execute(
    form: &TransmissionForm,
    to_store_id: &str,
    backend: &dyn InventoryBackend,
) -> Result<TransmissionReport, TransmissionError> {
    let to_store_id = to_store_id.trim();
    if to_store_id.is_empty() {
        return Err(TransmissionError::MissingDestination);
    }

    let exchange_rate = form.exchange_rate_value();
    let mut report = TransmissionReport {
        packing_list_id: form.packing_list_id.clone(),
        to_store_id: to_store_id.to_string(),
        created: Vec::new(),
        skipped: Vec::new(),
        failed: Vec::new(),
        packing_list_updated: false,
        success: false,
        notices: Vec::new(),
    };

    let destination_stock = match backend.list_store_stock(to_store_id).await {
        Ok(stock) => stock,
        Err(e) => {
            warn!(error = %e, "Could not load destination stock, continuing without it");
            report
                .notices
                .push(Notice::warning("Could not check existing stock at the destination store"));
            Vec::new()
        }
    };

    for (index, item) in form.items.iter().enumerate() {
        if let Some(reason) = invalid_reason(item) {
            warn!(index, product_id = %item.product_id, %reason, "Skipping transmission item");
            report.notices.push(
                Notice::error(format!("Skipped {}: {reason}", display_name(item)))
                    .for_product(&item.product_id),
            );
            report.skipped.push(ItemProblem {
                index,
                product_id: item.product_id.clone(),
                reason: reason.to_string(),
            });
            continue;
        }

        if let Some(existing) = find_existing(&destination_stock, &item.product_id) {
            // No merge: the destination ends up with a second row for this product.
            info!(
                product_id = %item.product_id,
                existing_quantity = existing.quantity,
                "Destination already stocks product, creating a separate AED entry"
            );
            report.notices.push(
                Notice::info(format!(
                    "{} already exists in the destination store, adding a separate AED entry",
                    display_name(item)
                ))
                .for_product(&item.product_id),
            );
        }

        let payload = stock_payload(form, item, to_store_id, exchange_rate);
        match backend.save_store_stock(&payload).await {
            Ok(saved) => {
                info!(product_id = %item.product_id, quantity = item.quantity, "Created AED stock entry");
                report.created.push(CreatedStock {
                    index,
                    product_id: item.product_id.clone(),
                    stock_id: saved.id,
                });
            }
            Err(e) => {
                error!(product_id = %item.product_id, error = %e, "Failed to create AED stock entry");
                report.notices.push(
                    Notice::error(format!("Failed to add {} to store: {e}", display_name(item)))
                        .for_product(&item.product_id),
                );
                report.failed.push(ItemProblem {
                    index,
                    product_id: item.product_id.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let update = PackingListUpdate {
        status: PackingListStatus::Uae,
        to_store_id: to_store_id.to_string(),
    };
    match backend.update_packing_list(&form.packing_list_id, &update).await {
        Ok(_) => {
            report.packing_list_updated = true;
            report.notices.push(Notice::success(format!(
                "Transmitted {} of {} products",
                report.created.len(),
                form.items.len()
            )));
        }
        Err(e) => {
            error!(error = %e, "Failed to update packing list after transmission");
            report
                .notices
                .push(Notice::error(format!("Transmission failed: could not update packing list: {e}")));
        }
    }
    report.success = report.packing_list_updated;

    info!(
        created = report.created.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        success = report.success,
        "Transmission finished"
    );
    Ok(report)
}

fn invalid_reason(item: &TransmissionItem) -> Option<&'static str> {
    if item.product_id.trim().is_empty() {
        Some("missing product id")
    } else if item.quantity <= 0 {
        Some("quantity must be greater than zero")
    } else {
        None
    }
}

fn find_existing<'a>(stock: &'a [StoreStock], product_id: &str) -> Option<&'a StoreStock> {
    stock.iter().find(|s| s.product.id() == product_id)
}

fn display_name(item: &TransmissionItem) -> &str {
    if item.product_name.is_empty() {
        &item.product_id
    } else {
        &item.product_name
    }
}

fn stock_payload(
    form: &TransmissionForm,
    item: &TransmissionItem,
    to_store_id: &str,
    exchange_rate: f64,
) -> NewStoreStock {
    NewStoreStock {
        product_id: item.product_id.clone(),
        store_id: to_store_id.to_string(),
        quantity: item.quantity,
        margin: parse_amount(&item.margin),
        currency: TRANSMITTED_CURRENCY.to_string(),
        unit_price: item.unit_price_aed,
        unit_price_aed: item.unit_price_aed,
        packing_list_id: form.packing_list_id.clone(),
        dp_price: parse_amount(&item.dp_price),
        exchange_rate,
        final_price: item.final_price,
    }
}
