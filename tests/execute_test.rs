mod common;

use common::{packing_list, source_stock, RecordingBackend, DEST_STORE};
use store_transmission::models::packing_list::PackingListStatus;
use store_transmission::models::store_stock::StoreStock;
use store_transmission::transmission::{self, NoticeLevel, TransmissionError, TransmissionForm};

fn priced_form(lines: &[(&str, i64)]) -> TransmissionForm {
    let list = packing_list("pl-1", lines);
    let stock: Vec<_> = lines.iter().map(|(id, _)| source_stock(id, 100.0)).collect();
    let mut form = TransmissionForm::from_packing_list(&list, &stock);
    for index in 0..form.items.len() {
        form.set_item_margin(index, "10").unwrap();
        form.set_item_dealer_price(index, "6.25").unwrap();
    }
    form.set_exchange_rate("0.05");
    form
}

#[tokio::test]
async fn missing_destination_issues_no_calls() {
    let backend = RecordingBackend::with_packing_list(packing_list("pl-1", &[("p1", 5)]));
    let form = priced_form(&[("p1", 5)]);

    for to_store in ["", "   "] {
        let err = transmission::execute(&form, to_store, &backend).await.unwrap_err();
        assert_eq!(err, TransmissionError::MissingDestination);
    }
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn creates_aed_stock_and_marks_list_uae() {
    let backend = RecordingBackend::with_packing_list(packing_list("pl-1", &[("p1", 5)]));
    let form = priced_form(&[("p1", 5)]);

    let report = transmission::execute(&form, DEST_STORE, &backend).await.unwrap();

    assert!(report.success);
    assert!(report.packing_list_updated);
    assert_eq!(report.created.len(), 1);
    assert_eq!(report.created[0].stock_id.as_deref(), Some("ss-1"));

    let created = backend.created();
    assert_eq!(created.len(), 1);
    let payload = &created[0];
    assert_eq!(payload.product_id, "p1");
    assert_eq!(payload.store_id, DEST_STORE);
    assert_eq!(payload.quantity, 5);
    assert_eq!(payload.currency, "AED");
    assert_eq!(payload.margin, 10.0);
    assert!((payload.unit_price - 5.5).abs() < 1e-9);
    assert_eq!(payload.unit_price, payload.unit_price_aed);
    assert_eq!(payload.dp_price, 6.25);
    assert_eq!(payload.final_price, 6.25);
    assert_eq!(payload.exchange_rate, 0.05);
    assert_eq!(payload.packing_list_id, "pl-1");

    let updates = backend.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, "pl-1");
    assert_eq!(updates[0].1.status, PackingListStatus::Uae);
    assert_eq!(updates[0].1.to_store_id, DEST_STORE);
}

#[tokio::test]
async fn zero_quantity_item_is_skipped_but_others_still_go_out() {
    let backend = RecordingBackend::with_packing_list(packing_list("pl-1", &[("p1", 0), ("p2", 4)]));
    let form = priced_form(&[("p1", 0), ("p2", 4)]);

    let report = transmission::execute(&form, DEST_STORE, &backend).await.unwrap();

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].product_id, "p1");
    assert_eq!(report.created.len(), 1);
    assert_eq!(report.created[0].product_id, "p2");
    assert!(report
        .notices
        .iter()
        .any(|n| n.level == NoticeLevel::Error && n.product_id.as_deref() == Some("p1")));

    let calls = backend.calls();
    assert!(!calls.iter().any(|c| c == "POST store-stock p1"));
    assert!(calls.iter().any(|c| c == "POST store-stock p2"));
    // The list is still flipped even though one product never arrived.
    assert!(report.packing_list_updated);
}

#[tokio::test]
async fn missing_product_id_is_skipped() {
    let mut list = packing_list("pl-1", &[("p1", 2), ("p2", 3)]);
    list.items[0].product = None;
    let backend = RecordingBackend::with_packing_list(list.clone());
    let form = TransmissionForm::from_packing_list(&list, &[]);

    let report = transmission::execute(&form, DEST_STORE, &backend).await.unwrap();
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].index, 0);
    assert_eq!(backend.created().len(), 1);
}

#[tokio::test]
async fn save_failure_continues_with_remaining_items() {
    let mut backend =
        RecordingBackend::with_packing_list(packing_list("pl-1", &[("p1", 1), ("p2", 1), ("p3", 1)]));
    backend.failing_products.insert("p2".to_string());
    let form = priced_form(&[("p1", 1), ("p2", 1), ("p3", 1)]);

    let report = transmission::execute(&form, DEST_STORE, &backend).await.unwrap();

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].product_id, "p2");
    let created: Vec<_> = report.created.iter().map(|c| c.product_id.as_str()).collect();
    assert_eq!(created, vec!["p1", "p3"]);
    assert!(report.success);
}

#[tokio::test]
async fn failed_status_update_reports_failure_without_reverting() {
    let mut backend = RecordingBackend::with_packing_list(packing_list("pl-1", &[("p1", 3)]));
    backend.fail_packing_list_update = true;
    let form = priced_form(&[("p1", 3)]);

    let report = transmission::execute(&form, DEST_STORE, &backend).await.unwrap();

    assert!(!report.success);
    assert!(!report.packing_list_updated);
    assert_eq!(backend.created().len(), 1);
    assert_eq!(
        report.notices.last().map(|n| n.level),
        Some(NoticeLevel::Error)
    );
}

#[tokio::test]
async fn existing_destination_stock_is_not_merged() {
    let existing = StoreStock {
        store_id: DEST_STORE.to_string(),
        quantity: 40,
        currency: "AED".to_string(),
        ..source_stock("p1", 5.0)
    };
    let backend = RecordingBackend::with_packing_list(packing_list("pl-1", &[("p1", 3)]))
        .with_stock(vec![existing]);
    let form = priced_form(&[("p1", 3)]);

    let report = transmission::execute(&form, DEST_STORE, &backend).await.unwrap();

    let created = backend.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].quantity, 3);
    assert_eq!(backend.stock.lock().unwrap().len(), 1);

    let info: Vec<_> = report
        .notices
        .iter()
        .filter(|n| n.level == NoticeLevel::Info)
        .collect();
    assert_eq!(info.len(), 1);
    assert_eq!(info[0].product_id.as_deref(), Some("p1"));
    assert!(info[0].message.contains("separate AED entry"));
    assert!(report.success);
}

#[tokio::test]
async fn executing_twice_duplicates_stock_rows() {
    let backend = RecordingBackend::with_packing_list(packing_list("pl-1", &[("p1", 2), ("p2", 2)]));
    let form = priced_form(&[("p1", 2), ("p2", 2)]);

    transmission::execute(&form, DEST_STORE, &backend).await.unwrap();
    transmission::execute(&form, DEST_STORE, &backend).await.unwrap();

    assert_eq!(backend.created().len(), 4);
    assert_eq!(backend.updates().len(), 2);
}

#[tokio::test]
async fn calls_are_issued_in_item_order() {
    let backend = RecordingBackend::with_packing_list(packing_list("pl-1", &[("p1", 1), ("p2", 1)]));
    let form = priced_form(&[("p1", 1), ("p2", 1)]);

    transmission::execute(&form, DEST_STORE, &backend).await.unwrap();

    assert_eq!(
        backend.calls(),
        vec![
            format!("GET store-stock?storeId={DEST_STORE}"),
            "POST store-stock p1".to_string(),
            "POST store-stock p2".to_string(),
            "PUT packing-lists/pl-1".to_string(),
        ]
    );
}
