use crate::transmission::TransmissionForm;

const HEADERS: [&str; 9] = [
    "Product Code",
    "Product Name",
    "Quantity",
    "Original Price (INR)",
    "Margin %",
    "Unit Price (INR)",
    "Unit Price (AED)",
    "DP Price (AED)",
    "Final Price (AED)",
];

fn money(value: f64) -> String {
    format!("{value:.2}")
}

/// Priced rows of an open transmission as CSV, one line per item.
pub fn transmission_csv(form: &TransmissionForm) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS)?;

    for item in &form.items {
        writer.write_record([
            item.product_code.clone(),
            item.product_name.clone(),
            item.quantity.to_string(),
            money(item.original_price),
            item.margin.clone(),
            money(item.unit_price),
            money(item.unit_price_aed),
            item.dp_price.clone(),
            money(item.final_price),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}
