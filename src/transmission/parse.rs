/// Reads a numeric text field the way the transmission form does: anything
/// that is not a single finite number (empty, `"12.3.4"`, `"abc"`, `"NaN"`)
/// counts as zero.
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// INR -> AED conversion; a non-positive rate yields no AED price at all.
pub fn to_aed(unit_price: f64, exchange_rate: f64) -> f64 {
    if exchange_rate > 0.0 {
        unit_price * exchange_rate
    } else {
        0.0
    }
}

/// Marked-up INR unit price for a margin given in percent.
pub fn apply_margin(original_price: f64, margin_percent: f64) -> f64 {
    original_price * (1.0 + margin_percent / 100.0)
}
