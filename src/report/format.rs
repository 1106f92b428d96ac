//! Display formatting for amounts

/// Two-decimal amount with thousands separators and a trailing currency
/// symbol, e.g. `1,102.50 €`
pub fn format_currency(value: f64, currency: &str) -> String {
    let rendered = format!("{:.2}", value.abs());
    let (whole, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // "-0.00" reads badly
    let sign = if value < 0.0 && rendered != "0.00" { "-" } else { "" };
    if currency.is_empty() {
        format!("{}{}.{}", sign, grouped, fraction)
    } else {
        format!("{}{}.{} {}", sign, grouped, fraction, currency)
    }
}
