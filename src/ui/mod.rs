pub mod cards;
pub mod panels;
pub mod plot;
pub mod table;

/// Placeholder for blank text cells.
pub fn or_dash(text: &str) -> &str {
    if text.trim().is_empty() {
        "—"
    } else {
        text
    }
}

pub fn year_text(year: Option<i32>) -> String {
    year.map_or_else(|| "—".to_string(), |y| y.to_string())
}

pub fn percentile_text(percentile: Option<f64>) -> String {
    percentile.map_or_else(|| "—".to_string(), |p| format!("{p}"))
}
