pub fn clamp_name(value: &str, width: usize) -> String {
    let value_len = value.chars().count();
    if value_len <= width {
        return value.to_string();
    }
    let trimmed = value
        .chars()
        .take(width.saturating_sub(2))
        .collect::<String>();
    format!("{trimmed}..")
}

/// Header strings are opaque; an empty one renders as a dash.
pub fn or_placeholder(value: &str) -> String {
    if value.trim().is_empty() {
        "--".to_string()
    } else {
        value.to_string()
    }
}
