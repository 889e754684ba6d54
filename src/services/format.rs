//! Number formatting shared by the evaluators

/// Format a number for display.
/// Whole numbers lose their decimal point (4.0 -> "4"); other values are
/// limited to 10 decimal places with trailing zeros trimmed.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e12 {
        format!("{}", value as i64)
    } else {
        trim_zeros(format!("{:.10}", value))
    }
}

/// Like [`format_number`], but switches to scientific notation for very
/// small or very large magnitudes. Used for unit conversions.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e12 {
        format!("{}", value as i64)
    } else if value != 0.0 && (value.abs() < 0.01 || value.abs() >= 1e6) {
        format!("{:.4e}", value)
    } else {
        trim_zeros(format!("{:.6}", value))
    }
}

fn trim_zeros(formatted: String) -> String {
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
