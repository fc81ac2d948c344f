//! Value text field

/// Parse the value field; anything that is not a number becomes 0.0.
///
/// Surrounding whitespace is not stripped, so `" 5"` is not a number.
pub fn parse_input_value(text: &str) -> f64 {
    text.parse().unwrap_or(0.0)
}
