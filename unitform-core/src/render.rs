//! Result rendering

/// Magnitudes above this print in exponent form (2^53)
const MAX_PLAIN: f64 = 9007199254740992.0;
/// Non-zero magnitudes below this print in exponent form
const MIN_PLAIN: f64 = 1e-4;

/// Render a conversion result as its shortest round-trip decimal text.
///
/// Integral values keep a trailing `.0` (`32.0`, `1000.0`), fractional values
/// print every digit needed to read back the same `f64`. Very small and very
/// large magnitudes use exponent form with a signed, two-digit exponent
/// (`1e-05`, `1.5e+16`); NaN prints as `nan`.
pub fn render(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if value != 0.0 && (magnitude < MIN_PLAIN || magnitude > MAX_PLAIN) {
        return exponent_form(value);
    }
    format!("{:?}", value)
}

fn exponent_form(value: f64) -> String {
    let text = format!("{:e}", value);
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text;
    };
    match exponent.parse::<i32>() {
        Ok(exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        Err(_) => text,
    }
}
