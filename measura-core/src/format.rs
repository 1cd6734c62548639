//! Significant-figure rendering for display

/// Render `value` with `sigfigs` significant digits in general notation.
///
/// Fixed notation is used while the decimal exponent of the rounded value
/// lies in `-4..sigfigs`, scientific notation (`1.235e+05`) otherwise.
/// Trailing zeros and a dangling decimal point are dropped, so `1.0`
/// renders as `1` and `32.00` as `32`.
pub fn format_sigfigs(value: f64, sigfigs: u32) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let precision = sigfigs.max(1) as usize;

    // Exponent after rounding to `precision` digits: 9.9996 rounds to 1.000e1
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => match e.parse::<i32>() {
            Ok(exp) => (m, exp),
            Err(_) => return scientific,
        },
        None => return scientific,
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.unsigned_abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
