//! Value formatting for display.

/// Significant digits of the `%g` style.
const PRECISION: usize = 6;

/// Format a number the way C's `%g` does: six significant digits, trailing
/// zeros dropped, exponent form for very large or very small magnitudes.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if n == 0.0 {
        return if n.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // The exponent after rounding to PRECISION digits picks the style.
    let sci = format!("{:.*e}", PRECISION - 1, n);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return sci;
    };

    if exp < -4 || exp >= PRECISION as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs())
    } else {
        let decimals = (PRECISION as i32 - 1 - exp) as usize;
        trim_fraction(&format!("{:.*}", decimals, n)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Fit `text` into a column of `width` characters: longer text is cut and
/// ends in `...`, shorter text is right-aligned.
pub fn fit_to_width(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len > width {
        let keep = width.saturating_sub(3);
        let mut cut: String = text.chars().take(keep).collect();
        cut.push_str(&"..."[..width.min(3)]);
        cut
    } else {
        format!("{:>width$}", text, width = width)
    }
}
