//! Display formatting for amounts (ko-KR conventions)

/// Insert a comma every three digits of an ASCII digit string.
///
/// Leading zeros are dropped the way a number formatter would ("007" -> "7").
pub fn group_digits(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    let digits = if trimmed.is_empty() && !digits.is_empty() {
        "0"
    } else {
        trimmed
    };

    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a number with thousands separators and up to three fraction digits
pub fn format_number(value: f64) -> String {
    format_with_fraction(value, 3)
}

/// Format an amount as Korean won, e.g. `₩1,234,567`
pub fn format_currency(value: f64) -> String {
    let body = format_with_fraction(value.abs(), 0);
    if value.round() < 0.0 {
        format!("-₩{body}")
    } else {
        format!("₩{body}")
    }
}

/// Compact chart-axis label in 억 (10^8), 천만 (10^7) and 만 (10^4) units
pub fn compact_axis_label(value: f64) -> String {
    if value >= 100_000_000.0 {
        format!("{:.1}억", value / 100_000_000.0)
    } else if value >= 10_000_000.0 {
        format!("{:.0}천만", value / 10_000_000.0)
    } else if value >= 10_000.0 {
        format!("{:.0}만", value / 10_000.0)
    } else {
        value.to_string()
    }
}

/// Signed percentage with one decimal, as shown in the result table
pub fn format_percent(value: f64) -> String {
    if value >= 0.0 {
        format!("+{value:.1}%")
    } else {
        format!("{value:.1}%")
    }
}

fn format_with_fraction(value: f64, max_fraction: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", max_fraction, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let grouped = group_digits(int_part);
    let is_zero = grouped == "0" && frac_part.is_empty();
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}
