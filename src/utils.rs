//! Utility functions for number formatting.
//!
//! The site renders figures the way a browser's `Number.prototype.toLocaleString`
//! does for `en-US`: comma-grouped thousands, at most three fraction digits.
//! Rounding follows the browser too (half rounds up, toward +inf).

/// Round half toward positive infinity: `2.5 → 3`, `-2.5 → -2`.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Format `value` with comma-grouped thousands and up to three decimals.
///
/// - 1234567 → "1,234,567"
/// - 1234.5 → "1,234.5"
/// - 0.12345 → "0.123"
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let negative = value < 0.0;
    let scaled = round_half_up(value.abs() * 1000.0) as u64;
    let whole = scaled / 1000;
    let frac = scaled % 1000;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 5);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if frac > 0 {
        let frac = format!("{:03}", frac);
        grouped.push('.');
        grouped.push_str(frac.trim_end_matches('0'));
    }

    if negative && scaled > 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// `group_thousands`, with `N/A` for a missing figure.
pub fn format_number(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), group_thousands)
}
