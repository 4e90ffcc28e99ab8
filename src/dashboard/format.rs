//! Display formatting for headline metrics.

/// Group the integer part of a non-negative decimal string with commas.
fn group_thousands(digits: &str) -> String {
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3 + 4);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// `1234567.8` → `$1,234,568`; negatives keep the sign after the currency symbol.
pub fn currency(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let sign = if value < 0.0 && rounded != "0" { "-" } else { "" };
    format!("${sign}{}", group_thousands(&rounded))
}

/// `0.1234` with 2 decimals → `12.34%`.
pub fn percent(ratio: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, ratio * 100.0)
}

/// Value already in percent units, e.g. `12.5` → `12.5%`.
pub fn percent_points(points: f64, decimals: usize) -> String {
    format!("{points:.decimals$}%")
}

/// Fixed decimals, or `N/A` for a missing value.
pub fn fixed_or_na(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub const NOT_AVAILABLE: &str = "N/A";
