//! Number formatting for labels, ticks and tooltips.

/// `1019.57` → `$1,019.57`
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{sign}${}.{frac}", group_thousands(whole))
}

/// Axis tick flavor: at most two decimals, trailing zeros dropped.
/// `30987.5` → `$30,987.5`, `5000.0` → `$5,000`
pub fn format_axis_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        format!("{sign}${}", group_thousands(whole))
    } else {
        format!("{sign}${}.{frac}", group_thousands(whole))
    }
}

/// `0.125` → `12.5%`
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

pub fn month_label(month: u32) -> String {
    format!("Month {month}")
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(139.94), "$139.94");
        assert_eq!(format_currency(1019.57), "$1,019.57");
        assert_eq!(format_currency(30987.5), "$30,987.50");
        assert_eq!(format_currency(1234567.0), "$1,234,567.00");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(-12.0), "-$12.00");
    }

    #[test]
    fn test_axis_currency() {
        assert_eq!(format_axis_currency(30987.5), "$30,987.5");
        assert_eq!(format_axis_currency(5000.0), "$5,000");
        assert_eq!(format_axis_currency(139.94), "$139.94");
        assert_eq!(format_axis_currency(0.0), "$0");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(format_percentage(0.125), "12.5%");
        assert_eq!(format_percentage(1.0), "100.0%");
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label(12), "Month 12");
    }
}
