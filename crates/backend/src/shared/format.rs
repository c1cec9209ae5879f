/// Groups decimal digits by thousands with commas
///
/// # Examples
/// ```ignore
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: usize) -> String {
    group_digits(&n.to_string())
}

/// Currency amount rounded to whole units, e.g. `¥22,800`
pub fn format_money(value: f64, currency: &str) -> String {
    let rounded = format!("{:.0}", value.abs());
    let sign = if value < 0.0 && rounded != "0" { "-" } else { "" };
    format!("{}{}{}", currency, sign, group_digits(&rounded))
}

/// Integer count with an optional unit suffix, e.g. `1,258人`
pub fn format_count(n: i64, unit: &str) -> String {
    let sign = if n < 0 { "-" } else { "" };
    format!("{}{}{}", sign, group_digits(&n.unsigned_abs().to_string()), unit)
}

/// Ratio rendered as a percentage (1.52 -> "152.0%" with one decimal)
pub fn format_percent(ratio: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, ratio * 100.0)
}

fn group_digits(digits: &str) -> String {
    let mut result = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(22800.0, "¥"), "¥22,800");
        assert_eq!(format_money(88.37, "¥"), "¥88");
        assert_eq!(format_money(1499.6, "¥"), "¥1,500");
        assert_eq!(format_money(0.0, "¥"), "¥0");
        assert_eq!(format_money(-1234.0, "¥"), "¥-1,234");
        assert_eq!(format_money(-0.2, "¥"), "¥0");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(258, "人"), "258人");
        assert_eq!(format_count(12345, "人"), "12,345人");
        assert_eq!(format_count(-5, ""), "-5");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(1.52, 1), "152.0%");
        assert_eq!(format_percent(0.0, 1), "0.0%");
        assert_eq!(format_percent(0.8, 0), "80%");
    }
}
