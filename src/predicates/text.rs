//! Number and duration formatting for description templates.

/// Format a duration in seconds as `"1d 2h 3m 4s"`, omitting zero units.
///
/// Non-positive durations render as `"0s"`.
pub fn pretty_duration(seconds: i64) -> String {
    if seconds <= 0 {
        return "0s".to_string();
    }
    let units = [(86_400, 'd'), (3_600, 'h'), (60, 'm'), (1, 's')];
    let mut rest = seconds;
    let mut parts = Vec::new();
    for (size, suffix) in units {
        let count = rest / size;
        rest %= size;
        if count > 0 {
            parts.push(format!("{count}{suffix}"));
        }
    }
    parts.join(" ")
}

/// Format an integer with thousands separators (`12,345`).
pub fn pretty_number(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_duration() {
        assert_eq!(pretty_duration(-1), "0s");
        assert_eq!(pretty_duration(0), "0s");
        assert_eq!(pretty_duration(45), "45s");
        assert_eq!(pretty_duration(3_600), "1h");
        assert_eq!(pretty_duration(90_061), "1d 1h 1m 1s");
    }

    #[test]
    fn test_pretty_number() {
        assert_eq!(pretty_number(0), "0");
        assert_eq!(pretty_number(999), "999");
        assert_eq!(pretty_number(1_000), "1,000");
        assert_eq!(pretty_number(1_234_567), "1,234,567");
        assert_eq!(pretty_number(-12_345), "-12,345");
    }
}
