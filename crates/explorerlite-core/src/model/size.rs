/// Size formatting utilities -- human-readable byte counts.
///
/// All internal sizes are `u64` bytes. Floating point is only used
/// at the display-formatting boundary.

/// Display units in ascending order. `PB` is the cap: anything larger is
/// still expressed in petabytes.
const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Format a byte count with two decimal places and a binary (1024) unit step.
///
/// `format_size(100)` is `"100.00 B"`, `format_size(1536)` is `"1.50 KB"`.
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = UNITS[0];
    for (i, &u) in UNITS.iter().enumerate() {
        unit = u;
        if value < 1024.0 || i == UNITS.len() - 1 {
            break;
        }
        value /= 1024.0;
    }
    format!("{value:.2} {unit}")
}

/// Like [`format_size`] but renders a missing size as `"N/A"`.
pub fn format_size_opt(bytes: Option<u64>) -> String {
    match bytes {
        Some(b) => format_size(b),
        None => "N/A".to_string(),
    }
}

/// Format a file count with thousand separators.
pub fn format_count(count: u64) -> String {
    if count < 1_000 {
        return count.to_string();
    }
    let s = count.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, ch) in s.chars().rev().enumerate() {
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
    fn test_format_size_bytes() {
        assert_eq!(format_size(0), "0.00 B");
        assert_eq!(format_size(100), "100.00 B");
        assert_eq!(format_size(1023), "1023.00 B");
    }

    #[test]
    fn test_format_size_kb_mb_gb() {
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1_048_576), "1.00 MB");
        assert_eq!(format_size(1_073_741_824), "1.00 GB");
    }

    #[test]
    fn test_format_size_caps_at_pb() {
        assert_eq!(format_size(1u64 << 50), "1.00 PB");
        assert_eq!(format_size(1u64 << 60), "1024.00 PB");
    }

    #[test]
    fn test_format_size_opt_missing() {
        assert_eq!(format_size_opt(None), "N/A");
        assert_eq!(format_size_opt(Some(10)), "10.00 B");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }
}
