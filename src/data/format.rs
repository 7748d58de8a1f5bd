//! Number formatting for the SQL detail view.

/// Format a microsecond duration as seconds with two decimals.
pub fn micros_to_seconds(micros: f64) -> String {
    format!("{:.2}", micros / 1_000_000.0)
}

/// Format `value / executions` with two decimals.
///
/// Returns `"-"` when there were no executions.
pub fn per_execution(value: f64, executions: u64) -> String {
    if executions == 0 {
        return "-".to_string();
    }
    format!("{:.2}", value / executions as f64)
}

/// Round a percentage to a whole number, halves away from zero.
pub fn fixed_percentage(value: f64) -> String {
    let rounded = value.round();
    // Avoid printing "-0" for small negative inputs.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.0}", rounded)
}

/// Format a count for display (e.g., 1234 -> "1.2K", 1234567 -> "1.2M").
pub fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_micros_to_seconds() {
        assert_eq!(micros_to_seconds(1_500_000.0), "1.50");
        assert_eq!(micros_to_seconds(0.0), "0.00");
        assert_eq!(micros_to_seconds(12_345.0), "0.01");
    }

    #[test]
    fn test_per_execution() {
        assert_eq!(per_execution(10.0, 4), "2.50");
        assert_eq!(per_execution(10.0, 0), "-");
    }

    #[test]
    fn test_fixed_percentage() {
        assert_eq!(fixed_percentage(66.6), "67");
        assert_eq!(fixed_percentage(33.4), "33");
        assert_eq!(fixed_percentage(2.5), "3");
        assert_eq!(fixed_percentage(100.0), "100");
        assert_eq!(fixed_percentage(-0.2), "0");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1234), "1.2K");
        assert_eq!(format_count(1_234_567), "1.2M");
    }
}
