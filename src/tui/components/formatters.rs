// Value formatters
//
// Shared formatting utilities for displaying times and money in the TUI.

/// Format seconds as "42s" or "3m 13s" (rounded to whole seconds)
///
/// # Examples
/// ```ignore
/// assert_eq!(format_duration(3.94), "4s");
/// assert_eq!(format_duration(193.0), "3m 13s");
/// ```
pub fn format_duration(secs: f64) -> String {
    let total = secs.max(0.0).round() as u64;
    if total < 60 {
        format!("{}s", total)
    } else {
        format!("{}m {}s", total / 60, total % 60)
    }
}

/// Format an estimated spend with three decimals
///
/// # Examples
/// ```ignore
/// assert_eq!(format_cost(0.02), "$0.020");
/// ```
pub fn format_cost(cost: f64) -> String {
    format!("${:.3}", cost)
}

/// Format a share with one decimal
pub fn format_percent(pct: f64) -> String {
    format!("{:.1}%", pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(format_duration(0.0), "0s");
        assert_eq!(format_duration(3.94), "4s");
        assert_eq!(format_duration(59.4), "59s");
        assert_eq!(format_duration(123.0), "2m 3s");
        assert_eq!(format_duration(193.0), "3m 13s");
        assert_eq!(format_duration(-2.0), "0s");
    }

    #[test]
    fn money_and_shares() {
        assert_eq!(format_cost(0.002), "$0.002");
        assert_eq!(format_cost(0.2), "$0.200");
        assert_eq!(format_percent(33.333), "33.3%");
    }
}
