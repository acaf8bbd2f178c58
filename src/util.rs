//! Shared utility functions

use unicode_width::UnicodeWidthChar;

/// Truncate a string to at most `max_chars` characters.
///
/// Counts `char`s rather than bytes so multi-byte text (journal names,
/// author lists) is never split inside a code point.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Fit a string into `max_width` terminal cells, appending `…` when cut.
pub fn fit_width(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return s.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        // Reserve one cell for the ellipsis
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Percentage of `part` in `whole`, 0.0 when `whole` is zero.
pub fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_shorter_than_max() {
        assert_eq!(truncate_chars("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        // Each character is 3 bytes in UTF-8
        assert_eq!(truncate_chars("日本語", 2), "日本");
        assert_eq!(truncate_chars("server error", 6), "server");
    }

    #[test]
    fn test_truncate_to_zero() {
        assert_eq!(truncate_chars("hello", 0), "");
        assert_eq!(truncate_chars("", 5), "");
    }

    #[test]
    fn test_fit_width_adds_ellipsis() {
        assert_eq!(fit_width("short", 10), "short");
        assert_eq!(fit_width("Nausea and vomiting", 8), "Nausea …");
        assert_eq!(fit_width("abc", 0), "");
    }

    #[test]
    fn test_percent_handles_zero_total() {
        assert_eq!(percent(3, 0), 0.0);
        assert!((percent(1, 3) - 33.333).abs() < 0.01);
    }
}
