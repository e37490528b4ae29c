//! Shared utility functions

use unicode_width::UnicodeWidthChar;

/// Truncate a string to at most `max_cols` terminal columns, appending an
/// ellipsis when anything was cut.
///
/// Width is measured in display cells, not bytes or chars, so emoji and CJK
/// candidates truncate where they actually wrap on screen.
pub fn fit_width(s: &str, max_cols: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_cols {
        return s.to_string();
    }
    let budget = max_cols.saturating_sub(1); // room for the ellipsis
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_strings_pass_through() {
        assert_eq!(fit_width("hello", 10), "hello");
        assert_eq!(fit_width("", 5), "");
    }

    #[test]
    fn ascii_truncates_with_ellipsis() {
        assert_eq!(fit_width("hello world", 6), "hello…");
    }

    #[test]
    fn wide_chars_count_two_columns() {
        // Each CJK char is two columns wide
        assert_eq!(fit_width("日本語テスト", 5), "日本…");
    }

    #[test]
    fn exact_fit_is_not_truncated() {
        assert_eq!(fit_width("abcdef", 6), "abcdef");
    }
}
