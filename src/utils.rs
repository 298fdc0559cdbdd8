use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Shortens `s` to at most `max_width` display columns, ending in "..." when cut.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width - 3 {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out.push_str("...");
    out
}

pub fn grid_rows(len: usize, columns: usize) -> usize {
    len.div_ceil(columns.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_no_truncation() {
        assert_eq!(truncate_string("Aspirin", 10), "Aspirin");
    }

    #[test]
    fn test_truncate_string_with_truncation() {
        assert_eq!(truncate_string("Active or recent bleeding", 10), "Active ...");
    }

    #[test]
    fn test_truncate_string_exact_length() {
        assert_eq!(truncate_string("Oral", 4), "Oral");
    }

    #[test]
    fn test_truncate_string_tiny_width() {
        assert_eq!(truncate_string("Nitroglycerin", 2), "..");
    }

    #[test]
    fn test_truncate_string_wide_chars() {
        assert_eq!(truncate_string("🔍 Asp...", 6), "🔍 ...");
    }

    #[test]
    fn test_grid_rows() {
        assert_eq!(grid_rows(11, 5), 3);
        assert_eq!(grid_rows(10, 5), 2);
        assert_eq!(grid_rows(0, 5), 0);
    }
}
