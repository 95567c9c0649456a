pub mod phrase_ops;
pub mod repl;

use unicode_width::UnicodeWidthStr;

/// Pad with spaces to `width` display columns. CJK characters are
/// double-width, so byte or char counts would misalign the table.
pub(crate) fn pad_to(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(UnicodeWidthStr::width(text));
    format!("{text}{}", " ".repeat(pad))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_counts_display_columns() {
        // "你好" occupies four columns
        assert_eq!(pad_to("你好", 6), "你好  ");
        assert_eq!(pad_to("Hi", 4), "Hi  ");
        assert_eq!(pad_to("too long", 3), "too long");
    }
}
