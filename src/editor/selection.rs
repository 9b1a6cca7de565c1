//! Text selection tracking and snippet splicing
//!
//! egui reports cursor positions as character indices, while Rust strings
//! are sliced by byte. Everything here works in character indices and only
//! converts to bytes at the moment of slicing.

/// A selection range in character indices.
///
/// `start == end` is a plain cursor. The bounds may arrive in either order
/// (egui's primary/secondary cursors); use [`Selection::ordered`] before slicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// A collapsed selection (cursor) at `index`.
    pub fn cursor(index: usize) -> Self {
        Self {
            start: index,
            end: index,
        }
    }

    /// A selection between two char indices, in any order.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Whether this is a plain cursor.
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Bounds ordered low-to-high and clamped to `char_len`.
    pub fn ordered(&self, char_len: usize) -> (usize, usize) {
        let a = self.start.min(char_len);
        let b = self.end.min(char_len);
        (a.min(b), a.max(b))
    }
}

/// Result of splicing a snippet into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceResult {
    /// The new text
    pub text: String,
    /// Cursor placed right after the inserted snippet
    pub selection: Selection,
}

/// Replace the selected range of `text` with `snippet`.
///
/// The selection is clamped to the text, so a stale cursor from a longer
/// document still inserts at the end rather than panicking.
pub fn splice_at(text: &str, selection: Selection, snippet: &str) -> SpliceResult {
    let (start, end) = selection.ordered(text.chars().count());
    let start_byte = char_index_to_byte_index(text, start);
    let end_byte = char_index_to_byte_index(text, end);

    let mut new_text = String::with_capacity(text.len() - (end_byte - start_byte) + snippet.len());
    new_text.push_str(&text[..start_byte]);
    new_text.push_str(snippet);
    new_text.push_str(&text[end_byte..]);

    SpliceResult {
        text: new_text,
        selection: Selection::cursor(start + snippet.chars().count()),
    }
}

/// Convert a character index to a byte index.
///
/// Returns the string length if `char_index` is beyond the string.
pub fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Convert a character index to (line, column), both 0-indexed.
pub fn char_index_to_line_col(text: &str, char_index: usize) -> (usize, usize) {
    let mut line = 0;
    let mut col = 0;

    for (i, ch) in text.chars().enumerate() {
        if i >= char_index {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
    }

    (line, col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_into_empty() {
        let result = splice_at("", Selection::default(), "\n# ");
        assert_eq!(result.text, "\n# ");
        assert_eq!(result.selection, Selection::cursor(3));
    }

    #[test]
    fn test_consecutive_inserts_follow_cursor() {
        let first = splice_at("", Selection::default(), "\n# ");
        let second = splice_at(&first.text, first.selection, "\n# ");
        assert_eq!(second.text, "\n# \n# ");
        assert_eq!(second.selection, Selection::cursor(6));
    }

    #[test]
    fn test_insert_in_middle() {
        let result = splice_at("Hello World", Selection::cursor(5), ",");
        assert_eq!(result.text, "Hello, World");
        assert_eq!(result.selection, Selection::cursor(6));
    }

    #[test]
    fn test_replace_selection() {
        let result = splice_at("Hello World", Selection::new(6, 11), "There");
        assert_eq!(result.text, "Hello There");
        assert_eq!(result.selection, Selection::cursor(11));
    }

    #[test]
    fn test_reversed_selection() {
        let result = splice_at("abcdef", Selection::new(4, 1), "X");
        assert_eq!(result.text, "aXef");
        assert_eq!(result.selection, Selection::cursor(2));
    }

    #[test]
    fn test_stale_selection_is_clamped() {
        let result = splice_at("abc", Selection::new(10, 20), "!");
        assert_eq!(result.text, "abc!");
        assert_eq!(result.selection, Selection::cursor(4));
    }

    #[test]
    fn test_multibyte_text() {
        // 'å' and '中' are multi-byte; indices are in chars
        let result = splice_at("på 中文", Selection::cursor(2), "X");
        assert_eq!(result.text, "påX 中文");

        let result = splice_at("på 中文", Selection::new(3, 5), "🎉");
        assert_eq!(result.text, "på 🎉");
        assert_eq!(result.selection, Selection::cursor(4));
    }

    #[test]
    fn test_ordered() {
        assert_eq!(Selection::new(5, 2).ordered(10), (2, 5));
        assert_eq!(Selection::new(5, 20).ordered(10), (5, 10));
        assert!(Selection::cursor(3).is_empty());
    }

    #[test]
    fn test_char_index_to_byte_index() {
        assert_eq!(char_index_to_byte_index("aå中", 0), 0);
        assert_eq!(char_index_to_byte_index("aå中", 2), 3);
        assert_eq!(char_index_to_byte_index("aå中", 9), 6);
    }

    #[test]
    fn test_char_index_to_line_col() {
        let text = "Hello\nWorld\n!";
        assert_eq!(char_index_to_line_col(text, 0), (0, 0));
        assert_eq!(char_index_to_line_col(text, 5), (0, 5));
        assert_eq!(char_index_to_line_col(text, 6), (1, 0));
        assert_eq!(char_index_to_line_col(text, 12), (2, 0));
        assert_eq!(char_index_to_line_col("", 0), (0, 0));
    }
}
