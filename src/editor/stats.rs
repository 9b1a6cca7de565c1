//! Text statistics for the status bar

// ─────────────────────────────────────────────────────────────────────────────
// TextStats
// ─────────────────────────────────────────────────────────────────────────────

/// Counts shown in the status bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    /// Number of characters including whitespace
    pub characters: usize,
    /// Number of words (sequences of non-whitespace characters)
    pub words: usize,
    /// Number of lines (an empty document has one line)
    pub lines: usize,
}

impl TextStats {
    /// Calculate statistics from the given text in a single pass.
    pub fn from_text(text: &str) -> Self {
        let mut stats = Self {
            lines: 1,
            ..Self::default()
        };
        let mut in_word = false;

        for ch in text.chars() {
            stats.characters += 1;
            if ch == '\n' {
                stats.lines += 1;
            }
            if ch.is_whitespace() {
                in_word = false;
            } else if !in_word {
                in_word = true;
                stats.words += 1;
            }
        }

        stats
    }

    /// Format the statistics for display in the status bar.
    pub fn format_compact(&self) -> String {
        format!(
            "{} chars · {} words · {} {}",
            self.characters,
            self.words,
            self.lines,
            if self.lines == 1 { "line" } else { "lines" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let stats = TextStats::from_text("");
        assert_eq!(stats.characters, 0);
        assert_eq!(stats.words, 0);
        assert_eq!(stats.lines, 1);
        assert_eq!(stats.format_compact(), "0 chars · 0 words · 1 line");
    }

    #[test]
    fn test_snippet_text() {
        // "\n# " is three characters over two lines
        let stats = TextStats::from_text("\n# ");
        assert_eq!(stats.characters, 3);
        assert_eq!(stats.words, 1);
        assert_eq!(stats.lines, 2);
    }

    #[test]
    fn test_multibyte_counts_chars() {
        let stats = TextStats::from_text("héllo 世界");
        assert_eq!(stats.characters, 8);
        assert_eq!(stats.words, 2);
    }

    #[test]
    fn test_trailing_newline_starts_new_line() {
        let stats = TextStats::from_text("one\ntwo\n");
        assert_eq!(stats.lines, 3);
        assert_eq!(stats.format_compact(), "8 chars · 2 words · 3 lines");
    }
}
