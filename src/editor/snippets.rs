//! Toolbar snippets
//!
//! Fixed markdown fragments the toolbar inserts at the cursor. The text is
//! inserted verbatim; there is no wrapping of the selection.

// ─────────────────────────────────────────────────────────────────────────────
// Snippet Enum
// ─────────────────────────────────────────────────────────────────────────────

/// Markdown snippets that can be inserted at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Snippet {
    /// Level 1 heading marker on a new line
    Heading1,
    /// Level 2 heading marker on a new line
    Heading2,
    /// Level 3 heading marker on a new line
    Heading3,
    /// Image placeholder
    Image,
    /// Link placeholder on a new line
    Link,
    /// Empty 3-column table header on a new line
    Table,
}

impl Snippet {
    /// All snippets, in toolbar order.
    pub fn all() -> &'static [Snippet] {
        &[
            Snippet::Heading1,
            Snippet::Heading2,
            Snippet::Heading3,
            Snippet::Image,
            Snippet::Link,
            Snippet::Table,
        ]
    }

    /// The exact text inserted.
    pub fn text(&self) -> &'static str {
        match self {
            Self::Heading1 => "\n# ",
            Self::Heading2 => "\n## ",
            Self::Heading3 => "\n### ",
            Self::Image => "![Alt Text](image.png)",
            Self::Link => "\n[Link Text](example.com)",
            Self::Table => "\n|   |   |   |\n|---|---|---|",
        }
    }

    /// Get the icon for this snippet (for toolbar).
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Heading1 => "H1",
            Self::Heading2 => "H2",
            Self::Heading3 => "H3",
            Self::Image => "🖼",
            Self::Link => "🔗",
            Self::Table => "▦",
        }
    }

    /// Get the keyboard shortcut label for this snippet.
    pub fn shortcut_label(&self) -> &'static str {
        match self {
            Self::Heading1 => "Ctrl+1",
            Self::Heading2 => "Ctrl+2",
            Self::Heading3 => "Ctrl+3",
            Self::Image => "Ctrl+Shift+I",
            Self::Link => "Ctrl+K",
            Self::Table => "Ctrl+Shift+T",
        }
    }

    /// Get the tooltip text for this snippet.
    pub fn tooltip(&self) -> String {
        let name = match self {
            Self::Heading1 => "Insert Heading 1",
            Self::Heading2 => "Insert Heading 2",
            Self::Heading3 => "Insert Heading 3",
            Self::Image => "Insert Image",
            Self::Link => "Insert Link",
            Self::Table => "Insert Table",
        };
        format!("{} ({})", name, self.shortcut_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{markdown_to_html, LinkBehavior, StyleConfig};

    #[test]
    fn test_snippet_text_is_exact() {
        assert_eq!(Snippet::Heading1.text(), "\n# ");
        assert_eq!(Snippet::Heading2.text(), "\n## ");
        assert_eq!(Snippet::Heading3.text(), "\n### ");
        assert_eq!(Snippet::Image.text(), "![Alt Text](image.png)");
        assert_eq!(Snippet::Link.text(), "\n[Link Text](example.com)");
        assert_eq!(Snippet::Table.text(), "\n|   |   |   |\n|---|---|---|");
    }

    #[test]
    fn test_tooltips_include_shortcut() {
        for snippet in Snippet::all() {
            assert!(snippet.tooltip().contains(snippet.shortcut_label()));
        }
    }

    #[test]
    fn test_snippets_render_expected_elements() {
        let styles = StyleConfig::default();
        let behavior = LinkBehavior::default();

        let html = markdown_to_html(Snippet::Image.text(), &styles, behavior);
        assert!(html.contains("<img"));

        let html = markdown_to_html(Snippet::Link.text(), &styles, behavior);
        assert!(html.contains("<a "));

        let html = markdown_to_html(Snippet::Table.text(), &styles, behavior);
        assert!(html.contains("<table"));

        let html = markdown_to_html(&format!("{}Title", Snippet::Heading2.text()), &styles, behavior);
        assert!(html.contains("<h2"));
    }
}
