//! HTML Export Generation
//!
//! This module wraps the rendered markdown into a standalone HTML page.
//! The page pulls in the Tailwind Play CDN so the configured classes are
//! applied when the file is opened in a browser.

use crate::error::{Error, Result};
use crate::markdown::{markdown_to_html, LinkBehavior, StyleConfig};
use log::info;
use std::path::Path;

/// Tailwind Play CDN script, which compiles utility classes in the browser.
pub const TAILWIND_CDN_URL: &str = "https://cdn.tailwindcss.com";

/// File name offered by the save dialog.
pub const DEFAULT_EXPORT_NAME: &str = "document.html";

// ─────────────────────────────────────────────────────────────────────────────
// HTML Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Generate a complete HTML document from markdown content.
///
/// # Arguments
///
/// * `markdown` - The markdown source text
/// * `title` - Optional document title
/// * `styles` - Classes injected into rendered elements
/// * `behavior` - Link behavior
/// * `dark` - Whether to emit a dark color scheme
pub fn generate_html_document(
    markdown: &str,
    title: Option<&str>,
    styles: &StyleConfig,
    behavior: LinkBehavior,
    dark: bool,
) -> String {
    let body = generate_html_fragment(markdown, styles, behavior);
    let doc_title = title.unwrap_or("Exported Document");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="Tailmark">
    <title>{title}</title>
    <script src="{cdn}"></script>
    <style>
{base_css}
:root {{ color-scheme: {color_scheme}; }}
    </style>
</head>
<body class="{body_class}">
    <article class="markdown-body">
{body}
    </article>
</body>
</html>"#,
        title = html_escape(doc_title),
        cdn = TAILWIND_CDN_URL,
        base_css = BASE_CSS,
        color_scheme = if dark { "dark" } else { "light" },
        body_class = if dark {
            "bg-gray-900 text-gray-100"
        } else {
            "bg-white text-gray-900"
        },
        body = body,
    )
}

/// Generate HTML fragment (no doctype, head, etc.) for clipboard.
pub fn generate_html_fragment(markdown: &str, styles: &StyleConfig, behavior: LinkBehavior) -> String {
    markdown_to_html(markdown, styles, behavior)
}

/// Write a standalone HTML document for `markdown` to `output_path`.
///
/// The title is taken from the output file's stem.
pub fn export_to_html_file(
    markdown: &str,
    output_path: &Path,
    styles: &StyleConfig,
    behavior: LinkBehavior,
    dark: bool,
) -> Result<()> {
    let title = output_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Exported Document");

    let html = generate_html_document(markdown, Some(title), styles, behavior, dark);

    std::fs::write(output_path, html).map_err(|e| Error::Export {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    info!("Exported HTML to: {}", output_path.display());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// CSS
// ─────────────────────────────────────────────────────────────────────────────

/// Layout-only CSS. Tailwind's preflight strips element defaults, so element
/// styling comes from the configured classes.
const BASE_CSS: &str = r#"
.markdown-body {
    max-width: 900px;
    margin: 0 auto;
    padding: 32px 24px;
    line-height: 1.6;
}

.markdown-body ul { list-style: disc; padding-left: 2em; }
.markdown-body ol { list-style: decimal; padding-left: 2em; }
.markdown-body .task-list-item { list-style: none; }

.markdown-body pre {
    padding: 16px;
    overflow: auto;
    border-radius: 6px;
    background-color: rgba(128, 128, 128, 0.1);
}

.markdown-body blockquote {
    padding: 0 1em;
    border-left: 4px solid rgba(128, 128, 128, 0.4);
}

.markdown-body th,
.markdown-body td {
    padding: 4px 8px;
    border: 1px solid rgba(128, 128, 128, 0.4);
}
"#;

// ─────────────────────────────────────────────────────────────────────────────
// Utility Functions
// ─────────────────────────────────────────────────────────────────────────────

/// HTML-escape a string.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::StyleTag;
    use tempfile::TempDir;

    #[test]
    fn test_generate_html_document() {
        let markdown = "# Test\n\nParagraph text.";
        let html = generate_html_document(
            markdown,
            Some("Test Doc"),
            &StyleConfig::default(),
            LinkBehavior::default(),
            false,
        );

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Test Doc</title>"));
        assert!(html.contains(&format!("<script src=\"{}\"></script>", TAILWIND_CDN_URL)));
        assert!(html.contains("<article class=\"markdown-body\">"));
        assert!(html.contains("</article>"));
        assert!(html.contains("color-scheme: light"));
        assert!(html.contains("<h1 aria-label=\"header\">Test</h1>"));
        assert!(html.contains("<p class=\"mb-4\">Paragraph text.</p>"));
    }

    #[test]
    fn test_document_title_is_escaped() {
        let html = generate_html_document(
            "",
            Some("<a & b>"),
            &StyleConfig::default(),
            LinkBehavior::default(),
            true,
        );
        assert!(html.contains("<title>&lt;a &amp; b&gt;</title>"));
        assert!(html.contains("color-scheme: dark"));
    }

    #[test]
    fn test_generate_html_fragment_uses_styles() {
        let mut styles = StyleConfig::default();
        styles.set(StyleTag::Paragraph, "custom-p");

        let html = generate_html_fragment("**Bold** and *italic*", &styles, LinkBehavior::default());
        assert!(!html.contains("<!DOCTYPE"));
        assert!(html.contains("<p class=\"custom-p\">"));
        assert!(html.contains("<strong>Bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
    }

    #[test]
    fn test_export_to_html_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.html");

        export_to_html_file(
            "Hello",
            &path,
            &StyleConfig::default(),
            LinkBehavior::default(),
            false,
        )
        .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<title>notes</title>"));
        assert!(written.contains("<p class=\"mb-4\">Hello</p>"));
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.html");

        let result = export_to_html_file(
            "Hello",
            &path,
            &StyleConfig::default(),
            LinkBehavior::default(),
            false,
        );
        assert!(matches!(result, Err(Error::Export { .. })));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("Hello"), "Hello");
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("'q'"), "&#39;q&#39;");
    }
}
