//! Static HTML rendering with class injection
//!
//! Walks the owned markdown tree and writes HTML, adding the configured class
//! attribute to headings (h1-h3), paragraphs, links, images and tables.
//! Raw HTML from the source is always escaped, and link/image URLs with an
//! unexpected scheme are dropped.

use super::parser::{
    parse_markdown, ListType, MarkdownDocument, MarkdownNode, MarkdownNodeType, TableAlignment,
};
use super::styles::{LinkBehavior, StyleConfig, StyleTag};

/// URL schemes allowed through to `href` and `src`.
const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto", "tel", "irc", "ircs", "xmpp"];

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Parse and render markdown in one step.
pub fn markdown_to_html(markdown: &str, styles: &StyleConfig, behavior: LinkBehavior) -> String {
    render_html(&parse_markdown(markdown), styles, behavior)
}

/// Render a parsed document to an HTML fragment.
pub fn render_html(doc: &MarkdownDocument, styles: &StyleConfig, behavior: LinkBehavior) -> String {
    let mut renderer = HtmlRenderer {
        out: String::new(),
        styles,
        behavior,
    };
    renderer.render_children(&doc.root, false);
    renderer.out
}

// ─────────────────────────────────────────────────────────────────────────────
// Renderer
// ─────────────────────────────────────────────────────────────────────────────

struct HtmlRenderer<'a> {
    out: String,
    styles: &'a StyleConfig,
    behavior: LinkBehavior,
}

impl HtmlRenderer<'_> {
    /// Start a new line unless we are already at the start of one.
    fn cr(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    fn render_children(&mut self, node: &MarkdownNode, tight: bool) {
        for child in &node.children {
            self.render_node(child, tight);
        }
    }

    /// Write ` class="..."` for a styled node, or nothing when the class is empty.
    fn push_class(&mut self, node_type: &MarkdownNodeType) {
        let styles = self.styles;
        if let Some(class) = StyleTag::for_node(node_type).and_then(|tag| styles.class_attr(tag)) {
            self.push_attr("class", class);
        }
    }

    fn push_attr(&mut self, name: &str, value: &str) {
        self.out.push(' ');
        self.out.push_str(name);
        self.out.push_str("=\"");
        self.out.push_str(&escape_html(value));
        self.out.push('"');
    }

    fn render_node(&mut self, node: &MarkdownNode, tight: bool) {
        let node_type = &node.node_type;
        match node_type {
            MarkdownNodeType::Document => self.render_children(node, tight),

            MarkdownNodeType::Heading { level, .. } => {
                let n = level.number();
                self.cr();
                self.out.push_str(&format!("<h{}", n));
                if StyleTag::for_node(node_type).is_some() {
                    self.push_attr("aria-label", "header");
                }
                self.push_class(node_type);
                self.out.push('>');
                self.render_children(node, false);
                self.out.push_str(&format!("</h{}>\n", n));
            }

            MarkdownNodeType::Paragraph => {
                if tight {
                    self.render_children(node, false);
                } else {
                    self.cr();
                    self.out.push_str("<p");
                    self.push_class(node_type);
                    self.out.push('>');
                    self.render_children(node, false);
                    self.out.push_str("</p>\n");
                }
            }

            MarkdownNodeType::BlockQuote => {
                self.cr();
                self.out.push_str("<blockquote>\n");
                self.render_children(node, false);
                self.cr();
                self.out.push_str("</blockquote>\n");
            }

            MarkdownNodeType::List { list_type, tight: list_tight } => {
                self.cr();
                let tag = match list_type {
                    ListType::Bullet => {
                        self.out.push_str("<ul>\n");
                        "ul"
                    }
                    ListType::Ordered { start, .. } => {
                        if *start == 1 {
                            self.out.push_str("<ol>\n");
                        } else {
                            self.out.push_str(&format!("<ol start=\"{}\">\n", start));
                        }
                        "ol"
                    }
                };
                self.render_children(node, *list_tight);
                self.cr();
                self.out.push_str(&format!("</{}>\n", tag));
            }

            MarkdownNodeType::Item => {
                self.cr();
                self.out.push_str("<li>");
                self.render_children(node, tight);
                self.out.push_str("</li>\n");
            }

            MarkdownNodeType::TaskItem { checked } => {
                self.cr();
                self.out.push_str("<li class=\"task-list-item\"><input type=\"checkbox\" disabled=\"\"");
                if *checked {
                    self.out.push_str(" checked=\"\"");
                }
                self.out.push_str(" /> ");
                self.render_children(node, tight);
                self.out.push_str("</li>\n");
            }

            MarkdownNodeType::CodeBlock { info, literal } => {
                self.cr();
                self.out.push_str("<pre><code");
                if let Some(lang) = info.split_whitespace().next() {
                    self.push_attr("class", &format!("language-{}", lang));
                }
                self.out.push('>');
                self.out.push_str(&escape_html(literal));
                self.out.push_str("</code></pre>\n");
            }

            MarkdownNodeType::HtmlBlock(literal) => {
                self.cr();
                self.out.push_str(&escape_html(literal));
                self.cr();
            }

            MarkdownNodeType::ThematicBreak => {
                self.cr();
                self.out.push_str("<hr />\n");
            }

            MarkdownNodeType::Table { alignments } => {
                self.cr();
                self.out.push_str("<table");
                self.push_class(node_type);
                self.out.push_str(">\n");

                let (head, body): (Vec<_>, Vec<_>) = node
                    .children
                    .iter()
                    .partition(|row| matches!(row.node_type, MarkdownNodeType::TableRow { header: true }));

                self.out.push_str("<thead>\n");
                for row in head {
                    self.render_table_row(row, alignments, "th");
                }
                self.out.push_str("</thead>\n");

                if !body.is_empty() {
                    self.out.push_str("<tbody>\n");
                    for row in body {
                        self.render_table_row(row, alignments, "td");
                    }
                    self.out.push_str("</tbody>\n");
                }
                self.out.push_str("</table>\n");
            }

            // Rows and cells are written by the table arm; reached only for malformed trees
            MarkdownNodeType::TableRow { .. } | MarkdownNodeType::TableCell => {
                self.render_children(node, false);
            }

            MarkdownNodeType::Text(text) => self.out.push_str(&escape_html(text)),
            MarkdownNodeType::SoftBreak => self.out.push('\n'),
            MarkdownNodeType::LineBreak => self.out.push_str("<br />\n"),
            MarkdownNodeType::Code(code) => {
                self.out.push_str("<code>");
                self.out.push_str(&escape_html(code));
                self.out.push_str("</code>");
            }
            MarkdownNodeType::HtmlInline(html) => self.out.push_str(&escape_html(html)),

            MarkdownNodeType::Emphasis => self.wrap_inline(node, "em"),
            MarkdownNodeType::Strong => self.wrap_inline(node, "strong"),
            MarkdownNodeType::Strikethrough => self.wrap_inline(node, "del"),

            MarkdownNodeType::Link { url, title } => {
                self.out.push_str("<a");
                self.push_attr("aria-label", "Link");
                self.push_class(node_type);
                self.push_attr("href", &sanitize_url(url));
                if !title.is_empty() {
                    self.push_attr("title", title);
                }
                if self.behavior.open_in_new_tab {
                    self.push_attr("target", "_blank");
                    self.push_attr("rel", "noopener noreferrer");
                }
                self.out.push('>');
                self.render_children(node, false);
                self.out.push_str("</a>");
            }

            MarkdownNodeType::Image { url, title } => {
                self.out.push_str("<img");
                self.push_attr("alt", &node.text_content());
                self.push_class(node_type);
                self.push_attr("src", &sanitize_url(url));
                if !title.is_empty() {
                    self.push_attr("title", title);
                }
                self.out.push_str(" />");
            }
        }
    }

    fn wrap_inline(&mut self, node: &MarkdownNode, tag: &str) {
        self.out.push_str(&format!("<{}>", tag));
        self.render_children(node, false);
        self.out.push_str(&format!("</{}>", tag));
    }

    fn render_table_row(&mut self, row: &MarkdownNode, alignments: &[TableAlignment], cell_tag: &str) {
        self.out.push_str("<tr>\n");
        for (index, cell) in row.children.iter().enumerate() {
            self.out.push_str(&format!("<{}", cell_tag));
            if let Some(align) = alignments.get(index).and_then(|a| a.css()) {
                self.push_attr("style", &format!("text-align:{}", align));
            }
            self.out.push('>');
            self.render_children(cell, false);
            self.out.push_str(&format!("</{}>\n", cell_tag));
        }
        self.out.push_str("</tr>\n");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Utility Functions
// ─────────────────────────────────────────────────────────────────────────────

/// HTML-escape a string for text content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Drop URLs whose scheme is not on the allowlist. Relative URLs pass.
pub fn sanitize_url(url: &str) -> String {
    let trimmed = url.trim();
    let scheme_end = trimmed.find(|c: char| matches!(c, ':' | '/' | '?' | '#'));

    match scheme_end {
        Some(pos) if trimmed[pos..].starts_with(':') => {
            let scheme = &trimmed[..pos];
            if SAFE_SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(scheme)) {
                trimmed.to_string()
            } else {
                String::new()
            }
        }
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(markdown: &str) -> String {
        markdown_to_html(markdown, &StyleConfig::default(), LinkBehavior::default())
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn test_paragraph_gets_default_class() {
        assert_eq!(render("Hello"), "<p class=\"mb-4\">Hello</p>\n");
    }

    #[test]
    fn test_custom_paragraph_class() {
        let mut styles = StyleConfig::default();
        styles.set(StyleTag::Paragraph, "custom-p");
        let html = markdown_to_html("one\n\ntwo", &styles, LinkBehavior::default());
        assert_eq!(
            html,
            "<p class=\"custom-p\">one</p>\n<p class=\"custom-p\">two</p>\n"
        );
    }

    #[test]
    fn test_heading_empty_class_is_omitted() {
        assert_eq!(render("# Title"), "<h1 aria-label=\"header\">Title</h1>\n");
    }

    #[test]
    fn test_heading_with_class() {
        let mut styles = StyleConfig::default();
        styles.set(StyleTag::H2, "text-2xl font-bold");
        let html = markdown_to_html("## Sub", &styles, LinkBehavior::default());
        assert_eq!(
            html,
            "<h2 aria-label=\"header\" class=\"text-2xl font-bold\">Sub</h2>\n"
        );
    }

    #[test]
    fn test_deep_headings_are_unstyled() {
        let mut styles = StyleConfig::default();
        styles.set(StyleTag::H3, "h3-class");
        let html = markdown_to_html("#### Four", &styles, LinkBehavior::default());
        assert_eq!(html, "<h4>Four</h4>\n");
    }

    #[test]
    fn test_h1_snippet_twice() {
        assert_eq!(
            render("\n# \n# "),
            "<h1 aria-label=\"header\"></h1>\n<h1 aria-label=\"header\"></h1>\n"
        );
    }

    #[test]
    fn test_link_snippet() {
        assert_eq!(
            render("\n[Link Text](example.com)"),
            "<p class=\"mb-4\"><a aria-label=\"Link\" class=\"text-blue-500\" href=\"example.com\">Link Text</a></p>\n"
        );
    }

    #[test]
    fn test_link_new_tab_behavior() {
        let behavior = LinkBehavior {
            open_in_new_tab: true,
        };
        let html = markdown_to_html("[x](https://a.b)", &StyleConfig::default(), behavior);
        assert!(html.contains("target=\"_blank\""));
        assert!(html.contains("rel=\"noopener noreferrer\""));
    }

    #[test]
    fn test_image_snippet() {
        assert_eq!(
            render("![Alt Text](image.png)"),
            "<p class=\"mb-4\"><img alt=\"Alt Text\" class=\"w-full\" src=\"image.png\" /></p>\n"
        );
    }

    #[test]
    fn test_table_snippet_has_head_only() {
        let html = render("\n|   |   |   |\n|---|---|---|");
        assert!(html.starts_with("<table class=\"table-auto\">\n<thead>\n<tr>\n<th></th>\n"));
        assert!(!html.contains("<tbody>"));
        assert!(html.ends_with("</thead>\n</table>\n"));
    }

    #[test]
    fn test_table_body_and_alignment() {
        let html = render("| a | b |\n|:-:|---|\n| 1 | 2 |");
        assert!(html.contains("<th style=\"text-align:center\">a</th>"));
        assert!(html.contains("<th>b</th>"));
        assert!(html.contains("<tbody>\n<tr>\n<td style=\"text-align:center\">1</td>"));
    }

    #[test]
    fn test_tight_list_has_no_paragraphs() {
        assert_eq!(
            render("- one\n- two"),
            "<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_loose_list_keeps_paragraphs() {
        let html = render("- one\n\n- two");
        assert!(html.contains("<li>\n<p class=\"mb-4\">one</p>\n</li>"));
    }

    #[test]
    fn test_ordered_list_start() {
        assert!(render("5. five").starts_with("<ol start=\"5\">\n"));
        assert!(render("1. one").starts_with("<ol>\n"));
    }

    #[test]
    fn test_task_list() {
        let html = render("- [x] done");
        assert!(html.contains(
            "<li class=\"task-list-item\"><input type=\"checkbox\" disabled=\"\" checked=\"\" /> done</li>"
        ));
    }

    #[test]
    fn test_inline_formatting() {
        assert_eq!(
            render("**b** *i* ~~s~~ `c`"),
            "<p class=\"mb-4\"><strong>b</strong> <em>i</em> <del>s</del> <code>c</code></p>\n"
        );
    }

    #[test]
    fn test_code_block_language() {
        assert_eq!(
            render("```rust\nlet a = 1 < 2;\n```"),
            "<pre><code class=\"language-rust\">let a = 1 &lt; 2;\n</code></pre>\n"
        );
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));

        let inline = render("a <b>bold</b>");
        assert!(inline.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn test_unsafe_link_is_scrubbed() {
        let html = render("[click](javascript:alert(1))");
        assert!(html.contains("href=\"\""));
        assert!(!html.contains("javascript"));
    }

    #[test]
    fn test_attribute_escaping() {
        let html = render("![a \"quoted\" alt](x.png \"t&t\")");
        assert!(html.contains("alt=\"a &quot;quoted&quot; alt\""));
        assert!(html.contains("title=\"t&amp;t\""));
    }

    #[test]
    fn test_sanitize_url() {
        assert_eq!(sanitize_url("https://example.com"), "https://example.com");
        assert_eq!(sanitize_url("MAILTO:me@x.y"), "MAILTO:me@x.y");
        assert_eq!(sanitize_url("example.com"), "example.com");
        assert_eq!(sanitize_url("/path?a=b:c"), "/path?a=b:c");
        assert_eq!(sanitize_url("#frag"), "#frag");
        assert_eq!(sanitize_url("data:text/html,x"), "");
        assert_eq!(sanitize_url("vbscript:x"), "");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("<p>"), "&lt;p&gt;");
        assert_eq!(escape_html("\"q\""), "&quot;q&quot;");
    }
}
