//! Native preview renderer
//!
//! Walks the parsed markdown tree and draws it with egui widgets. Elements
//! that receive an injected class show it on hover; the classes themselves
//! only take effect in the exported HTML.

use crate::markdown::html::sanitize_url;
use crate::markdown::syntax::highlight_code;
use crate::markdown::{
    HeadingLevel, LinkBehavior, ListType, MarkdownDocument, MarkdownNode, MarkdownNodeType,
    StyleConfig, StyleTag, TableAlignment,
};
use crate::theme::ThemeColors;
use eframe::egui::{self, Align, FontId, Layout, Response, RichText, ScrollArea, Ui, Vec2};

// ─────────────────────────────────────────────────────────────────────────────
// Preview Widget
// ─────────────────────────────────────────────────────────────────────────────

/// Read-only rendering of a markdown document.
///
/// # Example
///
/// ```ignore
/// MarkdownPreview::new(&rendered.document, &settings.styles, &colors)
///     .font_size(settings.font_size)
///     .link_behavior(settings.link_behavior)
///     .show(ui);
/// ```
pub struct MarkdownPreview<'a> {
    document: &'a MarkdownDocument,
    styles: &'a StyleConfig,
    colors: &'a ThemeColors,
    behavior: LinkBehavior,
    font_size: f32,
    syntax_theme: &'a str,
}

impl<'a> MarkdownPreview<'a> {
    pub fn new(
        document: &'a MarkdownDocument,
        styles: &'a StyleConfig,
        colors: &'a ThemeColors,
    ) -> Self {
        Self {
            document,
            styles,
            colors,
            behavior: LinkBehavior::default(),
            font_size: 14.0,
            syntax_theme: "",
        }
    }

    /// Set the base font size.
    #[must_use]
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set how links are opened.
    #[must_use]
    pub fn link_behavior(mut self, behavior: LinkBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Set the syntect theme for fenced code blocks (empty for the default).
    #[must_use]
    pub fn syntax_theme(mut self, theme: &'a str) -> Self {
        self.syntax_theme = theme;
        self
    }

    /// Show the preview in a scroll area filling the available space.
    pub fn show(self, ui: &mut Ui) {
        let cx = RenderContext {
            styles: self.styles,
            colors: self.colors,
            behavior: self.behavior,
            font_size: self.font_size,
            syntax_theme: self.syntax_theme,
        };
        let document = self.document;

        ScrollArea::vertical()
            .id_source("markdown_preview")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_space(8.0);
                if document.is_empty() {
                    ui.label(
                        RichText::new("Nothing to preview yet")
                            .color(cx.colors.text.muted)
                            .italics(),
                    );
                    return;
                }
                for child in &document.root.children {
                    render_block(ui, &cx, child, false);
                }
                ui.add_space(16.0);
            });
    }
}

/// Shared rendering parameters.
struct RenderContext<'a> {
    styles: &'a StyleConfig,
    colors: &'a ThemeColors,
    behavior: LinkBehavior,
    font_size: f32,
    syntax_theme: &'a str,
}

impl RenderContext<'_> {
    fn dark(&self) -> bool {
        self.colors.is_dark()
    }

    /// Attach the injected class for `tag` to a response as hover text.
    fn show_class_hint(&self, response: Response, tag: StyleTag) {
        response.on_hover_text(
            RichText::new(class_hint(tag, self.styles))
                .monospace()
                .color(self.colors.preview.class_badge),
        );
    }
}

/// Hover text describing the element a class is injected into.
fn class_hint(tag: StyleTag, styles: &StyleConfig) -> String {
    match styles.class_attr(tag) {
        Some(class) => format!("<{} class=\"{}\">", tag.tag_name(), class),
        None => format!("<{}> (no class)", tag.tag_name()),
    }
}

/// Font size multiplier for each heading level.
fn heading_scale(level: HeadingLevel) -> f32 {
    match level {
        HeadingLevel::H1 => 1.8,
        HeadingLevel::H2 => 1.5,
        HeadingLevel::H3 => 1.3,
        HeadingLevel::H4 => 1.15,
        HeadingLevel::H5 => 1.05,
        HeadingLevel::H6 => 1.0,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Block Rendering
// ─────────────────────────────────────────────────────────────────────────────

/// Render a block-level node. `tight` is set for children of tight list items.
fn render_block(ui: &mut Ui, cx: &RenderContext, node: &MarkdownNode, tight: bool) {
    match &node.node_type {
        MarkdownNodeType::Heading { level, .. } => render_heading(ui, cx, node, *level),
        MarkdownNodeType::Paragraph => render_paragraph(ui, cx, node, tight),
        MarkdownNodeType::BlockQuote => render_blockquote(ui, cx, node),
        MarkdownNodeType::List { list_type, tight } => render_list(ui, cx, node, list_type, *tight),
        MarkdownNodeType::CodeBlock { info, literal } => render_code_block(ui, cx, info, literal),
        MarkdownNodeType::HtmlBlock(html) => {
            ui.label(
                RichText::new(html.trim_end())
                    .font(FontId::monospace(cx.font_size * 0.9))
                    .color(cx.colors.text.secondary),
            );
            ui.add_space(cx.font_size * 0.5);
        }
        MarkdownNodeType::ThematicBreak => render_thematic_break(ui, cx),
        MarkdownNodeType::Table { alignments } => render_table(ui, cx, node, alignments),
        _ => {
            for child in &node.children {
                render_block(ui, cx, child, tight);
            }
        }
    }
}

fn render_heading(ui: &mut Ui, cx: &RenderContext, node: &MarkdownNode, level: HeadingLevel) {
    let size = cx.font_size * heading_scale(level);
    ui.add_space(size * 0.4);

    let style = TextStyle {
        size,
        bold: true,
        color: Some(cx.colors.preview.heading),
        ..TextStyle::new(cx.font_size)
    };
    let response = render_inline_children(ui, cx, node, style);

    if let Some(tag) = StyleTag::for_node(&node.node_type) {
        cx.show_class_hint(response, tag);
    }
    ui.add_space(size * 0.3);
}

fn render_paragraph(ui: &mut Ui, cx: &RenderContext, node: &MarkdownNode, tight: bool) {
    let response = render_inline_children(ui, cx, node, TextStyle::new(cx.font_size));

    // Tight list items have no <p> in the HTML, so no class either
    if !tight {
        cx.show_class_hint(response, StyleTag::Paragraph);
        ui.add_space(cx.font_size * 0.6);
    }
}

fn render_blockquote(ui: &mut Ui, cx: &RenderContext, node: &MarkdownNode) {
    let response = ui.horizontal(|ui| {
        ui.add_space(4.0);
        ui.vertical(|ui| {
            for child in &node.children {
                render_block(ui, cx, child, false);
            }
        });
    });

    // Left bar spanning the quoted content
    let rect = response.response.rect;
    let bar = egui::Rect::from_min_size(rect.min, Vec2::new(4.0, rect.height()));
    ui.painter()
        .rect_filled(bar, 0.0, cx.colors.preview.blockquote_border);
}

fn render_list(
    ui: &mut Ui,
    cx: &RenderContext,
    node: &MarkdownNode,
    list_type: &ListType,
    tight: bool,
) {
    let mut number = match list_type {
        ListType::Ordered { start, .. } => *start,
        ListType::Bullet => 0,
    };

    for item in &node.children {
        ui.horizontal_top(|ui| {
            ui.add_space(cx.font_size);
            match (&item.node_type, list_type) {
                (MarkdownNodeType::TaskItem { checked }, _) => {
                    let mut checked = *checked;
                    ui.add_enabled(false, egui::Checkbox::without_text(&mut checked));
                }
                (_, ListType::Ordered { delimiter, .. }) => {
                    ui.label(
                        RichText::new(format!("{}{}", number, delimiter))
                            .size(cx.font_size)
                            .color(cx.colors.preview.list_marker),
                    );
                }
                (_, ListType::Bullet) => {
                    ui.label(
                        RichText::new("\u{2022}")
                            .size(cx.font_size)
                            .color(cx.colors.preview.list_marker),
                    );
                }
            }
            ui.vertical(|ui| {
                for child in &item.children {
                    render_block(ui, cx, child, tight);
                }
            });
        });
        number += 1;
    }
    ui.add_space(cx.font_size * 0.5);
}

fn render_code_block(ui: &mut Ui, cx: &RenderContext, info: &str, literal: &str) {
    let language = info.split_whitespace().next().unwrap_or("");
    let lines = highlight_code(literal, language, cx.syntax_theme, cx.dark());

    egui::Frame::none()
        .fill(cx.colors.preview.code_block_bg)
        .inner_margin(8.0)
        .rounding(4.0)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.spacing_mut().item_spacing.y = 0.0;
            for line in &lines {
                ui.label(line.to_layout_job(cx.font_size * 0.9));
            }
        });
    ui.add_space(cx.font_size * 0.6);
}

/// Render a thematic break (horizontal rule).
fn render_thematic_break(ui: &mut Ui, cx: &RenderContext) {
    ui.add_space(4.0);
    let (rect, _) =
        ui.allocate_exact_size(Vec2::new(ui.available_width(), 1.0), egui::Sense::hover());
    ui.painter()
        .rect_filled(rect, 0.0, cx.colors.preview.horizontal_rule);
    ui.add_space(4.0);
}

fn render_table(
    ui: &mut Ui,
    cx: &RenderContext,
    node: &MarkdownNode,
    alignments: &[TableAlignment],
) {
    let grid_id = ui.id().with(("table", node as *const MarkdownNode as usize));

    let response = egui::Frame::none()
        .stroke(egui::Stroke::new(1.0, cx.colors.base.border))
        .inner_margin(4.0)
        .show(ui, |ui| {
            egui::Grid::new(grid_id)
                .striped(true)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    for row in &node.children {
                        let header =
                            matches!(row.node_type, MarkdownNodeType::TableRow { header: true });
                        for (column, cell) in row.children.iter().enumerate() {
                            let align = match alignments.get(column) {
                                Some(TableAlignment::Center) => Align::Center,
                                Some(TableAlignment::Right) => Align::Max,
                                _ => Align::Min,
                            };
                            let style = TextStyle {
                                bold: header,
                                ..TextStyle::new(cx.font_size)
                            };
                            let layout =
                                Layout::left_to_right(Align::Center).with_main_align(align);
                            ui.with_layout(layout, |ui| {
                                render_inline_children(ui, cx, cell, style);
                            });
                        }
                        ui.end_row();
                    }
                });
        })
        .response;

    cx.show_class_hint(response, StyleTag::Table);
    ui.add_space(cx.font_size * 0.6);
}

// ─────────────────────────────────────────────────────────────────────────────
// Inline Rendering
// ─────────────────────────────────────────────────────────────────────────────

/// Accumulated text styles for nested formatting.
#[derive(Debug, Clone, Copy)]
struct TextStyle {
    size: f32,
    bold: bool,
    italic: bool,
    strikethrough: bool,
    color: Option<egui::Color32>,
}

impl TextStyle {
    fn new(size: f32) -> Self {
        Self {
            size,
            bold: false,
            italic: false,
            strikethrough: false,
            color: None,
        }
    }

    fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    fn with_strikethrough(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    fn apply(&self, text: impl Into<String>, cx: &RenderContext) -> RichText {
        let mut rich = RichText::new(text)
            .size(self.size)
            .color(self.color.unwrap_or(cx.colors.text.primary));
        if self.bold {
            rich = rich.strong();
        }
        if self.italic {
            rich = rich.italics();
        }
        if self.strikethrough {
            rich = rich.strikethrough();
        }
        rich
    }
}

/// Render a node's inline children in a wrapping row and return the row's response.
fn render_inline_children(
    ui: &mut Ui,
    cx: &RenderContext,
    node: &MarkdownNode,
    style: TextStyle,
) -> Response {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for child in &node.children {
            render_inline_node(ui, cx, child, style);
        }
    })
    .response
}

fn render_inline_node(ui: &mut Ui, cx: &RenderContext, node: &MarkdownNode, style: TextStyle) {
    match &node.node_type {
        MarkdownNodeType::Text(text) => {
            ui.label(style.apply(text.as_str(), cx));
        }
        MarkdownNodeType::Strong => {
            for child in &node.children {
                render_inline_node(ui, cx, child, style.with_bold());
            }
        }
        MarkdownNodeType::Emphasis => {
            for child in &node.children {
                render_inline_node(ui, cx, child, style.with_italic());
            }
        }
        MarkdownNodeType::Strikethrough => {
            for child in &node.children {
                render_inline_node(ui, cx, child, style.with_strikethrough());
            }
        }
        MarkdownNodeType::Code(code) => {
            ui.label(
                RichText::new(code)
                    .font(FontId::monospace(style.size * 0.9))
                    .background_color(cx.colors.preview.code_block_bg),
            );
        }
        // Raw HTML is shown as its source text
        MarkdownNodeType::HtmlInline(html) => {
            ui.label(style.apply(html.as_str(), cx).monospace());
        }
        MarkdownNodeType::SoftBreak => {
            ui.label(style.apply(" ", cx));
        }
        MarkdownNodeType::LineBreak => {
            ui.end_row();
        }
        MarkdownNodeType::Link { url, title } => render_link(ui, cx, node, url, title, style),
        MarkdownNodeType::Image { url, title } => render_image(ui, cx, node, url, title),
        _ => {
            for child in &node.children {
                render_inline_node(ui, cx, child, style);
            }
        }
    }
}

fn render_link(
    ui: &mut Ui,
    cx: &RenderContext,
    node: &MarkdownNode,
    url: &str,
    title: &str,
    style: TextStyle,
) {
    let text = node.text_content();
    let href = sanitize_url(url);
    let label = style.apply(text, cx).color(cx.colors.text.link).underline();

    let mut response = if href.is_empty() {
        ui.label(label)
    } else {
        ui.add(
            egui::Hyperlink::from_label_and_url(label, &href)
                .open_in_new_tab(cx.behavior.open_in_new_tab),
        )
    };
    if !title.is_empty() {
        response = response.on_hover_text(title);
    }
    cx.show_class_hint(response, StyleTag::Link);
}

fn render_image(ui: &mut Ui, cx: &RenderContext, node: &MarkdownNode, url: &str, title: &str) {
    let alt = node.text_content();
    let caption = if alt.is_empty() { url } else { alt.as_str() };
    let response = egui::Frame::none()
        .fill(cx.colors.preview.image_placeholder)
        .inner_margin(egui::Margin::symmetric(8.0, 4.0))
        .rounding(4.0)
        .show(ui, |ui| {
            ui.label(
                RichText::new(format!("\u{1F5BC} {}", caption))
                    .size(cx.font_size)
                    .color(cx.colors.text.secondary),
            );
        })
        .response;

    let response = if title.is_empty() {
        response.on_hover_text(sanitize_url(url))
    } else {
        response.on_hover_text(format!("{}\n{}", title, sanitize_url(url)))
    };
    cx.show_class_hint(response, StyleTag::Image);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::parse_markdown;

    #[test]
    fn test_class_hint() {
        let mut styles = StyleConfig::default();
        assert_eq!(
            class_hint(StyleTag::Paragraph, &styles),
            "<p class=\"mb-4\">"
        );
        assert_eq!(class_hint(StyleTag::H1, &styles), "<h1> (no class)");

        styles.set(StyleTag::H1, "text-3xl");
        assert_eq!(class_hint(StyleTag::H1, &styles), "<h1 class=\"text-3xl\">");
    }

    #[test]
    fn test_heading_scale_decreases() {
        let levels = [
            HeadingLevel::H1,
            HeadingLevel::H2,
            HeadingLevel::H3,
            HeadingLevel::H4,
            HeadingLevel::H5,
            HeadingLevel::H6,
        ];
        for pair in levels.windows(2) {
            assert!(heading_scale(pair[0]) > heading_scale(pair[1]));
        }
    }

    #[test]
    fn test_preview_renders_every_snippet() {
        let markdown = "\n# Title\n\nBody with **bold**, *em* and `code`.\n\n![Alt Text](image.png)\n[Link Text](example.com)\n\n|   |   |   |\n|---|---|---|\n\n- [x] done\n1. first\n\n> quote\n\n```rust\nfn main() {}\n```\n\n---\n";
        let document = parse_markdown(markdown);
        let styles = StyleConfig::default();
        let colors = ThemeColors::light();

        let ctx = egui::Context::default();
        let _ = ctx.run(Default::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                MarkdownPreview::new(&document, &styles, &colors)
                    .font_size(14.0)
                    .show(ui);
            });
        });
    }
}
