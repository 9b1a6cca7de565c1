//! HTML Code View for Tailmark
//!
//! Read-only, syntax-highlighted view of the generated HTML with an optional
//! line number gutter and a button that copies the source.

use crate::markdown::syntax::{highlight_code, HighlightedLine};
use crate::theme::ThemeColors;
use eframe::egui::{self, FontId, RichText, ScrollArea, Ui};

/// Result of showing the code view.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeViewOutput {
    /// Whether the copy button was clicked.
    pub copy_requested: bool,
}

/// Highlighted HTML source viewer.
///
/// # Example
///
/// ```ignore
/// let output = CodeView::new(&rendered.html, &colors)
///     .font_size(settings.font_size)
///     .show_line_numbers(settings.show_line_numbers)
///     .show(ui);
/// ```
pub struct CodeView<'a> {
    html: &'a str,
    colors: &'a ThemeColors,
    font_size: f32,
    show_line_numbers: bool,
    syntax_theme: &'a str,
}

impl<'a> CodeView<'a> {
    pub fn new(html: &'a str, colors: &'a ThemeColors) -> Self {
        Self {
            html,
            colors,
            font_size: 14.0,
            show_line_numbers: true,
            syntax_theme: "",
        }
    }

    #[must_use]
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    #[must_use]
    pub fn show_line_numbers(mut self, show: bool) -> Self {
        self.show_line_numbers = show;
        self
    }

    /// Set the syntect theme (empty for the default).
    #[must_use]
    pub fn syntax_theme(mut self, theme: &'a str) -> Self {
        self.syntax_theme = theme;
        self
    }

    pub fn show(self, ui: &mut Ui) -> CodeViewOutput {
        let mut output = CodeViewOutput::default();

        ui.horizontal(|ui| {
            ui.label(
                RichText::new("Generated HTML")
                    .strong()
                    .color(self.colors.text.secondary),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button("📋 Copy")
                    .on_hover_text("Copy the HTML source to the clipboard")
                    .clicked()
                {
                    output.copy_requested = true;
                }
            });
        });
        ui.separator();

        let lines = highlight_lines(self.html, self.syntax_theme, self.colors.is_dark());
        let gutter_digits = lines.len().to_string().len();
        let font_size = self.font_size;

        egui::Frame::none()
            .fill(self.colors.preview.code_block_bg)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ScrollArea::both()
                    .id_source("html_code_view")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.spacing_mut().item_spacing.y = 0.0;
                        for (index, line) in lines.iter().enumerate() {
                            ui.horizontal(|ui| {
                                if self.show_line_numbers {
                                    ui.label(
                                        RichText::new(line_number_label(index + 1, gutter_digits))
                                            .font(FontId::monospace(font_size))
                                            .color(self.colors.text.muted),
                                    );
                                    ui.add_space(8.0);
                                }
                                ui.label(line.to_layout_job(font_size));
                            });
                        }
                    });
            });

        output
    }
}

/// Highlight the HTML source line by line. An empty document shows one empty line.
fn highlight_lines(html: &str, syntax_theme: &str, dark: bool) -> Vec<HighlightedLine> {
    let mut lines = highlight_code(html, "html", syntax_theme, dark);
    if lines.is_empty() {
        lines.push(HighlightedLine::new(Vec::new()));
    }
    lines
}

/// Right-aligned gutter label for a 1-based line number.
fn line_number_label(number: usize, width: usize) -> String {
    format!("{:>width$}", number, width = width)
}
