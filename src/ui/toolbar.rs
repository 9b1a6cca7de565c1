//! Toolbar UI Component for Tailmark
//!
//! A single row of icon buttons: snippet insertion on the left, view mode
//! switching in the middle and the HTML export actions on the right.

use crate::config::ViewMode;
use crate::editor::Snippet;
use crate::theme::ThemeColors;
use eframe::egui::{self, Color32, Response, RichText, Ui, Vec2};

/// Height of the toolbar.
const TOOLBAR_HEIGHT: f32 = 36.0;

/// Size of icon buttons.
const ICON_BUTTON_SIZE: Vec2 = Vec2::new(34.0, 28.0);

/// Actions that can be triggered from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolbarAction {
    /// Insert a snippet at the cursor
    InsertSnippet(Snippet),
    /// Switch to another view mode
    SetViewMode(ViewMode),
    /// Copy rendered HTML to clipboard
    CopyHtml,
    /// Export the document as a standalone HTML page
    ExportHtml,
}

/// Toolbar rendering.
#[derive(Debug, Clone, Default)]
pub struct Toolbar;

impl Toolbar {
    pub fn new() -> Self {
        Self
    }

    pub fn height(&self) -> f32 {
        TOOLBAR_HEIGHT
    }

    /// Render the toolbar and return any triggered action.
    ///
    /// Snippet buttons are disabled outside the Edit mode, since there is no
    /// cursor to insert at.
    pub fn show(
        &self,
        ui: &mut Ui,
        theme_colors: &ThemeColors,
        view_mode: ViewMode,
    ) -> Option<ToolbarAction> {
        let mut action: Option<ToolbarAction> = None;
        let is_dark = theme_colors.is_dark();
        let separator_color = theme_colors.base.border;
        let can_insert = view_mode == ViewMode::Edit;

        ui.painter().rect_filled(
            ui.available_rect_before_wrap(),
            0.0,
            theme_colors.base.background_secondary,
        );

        ui.horizontal(|ui| {
            ui.set_height(self.height());
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.add_space(6.0);

            // ═══════════════════════════════════════════════════════════════════
            // Insert Group
            // ═══════════════════════════════════════════════════════════════════
            group_label(ui, "Insert", theme_colors);
            for &snippet in Snippet::all() {
                if icon_button(ui, snippet.icon(), &snippet.tooltip(), can_insert, is_dark)
                    .clicked()
                {
                    action = Some(ToolbarAction::InsertSnippet(snippet));
                }
            }

            ui.add_space(4.0);
            vertical_separator(ui, separator_color, self.height() - 10.0);
            ui.add_space(4.0);

            // ═══════════════════════════════════════════════════════════════════
            // View Group
            // ═══════════════════════════════════════════════════════════════════
            group_label(ui, "View", theme_colors);
            for &mode in ViewMode::all() {
                let text = RichText::new(format!("{} {}", mode.icon(), mode.label())).size(13.0);
                if ui
                    .selectable_label(view_mode == mode, text)
                    .on_hover_text(format!("{} ({})", mode.label(), mode.shortcut_label()))
                    .clicked()
                    && view_mode != mode
                {
                    action = Some(ToolbarAction::SetViewMode(mode));
                }
            }

            // ═══════════════════════════════════════════════════════════════════
            // Export Group (right-aligned)
            // ═══════════════════════════════════════════════════════════════════
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_space(8.0);

                if icon_button(ui, "🌐", "Export as HTML (Ctrl+Shift+E)", true, is_dark).clicked()
                {
                    action = Some(ToolbarAction::ExportHtml);
                }

                if icon_button(ui, "📋", "Copy as HTML (Ctrl+Shift+C)", true, is_dark).clicked() {
                    action = Some(ToolbarAction::CopyHtml);
                }

                group_label(ui, "Export", theme_colors);
            });
        });

        // Bottom border
        let rect = ui.min_rect();
        ui.painter().line_segment(
            [
                egui::pos2(rect.min.x, rect.max.y),
                egui::pos2(rect.max.x, rect.max.y),
            ],
            egui::Stroke::new(1.0, separator_color),
        );

        action
    }
}

fn group_label(ui: &mut Ui, text: &str, theme_colors: &ThemeColors) {
    ui.label(RichText::new(text).size(10.0).color(theme_colors.text.muted));
}

/// Render an icon button with consistent styling.
fn icon_button(ui: &mut Ui, icon: &str, tooltip: &str, enabled: bool, is_dark: bool) -> Response {
    let text_color = match (enabled, is_dark) {
        (true, true) => Color32::from_rgb(220, 220, 220),
        (true, false) => Color32::from_rgb(50, 50, 50),
        (false, true) => Color32::from_rgb(100, 100, 100),
        (false, false) => Color32::from_rgb(160, 160, 160),
    };

    let hover_bg = if is_dark {
        Color32::from_rgb(60, 60, 60)
    } else {
        Color32::from_rgb(220, 220, 220)
    };

    let btn = ui.add_enabled(
        enabled,
        egui::Button::new(RichText::new(" ").size(15.0))
            .frame(false)
            .min_size(ICON_BUTTON_SIZE),
    );

    if btn.hovered() && enabled {
        ui.painter()
            .rect_filled(btn.rect, egui::Rounding::same(3.0), hover_bg);
    }

    // Draw the label centered so emoji and text icons line up
    ui.painter().text(
        btn.rect.center(),
        egui::Align2::CENTER_CENTER,
        icon,
        egui::FontId::proportional(15.0),
        text_color,
    );

    btn.on_hover_text(tooltip)
}

/// Draw a vertical separator line.
fn vertical_separator(ui: &mut Ui, color: Color32, height: f32) {
    let (rect, _response) = ui.allocate_exact_size(Vec2::new(1.0, height), egui::Sense::hover());
    ui.painter().line_segment(
        [rect.center_top(), rect.center_bottom()],
        egui::Stroke::new(1.0, color),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_toolbar(mode: ViewMode) -> Option<ToolbarAction> {
        let ctx = egui::Context::default();
        let mut action = None;
        let _ = ctx.run(Default::default(), |ctx| {
            egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
                action = Toolbar::new().show(ui, &ThemeColors::light(), mode);
            });
        });
        action
    }

    #[test]
    fn test_toolbar_without_input_has_no_action() {
        for &mode in ViewMode::all() {
            assert_eq!(run_toolbar(mode), None);
        }
    }

    #[test]
    fn test_toolbar_action_equality() {
        assert_eq!(
            ToolbarAction::InsertSnippet(Snippet::Heading1),
            ToolbarAction::InsertSnippet(Snippet::Heading1)
        );
        assert_ne!(
            ToolbarAction::InsertSnippet(Snippet::Heading1),
            ToolbarAction::InsertSnippet(Snippet::Heading2)
        );
        assert_ne!(ToolbarAction::CopyHtml, ToolbarAction::ExportHtml);
    }
}
