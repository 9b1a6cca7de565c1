//! Text editor widget for Tailmark
//!
//! This module implements the markdown text area using egui's TextEdit.
//! Besides plain editing it keeps the application's stored selection in
//! sync with the widget, in both directions: the selection is read back
//! every frame, and after a snippet insertion the collapsed cursor is
//! written into the TextEdit state so typing continues after the snippet.

use super::selection::{char_index_to_line_col, Selection};
use eframe::egui::{
    self,
    text::{CCursor, CCursorRange},
    FontId, ScrollArea, TextEdit, Ui,
};
use log::debug;

/// Placeholder shown while the document is empty.
pub const EDITOR_HINT: &str = "Enter markdown here...";

/// Source of the editor's widget id, under which egui keeps its `TextEditState`.
const EDITOR_ID_SOURCE: &str = "markdown_editor";

/// Result of showing the editor widget.
pub struct EditorOutput {
    /// Whether the content was modified.
    pub changed: bool,
    /// Cursor position as (line, column), both 0-indexed.
    pub cursor_position: (usize, usize),
}

/// A text editor widget bound to the document text and its selection.
///
/// # Example
///
/// ```ignore
/// let output = EditorWidget::new(&mut text, &mut selection)
///     .font_size(settings.font_size)
///     .request_focus(state.ui.focus_editor)
///     .show(ui);
/// ```
pub struct EditorWidget<'a> {
    /// The markdown being edited.
    text: &'a mut String,
    /// Last known selection, updated from the widget every frame.
    selection: &'a mut Selection,
    /// Font size for the editor.
    font_size: f32,
    /// Whether to take focus and apply `selection` to the widget.
    request_focus: bool,
}

impl<'a> EditorWidget<'a> {
    /// Create a new editor widget.
    pub fn new(text: &'a mut String, selection: &'a mut Selection) -> Self {
        Self {
            text,
            selection,
            font_size: 14.0,
            request_focus: false,
        }
    }

    /// Set the font size for the editor.
    #[must_use]
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Focus the editor and move its cursor to the stored selection.
    #[must_use]
    pub fn request_focus(mut self, focus: bool) -> Self {
        self.request_focus = focus;
        self
    }

    /// Show the editor widget and return the output.
    pub fn show(self, ui: &mut Ui) -> EditorOutput {
        let id = egui::Id::new(EDITOR_ID_SOURCE);
        let original_len = self.text.len();
        let original_hash = egui::util::hash(self.text.as_str());

        // Push the stored selection into the widget before it lays out, so the
        // cursor drawn this frame is already the one after the insertion.
        if self.request_focus {
            let (start, end) = self.selection.ordered(self.text.chars().count());
            let mut state = TextEdit::load_state(ui.ctx(), id).unwrap_or_default();
            state.cursor.set_char_range(Some(CCursorRange::two(
                CCursor::new(start),
                CCursor::new(end),
            )));
            state.store(ui.ctx(), id);
            debug!("Restored editor cursor to {}..{}", start, end);
        }

        let font_id = FontId::monospace(self.font_size);
        let text = &mut *self.text;

        let text_output = ScrollArea::vertical()
            .id_source(id.with("scroll"))
            .auto_shrink([false, false])
            .show(ui, |ui| {
                TextEdit::multiline(text)
                    .id(id)
                    .hint_text(EDITOR_HINT)
                    .font(font_id)
                    .frame(false)
                    .desired_width(f32::INFINITY)
                    .desired_rows(24)
                    .lock_focus(true)
                    .show(ui)
            })
            .inner;

        if self.request_focus {
            text_output.response.request_focus();
        }

        let changed = self.text.len() != original_len
            || egui::util::hash(self.text.as_str()) != original_hash;

        if let Some(cursor_range) = text_output.cursor_range {
            *self.selection = Selection::new(
                cursor_range.primary.ccursor.index,
                cursor_range.secondary.ccursor.index,
            );
        }

        let cursor_position = char_index_to_line_col(self.text, self.selection.start);

        EditorOutput {
            changed,
            cursor_position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{splice_at, Snippet};

    fn show_editor(
        ctx: &egui::Context,
        text: &mut String,
        selection: &mut Selection,
        focus: bool,
    ) -> EditorOutput {
        let mut output = None;
        let _ = ctx.run(Default::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                output = Some(EditorWidget::new(text, selection).request_focus(focus).show(ui));
            });
        });
        output.expect("editor was shown")
    }

    fn stored_cursor(ctx: &egui::Context) -> Option<CCursorRange> {
        TextEdit::load_state(ctx, egui::Id::new(EDITOR_ID_SOURCE))
            .and_then(|state| state.cursor.char_range())
    }

    #[test]
    fn test_focus_writes_cursor_after_snippet() {
        let ctx = egui::Context::default();
        let spliced = splice_at("abc", Selection::cursor(1), Snippet::Heading1.text());
        let mut text = spliced.text;
        let mut selection = spliced.selection;
        assert_eq!(text, "a\n# bc");

        show_editor(&ctx, &mut text, &mut selection, true);

        let range = stored_cursor(&ctx).expect("cursor stored");
        assert_eq!(range.primary.index, 4);
        assert_eq!(range.secondary.index, 4);
        assert_eq!(selection, Selection::cursor(4));
    }

    #[test]
    fn test_second_insertion_uses_written_cursor() {
        let ctx = egui::Context::default();
        let mut text = String::new();
        let mut selection = Selection::default();

        for snippet in [Snippet::Heading1, Snippet::Heading2] {
            let spliced = splice_at(&text, selection, snippet.text());
            text = spliced.text;
            selection = spliced.selection;
            show_editor(&ctx, &mut text, &mut selection, true);
        }

        assert_eq!(text, "\n# \n## ");
        assert_eq!(selection, Selection::cursor(7));
        let range = stored_cursor(&ctx).expect("cursor stored");
        assert_eq!(range.primary.index, 7);
    }

    #[test]
    fn test_unfocused_frame_keeps_selection() {
        let ctx = egui::Context::default();
        let mut text = String::from("# Title\nBody");
        let mut selection = Selection::new(2, 7);

        let output = show_editor(&ctx, &mut text, &mut selection, false);

        assert_eq!(selection, Selection::new(2, 7));
        assert!(!output.changed);
        assert_eq!(output.cursor_position, (0, 2));
    }
}
