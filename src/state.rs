//! Application state management for Tailmark
//!
//! This module defines the central `AppState` struct: the document text,
//! the last known selection, user settings (which carry the style
//! configuration and the active view mode) and transient UI state.

use crate::config::{load_config, save_config_silent, Settings, ViewMode};
use crate::editor::{splice_at, Selection, Snippet, TextStats};
use crate::markdown::{
    parse_markdown, render_html, LinkBehavior, MarkdownDocument, StyleConfig, StyleTag,
};
use log::{debug, info, warn};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

// ─────────────────────────────────────────────────────────────────────────────
// UI State
// ─────────────────────────────────────────────────────────────────────────────

/// UI-related state flags.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Move keyboard focus to the editor and apply the stored selection
    pub focus_editor: bool,
    /// Temporary toast message (shown in the status bar)
    pub toast_message: Option<String>,
    /// When the toast message should expire (as seconds since app start)
    pub toast_expires_at: Option<f64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Render Cache
// ─────────────────────────────────────────────────────────────────────────────

/// Output of the render pipeline for one (text, styles, behavior) triple.
#[derive(Debug)]
pub struct RenderedDocument {
    /// Parsed tree, walked by the native preview
    pub document: MarkdownDocument,
    /// Generated markup, shown in the code view and exported
    pub html: String,
}

/// Single-entry cache keyed by a hash of the render inputs.
#[derive(Debug, Default)]
struct RenderCache {
    key: Option<u64>,
    rendered: Option<Rc<RenderedDocument>>,
}

fn render_key(text: &str, styles: &StyleConfig, behavior: LinkBehavior) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    styles.hash(&mut hasher);
    behavior.hash(&mut hasher);
    hasher.finish()
}

// ─────────────────────────────────────────────────────────────────────────────
// Application State
// ─────────────────────────────────────────────────────────────────────────────

/// Central application state struct.
///
/// # Example
///
/// ```ignore
/// let mut state = AppState::with_settings(Settings::default());
/// state.insert_at_cursor(Snippet::Heading1.text());
/// assert_eq!(state.text(), "\n# ");
/// ```
#[derive(Debug)]
pub struct AppState {
    /// Markdown source; never persisted
    text: String,
    /// Last selection reported by the editor, in char indices
    selection: Selection,
    /// User settings (loaded from config)
    pub settings: Settings,
    /// UI-related state
    pub ui: UiState,
    /// Whether settings have been modified and need saving
    settings_dirty: bool,
    /// App time of the last automatic save attempt, in seconds
    last_save_attempt: f64,
    cache: RenderCache,
}

impl AppState {
    /// Create a new AppState with settings loaded from config.
    pub fn new() -> Self {
        let settings = load_config();
        info!("AppState initialized with settings");
        debug!(
            "Theme: {:?}, View mode: {:?}",
            settings.theme, settings.view_mode
        );
        Self::with_settings(settings)
    }

    /// Create AppState with custom settings (useful for testing).
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            text: String::new(),
            selection: Selection::default(),
            settings,
            ui: UiState::default(),
            settings_dirty: false,
            last_save_attempt: 0.0,
            cache: RenderCache::default(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Document
    // ─────────────────────────────────────────────────────────────────────────

    /// The current markdown source.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Mutable access for the text editor widget.
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    /// Replace the whole document.
    #[cfg(test)]
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// The last known selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Record the selection reported by the editor.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// Character, word and line counts for the status bar.
    pub fn stats(&self) -> TextStats {
        TextStats::from_text(&self.text)
    }

    /// Replace the current selection with `snippet` and move the cursor past it.
    ///
    /// The editor is asked to take focus on its next frame so typing resumes
    /// right after the inserted text.
    pub fn insert_at_cursor(&mut self, snippet: &str) {
        let result = splice_at(&self.text, self.selection, snippet);
        debug!(
            "Inserted {} chars at {:?}, cursor now {}",
            snippet.chars().count(),
            self.selection,
            result.selection.start
        );
        self.text = result.text;
        self.selection = result.selection;
        self.ui.focus_editor = true;
    }

    /// Insert a toolbar snippet.
    ///
    /// Only acts in edit mode, where the selection reflects a visible cursor.
    /// Returns whether anything was inserted.
    pub fn insert_snippet(&mut self, snippet: Snippet) -> bool {
        if self.settings.view_mode != ViewMode::Edit {
            debug!("Ignoring {:?} outside edit mode", snippet);
            return false;
        }
        self.insert_at_cursor(snippet.text());
        true
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Styles and Modes
    // ─────────────────────────────────────────────────────────────────────────

    /// Overwrite the class string for exactly one tag.
    pub fn set_style_class(&mut self, tag: StyleTag, class: impl Into<String>) {
        self.settings.styles.set(tag, class);
        self.settings_dirty = true;
    }

    /// Restore every tag to its default class.
    pub fn reset_styles(&mut self) {
        info!("Resetting style classes to defaults");
        self.settings.styles = StyleConfig::default();
        self.settings.link_behavior = LinkBehavior::default();
        self.settings_dirty = true;
    }

    /// Set whether rendered links open in a new tab.
    pub fn set_open_links_in_new_tab(&mut self, open_in_new_tab: bool) {
        self.settings.link_behavior.open_in_new_tab = open_in_new_tab;
        self.settings_dirty = true;
    }

    /// The active view mode.
    pub fn view_mode(&self) -> ViewMode {
        self.settings.view_mode
    }

    /// Switch panels. Document text, selection and styles are untouched.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.settings.view_mode == mode {
            return;
        }
        debug!("View mode: {:?} -> {:?}", self.settings.view_mode, mode);
        self.settings.view_mode = mode;
        if mode == ViewMode::Edit {
            self.ui.focus_editor = true;
        }
        self.settings_dirty = true;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Parsed tree and HTML for the current text, styles and behavior.
    ///
    /// Re-rendered only when one of the inputs changed since the last call.
    pub fn rendered(&mut self) -> Rc<RenderedDocument> {
        let styles = &self.settings.styles;
        let behavior = self.settings.link_behavior;
        let key = render_key(&self.text, styles, behavior);

        if self.cache.key == Some(key) {
            if let Some(rendered) = &self.cache.rendered {
                return Rc::clone(rendered);
            }
        }

        let document = parse_markdown(&self.text);
        let html = render_html(&document, styles, behavior);
        let rendered = Rc::new(RenderedDocument { document, html });

        self.cache.key = Some(key);
        self.cache.rendered = Some(Rc::clone(&rendered));
        rendered
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Settings Management
    // ─────────────────────────────────────────────────────────────────────────

    /// Update settings and mark as dirty.
    pub fn update_settings<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        f(&mut self.settings);
        self.settings_dirty = true;
    }

    /// Whether there are unsaved settings changes.
    pub fn settings_dirty(&self) -> bool {
        self.settings_dirty
    }

    /// Save settings to config file if modified.
    ///
    /// Returns `true` if settings were saved.
    pub fn save_settings_if_dirty(&mut self) -> bool {
        if self.settings_dirty {
            if save_config_silent(&self.settings) {
                self.settings_dirty = false;
                info!("Settings saved");
                return true;
            }
            warn!("Failed to save settings");
        }
        false
    }

    /// Save dirty settings when `interval` seconds have passed since the last
    /// attempt. A failed write is retried on the next interval.
    pub fn save_settings_if_due(&mut self, current_time: f64, interval: f64) -> bool {
        if !self.settings_dirty || current_time - self.last_save_attempt < interval {
            return false;
        }
        self.last_save_attempt = current_time;
        self.save_settings_if_dirty()
    }

    /// Prepare state for application shutdown.
    pub fn shutdown(&mut self) {
        self.settings_dirty = true;
        self.save_settings_if_dirty();
        info!("AppState shutdown complete");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Toast
    // ─────────────────────────────────────────────────────────────────────────

    /// Show a temporary toast message (disappears after duration).
    ///
    /// `current_time` should be the current app time in seconds.
    /// `duration` is how long to show the message in seconds.
    pub fn show_toast(&mut self, message: impl Into<String>, current_time: f64, duration: f64) {
        self.ui.toast_message = Some(message.into());
        self.ui.toast_expires_at = Some(current_time + duration);
    }

    /// Update toast state - clears expired toasts.
    ///
    /// Call this each frame with the current time.
    pub fn update_toast(&mut self, current_time: f64) {
        if let Some(expires_at) = self.ui.toast_expires_at {
            if current_time >= expires_at {
                self.ui.toast_message = None;
                self.ui.toast_expires_at = None;
            }
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::with_settings(Settings::default())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Insertion
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_initial_state() {
        let state = state();
        assert_eq!(state.text(), "");
        assert_eq!(state.selection(), Selection::cursor(0));
        assert_eq!(state.view_mode(), ViewMode::Edit);
        assert!(!state.settings_dirty());
    }

    #[test]
    fn test_insert_heading_twice() {
        let mut state = state();
        assert!(state.insert_snippet(Snippet::Heading1));
        assert_eq!(state.text(), "\n# ");
        assert!(state.ui.focus_editor);

        assert!(state.insert_snippet(Snippet::Heading1));
        assert_eq!(state.text(), "\n# \n# ");
        assert_eq!(state.selection(), Selection::cursor(6));
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut state = state();
        state.set_text("Hello World");
        state.set_selection(Selection::new(6, 11));
        state.insert_at_cursor("There");
        assert_eq!(state.text(), "Hello There");
        assert_eq!(state.selection(), Selection::cursor(11));
    }

    #[test]
    fn test_insert_after_user_typed() {
        let mut state = state();
        state.set_text("Intro");
        state.set_selection(Selection::cursor(5));
        state.insert_snippet(Snippet::Link);
        assert_eq!(state.text(), "Intro\n[Link Text](example.com)");
    }

    #[test]
    fn test_insert_with_stale_selection() {
        let mut state = state();
        state.set_selection(Selection::new(40, 50));
        state.insert_at_cursor("x");
        assert_eq!(state.text(), "x");
        assert_eq!(state.selection(), Selection::cursor(1));
    }

    #[test]
    fn test_snippets_ignored_outside_edit_mode() {
        let mut state = state();
        for &mode in &[ViewMode::Preview, ViewMode::Code, ViewMode::Config] {
            state.set_view_mode(mode);
            assert!(!state.insert_snippet(Snippet::Table));
            assert_eq!(state.text(), "");
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Modes and Styles
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_view_mode_switch_preserves_document() {
        let mut state = state();
        state.set_text("# Title\n\nBody");
        state.set_selection(Selection::new(2, 4));
        state.set_style_class(StyleTag::H1, "text-3xl");
        let styles = state.settings.styles.clone();

        for &mode in ViewMode::all() {
            state.set_view_mode(mode);
            assert_eq!(state.view_mode(), mode);
            assert_eq!(state.text(), "# Title\n\nBody");
            assert_eq!(state.selection(), Selection::new(2, 4));
            assert_eq!(state.settings.styles, styles);
        }
    }

    #[test]
    fn test_set_style_class_marks_dirty() {
        let mut state = state();
        state.set_style_class(StyleTag::Image, "rounded");
        assert_eq!(state.settings.styles.get(StyleTag::Image), "rounded");
        assert_eq!(state.settings.styles.get(StyleTag::Paragraph), "mb-4");
        assert!(state.settings_dirty());
    }

    #[test]
    fn test_settings_changes_wait_for_save_interval() {
        let mut state = state();
        state.set_style_class(StyleTag::Link, "underline");
        state.set_view_mode(ViewMode::Code);

        assert!(!state.save_settings_if_due(1.0, 30.0));
        assert!(!state.save_settings_if_due(29.9, 30.0));
        assert!(state.settings_dirty());
    }

    #[test]
    fn test_clean_settings_are_never_due() {
        let mut state = state();
        assert!(!state.save_settings_if_due(120.0, 30.0));
        assert!(!state.settings_dirty());
    }

    #[test]
    fn test_custom_paragraph_class_survives_mode_switch() {
        let mut state = state();
        state.set_text("Hello");
        state.set_view_mode(ViewMode::Config);
        state.set_style_class(StyleTag::Paragraph, "custom-p");
        state.set_view_mode(ViewMode::Preview);

        let rendered = state.rendered();
        assert_eq!(rendered.html, "<p class=\"custom-p\">Hello</p>\n");
        assert!(!rendered.document.is_empty());
    }

    #[test]
    fn test_reset_styles() {
        let mut state = state();
        state.set_style_class(StyleTag::Paragraph, "");
        state.set_open_links_in_new_tab(true);
        state.reset_styles();
        assert_eq!(state.settings.styles, StyleConfig::default());
        assert!(!state.settings.link_behavior.open_in_new_tab);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Render cache
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_render_cache_reuses_output() {
        let mut state = state();
        state.set_text("Hello");
        let first = state.rendered();
        let second = state.rendered();
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_render_cache_invalidates_on_change() {
        let mut state = state();
        state.set_text("[a](https://x.org)");
        let before = state.rendered();

        state.set_open_links_in_new_tab(true);
        let after = state.rendered();
        assert!(!Rc::ptr_eq(&before, &after));
        assert!(after.html.contains("target=\"_blank\""));

        state.set_text("changed");
        assert!(state.rendered().html.contains("changed"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Toast
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_toast_expires() {
        let mut state = state();
        state.show_toast("Copied", 10.0, 2.0);
        state.update_toast(11.0);
        assert_eq!(state.ui.toast_message.as_deref(), Some("Copied"));
        state.update_toast(12.0);
        assert!(state.ui.toast_message.is_none());
    }

    #[test]
    fn test_stats() {
        let mut state = state();
        state.set_text("one two\nthree");
        let stats = state.stats();
        assert_eq!(stats.words, 3);
        assert_eq!(stats.lines, 2);
    }
}
