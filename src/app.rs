//! Main application module for Tailmark
//!
//! This module implements the eframe App trait for the main application:
//! toolbar, the panel for the active view mode, status bar, keyboard
//! shortcuts and the export actions.

use crate::config::{ViewMode, WindowSize};
use crate::editor::{EditorWidget, Snippet};
use crate::export::{
    copy_html_to_clipboard, copy_text_to_clipboard, export_to_html_file, save_html_dialog,
};
use crate::preview::MarkdownPreview;
use crate::state::AppState;
use crate::theme::ThemeManager;
use crate::ui::{CodeView, ConfigPanel, Toolbar, ToolbarAction};
use eframe::egui;
use log::{debug, info, warn};

/// Keyboard shortcut actions.
///
/// These actions are detected in the input handling closure and executed
/// afterwards to avoid borrow conflicts.
#[derive(Debug, Clone, Copy, PartialEq)]
enum KeyboardAction {
    /// Insert a snippet (Ctrl+1/2/3, Ctrl+Shift+I, Ctrl+K, Ctrl+Shift+T)
    Insert(Snippet),
    /// Switch view mode (Ctrl+E/P/G/,)
    SetViewMode(ViewMode),
    /// Copy rendered HTML (Ctrl+Shift+C)
    CopyHtml,
    /// Export HTML file (Ctrl+Shift+E)
    ExportHtml,
}

/// Map a key press to its shortcut, if any.
fn shortcut_for(modifiers: egui::Modifiers, key: egui::Key) -> Option<KeyboardAction> {
    use egui::Key;

    if !modifiers.command || modifiers.alt {
        return None;
    }

    if modifiers.shift {
        return match key {
            Key::I => Some(KeyboardAction::Insert(Snippet::Image)),
            Key::T => Some(KeyboardAction::Insert(Snippet::Table)),
            Key::C => Some(KeyboardAction::CopyHtml),
            Key::E => Some(KeyboardAction::ExportHtml),
            _ => None,
        };
    }

    match key {
        Key::Num1 => Some(KeyboardAction::Insert(Snippet::Heading1)),
        Key::Num2 => Some(KeyboardAction::Insert(Snippet::Heading2)),
        Key::Num3 => Some(KeyboardAction::Insert(Snippet::Heading3)),
        Key::K => Some(KeyboardAction::Insert(Snippet::Link)),
        Key::E => Some(KeyboardAction::SetViewMode(ViewMode::Edit)),
        Key::P => Some(KeyboardAction::SetViewMode(ViewMode::Preview)),
        Key::G => Some(KeyboardAction::SetViewMode(ViewMode::Code)),
        Key::Comma => Some(KeyboardAction::SetViewMode(ViewMode::Config)),
        _ => None,
    }
}

/// Remove the first shortcut key press from this frame's input.
///
/// The key event is consumed so the focused editor does not also act on it.
/// Copying HTML drops the platform copy event that comes with Ctrl+Shift+C.
fn take_shortcut(input: &mut egui::InputState) -> Option<KeyboardAction> {
    let index = input.events.iter().position(|event| {
        matches!(
            event,
            egui::Event::Key { key, pressed: true, modifiers, .. }
                if shortcut_for(*modifiers, *key).is_some()
        )
    })?;

    let egui::Event::Key { key, modifiers, .. } = input.events.remove(index) else {
        return None;
    };
    let action = shortcut_for(modifiers, key)?;

    if action == KeyboardAction::CopyHtml {
        input.events.retain(|event| !matches!(event, egui::Event::Copy));
    }
    Some(action)
}

/// Window geometry to persist: the inner size, which `main` restores with
/// `with_inner_size`, and the outer position used by `with_position`.
fn window_geometry(viewport: &egui::ViewportInfo) -> Option<(egui::Vec2, egui::Pos2)> {
    let size = viewport.inner_rect?.size();
    let pos = viewport.outer_rect.or(viewport.inner_rect)?.min;
    Some((size, pos))
}

/// The main application struct.
pub struct TailmarkApp {
    /// Application state
    state: AppState,
    /// Theme manager for handling theme switching
    theme_manager: ThemeManager,
    /// Toolbar UI component
    toolbar: Toolbar,
    /// Config panel component
    config_panel: ConfigPanel,
    /// Editor cursor as (line, column), for the status bar
    cursor_position: Option<(usize, usize)>,
    /// Last known window size (for detecting changes)
    last_window_size: Option<egui::Vec2>,
    /// Last known window position (for detecting changes)
    last_window_pos: Option<egui::Pos2>,
    /// Application start time for timing toast messages
    start_time: std::time::Instant,
}

impl TailmarkApp {
    /// Create a new TailmarkApp instance.
    ///
    /// This initializes the application state from the config file and applies
    /// the saved theme preference.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        info!("Initializing Tailmark");

        let mut app = Self::from_state(AppState::new());

        let system_dark = cc.integration_info.system_theme.map(|t| t == eframe::Theme::Dark);
        app.theme_manager.apply_if_needed(&cc.egui_ctx, system_dark);
        info!("Applied initial theme: {:?}", app.state.settings.theme);

        app
    }

    /// Build the app around an existing state without touching the window.
    fn from_state(state: AppState) -> Self {
        let theme_manager = ThemeManager::new(state.settings.theme);

        let mut app = Self {
            state,
            theme_manager,
            toolbar: Toolbar::new(),
            config_panel: ConfigPanel::new(),
            cursor_position: None,
            last_window_size: None,
            last_window_pos: None,
            start_time: std::time::Instant::now(),
        };
        if app.state.view_mode() == ViewMode::Edit {
            app.state.ui.focus_editor = true;
        }
        app
    }

    /// Get elapsed time since app start in seconds.
    fn get_app_time(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    fn toast(&mut self, message: impl Into<String>, duration: f64) {
        let time = self.get_app_time();
        self.state.show_toast(message, time, duration);
    }

    /// Update window size in settings if changed.
    ///
    /// Returns `true` if the window state was updated.
    fn update_window_state(&mut self, ctx: &egui::Context) -> bool {
        let Some((current_size, current_pos)) = ctx.input(|i| window_geometry(i.viewport()))
        else {
            return false;
        };

        let size_changed = self
            .last_window_size
            .map(|s| (s - current_size).length() > 1.0)
            .unwrap_or(true);
        let pos_changed = self
            .last_window_pos
            .map(|p| (p - current_pos).length() > 1.0)
            .unwrap_or(true);

        if !size_changed && !pos_changed {
            return false;
        }

        self.last_window_size = Some(current_size);
        self.last_window_pos = Some(current_pos);

        let maximized = ctx.input(|i| i.viewport().maximized.unwrap_or(false));
        self.state.settings.window_size = WindowSize {
            width: current_size.x,
            height: current_size.y,
            x: Some(current_pos.x),
            y: Some(current_pos.y),
            maximized,
        };

        debug!(
            "Window state updated: {}x{} at ({}, {}), maximized: {}",
            current_size.x, current_size.y, current_pos.x, current_pos.y, maximized
        );

        true
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Render all panels. Returns the toolbar action, if any.
    fn render_ui(&mut self, ctx: &egui::Context) -> Option<ToolbarAction> {
        let colors = self.theme_manager.colors();
        let view_mode = self.state.view_mode();

        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.toolbar.show(ui, &colors, view_mode))
            .inner;

        self.render_status_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match view_mode {
            ViewMode::Edit => self.render_editor(ui),
            ViewMode::Preview => {
                let rendered = self.state.rendered();
                let settings = &self.state.settings;
                MarkdownPreview::new(&rendered.document, &settings.styles, &colors)
                    .font_size(settings.font_size)
                    .link_behavior(settings.link_behavior)
                    .syntax_theme(&settings.syntax_theme)
                    .show(ui);
            }
            ViewMode::Code => {
                let rendered = self.state.rendered();
                let settings = &self.state.settings;
                let output = CodeView::new(&rendered.html, &colors)
                    .font_size(settings.font_size)
                    .show_line_numbers(settings.show_line_numbers)
                    .syntax_theme(&settings.syntax_theme)
                    .show(ui);
                if output.copy_requested {
                    match copy_text_to_clipboard(&rendered.html) {
                        Ok(()) => self.toast("HTML copied to clipboard", 2.0),
                        Err(e) => {
                            warn!("Failed to copy HTML source: {}", e);
                            self.toast(format!("Copy failed: {}", e), 3.0);
                        }
                    }
                }
            }
            ViewMode::Config => {
                let actions = self.config_panel.show(ui, &self.state.settings);
                for action in actions {
                    debug!("Config action: {:?}", action);
                    action.apply(&mut self.state);
                }
                self.theme_manager.set_theme(self.state.settings.theme);
            }
        });

        toolbar_action
    }

    fn render_editor(&mut self, ui: &mut egui::Ui) {
        let focus = std::mem::take(&mut self.state.ui.focus_editor);
        let font_size = self.state.settings.font_size;
        let mut selection = self.state.selection();

        let output = EditorWidget::new(self.state.text_mut(), &mut selection)
            .font_size(font_size)
            .request_focus(focus)
            .show(ui);

        self.state.set_selection(selection);
        self.cursor_position = Some(output.cursor_position);
        if output.changed {
            debug!("Document edited, {} chars", self.state.text().len());
        }
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        let stats = self.state.stats();
        let view_mode = self.state.view_mode();
        let muted = self.theme_manager.colors().text.muted;

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(stats.format_compact()).color(muted));

                if let (ViewMode::Edit, Some((line, col))) = (view_mode, self.cursor_position) {
                    ui.separator();
                    ui.label(
                        egui::RichText::new(format!("Ln {}, Col {}", line + 1, col + 1))
                            .color(muted),
                    );
                }

                if let Some(message) = &self.state.ui.toast_message {
                    ui.separator();
                    ui.label(egui::RichText::new(message).strong());
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!("{} {}", view_mode.icon(), view_mode.label()))
                            .color(muted),
                    );
                });
            });
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        let Some(action) = ctx.input_mut(take_shortcut) else {
            return;
        };
        debug!("Keyboard shortcut: {:?}", action);

        match action {
            KeyboardAction::Insert(snippet) => {
                self.state.insert_snippet(snippet);
            }
            KeyboardAction::SetViewMode(mode) => self.state.set_view_mode(mode),
            KeyboardAction::CopyHtml => self.handle_copy_as_html(),
            KeyboardAction::ExportHtml => self.handle_export_html(),
        }
    }

    fn handle_toolbar_action(&mut self, action: ToolbarAction) {
        debug!("Toolbar action: {:?}", action);
        match action {
            ToolbarAction::InsertSnippet(snippet) => {
                self.state.insert_snippet(snippet);
            }
            ToolbarAction::SetViewMode(mode) => self.state.set_view_mode(mode),
            ToolbarAction::CopyHtml => self.handle_copy_as_html(),
            ToolbarAction::ExportHtml => self.handle_export_html(),
        }
    }

    /// Handle exporting the current document as a standalone HTML page.
    fn handle_export_html(&mut self) {
        let initial_dir = self.state.settings.last_export_directory.clone();
        let Some(path) = save_html_dialog(initial_dir.as_deref()) else {
            debug!("Export cancelled");
            return;
        };

        let settings = &self.state.settings;
        let result = export_to_html_file(
            self.state.text(),
            &path,
            &settings.styles,
            settings.link_behavior,
            self.theme_manager.is_dark(),
        );

        match result {
            Ok(()) => {
                if let Some(parent) = path.parent() {
                    let parent = parent.to_path_buf();
                    self.state
                        .update_settings(|s| s.last_export_directory = Some(parent));
                }

                self.toast(format!("Exported to {}", path.display()), 2.5);

                if self.state.settings.open_after_export {
                    if let Err(e) = open::that(&path) {
                        warn!("Failed to open exported file: {}", e);
                    }
                }
            }
            Err(e) => {
                warn!("Failed to export HTML: {}", e);
                self.toast(format!("Export failed: {}", e), 3.0);
            }
        }
    }

    /// Handle copying the current document as HTML to clipboard.
    fn handle_copy_as_html(&mut self) {
        let settings = &self.state.settings;
        match copy_html_to_clipboard(self.state.text(), &settings.styles, settings.link_behavior)
        {
            Ok(()) => {
                info!("Copied HTML to clipboard");
                self.toast("HTML copied to clipboard", 2.0);
            }
            Err(e) => {
                warn!("Failed to copy HTML to clipboard: {}", e);
                self.toast(format!("Copy failed: {}", e), 3.0);
            }
        }
    }
}

impl eframe::App for TailmarkApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        let system_dark = frame.info().system_theme.map(|t| t == eframe::Theme::Dark);
        self.theme_manager.set_theme(self.state.settings.theme);
        self.theme_manager.apply_if_needed(ctx, system_dark);

        let current_time = self.get_app_time();
        self.state.update_toast(current_time);
        if self.state.ui.toast_expires_at.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }

        self.update_window_state(ctx);

        // Shortcuts run before the editor so a snippet lands in this frame
        self.handle_keyboard_shortcuts(ctx);

        if let Some(action) = self.render_ui(ctx) {
            self.handle_toolbar_action(action);
            ctx.request_repaint();
        }

        // eframe only calls `save` with its persistence feature, so dirty
        // settings are flushed here at the same cadence
        let interval = eframe::App::auto_save_interval(self).as_secs_f64();
        self.state.save_settings_if_due(current_time, interval);
    }

    /// Called when the application is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application exiting");
        self.state.shutdown();
    }

    /// Save persistent state.
    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        if self.state.settings_dirty() {
            debug!("Saving application state");
            self.state.save_settings_if_dirty();
        }
    }

    fn auto_save_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(30)
    }
}
