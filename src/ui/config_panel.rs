//! Config Panel Component for Tailmark
//!
//! The Config view mode: one class field per styleable element, the link
//! behavior toggle and a few appearance options. The panel never mutates
//! state directly; it reports `ConfigAction`s that the app applies.

use crate::config::{Settings, Theme};
use crate::markdown::syntax::get_highlighter;
use crate::markdown::StyleTag;
use crate::state::AppState;
use eframe::egui::{self, RichText, ScrollArea, Ui};

/// Width of the label column in the class grid.
const LABEL_WIDTH: f32 = 90.0;

/// A change requested from the config panel.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    /// Overwrite the class string for one tag
    SetStyleClass(StyleTag, String),
    /// Toggle `target="_blank"` on rendered links
    SetOpenLinksInNewTab(bool),
    /// Restore every class and the link behavior to defaults
    ResetStyles,
    SetTheme(Theme),
    /// Empty selects the default theme for the current mode
    SetSyntaxTheme(String),
    SetFontSize(f32),
    SetShowLineNumbers(bool),
    SetOpenAfterExport(bool),
}

impl ConfigAction {
    /// Apply the action to the application state.
    pub fn apply(self, state: &mut AppState) {
        match self {
            ConfigAction::SetStyleClass(tag, class) => state.set_style_class(tag, class),
            ConfigAction::SetOpenLinksInNewTab(open) => state.set_open_links_in_new_tab(open),
            ConfigAction::ResetStyles => state.reset_styles(),
            ConfigAction::SetTheme(theme) => state.update_settings(|s| s.theme = theme),
            ConfigAction::SetSyntaxTheme(name) => state.update_settings(|s| s.syntax_theme = name),
            ConfigAction::SetFontSize(size) => state.update_settings(|s| {
                s.font_size = size.clamp(Settings::MIN_FONT_SIZE, Settings::MAX_FONT_SIZE)
            }),
            ConfigAction::SetShowLineNumbers(show) => {
                state.update_settings(|s| s.show_line_numbers = show)
            }
            ConfigAction::SetOpenAfterExport(open) => {
                state.update_settings(|s| s.open_after_export = open)
            }
        }
    }
}

/// Config panel rendering.
#[derive(Debug, Clone, Default)]
pub struct ConfigPanel;

impl ConfigPanel {
    pub fn new() -> Self {
        Self
    }

    /// Show the panel for the current settings and return requested changes.
    pub fn show(&self, ui: &mut Ui, settings: &Settings) -> Vec<ConfigAction> {
        let mut actions = Vec::new();

        ScrollArea::vertical()
            .id_source("config_panel")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.set_max_width(560.0);
                ui.add_space(8.0);
                ui.heading("⚙ Configuration");
                ui.add_space(12.0);

                self.show_classes_section(ui, settings, &mut actions);

                ui.add_space(16.0);
                ui.separator();
                ui.add_space(8.0);

                self.show_behavior_section(ui, settings, &mut actions);

                ui.add_space(16.0);
                ui.separator();
                ui.add_space(8.0);

                self.show_appearance_section(ui, settings, &mut actions);

                ui.add_space(16.0);
                ui.separator();
                ui.add_space(8.0);

                if ui
                    .button("↺ Reset to defaults")
                    .on_hover_text("Restore every class and the link behavior to defaults")
                    .clicked()
                {
                    actions.push(ConfigAction::ResetStyles);
                }
                ui.add_space(8.0);
                ui.label(
                    RichText::new("Settings are saved automatically")
                        .small()
                        .weak(),
                );
            });

        actions
    }

    fn show_classes_section(
        &self,
        ui: &mut Ui,
        settings: &Settings,
        actions: &mut Vec<ConfigAction>,
    ) {
        ui.label(RichText::new("Tailwind classes").strong());
        ui.label(
            RichText::new("Injected as the class attribute of each rendered element")
                .small()
                .weak(),
        );
        ui.add_space(6.0);

        egui::Grid::new("style_class_grid")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for &tag in StyleTag::all() {
                    ui.add_sized(
                        [LABEL_WIDTH, 20.0],
                        egui::Label::new(tag.label()),
                    )
                    .on_hover_text(format!("<{}>", tag.tag_name()));

                    let mut class = settings.styles.get(tag).to_string();
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut class)
                            .id(egui::Id::new(("style_class", tag.tag_name())))
                            .hint_text("no class")
                            .desired_width(360.0),
                    );
                    if response.changed() {
                        actions.push(ConfigAction::SetStyleClass(tag, class));
                    }
                    ui.end_row();
                }
            });
    }

    fn show_behavior_section(
        &self,
        ui: &mut Ui,
        settings: &Settings,
        actions: &mut Vec<ConfigAction>,
    ) {
        ui.label(RichText::new("Behavior").strong());
        ui.add_space(4.0);

        let mut open_in_new_tab = settings.link_behavior.open_in_new_tab;
        if ui
            .checkbox(&mut open_in_new_tab, "Open links in a new tab")
            .on_hover_text("Adds target=\"_blank\" to every rendered link")
            .changed()
        {
            actions.push(ConfigAction::SetOpenLinksInNewTab(open_in_new_tab));
        }
    }

    fn show_appearance_section(
        &self,
        ui: &mut Ui,
        settings: &Settings,
        actions: &mut Vec<ConfigAction>,
    ) {
        ui.label(RichText::new("Appearance").strong());
        ui.add_space(4.0);

        // Theme selection
        ui.horizontal(|ui| {
            for &theme in Theme::all() {
                let label = match theme {
                    Theme::Light => "☀ Light",
                    Theme::Dark => "🌙 Dark",
                    Theme::System => "💻 System",
                };
                if ui.selectable_label(settings.theme == theme, label).clicked()
                    && settings.theme != theme
                {
                    actions.push(ConfigAction::SetTheme(theme));
                }
            }
        });
        ui.add_space(8.0);

        // Code highlighting theme
        ui.horizontal(|ui| {
            ui.label("Code theme");
            let selected = if settings.syntax_theme.is_empty() {
                "Automatic"
            } else {
                settings.syntax_theme.as_str()
            };
            egui::ComboBox::from_id_source("syntax_theme_combo")
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    if ui
                        .selectable_label(settings.syntax_theme.is_empty(), "Automatic")
                        .clicked()
                    {
                        actions.push(ConfigAction::SetSyntaxTheme(String::new()));
                    }
                    for name in get_highlighter().available_themes() {
                        if ui
                            .selectable_label(settings.syntax_theme == name, name)
                            .clicked()
                        {
                            actions.push(ConfigAction::SetSyntaxTheme(name.to_string()));
                        }
                    }
                });
        });
        ui.add_space(8.0);

        // Font size slider
        ui.horizontal(|ui| {
            ui.label("Font size");
            let mut font_size = settings.font_size;
            if ui
                .add(
                    egui::Slider::new(
                        &mut font_size,
                        Settings::MIN_FONT_SIZE..=Settings::MAX_FONT_SIZE,
                    )
                    .step_by(1.0)
                    .suffix("px"),
                )
                .changed()
            {
                actions.push(ConfigAction::SetFontSize(font_size));
            }
        });
        ui.add_space(4.0);

        let mut show_line_numbers = settings.show_line_numbers;
        if ui
            .checkbox(&mut show_line_numbers, "Show line numbers in the code view")
            .changed()
        {
            actions.push(ConfigAction::SetShowLineNumbers(show_line_numbers));
        }

        let mut open_after_export = settings.open_after_export;
        if ui
            .checkbox(&mut open_after_export, "Open exported files in the browser")
            .changed()
        {
            actions.push(ConfigAction::SetOpenAfterExport(open_after_export));
        }
    }
}
