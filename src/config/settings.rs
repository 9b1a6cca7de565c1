//! User settings and preferences for Tailmark
//!
//! This module defines the `Settings` struct that holds all user-configurable
//! options, with serde support for JSON persistence. The document text itself
//! is never part of the settings.

use crate::markdown::{LinkBehavior, StyleConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Theme Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Available color themes for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

impl Theme {
    /// Get all available themes.
    pub fn all() -> &'static [Theme] {
        &[Theme::Light, Theme::Dark, Theme::System]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// View Mode Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// The four mutually exclusive panels.
///
/// - `Edit`: the markdown text area
/// - `Preview`: the rendered document
/// - `Code`: the generated HTML, syntax highlighted
/// - `Config`: the class and behavior configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Edit,
    Preview,
    Code,
    Config,
}

impl ViewMode {
    /// All modes, in toolbar order.
    pub fn all() -> &'static [ViewMode] {
        &[
            ViewMode::Edit,
            ViewMode::Code,
            ViewMode::Preview,
            ViewMode::Config,
        ]
    }

    /// Get a display label for the mode.
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Edit => "Edit",
            ViewMode::Preview => "Preview",
            ViewMode::Code => "Code",
            ViewMode::Config => "Config",
        }
    }

    /// Get an icon/symbol for the mode.
    pub fn icon(&self) -> &'static str {
        match self {
            ViewMode::Edit => "📝",
            ViewMode::Preview => "👁",
            ViewMode::Code => "</>",
            ViewMode::Config => "⚙",
        }
    }

    /// Keyboard shortcut that switches to this mode.
    pub fn shortcut_label(&self) -> &'static str {
        match self {
            ViewMode::Edit => "Ctrl+E",
            ViewMode::Preview => "Ctrl+P",
            ViewMode::Code => "Ctrl+G",
            ViewMode::Config => "Ctrl+,",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Window Size Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Window dimensions and position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    /// Window width in pixels
    pub width: f32,
    /// Window height in pixels
    pub height: f32,
    /// Window X position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Window Y position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// Whether the window was maximized
    #[serde(default)]
    pub maximized: bool,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 720.0,
            x: None,
            y: None,
            maximized: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences and application settings.
///
/// This struct is serialized to JSON and persisted to the user's config directory.
/// All fields have sensible defaults via the `Default` trait and `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Appearance
    // ─────────────────────────────────────────────────────────────────────────
    /// Color theme (light, dark, or system)
    pub theme: Theme,

    /// Active panel, restored on next launch
    pub view_mode: ViewMode,

    /// Font size for the editor and code view (in points)
    pub font_size: f32,

    /// Whether the code view shows line numbers
    pub show_line_numbers: bool,

    /// Syntax highlighting theme name. Empty picks the default for light/dark.
    pub syntax_theme: String,

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────
    /// Classes injected into rendered elements
    pub styles: StyleConfig,

    /// How rendered links behave
    pub link_behavior: LinkBehavior,

    // ─────────────────────────────────────────────────────────────────────────
    // Window State
    // ─────────────────────────────────────────────────────────────────────────
    /// Window size and position
    pub window_size: WindowSize,

    // ─────────────────────────────────────────────────────────────────────────
    // Export Settings
    // ─────────────────────────────────────────────────────────────────────────
    /// Last directory used for HTML export
    pub last_export_directory: Option<PathBuf>,

    /// Whether to open exported files after export
    pub open_after_export: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Appearance
            theme: Theme::default(),
            view_mode: ViewMode::default(),
            font_size: 14.0,
            show_line_numbers: true,
            syntax_theme: String::new(),

            // Rendering
            styles: StyleConfig::default(),
            link_behavior: LinkBehavior::default(),

            // Window State
            window_size: WindowSize::default(),

            // Export Settings
            last_export_directory: None,
            open_after_export: false,
        }
    }
}

impl Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Validation Constants and Sanitization
    // ─────────────────────────────────────────────────────────────────────────

    /// Minimum allowed font size.
    pub const MIN_FONT_SIZE: f32 = 8.0;
    /// Maximum allowed font size.
    pub const MAX_FONT_SIZE: f32 = 72.0;
    /// Minimum window dimension.
    pub const MIN_WINDOW_SIZE: f32 = 200.0;
    /// Maximum window dimension.
    pub const MAX_WINDOW_SIZE: f32 = 10000.0;

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// This is useful after loading settings from a file that might have
    /// been manually edited with invalid values.
    pub fn sanitize(&mut self) {
        // NaN would survive clamp, so reset it first
        if !self.font_size.is_finite() {
            self.font_size = Self::default().font_size;
        }
        self.font_size = self
            .font_size
            .clamp(Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE);

        let defaults = WindowSize::default();
        if !self.window_size.width.is_finite() {
            self.window_size.width = defaults.width;
        }
        if !self.window_size.height.is_finite() {
            self.window_size.height = defaults.height;
        }
        self.window_size.width = self
            .window_size
            .width
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);
        self.window_size.height = self
            .window_size
            .height
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);

        self.syntax_theme = self.syntax_theme.trim().to_string();
    }

    /// Load settings and sanitize them to ensure validity.
    ///
    /// This is a convenience method that deserializes and then sanitizes.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::StyleTag;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.view_mode, ViewMode::Edit);
        assert_eq!(settings.font_size, 14.0);
        assert!(settings.show_line_numbers);
        assert!(settings.syntax_theme.is_empty());
        assert_eq!(settings.styles, StyleConfig::default());
        assert!(!settings.link_behavior.open_in_new_tab);
        assert!(!settings.open_after_export);
        assert!(settings.last_export_directory.is_none());
    }

    #[test]
    fn test_theme_serialization() {
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(serde_json::to_string(&Theme::System).unwrap(), "\"system\"");
    }

    #[test]
    fn test_view_mode_serialization() {
        assert_eq!(serde_json::to_string(&ViewMode::Edit).unwrap(), "\"edit\"");
        assert_eq!(
            serde_json::from_str::<ViewMode>("\"config\"").unwrap(),
            ViewMode::Config
        );
    }

    #[test]
    fn test_view_mode_labels() {
        assert_eq!(ViewMode::all().len(), 4);
        assert_eq!(ViewMode::Code.label(), "Code");
        assert_eq!(ViewMode::Preview.icon(), "👁");
        assert_eq!(ViewMode::Config.shortcut_label(), "Ctrl+,");
    }

    #[test]
    fn test_settings_serialization_roundtrip() {
        let mut original = Settings::default();
        original.styles.set(StyleTag::H1, "text-3xl font-bold");
        original.link_behavior.open_in_new_tab = true;
        original.view_mode = ViewMode::Preview;

        let json = serde_json::to_string_pretty(&original).unwrap();
        let deserialized: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let json = r#"{"theme": "dark", "styles": {"p": "custom-p"}}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.styles.get(StyleTag::Paragraph), "custom-p");
        // Missing style keys keep their defaults
        assert_eq!(settings.styles.get(StyleTag::Link), "text-blue-500");
        assert_eq!(settings.view_mode, ViewMode::Edit);
        assert_eq!(settings.font_size, 14.0);
    }

    #[test]
    fn test_settings_deserialize_empty_json() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_window_size_default() {
        let size = WindowSize::default();
        assert_eq!(size.width, 1000.0);
        assert_eq!(size.height, 720.0);
        assert!(size.x.is_none());
        assert!(size.y.is_none());
        assert!(!size.maximized);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sanitization tests
    // ─────────────────────────────────────────────────────────────────────────
    #[test]
    fn test_sanitize_font_size() {
        let mut settings = Settings::default();
        settings.font_size = 4.0;
        settings.sanitize();
        assert_eq!(settings.font_size, Settings::MIN_FONT_SIZE);

        settings.font_size = 100.0;
        settings.sanitize();
        assert_eq!(settings.font_size, Settings::MAX_FONT_SIZE);

        settings.font_size = f32::NAN;
        settings.sanitize();
        assert_eq!(settings.font_size, 14.0);
    }

    #[test]
    fn test_sanitize_window_size() {
        let mut settings = Settings::default();
        settings.window_size.width = 10.0;
        settings.window_size.height = 50000.0;
        settings.sanitize();
        assert_eq!(settings.window_size.width, Settings::MIN_WINDOW_SIZE);
        assert_eq!(settings.window_size.height, Settings::MAX_WINDOW_SIZE);
    }

    #[test]
    fn test_from_json_sanitized() {
        let json = r#"{"font_size": 4.0, "syntax_theme": "  Solarized (dark) "}"#;
        let settings = Settings::from_json_sanitized(json).unwrap();
        assert_eq!(settings.font_size, Settings::MIN_FONT_SIZE);
        assert_eq!(settings.syntax_theme, "Solarized (dark)");
    }
}
