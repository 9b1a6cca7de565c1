//! Theme System for Tailmark
//!
//! Light and dark palettes for the UI chrome and the native preview, and
//! their conversion to egui `Visuals`. The `Theme` enum in
//! `config::settings` (Light/Dark/System) selects which palette is used.
//!
//! ```ignore
//! let colors = ThemeColors::dark();
//! ui.label(RichText::new("Hello").color(colors.text.primary));
//! ctx.set_visuals(colors.to_visuals());
//! ```

mod manager;

pub use manager::ThemeManager;

use eframe::egui::{Color32, Rounding, Stroke, Visuals};

// ─────────────────────────────────────────────────────────────────────────────
// Theme Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Theme colors for the entire application.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    /// Base UI colors (backgrounds, borders)
    pub base: BaseColors,
    /// Text colors for various contexts
    pub text: TextColors,
    /// Colors for rendered markdown in the preview
    pub preview: PreviewColors,
}

impl ThemeColors {
    /// Get the light theme colors.
    pub fn light() -> Self {
        Self {
            base: BaseColors {
                background: Color32::from_rgb(255, 255, 255),
                background_secondary: Color32::from_rgb(248, 248, 248),
                background_tertiary: Color32::from_rgb(240, 240, 240),
                border: Color32::from_rgb(200, 200, 200),
                selected: Color32::from_rgb(210, 228, 255),
            },
            text: TextColors {
                primary: Color32::from_rgb(30, 30, 30),
                secondary: Color32::from_rgb(80, 80, 80),
                muted: Color32::from_rgb(120, 120, 120),
                link: Color32::from_rgb(37, 99, 235),
            },
            preview: PreviewColors {
                heading: Color32::from_rgb(20, 20, 20),
                blockquote_border: Color32::from_rgb(200, 200, 200),
                blockquote_text: Color32::from_rgb(100, 100, 100),
                code_block_bg: Color32::from_rgb(246, 248, 250),
                horizontal_rule: Color32::from_rgb(200, 200, 200),
                list_marker: Color32::from_rgb(100, 100, 100),
                image_placeholder: Color32::from_rgb(235, 238, 242),
                class_badge: Color32::from_rgb(14, 116, 144),
            },
        }
    }

    /// Get the dark theme colors.
    pub fn dark() -> Self {
        Self {
            base: BaseColors {
                background: Color32::from_rgb(30, 30, 30),
                background_secondary: Color32::from_rgb(37, 37, 37),
                background_tertiary: Color32::from_rgb(45, 45, 45),
                border: Color32::from_rgb(60, 60, 60),
                selected: Color32::from_rgb(40, 60, 90),
            },
            text: TextColors {
                primary: Color32::from_rgb(220, 220, 220),
                secondary: Color32::from_rgb(180, 180, 180),
                muted: Color32::from_rgb(140, 140, 140),
                link: Color32::from_rgb(96, 165, 250),
            },
            preview: PreviewColors {
                heading: Color32::from_rgb(240, 240, 240),
                blockquote_border: Color32::from_rgb(80, 80, 80),
                blockquote_text: Color32::from_rgb(180, 180, 180),
                code_block_bg: Color32::from_rgb(35, 39, 46),
                horizontal_rule: Color32::from_rgb(80, 80, 80),
                list_marker: Color32::from_rgb(150, 150, 150),
                image_placeholder: Color32::from_rgb(50, 54, 60),
                class_badge: Color32::from_rgb(103, 232, 249),
            },
        }
    }

    /// Check if this is a dark theme (useful for conditional styling).
    pub fn is_dark(&self) -> bool {
        self.base.background.r() < 128
    }

    /// Convert theme colors to egui Visuals for UI styling.
    pub fn to_visuals(&self) -> Visuals {
        let mut visuals = if self.is_dark() {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        visuals.panel_fill = self.base.background;
        visuals.window_fill = self.base.background;
        visuals.extreme_bg_color = self.base.background_tertiary;
        visuals.faint_bg_color = self.base.background_secondary;
        visuals.code_bg_color = self.preview.code_block_bg;
        visuals.hyperlink_color = self.text.link;

        visuals.selection.bg_fill = self.base.selected;
        visuals.selection.stroke = Stroke::new(1.0, self.text.link);

        visuals.window_rounding = Rounding::same(6.0);
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.base.border);

        visuals
    }
}

/// Base UI colors for backgrounds and borders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseColors {
    /// Primary background color
    pub background: Color32,
    /// Secondary/elevated background (panels, status bar)
    pub background_secondary: Color32,
    /// Tertiary background (inputs)
    pub background_tertiary: Color32,
    /// Border color
    pub border: Color32,
    /// Selected/active state background
    pub selected: Color32,
}

/// Text colors for various contexts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextColors {
    pub primary: Color32,
    pub secondary: Color32,
    /// Hints, line numbers
    pub muted: Color32,
    pub link: Color32,
}

/// Colors for markdown elements in the native preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewColors {
    pub heading: Color32,
    pub blockquote_border: Color32,
    pub blockquote_text: Color32,
    pub code_block_bg: Color32,
    pub horizontal_rule: Color32,
    /// Bullets and numbers
    pub list_marker: Color32,
    pub image_placeholder: Color32,
    /// Text of the injected-class tooltip
    pub class_badge: Color32,
}
