//! Theme Manager for Tailmark
//!
//! Tracks the theme preference and applies it to the egui context.

use eframe::egui::{Context, Visuals};
use log::{debug, info};

use super::ThemeColors;
use crate::config::Theme;

// ─────────────────────────────────────────────────────────────────────────────
// Theme Manager
// ─────────────────────────────────────────────────────────────────────────────

/// Manages theme state and applies themes to the egui context.
#[derive(Debug, Clone)]
pub struct ThemeManager {
    /// Current theme setting (Light, Dark, or System)
    current_theme: Theme,
    /// Whether the theme needs to be reapplied
    needs_apply: bool,
    /// Last detected system dark mode state (for System theme)
    last_system_dark_mode: Option<bool>,
}

impl ThemeManager {
    /// Create a new ThemeManager with the given initial theme.
    pub fn new(theme: Theme) -> Self {
        info!("ThemeManager initialized with theme: {:?}", theme);
        Self {
            current_theme: theme,
            needs_apply: true,
            last_system_dark_mode: None,
        }
    }

    /// Set the theme and mark for reapplication.
    pub fn set_theme(&mut self, theme: Theme) {
        if self.current_theme != theme {
            info!("Theme changed from {:?} to {:?}", self.current_theme, theme);
            self.current_theme = theme;
            self.needs_apply = true;
        }
    }

    /// Apply the theme only if needed (theme changed or system preference changed).
    ///
    /// `system_dark` is the OS preference as reported by eframe, if known.
    /// Returns `true` if the theme was applied.
    pub fn apply_if_needed(&mut self, ctx: &Context, system_dark: Option<bool>) -> bool {
        if self.current_theme == Theme::System {
            let current = system_dark.unwrap_or(false);
            if self.last_system_dark_mode != Some(current) {
                self.last_system_dark_mode = Some(current);
                self.needs_apply = true;
                debug!("System dark mode changed to: {}", current);
            }
        }

        if self.needs_apply {
            ctx.set_visuals(self.visuals());
            self.needs_apply = false;
            debug!("Applied theme: {:?}", self.current_theme);
            true
        } else {
            false
        }
    }

    /// Visuals for the effective theme.
    fn visuals(&self) -> Visuals {
        self.effective_colors().to_visuals()
    }

    fn effective_colors(&self) -> ThemeColors {
        match self.current_theme {
            Theme::Light => ThemeColors::light(),
            Theme::Dark => ThemeColors::dark(),
            Theme::System => {
                if self.last_system_dark_mode.unwrap_or(false) {
                    ThemeColors::dark()
                } else {
                    ThemeColors::light()
                }
            }
        }
    }

    /// Get the current theme colors, with System resolved to light or dark.
    pub fn colors(&self) -> ThemeColors {
        self.effective_colors()
    }

    /// Check if the current effective theme is dark.
    pub fn is_dark(&self) -> bool {
        self.effective_colors().is_dark()
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_needs_apply() {
        let manager = ThemeManager::new(Theme::Dark);
        assert!(manager.needs_apply);
        assert!(manager.is_dark());
    }

    #[test]
    fn test_set_same_theme_is_noop() {
        let mut manager = ThemeManager::new(Theme::Light);
        manager.needs_apply = false;
        manager.set_theme(Theme::Light);
        assert!(!manager.needs_apply);

        manager.set_theme(Theme::Dark);
        assert!(manager.needs_apply);
        assert_eq!(manager.current_theme, Theme::Dark);
    }

    #[test]
    fn test_apply_clears_flag() {
        let ctx = Context::default();
        let mut manager = ThemeManager::new(Theme::Dark);
        assert!(manager.apply_if_needed(&ctx, None));
        assert!(ctx.style().visuals.dark_mode);
        assert!(!manager.apply_if_needed(&ctx, None));
    }

    #[test]
    fn test_system_theme_follows_preference() {
        let ctx = Context::default();
        let mut manager = ThemeManager::new(Theme::System);
        assert!(manager.apply_if_needed(&ctx, Some(true)));
        assert!(manager.is_dark());
        assert!(!manager.apply_if_needed(&ctx, Some(true)));
        assert!(manager.apply_if_needed(&ctx, Some(false)));
        assert!(!manager.is_dark());
    }
}
