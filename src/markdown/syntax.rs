//! Syntax Highlighting Module
//!
//! This module integrates syntect for the HTML source view and for fenced
//! code blocks in the preview.
//!
//! # Features
//! - Loads and caches syntect SyntaxSet and ThemeSet
//! - Theme-aware highlighting (dark/light) with an optional named override
//! - Converts syntect styles to egui text layout

use eframe::egui::{text::LayoutJob, Color32, FontId, Stroke, TextFormat};
use log::{debug, warn};
use std::sync::OnceLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Default dark theme name from syntect's built-in themes
pub const DEFAULT_DARK_THEME: &str = "base16-ocean.dark";

/// Default light theme name from syntect's built-in themes
pub const DEFAULT_LIGHT_THEME: &str = "InspiredGitHub";

// ─────────────────────────────────────────────────────────────────────────────
// Highlighted Segment
// ─────────────────────────────────────────────────────────────────────────────

/// A segment of highlighted text with its associated color.
#[derive(Debug, Clone)]
pub struct HighlightedSegment {
    /// The text content of this segment
    pub text: String,
    /// Foreground color for this segment
    pub foreground: Color32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl HighlightedSegment {
    /// Create a new highlighted segment.
    pub fn new(text: String, foreground: Color32) -> Self {
        Self {
            text,
            foreground,
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

/// A line of highlighted segments.
#[derive(Debug, Clone)]
pub struct HighlightedLine {
    /// The segments that make up this line
    pub segments: Vec<HighlightedSegment>,
}

impl HighlightedLine {
    /// Create a new highlighted line from segments.
    pub fn new(segments: Vec<HighlightedSegment>) -> Self {
        Self { segments }
    }

    /// Create an unhighlighted line with a single segment.
    pub fn plain(text: &str, color: Color32) -> Self {
        Self {
            segments: vec![HighlightedSegment::new(text.to_string(), color)],
        }
    }

    /// The line's text without its trailing newline.
    #[cfg(test)]
    pub fn text(&self) -> String {
        let joined: String = self.segments.iter().map(|s| s.text.as_str()).collect();
        joined.trim_end_matches(['\n', '\r']).to_string()
    }

    /// Lay the line out as a single egui text job in a monospace font.
    pub fn to_layout_job(&self, font_size: f32) -> LayoutJob {
        let mut job = LayoutJob::default();
        for segment in &self.segments {
            let text = segment.text.trim_end_matches(['\n', '\r']);
            if text.is_empty() {
                continue;
            }
            let color = if segment.bold {
                emphasize(segment.foreground)
            } else {
                segment.foreground
            };
            let mut format = TextFormat {
                font_id: FontId::monospace(font_size),
                color,
                italics: segment.italic,
                ..Default::default()
            };
            if segment.underline {
                format.underline = Stroke::new(1.0, segment.foreground);
            }
            job.append(text, 0.0, format);
        }
        job
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Syntax Highlighter
// ─────────────────────────────────────────────────────────────────────────────

/// Syntax highlighter that caches syntect sets for performance.
pub struct SyntaxHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    /// Load the syntaxes and themes bundled with syntect.
    ///
    /// This is relatively expensive; use [`get_highlighter`] to share one instance.
    pub fn new() -> Self {
        debug!("Loading syntect syntax and theme sets");
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let theme_set = ThemeSet::load_defaults();
        debug!(
            "Loaded {} syntaxes and {} themes",
            syntax_set.syntaxes().len(),
            theme_set.themes.len()
        );
        Self {
            syntax_set,
            theme_set,
        }
    }

    /// Get available theme names, sorted.
    pub fn available_themes(&self) -> Vec<&str> {
        self.theme_set.themes.keys().map(|s| s.as_str()).collect()
    }

    /// Resolve a theme: the named one if it exists, else the default for the mode.
    pub fn resolve_theme(&self, theme_name: &str, dark_mode: bool) -> Option<&Theme> {
        let fallback = if dark_mode {
            DEFAULT_DARK_THEME
        } else {
            DEFAULT_LIGHT_THEME
        };
        self.theme_set
            .themes
            .get(theme_name)
            .or_else(|| self.theme_set.themes.get(fallback))
    }

    /// Highlight code with the specified language and theme.
    ///
    /// Unknown languages come back as plain lines in the theme's foreground color.
    pub fn highlight_code(&self, code: &str, language: &str, theme: &Theme) -> Vec<HighlightedLine> {
        let default_color = theme
            .settings
            .foreground
            .map(syntect_to_egui_color)
            .unwrap_or(Color32::GRAY);

        let Some(syntax) = self.find_syntax_for_language(language) else {
            debug!("No syntax found for language: {}", language);
            return plain_lines(code, default_color);
        };

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut lines = Vec::new();

        for line in LinesWithEndings::from(code) {
            match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => {
                    let segments = ranges
                        .into_iter()
                        .map(|(style, text)| style_to_segment(style, text))
                        .collect();
                    lines.push(HighlightedLine::new(segments));
                }
                Err(e) => {
                    warn!("Failed to highlight line: {}", e);
                    lines.push(HighlightedLine::plain(line, default_color));
                }
            }
        }

        lines
    }

    /// Find syntax definition for a language identifier.
    ///
    /// Tries a small alias table, then the extension, then the syntax name.
    fn find_syntax_for_language(&self, language: &str) -> Option<&SyntaxReference> {
        if language.is_empty() {
            return None;
        }

        let lang_lower = language.to_lowercase();

        let extension = match lang_lower.as_str() {
            "rust" | "rs" => "rs",
            "python" | "py" => "py",
            "javascript" | "js" | "jsx" => "js",
            "typescript" | "ts" | "tsx" => "ts",
            "c" => "c",
            "cpp" | "c++" | "cxx" => "cpp",
            "go" | "golang" => "go",
            "ruby" | "rb" => "rb",
            "html" | "htm" | "xhtml" => "html",
            "css" => "css",
            "json" => "json",
            "yaml" | "yml" => "yaml",
            "xml" | "svg" => "xml",
            "markdown" | "md" => "md",
            "sql" => "sql",
            "shell" | "sh" | "bash" | "zsh" => "sh",
            other => other,
        };

        if let Some(syntax) = self.syntax_set.find_syntax_by_extension(extension) {
            return Some(syntax);
        }

        if let Some(syntax) = self.syntax_set.find_syntax_by_name(language) {
            return Some(syntax);
        }

        self.syntax_set
            .syntaxes()
            .iter()
            .find(|syntax| syntax.name.to_lowercase() == lang_lower)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helper Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Convert syntect Color to egui Color32.
pub fn syntect_to_egui_color(color: syntect::highlighting::Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

/// Stand-in for bold: egui has no bold monospace face, so the color is
/// pushed a third of the way toward black or white, whichever it is nearer.
fn emphasize(color: Color32) -> Color32 {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let luma = (u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000;
    let push = |c: u8| {
        if luma >= 128 {
            c + (255 - c) / 3
        } else {
            c - c / 3
        }
    };
    Color32::from_rgba_unmultiplied(push(r), push(g), push(b), a)
}

fn style_to_segment(style: Style, text: &str) -> HighlightedSegment {
    HighlightedSegment {
        text: text.to_string(),
        foreground: syntect_to_egui_color(style.foreground),
        bold: style.font_style.contains(FontStyle::BOLD),
        italic: style.font_style.contains(FontStyle::ITALIC),
        underline: style.font_style.contains(FontStyle::UNDERLINE),
    }
}

fn plain_lines(code: &str, color: Color32) -> Vec<HighlightedLine> {
    code.lines()
        .map(|line| HighlightedLine::plain(line, color))
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Global Highlighter Instance
// ─────────────────────────────────────────────────────────────────────────────

static HIGHLIGHTER: OnceLock<SyntaxHighlighter> = OnceLock::new();

/// Get or create the global syntax highlighter.
pub fn get_highlighter() -> &'static SyntaxHighlighter {
    HIGHLIGHTER.get_or_init(SyntaxHighlighter::new)
}

/// Highlight code with the global highlighter.
///
/// `theme_name` may be empty or unknown, in which case the default theme for
/// `dark_mode` is used.
pub fn highlight_code(
    code: &str,
    language: &str,
    theme_name: &str,
    dark_mode: bool,
) -> Vec<HighlightedLine> {
    let highlighter = get_highlighter();
    match highlighter.resolve_theme(theme_name, dark_mode) {
        Some(theme) => highlighter.highlight_code(code, language, theme),
        None => {
            warn!("No syntect theme available, highlighting disabled");
            plain_lines(code, Color32::GRAY)
        }
    }
}
