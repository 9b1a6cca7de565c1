//! Clipboard Operations for HTML Export
//!
//! This module provides cross-platform clipboard functionality for copying
//! the generated HTML to the system clipboard using the arboard crate.

use super::html::generate_html_fragment;
use crate::error::{Error, Result};
use crate::markdown::{LinkBehavior, StyleConfig};
use arboard::Clipboard;
use log::debug;

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Operations
// ─────────────────────────────────────────────────────────────────────────────

/// Render `markdown` and copy the HTML source to the clipboard.
///
/// The markup is copied as plain text so it can be pasted into a template.
pub fn copy_html_to_clipboard(
    markdown: &str,
    styles: &StyleConfig,
    behavior: LinkBehavior,
) -> Result<()> {
    let html = generate_html_fragment(markdown, styles, behavior);
    copy_text_to_clipboard(&html)
}

/// Copy plain text to clipboard.
pub fn copy_text_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;
    clipboard.set_text(text)?;
    debug!("Copied {} bytes to clipboard", text.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arboard_error_conversion() {
        let err: Error = arboard::Error::ContentNotAvailable.into();
        assert!(matches!(err, Error::Clipboard(_)));
        assert!(err.to_string().starts_with("Clipboard error:"));
    }

    // Note: Actual clipboard tests require a display/clipboard context
    // which isn't typically available in CI environments.
}
