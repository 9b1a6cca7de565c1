//! Document Export Module for Tailmark
//!
//! # Supported Export Formats
//!
//! - **HTML File**: Complete HTML document that loads Tailwind from its CDN
//! - **Clipboard HTML**: Copy the rendered HTML source to the clipboard
//!
//! # Architecture
//!
//! - `html.rs` - HTML document generation
//! - `clipboard.rs` - Platform clipboard operations

pub mod clipboard;
pub mod html;

pub use clipboard::{copy_html_to_clipboard, copy_text_to_clipboard};
pub use html::export_to_html_file;

use rfd::FileDialog;
use std::path::{Path, PathBuf};

/// Opens a native save dialog for an HTML export.
///
/// Returns `Some(PathBuf)` if a location was selected, `None` if cancelled.
pub fn save_html_dialog(initial_dir: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Export as HTML")
        .add_filter("HTML Files", &["html", "htm"])
        .set_file_name(html::DEFAULT_EXPORT_NAME);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.save_file()
}
