//! Editor module for Tailmark
//!
//! This module contains the text editor widget and the pure text operations
//! behind it: selection splicing, toolbar snippets and status bar counts.

mod selection;
mod snippets;
mod stats;
mod widget;

pub use selection::{splice_at, Selection};
pub use snippets::Snippet;
pub use stats::TextStats;
pub use widget::EditorWidget;
