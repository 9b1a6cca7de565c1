//! Markdown rendering for Tailmark
//!
//! Parsing is delegated to comrak; the resulting AST is copied into an owned
//! tree that both the HTML renderer and the native preview walk.
//!
//! # Modules
//! - `parser`: comrak wrapper producing `MarkdownDocument`
//! - `styles`: per-tag class configuration and link behavior
//! - `html`: class-injecting HTML renderer
//! - `syntax`: syntect highlighting for the code view and code blocks

pub mod html;
mod parser;
mod styles;
pub mod syntax;

pub use html::{markdown_to_html, render_html};
pub use parser::{
    parse_markdown, HeadingLevel, ListType, MarkdownDocument, MarkdownNode, MarkdownNodeType,
    TableAlignment,
};
pub use styles::{LinkBehavior, StyleConfig, StyleTag};
