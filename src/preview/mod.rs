//! Preview module for Tailmark
//!
//! Native egui rendering of the parsed document, used by the Preview mode.

mod renderer;

pub use renderer::MarkdownPreview;
