//! UI components for Tailmark
//!
//! Toolbar, HTML code view and config panel. The editor and preview widgets
//! live in their own modules.

mod code_view;
mod config_panel;
mod toolbar;

pub use code_view::CodeView;
pub use config_panel::ConfigPanel;
pub use toolbar::{Toolbar, ToolbarAction};
