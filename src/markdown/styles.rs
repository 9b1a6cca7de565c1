//! Per-tag class configuration
//!
//! `StyleConfig` holds the class string injected into each styleable element.
//! It is a plain struct with one field per tag, so every tag always has a
//! value; the only way to change an entry is to overwrite it.

use super::parser::{HeadingLevel, MarkdownNodeType};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Style Tags
// ─────────────────────────────────────────────────────────────────────────────

/// Rendered elements whose class attribute can be configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    H1,
    H2,
    H3,
    Paragraph,
    Link,
    Image,
    Table,
}

impl StyleTag {
    /// All styleable tags, in the order the config panel lists them.
    pub fn all() -> &'static [StyleTag] {
        &[
            StyleTag::H1,
            StyleTag::H2,
            StyleTag::H3,
            StyleTag::Paragraph,
            StyleTag::Image,
            StyleTag::Link,
            StyleTag::Table,
        ]
    }

    /// The HTML element name.
    pub fn tag_name(&self) -> &'static str {
        match self {
            StyleTag::H1 => "h1",
            StyleTag::H2 => "h2",
            StyleTag::H3 => "h3",
            StyleTag::Paragraph => "p",
            StyleTag::Link => "a",
            StyleTag::Image => "img",
            StyleTag::Table => "table",
        }
    }

    /// Label shown next to the input field in the config panel.
    pub fn label(&self) -> &'static str {
        match self {
            StyleTag::H1 => "H1",
            StyleTag::H2 => "H2",
            StyleTag::H3 => "H3",
            StyleTag::Paragraph => "Paragraph",
            StyleTag::Link => "Link",
            StyleTag::Image => "Image",
            StyleTag::Table => "Table",
        }
    }

    /// Map a parsed node to the tag whose class it receives, if any.
    ///
    /// Both the HTML renderer and the native preview go through this, so a
    /// class applies to exactly the same elements in both views.
    pub fn for_node(node: &MarkdownNodeType) -> Option<StyleTag> {
        match node {
            MarkdownNodeType::Heading { level, .. } => match level {
                HeadingLevel::H1 => Some(StyleTag::H1),
                HeadingLevel::H2 => Some(StyleTag::H2),
                HeadingLevel::H3 => Some(StyleTag::H3),
                _ => None,
            },
            MarkdownNodeType::Paragraph => Some(StyleTag::Paragraph),
            MarkdownNodeType::Link { .. } => Some(StyleTag::Link),
            MarkdownNodeType::Image { .. } => Some(StyleTag::Image),
            MarkdownNodeType::Table { .. } => Some(StyleTag::Table),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Style Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Class strings for each styleable element.
///
/// Serialized as a JSON object keyed by element name (`{"p": "mb-4", ...}`).
/// Missing keys fall back to their defaults and unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    h1: String,
    h2: String,
    h3: String,
    p: String,
    a: String,
    img: String,
    table: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            h1: String::new(),
            h2: String::new(),
            h3: String::new(),
            p: String::from("mb-4"),
            a: String::from("text-blue-500"),
            img: String::from("w-full"),
            table: String::from("table-auto"),
        }
    }
}

impl StyleConfig {
    /// Class string for a tag. May be empty.
    pub fn get(&self, tag: StyleTag) -> &str {
        match tag {
            StyleTag::H1 => &self.h1,
            StyleTag::H2 => &self.h2,
            StyleTag::H3 => &self.h3,
            StyleTag::Paragraph => &self.p,
            StyleTag::Link => &self.a,
            StyleTag::Image => &self.img,
            StyleTag::Table => &self.table,
        }
    }

    /// Mutable access for widgets that edit the class in place.
    pub fn get_mut(&mut self, tag: StyleTag) -> &mut String {
        match tag {
            StyleTag::H1 => &mut self.h1,
            StyleTag::H2 => &mut self.h2,
            StyleTag::H3 => &mut self.h3,
            StyleTag::Paragraph => &mut self.p,
            StyleTag::Link => &mut self.a,
            StyleTag::Image => &mut self.img,
            StyleTag::Table => &mut self.table,
        }
    }

    /// Overwrite the class for a single tag.
    pub fn set(&mut self, tag: StyleTag, class: impl Into<String>) {
        *self.get_mut(tag) = class.into();
    }

    /// Class for a tag, or `None` when it is empty (no attribute emitted).
    pub fn class_attr(&self, tag: StyleTag) -> Option<&str> {
        let class = self.get(tag);
        if class.is_empty() {
            None
        } else {
            Some(class)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Link Behavior
// ─────────────────────────────────────────────────────────────────────────────

/// Behavior applied to rendered links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkBehavior {
    /// Add `target="_blank"` (with a safe `rel`) to every link.
    pub open_in_new_tab: bool,
}
