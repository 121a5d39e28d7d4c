//! Derived presentation of a surface: attributes, classes and style

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::sanitize::{escape_attr, escape_text};

/// Class added while the placeholder is showing
pub const PLACEHOLDER_CLASS: &str = "editable-div__placeholder";
/// Attribute carrying the placeholder text
pub const PLACEHOLDER_ATTR: &str = "data-placeholder";

/// Attributes the surface owns; pass-through values for these are ignored
const RESERVED_ATTRIBUTES: &[&str] = &[
    "aria-disabled",
    "class",
    "contenteditable",
    PLACEHOLDER_ATTR,
    "spellcheck",
    "style",
];

/// Inline style signalling (non-)interactivity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceStyle {
    pub background_color: &'static str,
    pub pointer_events: &'static str,
    pub user_select: &'static str,
}

impl SurfaceStyle {
    pub fn for_disabled(disabled: bool) -> Self {
        if disabled {
            Self {
                background_color: "#f0f0f0",
                pointer_events: "none",
                user_select: "none",
            }
        } else {
            Self {
                background_color: "white",
                pointer_events: "auto",
                user_select: "auto",
            }
        }
    }

    pub fn to_css(&self) -> String {
        format!(
            "background-color: {}; pointer-events: {}; user-select: {}",
            self.background_color, self.pointer_events, self.user_select
        )
    }
}

/// Snapshot of everything needed to draw the surface element
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceView {
    pub content: String,
    /// Content is markup and is emitted as-is; otherwise it is escaped text
    pub markup: bool,
    pub content_editable: bool,
    pub spellcheck: bool,
    pub aria_disabled: bool,
    /// Present iff content is empty and a placeholder is configured
    pub placeholder: Option<String>,
    pub classes: Vec<String>,
    pub style: SurfaceStyle,
    /// Pass-through attributes, minus the ones the surface owns
    pub attributes: BTreeMap<String, String>,
}

impl SurfaceView {
    pub(crate) fn build(
        content: String,
        markup: bool,
        disabled: bool,
        placeholder: Option<&str>,
        passthrough: &BTreeMap<String, String>,
    ) -> Self {
        let placeholder = if content.is_empty() {
            placeholder.map(str::to_string)
        } else {
            None
        };

        let mut classes: Vec<String> = passthrough
            .get("class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        if placeholder.is_some() {
            classes.push(PLACEHOLDER_CLASS.to_string());
        }

        let attributes = passthrough
            .iter()
            .filter(|(name, _)| !RESERVED_ATTRIBUTES.contains(&name.to_ascii_lowercase().as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        Self {
            content,
            markup,
            content_editable: !disabled,
            spellcheck: true,
            aria_disabled: disabled,
            placeholder,
            classes,
            style: SurfaceStyle::for_disabled(disabled),
            attributes,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn is_disabled(&self) -> bool {
        self.aria_disabled
    }

    /// Render the surface as an HTML element.
    ///
    /// Markup content is emitted as-is; text content is escaped.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<div");
        let _ = write!(html, r#" contenteditable="{}""#, self.content_editable);
        let _ = write!(html, r#" spellcheck="{}""#, self.spellcheck);
        let _ = write!(html, r#" aria-disabled="{}""#, self.aria_disabled);
        if !self.classes.is_empty() {
            let _ = write!(html, r#" class="{}""#, escape_attr(&self.classes.join(" ")));
        }
        if let Some(placeholder) = &self.placeholder {
            let _ = write!(html, r#" {}="{}""#, PLACEHOLDER_ATTR, escape_attr(placeholder));
        }
        for (name, value) in &self.attributes {
            let _ = write!(html, r#" {}="{}""#, name, escape_attr(value));
        }
        let _ = write!(html, r#" style="{}">"#, self.style.to_css());
        if self.markup {
            html.push_str(&self.content);
        } else {
            html.push_str(&escape_text(&self.content));
        }
        html.push_str("</div>");
        html
    }
}
