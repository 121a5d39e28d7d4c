//! Surface properties supplied by the owner of the widget

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How the surface treats markup in its live content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SurfaceMode {
    /// Local edits are stripped down to plain text before being forwarded
    #[default]
    PlainText,
    /// Inner markup is preserved
    Rich,
}

impl SurfaceMode {
    /// Whether pasted clipboard text is sanitized when props do not say
    pub fn sanitizes_paste_by_default(self) -> bool {
        matches!(self, SurfaceMode::PlainText)
    }
}

/// Properties of a mounted surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceProps {
    /// The authoritative value owned by the form layer
    pub value: Option<String>,
    /// Used when no value is supplied
    pub default_value: Option<String>,
    pub placeholder: Option<String>,
    pub disabled: bool,
    pub mode: SurfaceMode,
    /// Overrides the mode's paste sanitization default
    pub sanitize_paste: Option<bool>,
    /// Pass-through attributes rendered onto the surface element
    pub attributes: BTreeMap<String, String>,
}

impl SurfaceProps {
    pub fn new(mode: SurfaceMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_sanitize_paste(mut self, sanitize: bool) -> Self {
        self.sanitize_paste = Some(sanitize);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// The content the surface must display: value, else default value, else empty
    pub fn resolved_value(&self) -> &str {
        self.value
            .as_deref()
            .or(self.default_value.as_deref())
            .unwrap_or("")
    }

    /// The configured placeholder, ignoring empty strings
    pub fn placeholder_text(&self) -> Option<&str> {
        self.placeholder.as_deref().filter(|p| !p.is_empty())
    }

    pub fn sanitize_paste(&self) -> bool {
        self.sanitize_paste
            .unwrap_or_else(|| self.mode.sanitizes_paste_by_default())
    }

    /// True if a change from `other` to `self` requires reconciliation
    pub(crate) fn reconcile_inputs_differ(&self, other: &SurfaceProps) -> bool {
        self.value != other.value
            || self.default_value != other.default_value
            || self.placeholder != other.placeholder
    }
}
