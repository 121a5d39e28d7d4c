//! Outcomes and commands exchanged with the surface

/// Change notification forwarded to the owner after a local edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentChange {
    pub value: String,
}

/// Whether a reconciliation pass wrote into the live content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconcile {
    /// Content already matched; nothing written, caret untouched
    Unchanged,
    /// Content was overwritten with the authoritative value
    Rewritten,
}

/// Result of a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyDown {
    /// Default action blocked (disabled or unmounted surface)
    Prevented,
    /// Key handled; carries a change notification when content changed
    Handled(Option<ContentChange>),
    /// Key has no editing meaning and is left to the host
    Ignored,
}

/// Result of a focus attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    /// Surface is disabled and yielded focus straight back
    Rejected,
    /// Focus accepted; the content sync pass produced this notification
    Accepted(ContentChange),
}

/// Clipboard flavors offered by a paste event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardData {
    /// `text/plain`
    pub text: Option<String>,
    /// `text/html`, never inserted
    pub html: Option<String>,
}

impl ClipboardData {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            html: None,
        }
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// The plain text flavor, empty if absent
    pub fn plain_text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// Commands the owner can push into the surface outside the value flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCommand {
    /// Overwrite rendered content with `markup`, bypassing reconciliation
    ReplaceContent(String),
}
