//! SynchronizedSurface - live content reconciled against an authoritative value

use crate::editable::{EditMsg, EditableState, RopeBuffer, TextBuffer};
use crate::sanitize::{escape_text, sanitize, strip_tags};

use super::events::{ClipboardData, ContentChange, Focus, KeyDown, Reconcile, SurfaceCommand};
use super::keys::Keystroke;
use super::props::{SurfaceMode, SurfaceProps};
use super::view::SurfaceView;

/// How plain text mode reads the live content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContentKind {
    /// Literal text; escaped when rendered
    Text,
    /// Markup written by a forced replace; rendered as-is until the user
    /// edits it, at which point it is flattened to its visible text
    Markup,
}

/// An editable surface kept in sync with a value owned elsewhere.
///
/// The live content is only ever overwritten from the authoritative value
/// when the two differ, so echoing a value back after a local edit leaves
/// the caret and selection where the user put them. Every write into the
/// live content bumps [`SynchronizedSurface::revision`].
#[derive(Debug, Clone)]
pub struct SynchronizedSurface {
    state: EditableState<RopeBuffer>,
    props: SurfaceProps,
    kind: ContentKind,
    focused: bool,
    mounted: bool,
    revision: u64,
}

impl SynchronizedSurface {
    /// Attach a surface and reconcile it with `props`
    pub fn mount(props: SurfaceProps) -> Self {
        let mut surface = Self {
            state: EditableState::new(RopeBuffer::new()),
            props,
            kind: ContentKind::Text,
            focused: false,
            mounted: true,
            revision: 0,
        };
        surface.reconcile();
        surface
    }

    pub fn props(&self) -> &SurfaceProps {
        &self.props
    }

    /// Current live content
    pub fn content(&self) -> String {
        self.state.text()
    }

    pub fn state(&self) -> &EditableState<RopeBuffer> {
        &self.state
    }

    /// Caret as a character offset into the live content
    pub fn caret_offset(&self) -> usize {
        self.state.caret_offset()
    }

    /// Number of writes made into the live content so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_disabled(&self) -> bool {
        self.props.disabled
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// True if the live content is rendered as markup: always in rich mode,
    /// and in plain text mode after a forced replace until the next edit.
    pub fn holds_markup(&self) -> bool {
        self.props.mode == SurfaceMode::Rich || self.kind == ContentKind::Markup
    }

    /// True while the placeholder marker is shown
    pub fn shows_placeholder(&self) -> bool {
        self.state.buffer.is_empty() && self.props.placeholder_text().is_some()
    }

    /// Replace all props. Reconciles when the value, default value or
    /// placeholder changed.
    pub fn set_props(&mut self, props: SurfaceProps) -> Reconcile {
        let needs_reconcile = props.reconcile_inputs_differ(&self.props);
        if self.props.mode == SurfaceMode::Rich && props.mode == SurfaceMode::PlainText {
            self.kind = ContentKind::Markup;
        }
        self.props = props;
        if self.props.disabled && self.focused {
            tracing::debug!("surface disabled while focused, yielding focus");
            self.focused = false;
        }
        if needs_reconcile {
            self.reconcile()
        } else {
            Reconcile::Unchanged
        }
    }

    /// Push a new authoritative value down and reconcile
    pub fn set_value(&mut self, value: impl Into<String>) -> Reconcile {
        self.props.value = Some(value.into());
        self.reconcile()
    }

    pub fn set_placeholder(&mut self, placeholder: Option<String>) -> Reconcile {
        let props = SurfaceProps {
            placeholder,
            ..self.props.clone()
        };
        self.set_props(props)
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        let props = SurfaceProps {
            disabled,
            ..self.props.clone()
        };
        self.set_props(props);
    }

    /// Bring the live content in line with the resolved authoritative value,
    /// writing only if they differ.
    pub fn reconcile(&mut self) -> Reconcile {
        if !self.mounted {
            return Reconcile::Unchanged;
        }
        let target = self.props.resolved_value();
        if self.state.buffer.content_eq(target) {
            tracing::trace!("reconcile: content already matches, skipping write");
            return Reconcile::Unchanged;
        }
        let target = target.to_string();
        tracing::debug!(
            len = target.len(),
            revision = self.revision + 1,
            "reconcile: rewriting live content"
        );
        self.write(&target);
        Reconcile::Rewritten
    }

    /// Apply one user edit. Editing messages run the input pass and return
    /// the change notification; movement never notifies.
    ///
    /// Typed text is literal: rich mode escapes it on insertion, the same
    /// way paste does.
    pub fn handle_input(&mut self, edit: &EditMsg) -> Option<ContentChange> {
        if !self.accepts_input() {
            return None;
        }
        let flattened = edit.is_editing() && self.flatten_markup();
        let changed = match (self.props.mode, edit) {
            (SurfaceMode::Rich, EditMsg::InsertChar(ch)) => {
                let mut tmp = [0u8; 4];
                self.state.insert_text(&escape_text(ch.encode_utf8(&mut tmp)))
            }
            (SurfaceMode::Rich, EditMsg::InsertText(text)) => {
                self.state.insert_text(&escape_text(text))
            }
            _ => self.state.apply(edit),
        };
        if changed || flattened {
            Some(self.input_pass())
        } else {
            None
        }
    }

    /// Key press. A disabled surface prevents every key.
    pub fn handle_key_down(&mut self, keystroke: Keystroke) -> KeyDown {
        if !self.accepts_input() {
            tracing::trace!(%keystroke, "key prevented on inactive surface");
            return KeyDown::Prevented;
        }
        match keystroke.to_edit() {
            Some(edit) => KeyDown::Handled(self.handle_input(&edit)),
            None => KeyDown::Ignored,
        }
    }

    /// Focus attempt. A disabled surface yields focus straight back; an
    /// enabled one runs a content sync pass.
    pub fn handle_focus(&mut self) -> Focus {
        if !self.accepts_input() {
            self.focused = false;
            return Focus::Rejected;
        }
        self.focused = true;
        Focus::Accepted(self.input_pass())
    }

    /// Returns true if the surface had focus
    pub fn handle_blur(&mut self) -> bool {
        std::mem::replace(&mut self.focused, false)
    }

    /// Paste: only the plain text flavor is used, optionally sanitized, and
    /// inserted at the caret in place of the selection.
    pub fn handle_paste(&mut self, clipboard: &ClipboardData) -> Option<ContentChange> {
        if !self.accepts_input() {
            return None;
        }
        if clipboard.html.is_some() {
            tracing::debug!("paste: discarding rich clipboard flavor");
        }
        self.flatten_markup();
        let mut text = clipboard.plain_text().to_string();
        if self.props.sanitize_paste() {
            text = strip_tags(&text);
        }
        if self.props.mode == SurfaceMode::Rich {
            text = escape_text(&text);
        }
        self.state.insert_text(&text);
        Some(self.input_pass())
    }

    /// Execute a command from the owner
    pub fn apply(&mut self, command: SurfaceCommand) {
        match command {
            SurfaceCommand::ReplaceContent(markup) => self.replace_content(&markup),
        }
    }

    /// Overwrite the live content unconditionally
    pub fn replace_content(&mut self, markup: &str) {
        if !self.mounted {
            tracing::debug!("replace ignored on unmounted surface");
            return;
        }
        tracing::debug!(len = markup.len(), "replacing surface content");
        self.write(markup);
        self.kind = ContentKind::Markup;
    }

    pub fn view(&self) -> SurfaceView {
        SurfaceView::build(
            self.content(),
            self.holds_markup(),
            self.props.disabled,
            self.props.placeholder_text(),
            &self.props.attributes,
        )
    }

    pub fn render_html(&self) -> String {
        self.view().to_html()
    }

    /// Detach; later events and commands are ignored
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.focused = false;
    }

    fn accepts_input(&self) -> bool {
        self.mounted && !self.props.disabled
    }

    fn write(&mut self, content: &str) {
        self.state.set_content(content);
        self.kind = ContentKind::Text;
        self.revision += 1;
    }

    /// Turn replaced markup into the text it shows before a local edit
    /// lands in it. Returns true if the live content was rewritten.
    fn flatten_markup(&mut self) -> bool {
        if self.props.mode != SurfaceMode::PlainText || self.kind != ContentKind::Markup {
            return false;
        }
        self.kind = ContentKind::Text;
        let live = self.state.text();
        let text = sanitize(&live);
        if text == live {
            return false;
        }
        let prefix = self.state.buffer.slice(0..self.state.caret_offset());
        let caret = sanitize(&prefix).chars().count();
        tracing::debug!(caret, "flattening replaced markup before local edit");
        self.state.set_content_with_caret(&text, caret);
        self.revision += 1;
        true
    }

    /// Read the live content, strip tags from it in plain text mode, write it
    /// back if that changed anything, and produce the change notification.
    /// Replaced markup that has not been edited is forwarded untouched.
    fn input_pass(&mut self) -> ContentChange {
        let live = self.state.text();
        if self.holds_markup() {
            return ContentChange { value: live };
        }
        let clean = strip_tags(&live);
        if clean != live {
            let prefix = self.state.buffer.slice(0..self.state.caret_offset());
            let caret = strip_tags(&prefix).chars().count();
            tracing::debug!(caret, "input pass: stripped markup from live content");
            self.state.set_content_with_caret(&clean, caret);
            self.revision += 1;
        }
        ContentChange { value: clean }
    }
}
