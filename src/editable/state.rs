//! EditableState - buffer, caret and selection for the editable surface.

use crate::util::{char_type, CharType};

use super::buffer::{TextBuffer, TextBufferMut};
use super::caret::{Caret, Position, Selection};
use super::messages::{EditMsg, MoveTarget};

/// Editable text with a single caret and selection.
///
/// Generic over the buffer type; the surface uses [`super::RopeBuffer`].
#[derive(Debug, Clone)]
pub struct EditableState<B: TextBuffer> {
    pub buffer: B,
    pub caret: Caret,
    pub selection: Selection,
}

impl<B: TextBuffer> EditableState<B> {
    pub fn new(buffer: B) -> Self {
        Self {
            buffer,
            caret: Caret::new(0, 0),
            selection: Selection::collapsed(Position::zero()),
        }
    }

    /// Get the text content as a String
    pub fn text(&self) -> String {
        self.buffer.content()
    }

    /// Get the selected text (empty string if no selection)
    pub fn selected_text(&self) -> String {
        if self.selection.is_empty() {
            return String::new();
        }
        let (start, end) = self.selection_offsets();
        self.buffer.slice(start..end)
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Caret as a character offset into the buffer
    pub fn caret_offset(&self) -> usize {
        self.buffer
            .position_to_offset(self.caret.line, self.caret.column)
    }

    /// Place the caret at a character offset, collapsing the selection
    pub fn set_caret_offset(&mut self, offset: usize) {
        let (line, column) = self.buffer.offset_to_position(offset);
        self.caret.move_to(Position::new(line, column));
        self.collapse_selection();
    }

    /// Selection as an ordered pair of character offsets
    pub fn selection_offsets(&self) -> (usize, usize) {
        let start = self.selection.start();
        let end = self.selection.end();
        (
            self.buffer.position_to_offset(start.line, start.column),
            self.buffer.position_to_offset(end.line, end.column),
        )
    }

    pub fn collapse_selection(&mut self) {
        self.selection = Selection::collapsed(self.caret.to_position());
    }

    fn finish_move(&mut self, extend_selection: bool) {
        if extend_selection {
            self.selection.head = self.caret.to_position();
        } else {
            self.collapse_selection();
        }
    }

    /// Collapse a live selection towards one of its ends instead of moving.
    /// Returns true if a selection was collapsed.
    fn collapse_towards(&mut self, to_start: bool, extend_selection: bool) -> bool {
        if extend_selection || self.selection.is_empty() {
            return false;
        }
        let pos = if to_start {
            self.selection.start()
        } else {
            self.selection.end()
        };
        self.caret.move_to(pos);
        self.collapse_selection();
        true
    }
}

// =============================================================================
// Movement Operations
// =============================================================================

impl<B: TextBuffer> EditableState<B> {
    pub fn move_caret(&mut self, target: MoveTarget, extend_selection: bool) {
        match target {
            MoveTarget::Left => self.move_left(extend_selection),
            MoveTarget::Right => self.move_right(extend_selection),
            MoveTarget::Up => self.move_vertical(-1, extend_selection),
            MoveTarget::Down => self.move_vertical(1, extend_selection),
            MoveTarget::LineStart => {
                self.caret.column = 0;
                self.caret.desired_column = None;
                self.finish_move(extend_selection);
            }
            MoveTarget::LineEnd => {
                self.caret.column = self.buffer.line_length(self.caret.line);
                self.caret.desired_column = None;
                self.finish_move(extend_selection);
            }
            MoveTarget::WordLeft => self.move_word_left(extend_selection),
            MoveTarget::WordRight => self.move_word_right(extend_selection),
            MoveTarget::DocumentStart => {
                self.caret.move_to(Position::zero());
                self.finish_move(extend_selection);
            }
            MoveTarget::DocumentEnd => {
                let last_line = self.buffer.line_count().saturating_sub(1);
                let last_col = self.buffer.line_length(last_line);
                self.caret.move_to(Position::new(last_line, last_col));
                self.finish_move(extend_selection);
            }
        }
    }

    pub fn move_left(&mut self, extend_selection: bool) {
        if self.collapse_towards(true, extend_selection) {
            return;
        }
        if self.caret.column > 0 {
            self.caret.column -= 1;
        } else if self.caret.line > 0 {
            self.caret.line -= 1;
            self.caret.column = self.buffer.line_length(self.caret.line);
        }
        self.caret.desired_column = None;
        self.finish_move(extend_selection);
    }

    pub fn move_right(&mut self, extend_selection: bool) {
        if self.collapse_towards(false, extend_selection) {
            return;
        }
        let line_len = self.buffer.line_length(self.caret.line);
        if self.caret.column < line_len {
            self.caret.column += 1;
        } else if self.caret.line + 1 < self.buffer.line_count() {
            self.caret.line += 1;
            self.caret.column = 0;
        }
        self.caret.desired_column = None;
        self.finish_move(extend_selection);
    }

    fn move_vertical(&mut self, delta: isize, extend_selection: bool) {
        let target = self.caret.line as isize + delta;
        if target < 0 || target as usize >= self.buffer.line_count() {
            return;
        }
        self.caret.set_desired_column();
        self.caret.line = target as usize;
        let line_len = self.buffer.line_length(self.caret.line);
        self.caret.column = self.caret.effective_column().min(line_len);
        self.finish_move(extend_selection);
    }

    pub fn move_word_left(&mut self, extend_selection: bool) {
        if self.collapse_towards(true, extend_selection) {
            return;
        }
        if self.caret.column == 0 {
            self.move_left(extend_selection);
            return;
        }
        let line = self.caret.line;
        let mut pos = self.caret.column.min(self.buffer.line_length(line));

        // Skip separators, then the word itself
        while pos > 0 && !self.is_word_char(line, pos - 1) {
            pos -= 1;
        }
        while pos > 0 && self.is_word_char(line, pos - 1) {
            pos -= 1;
        }

        self.caret.column = pos;
        self.caret.desired_column = None;
        self.finish_move(extend_selection);
    }

    pub fn move_word_right(&mut self, extend_selection: bool) {
        if self.collapse_towards(false, extend_selection) {
            return;
        }
        let line = self.caret.line;
        let line_len = self.buffer.line_length(line);
        if self.caret.column >= line_len {
            self.move_right(extend_selection);
            return;
        }
        let mut pos = self.caret.column;

        while pos < line_len && self.is_word_char(line, pos) {
            pos += 1;
        }
        while pos < line_len && !self.is_word_char(line, pos) {
            pos += 1;
        }

        self.caret.column = pos;
        self.caret.desired_column = None;
        self.finish_move(extend_selection);
    }

    fn is_word_char(&self, line: usize, column: usize) -> bool {
        self.buffer
            .char_at(line, column)
            .is_some_and(|ch| char_type(ch) == CharType::WordChar)
    }

    pub fn select_all(&mut self) {
        let last_line = self.buffer.line_count().saturating_sub(1);
        let end = Position::new(last_line, self.buffer.line_length(last_line));
        self.caret.move_to(end);
        self.selection = Selection::new(Position::zero(), end);
    }
}

// =============================================================================
// Editing Operations
// =============================================================================

impl<B: TextBuffer + TextBufferMut> EditableState<B> {
    /// Apply one edit message. Returns true if the buffer changed.
    pub fn apply(&mut self, msg: &EditMsg) -> bool {
        match msg {
            EditMsg::Move(target) => {
                self.move_caret(*target, false);
                false
            }
            EditMsg::MoveWithSelection(target) => {
                self.move_caret(*target, true);
                false
            }
            EditMsg::InsertChar(ch) => {
                let mut tmp = [0u8; 4];
                self.insert_text(ch.encode_utf8(&mut tmp))
            }
            EditMsg::InsertText(text) => self.insert_text(text),
            EditMsg::InsertNewline => self.insert_text("\n"),
            EditMsg::DeleteBackward => self.delete_backward(),
            EditMsg::DeleteForward => self.delete_forward(),
            EditMsg::DeleteWordBackward => self.delete_word_backward(),
            EditMsg::DeleteWordForward => self.delete_word_forward(),
            EditMsg::SelectAll => {
                self.select_all();
                false
            }
            EditMsg::CollapseSelection => {
                self.collapse_selection();
                false
            }
        }
    }

    /// Insert text at the caret, replacing the selection if any
    pub fn insert_text(&mut self, text: &str) -> bool {
        let removed = self.delete_selection();
        if text.is_empty() {
            return removed;
        }
        let offset = self.caret_offset();
        self.buffer.insert(offset, text);
        self.set_caret_offset(offset + text.chars().count());
        true
    }

    /// Delete character before caret (Backspace)
    pub fn delete_backward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let offset = self.caret_offset();
        if offset == 0 {
            return false;
        }
        let start = if offset >= 2 && self.buffer.slice(offset - 2..offset) == "\r\n" {
            offset - 2
        } else {
            offset - 1
        };
        self.buffer.remove(start..offset);
        self.set_caret_offset(start);
        true
    }

    /// Delete character after caret (Delete)
    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let offset = self.caret_offset();
        if offset >= self.buffer.len_chars() {
            return false;
        }
        let end = if self.buffer.slice(offset..offset + 2) == "\r\n" {
            offset + 2
        } else {
            offset + 1
        };
        self.buffer.remove(offset..end);
        self.set_caret_offset(offset);
        true
    }

    pub fn delete_word_backward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let end = self.caret_offset();
        self.move_word_left(false);
        let start = self.caret_offset();
        if start == end {
            return false;
        }
        self.buffer.remove(start..end);
        self.set_caret_offset(start);
        true
    }

    pub fn delete_word_forward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let start = self.caret_offset();
        self.move_word_right(false);
        let end = self.caret_offset();
        if start == end {
            return false;
        }
        self.buffer.remove(start..end);
        self.set_caret_offset(start);
        true
    }

    /// Remove the selected range. Returns false when nothing was selected.
    fn delete_selection(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let (start, end) = self.selection_offsets();
        self.buffer.remove(start..end);
        self.set_caret_offset(start);
        true
    }

    /// Replace the whole content. The caret lands at the end, as it does when
    /// a surface's markup is overwritten.
    pub fn set_content(&mut self, text: &str) {
        self.buffer.set_content(text);
        let end = self.buffer.len_chars();
        self.set_caret_offset(end);
    }

    /// Replace the whole content, keeping the caret at `caret_offset` (clamped)
    pub fn set_content_with_caret(&mut self, text: &str, caret_offset: usize) {
        self.buffer.set_content(text);
        let clamped = caret_offset.min(self.buffer.len_chars());
        self.set_caret_offset(clamped);
    }
}
