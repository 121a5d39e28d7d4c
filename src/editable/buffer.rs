//! Text buffer traits and the rope-backed buffer behind the editable surface.
//!
//! `TextBuffer` is the read-only view used for caret navigation and
//! reconciliation; `TextBufferMut` adds the mutations edits are built from.

use ropey::{Rope, RopeSlice};
use std::borrow::Cow;
use std::ops::Range;

/// Read-only view into a text buffer.
pub trait TextBuffer {
    /// Number of lines (always >= 1)
    fn line_count(&self) -> usize;

    /// Length of a specific line in characters (excluding its line break)
    fn line_length(&self, line: usize) -> usize;

    /// Total length in characters
    fn len_chars(&self) -> usize;

    /// Check if buffer is empty
    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Get character at position, None if out of bounds
    fn char_at(&self, line: usize, column: usize) -> Option<char>;

    /// Get line content (without trailing newline)
    fn line(&self, line: usize) -> Option<Cow<'_, str>>;

    /// Convert (line, column) to a character offset
    fn position_to_offset(&self, line: usize, column: usize) -> usize;

    /// Convert a character offset to (line, column)
    fn offset_to_position(&self, offset: usize) -> (usize, usize);

    /// Get slice of text as String (by character indices)
    fn slice(&self, range: Range<usize>) -> String;

    /// Get full content as String
    fn content(&self) -> String;

    /// Compare the content against `text` without materializing it
    fn content_eq(&self, text: &str) -> bool;
}

/// Mutable buffer operations.
pub trait TextBufferMut: TextBuffer {
    /// Insert text at character offset
    fn insert(&mut self, offset: usize, text: &str);

    /// Remove text in character range
    fn remove(&mut self, range: Range<usize>);

    /// Replace text in range with new text
    fn replace(&mut self, range: Range<usize>, text: &str) {
        self.remove(range.clone());
        self.insert(range.start, text);
    }

    /// Set content, replacing everything
    fn set_content(&mut self, text: &str) {
        let len = self.len_chars();
        if len > 0 {
            self.remove(0..len);
        }
        self.insert(0, text);
    }
}

/// TextBuffer implementation wrapping `ropey::Rope`.
#[derive(Debug, Clone, Default)]
pub struct RopeBuffer {
    rope: Rope,
}

impl RopeBuffer {
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a RopeBuffer from a string slice
    pub fn from_text(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }
}

impl TextBuffer for RopeBuffer {
    fn line_count(&self) -> usize {
        self.rope.len_lines().max(1)
    }

    fn line_length(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return 0;
        }
        let line_slice = self.rope.line(line);
        line_slice.len_chars() - line_break_len(line_slice)
    }

    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn char_at(&self, line: usize, column: usize) -> Option<char> {
        if line >= self.rope.len_lines() || column >= self.line_length(line) {
            return None;
        }
        let line_start = self.rope.line_to_char(line);
        Some(self.rope.char(line_start + column))
    }

    fn line(&self, line: usize) -> Option<Cow<'_, str>> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line).to_string();
        Some(Cow::Owned(s.trim_end_matches(is_line_break).to_string()))
    }

    fn position_to_offset(&self, line: usize, column: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        let line_start = self.rope.line_to_char(line);
        line_start + column.min(self.line_length(line))
    }

    fn offset_to_position(&self, offset: usize) -> (usize, usize) {
        let clamped = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(clamped);
        let line_start = self.rope.line_to_char(line);
        (line, clamped - line_start)
    }

    fn slice(&self, range: Range<usize>) -> String {
        let start = range.start.min(self.len_chars());
        let end = range.end.min(self.len_chars());
        if start >= end {
            return String::new();
        }
        self.rope.slice(start..end).to_string()
    }

    fn content(&self) -> String {
        self.rope.to_string()
    }

    fn content_eq(&self, text: &str) -> bool {
        self.rope == text
    }
}

/// Characters ropey ends a line on
fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Chars taken by the break ending `line`: 2 for CRLF, 0 on the last line
fn line_break_len(line: RopeSlice<'_>) -> usize {
    let len = line.len_chars();
    if len == 0 || !is_line_break(line.char(len - 1)) {
        return 0;
    }
    if len >= 2 && line.char(len - 2) == '\r' && line.char(len - 1) == '\n' {
        2
    } else {
        1
    }
}

impl TextBufferMut for RopeBuffer {
    fn insert(&mut self, offset: usize, text: &str) {
        let clamped = offset.min(self.len_chars());
        self.rope.insert(clamped, text);
    }

    fn remove(&mut self, range: Range<usize>) {
        let start = range.start.min(self.len_chars());
        let end = range.end.min(self.len_chars());
        if start < end {
            self.rope.remove(start..end);
        }
    }

    fn set_content(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }
}
