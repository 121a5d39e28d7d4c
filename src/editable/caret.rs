//! Caret and selection types for the editable surface.
//!
//! The surface has exactly one caret. A selection is an anchor/head pair;
//! when collapsed, the head equals the caret.

/// A position in the text buffer (line and column, both 0-indexed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub const fn zero() -> Self {
        Self { line: 0, column: 0 }
    }
}

/// The insertion point, with an optional desired column for vertical movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Caret {
    pub line: usize,
    pub column: usize,
    /// Column to return to when moving vertically through shorter lines
    pub desired_column: Option<usize>,
}

impl Caret {
    pub const fn new(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            desired_column: None,
        }
    }

    pub const fn to_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn move_to(&mut self, pos: Position) {
        self.line = pos.line;
        self.column = pos.column;
        self.desired_column = None;
    }

    pub fn set_desired_column(&mut self) {
        if self.desired_column.is_none() {
            self.desired_column = Some(self.column);
        }
    }

    pub fn effective_column(&self) -> usize {
        self.desired_column.unwrap_or(self.column)
    }
}

impl From<Position> for Caret {
    fn from(pos: Position) -> Self {
        Self::new(pos.line, pos.column)
    }
}

/// A text selection with a fixed anchor and a moving head.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub head: Position,
}

impl Selection {
    pub fn new(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    pub fn collapsed(pos: Position) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    pub fn start(&self) -> Position {
        self.anchor.min(self.head)
    }

    pub fn end(&self) -> Position {
        self.anchor.max(self.head)
    }
}
