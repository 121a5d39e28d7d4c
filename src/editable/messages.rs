//! Edit messages delivered to the editable surface.

/// Target for caret movement operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    WordLeft,
    WordRight,
    DocumentStart,
    DocumentEnd,
}

/// A single user-driven edit or caret movement.
#[derive(Debug, Clone, PartialEq)]
pub enum EditMsg {
    // === Movement ===
    /// Move caret without affecting selection
    Move(MoveTarget),
    /// Move caret and extend selection
    MoveWithSelection(MoveTarget),

    // === Insertion ===
    InsertChar(char),
    InsertText(String),
    InsertNewline,

    // === Deletion ===
    /// Backspace
    DeleteBackward,
    /// Delete
    DeleteForward,
    DeleteWordBackward,
    DeleteWordForward,

    // === Selection ===
    SelectAll,
    CollapseSelection,
}

impl EditMsg {
    /// Check if this message modifies the buffer
    pub fn is_editing(&self) -> bool {
        matches!(
            self,
            EditMsg::InsertChar(_)
                | EditMsg::InsertText(_)
                | EditMsg::InsertNewline
                | EditMsg::DeleteBackward
                | EditMsg::DeleteForward
                | EditMsg::DeleteWordBackward
                | EditMsg::DeleteWordForward
        )
    }
}
