//! Keystrokes delivered to the surface and their mapping to edits

use std::fmt;

use crate::editable::{EditMsg, MoveTarget};

/// Modifier keys as a bitfield
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    pub const META: Modifiers = Modifiers(0b1000); // Cmd on macOS, Win on Windows

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b0001 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b0010 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b0100 != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & 0b1000 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Ctrl/Cmd chords are shortcuts, never text input
    pub const fn is_shortcut(self) -> bool {
        self.ctrl() || self.meta()
    }

    /// Word-wise variant of a movement or deletion (Alt on macOS, Ctrl elsewhere)
    pub fn is_word_modifier(self) -> bool {
        if cfg!(target_os = "macos") {
            self.alt()
        } else {
            self.ctrl()
        }
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl() {
            parts.push("Ctrl");
        }
        if self.shift() {
            parts.push("Shift");
        }
        if self.alt() {
            parts.push("Alt");
        }
        if self.meta() {
            parts.push("Meta");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A logical key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Tab,
    Escape,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

/// A key press with its modifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Keystroke {
    pub key: KeyCode,
    pub mods: Modifiers,
}

impl Keystroke {
    pub const fn new(key: KeyCode, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    pub const fn plain(key: KeyCode) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// The edit this keystroke performs on an editable surface, if any
    pub fn to_edit(self) -> Option<EditMsg> {
        let word = self.mods.is_word_modifier();
        let extend = self.mods.shift();
        let movement = |target: MoveTarget| {
            if extend {
                EditMsg::MoveWithSelection(target)
            } else {
                EditMsg::Move(target)
            }
        };

        let edit = match self.key {
            KeyCode::Char('a') | KeyCode::Char('A') if self.mods.is_shortcut() => {
                EditMsg::SelectAll
            }
            KeyCode::Char(_) if self.mods.is_shortcut() => return None,
            KeyCode::Char(ch) => EditMsg::InsertChar(ch),
            KeyCode::Enter => EditMsg::InsertNewline,
            KeyCode::Tab => EditMsg::InsertChar('\t'),
            KeyCode::Escape => EditMsg::CollapseSelection,
            KeyCode::Backspace if word => EditMsg::DeleteWordBackward,
            KeyCode::Backspace => EditMsg::DeleteBackward,
            KeyCode::Delete if word => EditMsg::DeleteWordForward,
            KeyCode::Delete => EditMsg::DeleteForward,
            KeyCode::Left if word => movement(MoveTarget::WordLeft),
            KeyCode::Left => movement(MoveTarget::Left),
            KeyCode::Right if word => movement(MoveTarget::WordRight),
            KeyCode::Right => movement(MoveTarget::Right),
            KeyCode::Up => movement(MoveTarget::Up),
            KeyCode::Down => movement(MoveTarget::Down),
            KeyCode::Home if self.mods.is_shortcut() => movement(MoveTarget::DocumentStart),
            KeyCode::Home => movement(MoveTarget::LineStart),
            KeyCode::End if self.mods.is_shortcut() => movement(MoveTarget::DocumentEnd),
            KeyCode::End => movement(MoveTarget::LineEnd),
        };
        Some(edit)
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.mods.is_empty() {
            write!(f, "{}+", self.mods)?;
        }
        match self.key {
            KeyCode::Char(ch) => write!(f, "{}", ch),
            other => write!(f, "{:?}", other),
        }
    }
}
