//! Editable text state underneath the synchronized surface.
//!
//! - [`TextBuffer`] / [`TextBufferMut`]: traits abstracting over buffer implementations
//! - [`RopeBuffer`]: multi-line buffer backed by `ropey::Rope`
//! - [`EditableState`]: buffer plus a single caret and selection
//! - [`EditMsg`]: the user-driven edits the surface accepts
//!
//! There is no undo history; the surface has no undo/redo.
//!
//! # Example
//!
//! ```
//! use proofread::editable::{EditMsg, EditableState, RopeBuffer};
//!
//! let mut state = EditableState::new(RopeBuffer::from_text("helo"));
//! state.set_caret_offset(3);
//! state.apply(&EditMsg::InsertChar('l'));
//!
//! assert_eq!(state.text(), "hello");
//! ```

mod buffer;
mod caret;
mod messages;
mod state;

pub use buffer::{RopeBuffer, TextBuffer, TextBufferMut};
pub use caret::{Caret, Position, Selection};
pub use messages::{EditMsg, MoveTarget};
pub use state::EditableState;
