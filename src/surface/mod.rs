//! The synchronized editable surface.
//!
//! A surface owns live, user-mutable content and keeps it consistent with an
//! authoritative value pushed down by its owner (usually a form field):
//!
//! - external value changes are reconciled, skipping the write when the live
//!   content already matches so the caret is not disturbed
//! - local edits run an *input pass* (strip tags in plain text mode, write
//!   back if that changed anything) and produce a [`ContentChange`]
//! - typed and pasted text is literal; rich mode escapes it on insertion
//! - markup from a replace command renders as markup until the user edits it
//! - a placeholder marker is shown while the content is empty
//! - a disabled surface prevents keys, rejects focus and ignores paste
//! - paste inserts only the plain text clipboard flavor
//! - [`SurfaceCommand::ReplaceContent`] overwrites the content unconditionally

mod events;
mod keys;
mod props;
mod state;
mod view;

pub use events::{ClipboardData, ContentChange, Focus, KeyDown, Reconcile, SurfaceCommand};
pub use keys::{KeyCode, Keystroke, Modifiers};
pub use props::{SurfaceMode, SurfaceProps};
pub use state::SynchronizedSurface;
pub use view::{SurfaceStyle, SurfaceView, PLACEHOLDER_ATTR, PLACEHOLDER_CLASS};
