//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::editable::EditMsg;
use crate::surface::{ClipboardData, Keystroke};

/// Events coming from the editable field
#[derive(Debug, Clone)]
pub enum FieldMsg {
    /// Raw key press
    KeyDown(Keystroke),
    /// Already-decoded edit (IME, host shortcuts)
    Edit(EditMsg),
    Paste(ClipboardData),
    Focus,
    Blur,
    /// Programmatic value change from the form layer
    SetValue(String),
}

/// Correction request lifecycle
#[derive(Debug, Clone)]
pub enum CorrectionMsg {
    /// Ask the service to check the current value
    Check,
    /// Worker finished; errors are carried as their display text
    Completed {
        request_id: u64,
        result: Result<String, String>,
    },
}

/// Whole-form actions
#[derive(Debug, Clone)]
pub enum FormMsg {
    Submit,
    Reset,
    /// Owner went away; pending work must not touch the field
    Unmount,
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    Field(FieldMsg),
    Correction(CorrectionMsg),
    Form(FormMsg),
}
