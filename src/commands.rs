//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use crate::model::FormValues;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Send `content` to the correction service on a worker thread.
    /// Replies with `Msg::Correction(CorrectionMsg::Completed)`.
    RequestCorrection { request_id: u64, content: String },
    /// A valid form was submitted
    ReportSubmission(FormValues),
}
