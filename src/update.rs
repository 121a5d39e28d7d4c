//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

use tracing::{debug, info, warn};

use crate::commands::Cmd;
use crate::messages::{CorrectionMsg, FieldMsg, FormMsg, Msg};
use crate::model::AppModel;

#[cfg(debug_assertions)]
use crate::tracing::SurfaceSnapshot;
#[cfg(debug_assertions)]
use tracing::{span, Level};

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    if !model.is_mounted() {
        if let Msg::Correction(CorrectionMsg::Completed { request_id, .. }) = &msg {
            debug!(request_id, "dropping correction result for unmounted form");
        }
        return None;
    }

    match msg {
        Msg::Field(m) => update_field(model, m),
        Msg::Correction(m) => update_correction(model, m),
        Msg::Form(m) => update_form(model, m),
    }
}

/// Route field events through the form adapter
pub fn update_field(model: &mut AppModel, msg: FieldMsg) -> Option<Cmd> {
    match msg {
        FieldMsg::KeyDown(keystroke) => {
            model.field.key_down(keystroke);
        }
        FieldMsg::Edit(edit) => {
            model.field.input(&edit);
        }
        FieldMsg::Paste(clipboard) => {
            model.field.paste(&clipboard);
        }
        FieldMsg::Focus => {
            model.field.focus();
        }
        FieldMsg::Blur => model.field.blur(),
        FieldMsg::SetValue(value) => model.field.set_value(value),
    }
    None
}

/// Start a correction or apply a finished one.
///
/// The field is disabled for as long as a request is pending and re-enabled
/// when the matching completion arrives, whatever its outcome.
pub fn update_correction(model: &mut AppModel, msg: CorrectionMsg) -> Option<Cmd> {
    match msg {
        CorrectionMsg::Check => {
            if model.correction.is_pending() {
                debug!("correction already in flight, ignoring check");
                return None;
            }
            let request_id = model.correction.begin();
            model.field.set_disabled(true);
            let content = model.field.value().to_string();
            info!(request_id, len = content.len(), "requesting correction");
            Some(Cmd::RequestCorrection {
                request_id,
                content,
            })
        }
        CorrectionMsg::Completed { request_id, result } => {
            if !model.correction.finish(request_id) {
                debug!(request_id, "dropping stale correction result");
                return None;
            }
            match result {
                Ok(corrected) => {
                    info!(request_id, len = corrected.len(), "applying correction");
                    model.correction.last_error = None;
                    model.field.replace_content(corrected.clone());
                    model.correction.updated_content = Some(corrected);
                }
                Err(error) => {
                    warn!(request_id, %error, "correction failed");
                    model.correction.last_error = Some(error);
                }
            }
            model.field.set_disabled(false);
            None
        }
    }
}

pub fn update_form(model: &mut AppModel, msg: FormMsg) -> Option<Cmd> {
    match msg {
        FormMsg::Submit => match model.handle_submit() {
            Ok(values) => {
                info!(len = values.content.len(), "form submitted");
                model.submitted = Some(values.clone());
                Some(Cmd::ReportSubmission(values))
            }
            Err(error) => {
                warn!(%error, "submit rejected");
                None
            }
        },
        FormMsg::Reset => {
            model.field.reset();
            None
        }
        FormMsg::Unmount => {
            if let Some(request_id) = model.correction.pending {
                debug!(request_id, "unmounting with correction in flight");
            }
            model.unmount();
            None
        }
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after surface state and logs the diff.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = SurfaceSnapshot::from_surface(model.field.surface());
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    let after = SurfaceSnapshot::from_surface(model.field.surface());
    if let Some(diff) = before.diff(&after) {
        debug!(target: "surface", %diff, "state changed");
    }

    result
}

/// Display name for a message, without its payload
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Field(FieldMsg::KeyDown(keystroke)) => format!("Field::KeyDown({})", keystroke),
        Msg::Field(FieldMsg::Edit(edit)) => format!("Field::Edit({:?})", edit),
        Msg::Field(FieldMsg::Paste(_)) => "Field::Paste".to_string(),
        Msg::Field(FieldMsg::Focus) => "Field::Focus".to_string(),
        Msg::Field(FieldMsg::Blur) => "Field::Blur".to_string(),
        Msg::Field(FieldMsg::SetValue(_)) => "Field::SetValue".to_string(),
        Msg::Correction(CorrectionMsg::Check) => "Correction::Check".to_string(),
        Msg::Correction(CorrectionMsg::Completed { request_id, result }) => format!(
            "Correction::Completed(#{}, {})",
            request_id,
            if result.is_ok() { "ok" } else { "err" }
        ),
        Msg::Form(m) => format!("Form::{:?}", m),
    }
}
