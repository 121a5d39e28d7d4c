//! Application model: the content field and correction bookkeeping

use serde::{Deserialize, Serialize};

use crate::form::{FieldController, FieldError, FormFieldAdapter, Rules};
use crate::surface::SurfaceProps;

/// Name of the single field in the proofreading form
pub const CONTENT_FIELD: &str = "content";

/// Values produced by a successful submit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    pub content: String,
}

/// Outstanding and finished correction requests
#[derive(Debug, Clone, Default)]
pub struct CorrectionState {
    /// Id of the request in flight, if any
    pub pending: Option<u64>,
    next_id: u64,
    /// Display text of the most recent failure, cleared by the next success
    pub last_error: Option<String>,
    /// Most recent corrected content
    pub updated_content: Option<String>,
}

impl CorrectionState {
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Allocate an id and mark it pending
    pub fn begin(&mut self) -> u64 {
        self.next_id += 1;
        self.pending = Some(self.next_id);
        self.next_id
    }

    /// Clear `request_id` if it is the pending one. Returns false for
    /// stale or unknown ids.
    pub fn finish(&mut self, request_id: u64) -> bool {
        if self.pending == Some(request_id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Forget the pending request so its completion is dropped
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// The application model
#[derive(Debug, Clone)]
pub struct AppModel {
    pub field: FormFieldAdapter,
    pub correction: CorrectionState,
    /// Last successfully submitted values
    pub submitted: Option<FormValues>,
    mounted: bool,
}

impl AppModel {
    pub fn new(field: FormFieldAdapter) -> Self {
        Self {
            field,
            correction: CorrectionState::default(),
            submitted: None,
            mounted: true,
        }
    }

    /// The proofreading form: one required `content` field seeded with
    /// `initial`
    pub fn with_content(initial: impl Into<String>, props: SurfaceProps) -> Self {
        let controller = FieldController::new(CONTENT_FIELD, initial, Rules::required());
        Self::new(FormFieldAdapter::new(controller, props))
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Current surface content
    pub fn content(&self) -> String {
        self.field.surface().content()
    }

    /// Validate every rule; yields the form values only when valid
    pub fn handle_submit(&mut self) -> Result<FormValues, FieldError> {
        let content = self.field.validate()?.to_string();
        Ok(FormValues { content })
    }

    pub(crate) fn unmount(&mut self) {
        self.mounted = false;
        self.correction.cancel();
        self.field.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_increase() {
        let mut state = CorrectionState::default();
        let first = state.begin();
        assert!(state.finish(first));
        let second = state.begin();
        assert!(second > first);
        assert!(!state.finish(first));
        assert!(state.is_pending());
    }

    #[test]
    fn test_cancel_drops_pending() {
        let mut state = CorrectionState::default();
        let id = state.begin();
        state.cancel();
        assert!(!state.finish(id));
    }

    #[test]
    fn test_submit_requires_content() {
        let mut model = AppModel::with_content("", SurfaceProps::default());
        assert_eq!(model.handle_submit(), Err(FieldError::Required));

        let mut model = AppModel::with_content("fine text", SurfaceProps::default());
        assert_eq!(
            model.handle_submit(),
            Ok(FormValues {
                content: "fine text".into()
            })
        );
    }
}
