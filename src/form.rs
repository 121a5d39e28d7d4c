//! Form field state and the adapter that lets a surface act as a text input
//!
//! [`FieldController`] owns the value, dirty/touched flags and validation of
//! one field, revalidating on every change. [`FormFieldAdapter`] wires a
//! [`SynchronizedSurface`] to a controller: surface change notifications
//! become `{ target: { value } }` change events, and the controller's value
//! is pushed back down to the surface after each one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::editable::EditMsg;
use crate::surface::{
    ClipboardData, ContentChange, Focus, KeyDown, Keystroke, SurfaceCommand, SurfaceProps,
    SynchronizedSurface,
};

/// Payload of a change event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeTarget {
    pub value: String,
}

/// The change event shape a form layer expects from a text input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub target: ChangeTarget,
}

impl ChangeEvent {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            target: ChangeTarget {
                value: value.into(),
            },
        }
    }
}

impl From<ContentChange> for ChangeEvent {
    fn from(change: ContentChange) -> Self {
        Self::new(change.value)
    }
}

/// Validation rules for a field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub max_length: Option<usize>,
}

impl Rules {
    pub fn required() -> Self {
        Self {
            required: true,
            max_length: None,
        }
    }

    pub fn check(&self, value: &str) -> Result<(), FieldError> {
        if self.required && value.is_empty() {
            return Err(FieldError::Required);
        }
        if let Some(max) = self.max_length {
            let actual = value.chars().count();
            if actual > max {
                return Err(FieldError::MaxLength { max, actual });
            }
        }
        Ok(())
    }
}

/// Why a field failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Required,
    MaxLength { max: usize, actual: usize },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Required => write!(f, "this field is required"),
            FieldError::MaxLength { max, actual } => {
                write!(f, "at most {} characters allowed, got {}", max, actual)
            }
        }
    }
}

impl std::error::Error for FieldError {}

/// Touched / dirty / validity summary shown next to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldStatus {
    pub touched: bool,
    pub dirty: bool,
    pub invalid: bool,
}

impl fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.touched {
            parts.push("Touched");
        }
        if self.dirty {
            parts.push("Dirty");
        }
        parts.push(if self.invalid { "Invalid" } else { "Valid" });
        write!(f, "{}", parts.join(" "))
    }
}

/// State of one form field
#[derive(Debug, Clone)]
pub struct FieldController {
    name: String,
    value: String,
    default_value: String,
    rules: Rules,
    touched: bool,
    error: Option<FieldError>,
}

impl FieldController {
    pub fn new(name: impl Into<String>, default_value: impl Into<String>, rules: Rules) -> Self {
        let default_value = default_value.into();
        Self {
            name: name.into(),
            value: default_value.clone(),
            default_value,
            rules,
            touched: false,
            error: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    pub fn is_dirty(&self) -> bool {
        self.value != self.default_value
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn invalid(&self) -> bool {
        self.error.is_some()
    }

    pub fn error(&self) -> Option<&FieldError> {
        self.error.as_ref()
    }

    pub fn status(&self) -> FieldStatus {
        FieldStatus {
            touched: self.touched,
            dirty: self.is_dirty(),
            invalid: self.invalid(),
        }
    }

    /// Handle a change event from the input
    pub fn on_change(&mut self, event: &ChangeEvent) {
        self.set_value(event.target.value.clone());
    }

    /// Set the value programmatically; revalidates
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.error = self.rules.check(&self.value).err();
        tracing::trace!(field = %self.name, invalid = self.invalid(), "field value updated");
    }

    pub fn on_blur(&mut self) {
        self.touched = true;
    }

    /// Validate for submission, recording the error
    pub fn validate(&mut self) -> Result<&str, FieldError> {
        match self.rules.check(&self.value) {
            Ok(()) => {
                self.error = None;
                Ok(&self.value)
            }
            Err(e) => {
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Back to the default value with flags cleared
    pub fn reset(&mut self) {
        self.value = self.default_value.clone();
        self.touched = false;
        self.error = None;
    }
}

/// A surface registered with a field controller
#[derive(Debug, Clone)]
pub struct FormFieldAdapter {
    controller: FieldController,
    surface: SynchronizedSurface,
}

impl FormFieldAdapter {
    /// Mount a surface showing the controller's current value
    pub fn new(controller: FieldController, props: SurfaceProps) -> Self {
        let props = SurfaceProps {
            value: Some(controller.value().to_string()),
            ..props
        };
        Self {
            surface: SynchronizedSurface::mount(props),
            controller,
        }
    }

    pub fn controller(&self) -> &FieldController {
        &self.controller
    }

    pub fn surface(&self) -> &SynchronizedSurface {
        &self.surface
    }

    pub fn value(&self) -> &str {
        self.controller.value()
    }

    pub fn status(&self) -> FieldStatus {
        self.controller.status()
    }

    pub fn key_down(&mut self, keystroke: Keystroke) -> KeyDown {
        let outcome = self.surface.handle_key_down(keystroke);
        if let KeyDown::Handled(Some(change)) = &outcome {
            self.forward(change.clone());
        }
        outcome
    }

    pub fn input(&mut self, edit: &EditMsg) -> Option<ChangeEvent> {
        let change = self.surface.handle_input(edit)?;
        Some(self.forward(change))
    }

    pub fn paste(&mut self, clipboard: &ClipboardData) -> Option<ChangeEvent> {
        let change = self.surface.handle_paste(clipboard)?;
        Some(self.forward(change))
    }

    pub fn focus(&mut self) -> Focus {
        let outcome = self.surface.handle_focus();
        if let Focus::Accepted(change) = &outcome {
            self.forward(change.clone());
        }
        outcome
    }

    pub fn blur(&mut self) {
        if self.surface.handle_blur() {
            self.controller.on_blur();
        }
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.surface.set_disabled(disabled);
    }

    /// Set the field value from outside and reconcile the surface
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.controller.set_value(value);
        self.surface.set_value(self.controller.value().to_string());
    }

    /// Replace both the field value and the rendered content, e.g. with
    /// corrected markup. The forced replace runs first so the following
    /// reconciliation finds nothing to write.
    pub fn replace_content(&mut self, markup: impl Into<String>) {
        let markup = markup.into();
        self.surface
            .apply(SurfaceCommand::ReplaceContent(markup.clone()));
        self.set_value(markup);
    }

    pub fn validate(&mut self) -> Result<&str, FieldError> {
        self.controller.validate()
    }

    pub fn reset(&mut self) {
        self.controller.reset();
        self.surface.set_value(self.controller.value().to_string());
    }

    pub fn unmount(&mut self) {
        self.surface.unmount();
    }

    /// Surface change -> change event -> controller -> value back down
    fn forward(&mut self, change: ContentChange) -> ChangeEvent {
        let event = ChangeEvent::from(change);
        self.controller.on_change(&event);
        self.surface.set_value(self.controller.value().to_string());
        event
    }
}
