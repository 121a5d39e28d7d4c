//! proofread - grammar and spelling checks for an editable text field
//!
//! The crate models a content-editable field kept in sync with a form value
//! ([`surface`], [`form`]), a client for an Ollama-style generation service
//! ([`correction`]), and an Elm-style loop tying them together: messages go
//! through [`update::update`], side effects come back out as [`Cmd`]s that the
//! [`runtime::Runtime`] executes on worker threads.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod correction;
pub mod editable;
pub mod form;
pub mod messages;
pub mod model;
pub mod runtime;
pub mod sanitize;
pub mod surface;
pub mod tracing;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::ProofreadConfig;
pub use messages::Msg;
pub use model::AppModel;
pub use sanitize::sanitize;
