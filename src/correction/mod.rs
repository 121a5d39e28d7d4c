//! Grammar and spelling correction through a remote generation service
//!
//! The service speaks the Ollama `/api/generate` protocol. Content goes out
//! wrapped in an instruction prompt; the reply's `response` field is the
//! corrected text, either annotated with `<span data-correct="...">` elements
//! or plain, depending on [`PromptStyle`].

mod client;
mod endpoint;
mod markup;
mod prompt;

pub use client::{
    ClientSettings, CorrectionClient, CorrectionService, GenerateRequest, GenerateResponse,
    DEFAULT_MODEL,
};
pub use endpoint::{ApiEndpoint, DEFAULT_HOSTNAME, DEFAULT_PORT, DEFAULT_PROTOCOL};
pub use markup::{apply_corrections, parse_corrections, Correction};
pub use prompt::PromptStyle;
