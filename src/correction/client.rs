//! Blocking client for the `/api/generate` endpoint

use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use super::endpoint::ApiEndpoint;
use super::prompt::PromptStyle;

pub const DEFAULT_MODEL: &str = "llama3";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Anything that can turn text into corrected text.
///
/// Errors are opaque: the message is the only thing a caller can inspect.
pub trait CorrectionService: Send + Sync {
    fn correct(&self, content: &str) -> Result<String>;
}

/// Connection and prompt settings for the correction client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    #[serde(default)]
    pub endpoint: ApiEndpoint,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub style: PromptStyle,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: ApiEndpoint::default(),
            model: default_model(),
            style: PromptStyle::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// JSON body of a generate request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// JSON body of a non-streaming generate response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub done: Option<bool>,
}

/// Client for an Ollama-compatible generation service
#[derive(Debug, Clone)]
pub struct CorrectionClient {
    settings: ClientSettings,
    url: String,
    http: reqwest::blocking::Client,
}

impl CorrectionClient {
    pub fn new(settings: ClientSettings) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(concat!("proofread/", env!("CARGO_PKG_VERSION")));
        if settings.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(settings.timeout_secs));
        }
        // A proxy cannot reach a model served on this machine
        if settings.endpoint.is_loopback() {
            builder = builder.no_proxy();
        }
        let http = builder.build().context("building HTTP client")?;
        let url = settings.endpoint.generate_url();
        Ok(Self {
            settings,
            url,
            http,
        })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The payload that would be sent for `content`
    pub fn request_for(&self, content: &str) -> GenerateRequest {
        GenerateRequest {
            model: self.settings.model.clone(),
            prompt: self.settings.style.build(content),
            stream: false,
            format: self.settings.style.format().map(str::to_string),
        }
    }

    /// One request/response round trip. No retries.
    pub fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        tracing::info!(url = %self.url, model = %request.model, "sending generate request");
        let response = self
            .http
            .post(&self.url)
            .json(request)
            .send()
            .with_context(|| format!("sending request to {}", self.url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            bail!("Error from server: {} {}", status, body.trim());
        }

        response
            .json::<GenerateResponse>()
            .context("decoding generate response")
    }
}

impl CorrectionService for CorrectionClient {
    fn correct(&self, content: &str) -> Result<String> {
        let request = self.request_for(content);
        let response = self.generate(&request)?;
        tracing::debug!(len = response.response.len(), "received correction");
        Ok(response.response)
    }
}
