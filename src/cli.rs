//! Command-line argument parsing
//!
//! Flags override the values loaded from `config.yaml`.

use clap::Parser;

use crate::config::ProofreadConfig;
use crate::correction::PromptStyle;

/// Check spelling and grammar with a local language model
#[derive(Parser, Debug)]
#[command(
    name = "proofread",
    version,
    about = "Check spelling and grammar with a local language model"
)]
pub struct CliArgs {
    /// Text to check (read from stdin when omitted)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Model name sent with the request
    #[arg(short, long)]
    pub model: Option<String>,

    /// Service protocol (http or https)
    #[arg(long)]
    pub protocol: Option<String>,

    /// Service hostname
    #[arg(long)]
    pub host: Option<String>,

    /// Service port; 0 leaves the port out of the URL
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Ask for corrected plain text instead of annotated markup
    #[arg(long)]
    pub plain: bool,

    /// Print the text with annotated corrections applied
    #[arg(long)]
    pub apply: bool,

    /// Print the rendered field element instead of its content
    #[arg(long)]
    pub render: bool,

    /// Request timeout in seconds (0 disables it)
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,
}

/// Where the text to check comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Text(String),
    Stdin,
}

/// What gets printed once the correction is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Field content as returned by the service
    Content,
    /// Annotations resolved into corrected plain text
    Applied,
    /// The field element as HTML
    Html,
}

/// Configuration derived from CLI arguments on top of the config file
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: InputSource,
    pub config: ProofreadConfig,
    pub output: OutputMode,
}

impl CliArgs {
    /// Merge parsed CLI args over `base`
    pub fn into_config(self, base: ProofreadConfig) -> Result<RunConfig, String> {
        if self.apply && self.render {
            return Err("--apply and --render cannot be used together".to_string());
        }

        let mut config = base;
        let service = &mut config.service;
        if let Some(model) = self.model {
            if model.trim().is_empty() {
                return Err("--model must not be empty".to_string());
            }
            service.model = model;
        }
        if let Some(protocol) = self.protocol {
            service.endpoint.protocol = protocol;
        }
        if let Some(host) = self.host {
            service.endpoint.hostname = host;
        }
        if let Some(port) = self.port {
            service.endpoint.port = (port != 0).then_some(port);
        }
        if self.plain {
            service.style = PromptStyle::Plain;
        }
        if let Some(secs) = self.timeout_secs {
            service.timeout_secs = secs;
        }

        let output = if self.apply {
            OutputMode::Applied
        } else if self.render {
            OutputMode::Html
        } else {
            OutputMode::Content
        };

        let input = match self.text {
            Some(text) => InputSource::Text(text),
            None => InputSource::Stdin,
        };

        Ok(RunConfig {
            input,
            config,
            output,
        })
    }
}
