//! Tracing setup and surface state snapshots for diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=surface=debug,message=debug` - scoped filtering
//! - `RUST_LOG=proofread::correction=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/proofread/logs/proofread.log` with daily rotation.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::surface::SynchronizedSurface;

pub const LOG_FILE_PREFIX: &str = "proofread.log";

/// Initialize tracing subscriber with console and file logging
///
/// Console output goes to stderr so it never mixes with printed results, and
/// respects RUST_LOG (default `warn`). The file layer is always at debug level.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of surface state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceSnapshot {
    pub revision: u64,
    pub caret: usize,
    pub len_chars: usize,
    pub focused: bool,
    pub disabled: bool,
    pub placeholder: bool,
}

impl SurfaceSnapshot {
    pub fn from_surface(surface: &SynchronizedSurface) -> Self {
        Self {
            revision: surface.revision(),
            caret: surface.caret_offset(),
            len_chars: surface.content().chars().count(),
            focused: surface.is_focused(),
            disabled: surface.is_disabled(),
            placeholder: surface.shows_placeholder(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &SurfaceSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.revision != other.revision {
            changes.push(format!(
                "rewritten r{} → r{} ({} → {} chars)",
                self.revision, other.revision, self.len_chars, other.len_chars
            ));
        } else if self.len_chars != other.len_chars {
            changes.push(format!("edited {} → {} chars", self.len_chars, other.len_chars));
        }
        if self.caret != other.caret {
            changes.push(format!("caret {} → {}", self.caret, other.caret));
        }
        if self.focused != other.focused {
            changes.push(if other.focused { "focused" } else { "blurred" }.to_string());
        }
        if self.disabled != other.disabled {
            changes.push(if other.disabled { "disabled" } else { "enabled" }.to_string());
        }
        if self.placeholder != other.placeholder {
            let status = if other.placeholder { "shown" } else { "hidden" };
            changes.push(format!("placeholder {}", status));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
