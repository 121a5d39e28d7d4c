//! Location of the generation API

use serde::{Deserialize, Serialize};

pub const DEFAULT_PROTOCOL: &str = "http";
pub const DEFAULT_HOSTNAME: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 11434;

const GENERATE_PATH: &str = "/api/generate";

/// Protocol, host and optional port of the generation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEndpoint {
    #[serde(default = "default_protocol")]
    pub protocol: String,
    #[serde(default = "default_hostname")]
    pub hostname: String,
    /// Omitted from the URL when unset or zero
    #[serde(default = "default_port")]
    pub port: Option<u16>,
}

fn default_protocol() -> String {
    DEFAULT_PROTOCOL.to_string()
}

fn default_hostname() -> String {
    DEFAULT_HOSTNAME.to_string()
}

fn default_port() -> Option<u16> {
    Some(DEFAULT_PORT)
}

impl Default for ApiEndpoint {
    fn default() -> Self {
        Self {
            protocol: default_protocol(),
            hostname: default_hostname(),
            port: default_port(),
        }
    }
}

impl ApiEndpoint {
    pub fn new(protocol: impl Into<String>, hostname: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            protocol: protocol.into(),
            hostname: hostname.into(),
            port,
        }
    }

    pub fn is_loopback(&self) -> bool {
        let host = self.hostname.trim_start_matches('[').trim_end_matches(']');
        host.eq_ignore_ascii_case("localhost")
            || host
                .parse::<std::net::IpAddr>()
                .map(|ip| ip.is_loopback())
                .unwrap_or(false)
    }

    /// `{protocol}://{hostname}[:{port}]/api/generate`
    pub fn generate_url(&self) -> String {
        match self.port {
            Some(port) if port != 0 => format!(
                "{}://{}:{}{}",
                self.protocol, self.hostname, port, GENERATE_PATH
            ),
            _ => format!("{}://{}{}", self.protocol, self.hostname, GENERATE_PATH),
        }
    }
}
