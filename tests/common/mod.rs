//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};

use proofread::correction::{ApiEndpoint, ClientSettings, CorrectionService};
use proofread::editable::EditMsg;
use proofread::surface::{SurfaceMode, SurfaceProps, SynchronizedSurface};

pub const PLACEHOLDER: &str = "Enter some text...";

/// Mounted plain text surface showing `value`
pub fn plain_surface(value: &str) -> SynchronizedSurface {
    SynchronizedSurface::mount(
        SurfaceProps::new(SurfaceMode::PlainText)
            .with_value(value)
            .with_placeholder(PLACEHOLDER),
    )
}

/// Mounted rich surface showing `value`
pub fn rich_surface(value: &str) -> SynchronizedSurface {
    SynchronizedSurface::mount(
        SurfaceProps::new(SurfaceMode::Rich)
            .with_value(value)
            .with_placeholder(PLACEHOLDER),
    )
}

/// Type `text` one character at a time at the caret
pub fn type_text(surface: &mut SynchronizedSurface, text: &str) {
    for ch in text.chars() {
        surface.handle_input(&EditMsg::InsertChar(ch));
    }
}

// ============================================================================
// Loopback HTTP server standing in for the generation service
// ============================================================================

/// One request as seen by the mock server
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub request_line: String,
    /// Header names lowercased
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

/// Accepts a single connection, records the request, sends a canned reply
pub struct MockServer {
    port: u16,
    handle: JoinHandle<CapturedRequest>,
}

impl MockServer {
    pub fn respond(status: u16, body: impl Into<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let port = listener.local_addr().expect("local addr").port();
        let body = body.into();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let captured = read_request(&mut stream);
            let reason = if status < 400 { "OK" } else { "Error" };
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).expect("write response");
            stream.flush().expect("flush response");
            captured
        });

        Self { port, handle }
    }

    /// Reply 200 with `{"response": <text>}`
    pub fn respond_with_text(text: &str) -> Self {
        let body = serde_json::json!({
            "model": "llama3",
            "created_at": "2024-05-01T00:00:00Z",
            "response": text,
            "done": true,
        });
        Self::respond(200, body.to_string())
    }

    pub fn endpoint(&self) -> ApiEndpoint {
        ApiEndpoint::new("http", "127.0.0.1", Some(self.port))
    }

    pub fn settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: self.endpoint(),
            timeout_secs: 10,
            ..ClientSettings::default()
        }
    }

    /// Wait for the exchange to finish and return what was received
    pub fn finish(self) -> CapturedRequest {
        self.handle.join().expect("mock server thread")
    }
}

fn read_request(stream: &mut TcpStream) -> CapturedRequest {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

    let mut request_line = String::new();
    reader.read_line(&mut request_line).expect("request line");

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("header line");
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
        }
    }

    let len = headers
        .iter()
        .find(|(name, _)| name == "content-length")
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0; len];
    reader.read_exact(&mut body).expect("request body");

    CapturedRequest {
        request_line: request_line.trim_end().to_string(),
        headers,
        body: String::from_utf8(body).expect("utf-8 body"),
    }
}

// ============================================================================
// In-process correction services
// ============================================================================

/// Returns a fixed result immediately
pub struct CannedService {
    pub reply: Result<String, String>,
}

impl CannedService {
    pub fn ok(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
        }
    }

    pub fn err(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
        }
    }
}

impl CorrectionService for CannedService {
    fn correct(&self, _content: &str) -> anyhow::Result<String> {
        self.reply.clone().map_err(anyhow::Error::msg)
    }
}

/// Blocks every request until the test releases it
pub struct GatedService {
    release: Mutex<Receiver<Result<String, String>>>,
}

impl GatedService {
    /// The service plus the sender that releases one request per message
    pub fn new() -> (Self, Sender<Result<String, String>>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                release: Mutex::new(rx),
            },
            tx,
        )
    }
}

impl CorrectionService for GatedService {
    fn correct(&self, _content: &str) -> anyhow::Result<String> {
        let reply = self
            .release
            .lock()
            .map_err(|_| anyhow::anyhow!("gate poisoned"))?
            .recv()
            .map_err(|_| anyhow::anyhow!("gate closed"))?;
        reply.map_err(anyhow::Error::msg)
    }
}
