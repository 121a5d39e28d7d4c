//! Correction client against a loopback stand-in for the generation service

mod common;

use std::net::TcpListener;

use common::MockServer;
use proofread::correction::{
    apply_corrections, parse_corrections, ApiEndpoint, ClientSettings, CorrectionClient,
    CorrectionService, PromptStyle,
};

const ANNOTATED: &str = r#"the <span data-correct="quick">qu1xk</span> brown fox"#;

#[test]
fn test_request_shape_and_response() {
    let server = MockServer::respond_with_text(ANNOTATED);
    let client = CorrectionClient::new(server.settings()).unwrap();

    let corrected = client.correct("the qu1xk br0wn fox").unwrap();
    assert_eq!(corrected, ANNOTATED);

    let request = server.finish();
    assert!(
        request.request_line.starts_with("POST /api/generate "),
        "request line: {}",
        request.request_line
    );
    assert_eq!(request.header("content-type"), Some("application/json"));

    let body = request.json();
    assert_eq!(body["model"], "llama3");
    assert_eq!(body["stream"], false);
    assert_eq!(body["format"], "html");
    let prompt = body["prompt"].as_str().unwrap();
    assert!(prompt.contains("+++\nthe qu1xk br0wn fox\n---"));
}

#[test]
fn test_plain_style_omits_format() {
    let server = MockServer::respond_with_text("the quick brown fox");
    let settings = ClientSettings {
        style: PromptStyle::Plain,
        model: "mistral".into(),
        ..server.settings()
    };
    let client = CorrectionClient::new(settings).unwrap();

    assert_eq!(
        client.correct("the qu1xk br0wn fox").unwrap(),
        "the quick brown fox"
    );

    let body = server.finish().json();
    assert_eq!(body["model"], "mistral");
    assert!(body.get("format").is_none());
}

#[test]
fn test_server_error_is_reported() {
    let server = MockServer::respond(500, r#"{"error":"model 'llama3' not found"}"#);
    let client = CorrectionClient::new(server.settings()).unwrap();

    let err = client.correct("text").unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Error from server"), "{}", message);
    assert!(message.contains("500"), "{}", message);
    assert!(message.contains("not found"), "{}", message);
    server.finish();
}

#[test]
fn test_undecodable_body_is_an_error() {
    let server = MockServer::respond(200, "this is not json");
    let client = CorrectionClient::new(server.settings()).unwrap();

    let err = client.correct("text").unwrap_err();
    assert!(format!("{:#}", err).contains("decoding generate response"));
    server.finish();
}

#[test]
fn test_unreachable_service_is_an_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let settings = ClientSettings {
        endpoint: ApiEndpoint::new("http", "127.0.0.1", Some(port)),
        timeout_secs: 5,
        ..ClientSettings::default()
    };
    let client = CorrectionClient::new(settings).unwrap();

    let err = client.correct("text").unwrap_err();
    assert!(format!("{:#}", err).contains("sending request to"));
}

#[test]
fn test_annotations_in_response_can_be_applied() {
    let server = MockServer::respond_with_text(ANNOTATED);
    let client = CorrectionClient::new(server.settings()).unwrap();
    let corrected = client.correct("the qu1xk br0wn fox").unwrap();
    server.finish();

    let corrections = parse_corrections(&corrected);
    assert_eq!(corrections.len(), 1);
    assert_eq!(corrections[0].original, "qu1xk");
    assert_eq!(apply_corrections(&corrected), "the quick brown fox");
}
