//! End-to-end check flow: field, update loop, runtime and correction service

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{CannedService, GatedService, MockServer, PLACEHOLDER};
use proofread::correction::CorrectionClient;
use proofread::messages::{CorrectionMsg, FieldMsg, FormMsg, Msg};
use proofread::model::AppModel;
use proofread::runtime::Runtime;
use proofread::surface::{ClipboardData, KeyCode, Keystroke, SurfaceMode, SurfaceProps};

const WAIT: Duration = Duration::from_secs(10);

fn model(content: &str) -> AppModel {
    AppModel::with_content(
        content,
        SurfaceProps::new(SurfaceMode::PlainText).with_placeholder(PLACEHOLDER),
    )
}

fn check() -> Msg {
    Msg::Correction(CorrectionMsg::Check)
}

#[test]
fn test_check_against_http_service_replaces_content() {
    let annotated = r#"the <span data-correct="quick">qu1xk</span> brown fox"#;
    let server = MockServer::respond_with_text(annotated);
    let client = CorrectionClient::new(server.settings()).unwrap();
    let mut runtime = Runtime::new(model("the qu1xk br0wn fox"), Arc::new(client));

    runtime.dispatch(check());
    assert!(runtime.model().field.surface().is_disabled());
    assert!(runtime.wait_idle(WAIT));

    let model = runtime.model();
    assert_eq!(model.content(), annotated);
    assert_eq!(model.field.value(), annotated);
    assert!(model.field.surface().render_html().contains(annotated));
    assert!(!model.field.surface().is_disabled());
    assert_eq!(model.correction.last_error, None);

    let body = server.finish().json();
    assert_eq!(body["model"], "llama3");
}

#[test]
fn test_field_disabled_while_request_pending() {
    let (service, release) = GatedService::new();
    let mut runtime = Runtime::new(model("teh cat"), Arc::new(service));

    runtime.dispatch(check());
    assert!(runtime.model().field.surface().is_disabled());

    runtime.dispatch(Msg::Field(FieldMsg::Focus));
    runtime.dispatch(Msg::Field(FieldMsg::KeyDown(Keystroke::plain(KeyCode::Char('x')))));
    runtime.dispatch(Msg::Field(FieldMsg::Paste(ClipboardData::plain("more"))));
    assert_eq!(runtime.model().content(), "teh cat");
    assert!(!runtime.model().field.surface().is_focused());

    // a second check while pending starts nothing
    runtime.dispatch(check());
    assert_eq!(runtime.in_flight(), 1);

    release.send(Ok("the cat".into())).unwrap();
    assert!(runtime.wait_idle(WAIT));
    assert!(!runtime.model().field.surface().is_disabled());
    assert_eq!(runtime.model().content(), "the cat");
}

#[test]
fn test_failure_clears_disabled_and_keeps_content() {
    let mut runtime = Runtime::new(
        model("teh cat"),
        Arc::new(CannedService::err("Error from server: 500")),
    );

    runtime.dispatch(check());
    assert!(runtime.wait_idle(WAIT));

    let model = runtime.model();
    assert!(!model.field.surface().is_disabled());
    assert_eq!(model.content(), "teh cat");
    assert_eq!(
        model.correction.last_error.as_deref(),
        Some("Error from server: 500")
    );

    // the field is usable again
    runtime.dispatch(Msg::Field(FieldMsg::KeyDown(Keystroke::plain(KeyCode::Char('!')))));
    assert_eq!(runtime.model().content(), "teh cat!");
}

#[test]
fn test_success_after_failure_clears_error() {
    let (service, release) = GatedService::new();
    let mut runtime = Runtime::new(model("teh"), Arc::new(service));

    runtime.dispatch(check());
    release.send(Err("timed out".into())).unwrap();
    assert!(runtime.wait_idle(WAIT));
    assert!(runtime.model().correction.last_error.is_some());

    runtime.dispatch(check());
    release.send(Ok("the".into())).unwrap();
    assert!(runtime.wait_idle(WAIT));
    assert_eq!(runtime.model().correction.last_error, None);
    assert_eq!(runtime.model().content(), "the");
}

#[test]
fn test_completion_after_unmount_is_dropped() {
    let (service, release) = GatedService::new();
    let mut runtime = Runtime::new(model("teh"), Arc::new(service));

    runtime.dispatch(check());
    runtime.dispatch(Msg::Form(FormMsg::Unmount));
    release.send(Ok("the".into())).unwrap();
    assert!(runtime.wait_idle(WAIT));

    let model = runtime.model();
    assert!(!model.is_mounted());
    assert_eq!(model.content(), "teh");
    assert_eq!(model.correction.updated_content, None);
}

#[test]
fn test_stale_completion_is_ignored() {
    let mut runtime = Runtime::new(model("teh"), Arc::new(CannedService::ok("the")));
    let tx = runtime.sender();
    tx.send(Msg::Correction(CorrectionMsg::Completed {
        request_id: 42,
        result: Ok("bogus".into()),
    }))
    .unwrap();
    runtime.process_async_messages();
    assert_eq!(runtime.model().content(), "teh");
}

#[test]
fn test_submit_after_correction() {
    let mut runtime = Runtime::new(model("teh"), Arc::new(CannedService::ok("the")));
    runtime.dispatch(check());
    assert!(runtime.wait_idle(WAIT));
    runtime.dispatch(Msg::Form(FormMsg::Submit));

    let submitted = runtime.take_submissions();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].content, "the");
}
