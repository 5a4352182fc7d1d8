mod support;

use support::{
    digitpad_env::DigitpadEnvGuard,
    stub_server::{CannedReply, StubServer},
};

use digitpad::{
    capture::{BATCH_SIZE, PointerEvent},
    config::{self, AppConfig},
    egui_app::{controller::EguiController, state::NoticeKind},
};
use std::time::Duration;
use tempfile::TempDir;

struct SessionHarness {
    _env: DigitpadEnvGuard,
    _temp: TempDir,
    stub: StubServer,
    controller: EguiController,
}

impl SessionHarness {
    fn new(replies: Vec<CannedReply>) -> Self {
        let temp = tempfile::tempdir().expect("create tempdir");
        let env = DigitpadEnvGuard::set_config_home(temp.path().to_path_buf());
        let stub = StubServer::start(replies);

        let mut settings = AppConfig::default();
        settings.collaborator.host = "http://127.0.0.1".into();
        settings.collaborator.port = stub.port();
        config::save_to_path(&settings, &config::config_path().expect("config path"))
            .expect("write config");

        let loaded = config::load_or_default().expect("load config");
        let controller = EguiController::from_config(&loaded);
        Self {
            _env: env,
            _temp: temp,
            stub,
            controller,
        }
    }

    fn draw(&mut self, x: f32, y: f32) {
        self.controller.pointer_event(PointerEvent::Down { x, y });
        self.controller.pointer_event(PointerEvent::Move { x: x + 10.0, y });
        self.controller.pointer_event(PointerEvent::Up);
    }

    fn settle(&mut self, expected: usize) {
        let mut handled = 0;
        for _ in 0..400 {
            handled += self.controller.poll_background_jobs();
            if handled >= expected {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(handled, expected);
    }

    fn notice(&self) -> (NoticeKind, String) {
        let notice = self.controller.ui.notices.current().expect("notice shown");
        (notice.kind, notice.message.clone())
    }
}

#[test]
fn prediction_round_trip_over_http() {
    let mut harness = SessionHarness::new(vec![CannedReply::ok(r#"{"type":"test","result":"7"}"#)]);
    harness.controller.pointer_event(PointerEvent::Down { x: 15.0, y: 15.0 });
    harness.controller.pointer_event(PointerEvent::Up);
    harness.controller.test();

    let sent = harness.stub.next_request().expect("request reached stub");
    assert_eq!(sent["predict"], serde_json::json!(true));
    let image = sent["image"].as_array().unwrap();
    assert_eq!(image.len(), 400);
    assert_eq!(image[21], serde_json::json!(1));
    assert_eq!(image.iter().filter(|v| **v == serde_json::json!(1)).count(), 1);

    harness.settle(1);
    assert_eq!(
        harness.notice(),
        (NoticeKind::Prediction, "Prediction: 7".to_string())
    );
    assert!(!harness.controller.capture().bitmap().is_blank());
}

#[test]
fn full_batch_is_flushed_once_over_http() {
    let mut harness = SessionHarness::new(vec![CannedReply::ok(r#"{"type":"train","status":"ok"}"#)]);
    for round in 0..BATCH_SIZE {
        harness.draw(20.0, 10.0 * round as f32 + 5.0);
        harness.controller.ui.label_input = format!("{}", round % 10);
        harness.controller.train();
    }

    let sent = harness.stub.next_request().expect("batch reached stub");
    assert_eq!(sent["train"], serde_json::json!(true));
    let entries = sent["trainArray"].as_array().unwrap();
    assert_eq!(entries.len(), BATCH_SIZE);
    for (index, entry) in entries.iter().enumerate() {
        assert_eq!(entry["label"], serde_json::json!(index % 10));
        assert_eq!(entry["y0"].as_array().unwrap().len(), 400);
    }

    harness.settle(1);
    assert!(harness.controller.ui.notices.is_empty());
    assert!(harness.controller.capture().batch().is_empty());
    assert!(harness.controller.ui.status.text.contains("accepted"));
}

#[test]
fn structured_server_error_is_shown() {
    let mut harness = SessionHarness::new(vec![CannedReply::status(
        "500 Internal Server Error",
        r#"{"type":"error","message":"bad input"}"#,
    )]);
    harness.draw(100.0, 100.0);
    harness.controller.test();
    harness.settle(1);
    let (kind, message) = harness.notice();
    assert_eq!(kind, NoticeKind::Failure);
    assert!(message.contains("bad input"));
}

#[test]
fn unstructured_server_error_shows_status() {
    let mut harness = SessionHarness::new(vec![CannedReply::status("503 Service Unavailable", "")]);
    harness.draw(100.0, 100.0);
    harness.controller.test();
    harness.settle(1);
    assert_eq!(harness.notice().1, "Server error (status 503)");
}

#[test]
fn validation_failures_never_reach_the_network() {
    let mut harness = SessionHarness::new(Vec::new());
    harness.controller.test();
    harness.controller.ui.label_input = "3".into();
    harness.controller.train();
    harness.draw(50.0, 50.0);
    harness.controller.ui.label_input.clear();
    harness.controller.train();

    let messages: Vec<String> = harness
        .controller
        .ui
        .notices
        .iter()
        .map(|notice| notice.message.clone())
        .collect();
    assert_eq!(
        messages,
        vec![
            "Please draw a digit first.",
            "Please draw a digit and enter its value.",
            "Please draw a digit and enter its value.",
        ]
    );
    assert_eq!(harness.controller.ui.in_flight, 0);
    assert!(harness.controller.capture().batch().is_empty());
    assert!(!harness.controller.capture().bitmap().is_blank());
}
