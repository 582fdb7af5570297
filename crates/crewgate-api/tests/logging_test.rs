mod common;

use axum::http::StatusCode;
use common::TestApp;
use crewgate::MockEngine;
use serde_json::json;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Log sink shared between the subscriber and the test
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|e| io::Error::other(e.to_string()))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn test_engine_failure_detail_is_logged_not_returned() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = TestApp::new(MockEngine::failing("upstream rejected key sk-live-12345"));
    let (status, body) = app
        .post("/sentiment", json!({"text": "I love this product"}))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.to_string().contains("sk-live-12345"));

    let logged = logs.contents();
    let line = logged
        .lines()
        .find(|line| line.contains("sk-live-12345"))
        .unwrap_or_else(|| panic!("engine failure not logged:\n{logged}"));
    assert!(line.contains("ERROR"), "{line}");
    assert!(line.contains("Sentiment analysis failed"), "{line}");
}
