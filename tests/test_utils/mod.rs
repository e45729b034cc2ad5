//! Test utilities for integration tests
#![allow(dead_code)]
use std::fs;
use std::sync::Arc;

use axum::{Router, body::Body};
use tempfile::TempDir;

use parley::api::AppState;
use parley::api::app;
use parley::core::AppConfig;
use parley::openai::ProviderConfig;

pub const TEST_PROMPT: &str = "You are a helpful assistant.";
pub const INDEX_HTML: &str = "<!doctype html><title>parley</title>";

/// A test application backed by temporary directories. The returned
/// `TempDir` must be kept alive for as long as the app is used.
pub struct TestApp {
    pub router: Router,
    pub dir: TempDir,
}

impl TestApp {
    pub fn session_file(&self, session_id: &str) -> std::path::PathBuf {
        self.dir
            .path()
            .join("sessions")
            .join(format!("{}.json", session_id))
    }
}

/// Creates a test application router that sends completions to
/// `provider_url`, typically a `mockito` server.
pub fn test_app(provider_url: &str) -> TestApp {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let sessions_path = dir.path().join("sessions");
    let static_path = dir.path().join("dist");
    let prompt_path = dir.path().join("prompt.txt");
    fs::create_dir_all(static_path.join("assets")).expect("Failed to create static directory");
    fs::write(static_path.join("index.html"), INDEX_HTML).unwrap();
    fs::write(static_path.join("assets").join("app.js"), "console.log('hi');").unwrap();
    fs::write(&prompt_path, TEST_PROMPT).unwrap();

    let app_config = AppConfig {
        sessions_path: sessions_path.display().to_string(),
        static_path: static_path.display().to_string(),
        prompt_path: prompt_path.display().to_string(),
        token_limit: 50000,
        max_response_tokens: 250,
        provider: ProviderConfig::new("test-api-key", provider_url, "gpt-4"),
    };
    let app_state = AppState::new(app_config).expect("Failed to create app state");

    TestApp {
        router: app(Arc::new(app_state)),
        dir,
    }
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

pub async fn body_to_json(body: Body) -> serde_json::Value {
    serde_json::from_str(&body_to_string(body).await).expect("Body is not JSON")
}

pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1694268190,
        "model": "gpt-4",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}
