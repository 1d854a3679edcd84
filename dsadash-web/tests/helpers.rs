//! Integration test helpers
//!
//! Builds the real router over a throwaway problems directory and statistics file.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use dsadash_web::{create_app, AppState, WebConfig};
use http_body_util::BodyExt;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::LazyLock;
use tower::ServiceExt;

// Install the subscriber once per test binary
static TRACING: LazyLock<()> = LazyLock::new(|| {
    let level = if std::env::var("TEST_LOG").is_ok() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_test_writer()
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
});

pub const TWO_SUM: &str = "# Two Sum\n\nLeetCode: 1\nDifficulty: Easy\ntags: [array, hashing]\n\n## Solution\n\n```rust\n// hash map\n```\n";
pub const VALID_SUDOKU: &str = "# Valid Sudoku [Medium]\n\n## Problem Statement\n\nDetermine if a board is valid.\n";

/// Test application instance
pub struct TestApp {
    pub router: Router,
    pub root: PathBuf,
    pub statistics_path: PathBuf,
    _dir: tempfile::TempDir,
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.post_raw(uri, body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                panic!(
                    "response body is not JSON: {}",
                    String::from_utf8_lossy(&bytes)
                )
            })
        };
        (status, body)
    }

    pub fn statistics_file(&self) -> Option<String> {
        std::fs::read_to_string(&self.statistics_path).ok()
    }
}

/// Problems directory with two topics, one ignored UI directory and a hidden entry
pub fn spawn_app() -> TestApp {
    LazyLock::force(&TRACING);

    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("DSA");
    std::fs::create_dir_all(root.join("Arrays")).unwrap();
    std::fs::create_dir_all(root.join("Matrix")).unwrap();
    std::fs::create_dir_all(root.join("Empty")).unwrap();
    std::fs::create_dir_all(root.join("frontend/src")).unwrap();
    std::fs::create_dir_all(root.join(".git")).unwrap();
    std::fs::write(root.join("Arrays/two_sum.md"), TWO_SUM).unwrap();
    std::fs::write(root.join("Matrix/valid_sudoku.md"), VALID_SUDOKU).unwrap();
    std::fs::write(root.join("README.md"), "# DSA Notes\n").unwrap();
    std::fs::write(root.join("frontend/src/App.md"), "# App\n").unwrap();

    let statistics_path = dir.path().join("statistics.json");

    let mut config = WebConfig::default();
    config.repository.root = root.clone();
    config.storage.statistics_path = statistics_path.clone();

    TestApp {
        router: create_app(AppState::new(config)),
        root,
        statistics_path,
        _dir: dir,
    }
}

/// Same as [`spawn_app`] with a statistics document already on disk
pub fn spawn_app_with_statistics() -> TestApp {
    let app = spawn_app();
    let document = serde_json::json!({
        "totalProblems": 2,
        "solvedProblems": 1,
        "difficultyStats": {"Easy": 1, "Medium": 1},
        "topicStats": [
            {"name": "Arrays", "total": 1, "solved": 1},
            {"name": "Matrix", "total": 1, "solved": 0}
        ],
        "problemDetails": {
            "Arrays": [{"name": "Two Sum", "solved": true, "difficulty": "Easy"}],
            "Matrix": [{"name": "Valid Sudoku", "solved": false, "difficulty": "Medium"}]
        },
        "lastUpdated": "2025-03-01T08:30:00Z"
    });
    std::fs::write(
        &app.statistics_path,
        serde_json::to_string_pretty(&document).unwrap(),
    )
    .unwrap();
    app
}
