//! HTTP API tests against the full router

mod helpers;

use axum::http::StatusCode;
use helpers::{spawn_app, spawn_app_with_statistics};
use serde_json::{json, Value};

fn child_names(node: &Value) -> Vec<String> {
    node["children"]
        .as_array()
        .map(|children| {
            children
                .iter()
                .map(|child| child["name"].as_str().unwrap().to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn test_health() {
    let app = spawn_app();
    let (status, body) = app.get("/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
    assert!(body["uptimeSeconds"].as_f64().unwrap() >= 0.0);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_tree() {
    let app = spawn_app();
    let (status, tree) = app.get("/api/tree").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(tree["type"], "directory");
    assert_eq!(tree["name"], "DSA");
    // Empty, hidden and ignored directories never show up
    assert_eq!(child_names(&tree), vec!["Arrays", "Matrix", "README.md"]);

    let two_sum = &tree["children"][0]["children"][0];
    assert_eq!(two_sum["type"], "file");
    assert_eq!(two_sum["name"], "two_sum.md");
    assert!(two_sum.get("children").is_none());
    assert_eq!(
        two_sum["metadata"],
        json!({
            "title": "Two Sum",
            "difficulty": "Easy",
            "isSolved": true,
            "tags": ["array", "hashing"]
        })
    );

    let sudoku = &tree["children"][1]["children"][0];
    assert_eq!(sudoku["metadata"]["title"], "Valid Sudoku [Medium]");
    assert_eq!(sudoku["metadata"]["difficulty"], "Medium");
    assert_eq!(sudoku["metadata"]["isSolved"], false);

    let readme = &tree["children"][2];
    assert_eq!(readme["metadata"]["difficulty"], Value::Null);
}

#[tokio::test]
async fn test_tree_with_missing_root() {
    let app = spawn_app();
    std::fs::remove_dir_all(&app.root).unwrap();

    let (status, body) = app.get("/api/tree").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_file_content() {
    let app = spawn_app();
    let (status, body) = app.get("/api/file?path=Arrays/two_sum.md").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], helpers::TWO_SUM);
    assert_eq!(body["metadata"]["title"], "Two Sum");
}

#[tokio::test]
async fn test_file_by_absolute_path_from_tree() {
    let app = spawn_app();
    let (_, tree) = app.get("/api/tree").await;
    let path = tree["children"][2]["path"].as_str().unwrap().to_string();

    let (status, body) = app
        .get(&format!("/api/file?path={}", encode(&path)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "# DSA Notes\n");
    assert_eq!(body["metadata"]["isSolved"], false);
}

#[tokio::test]
async fn test_file_errors() {
    let app = spawn_app();

    let (status, body) = app.get("/api/file").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "File path is required");

    let (status, body) = app.get("/api/file?path=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "File path is required");

    let (status, body) = app.get("/api/file?path=Arrays/missing.md").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "File not found or could not be read");

    let (status, _) = app.get("/api/file?path=../statistics.json").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_problem_listing() {
    let app = spawn_app();
    let (status, body) = app.get("/api/problems").await;

    assert_eq!(status, StatusCode::OK);
    let files = body.as_array().unwrap();
    let names: Vec<&str> = files.iter().map(|f| f["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["two_sum.md", "valid_sudoku.md", "README.md"]);
    assert_eq!(files[0]["directory"], "Arrays");
    assert_eq!(files[2]["directory"], ".");
    assert!(files[0]["relativePath"].is_string());
}

#[tokio::test]
async fn test_statistics_missing() {
    let app = spawn_app();
    let (status, body) = app.get("/api/statistics").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Statistics file not found");
}

#[tokio::test]
async fn test_statistics_round_trip() {
    let app = spawn_app();
    let document = json!({
        "totalProblems": 3,
        "solvedProblems": 2,
        "difficultyStats": {"Easy": 2, "Hard": 1},
        "topicStats": [{"name": "Arrays", "total": 3, "solved": 2}],
        "problemDetails": {
            "Arrays": [
                {"name": "Two Sum", "solved": true, "difficulty": "Easy"},
                {"name": "Contains Duplicate", "solved": true, "difficulty": "Easy"},
                {"name": "Trapping Rain Water", "solved": false, "difficulty": "Hard"}
            ]
        },
        "lastUpdated": "2025-03-01T08:30:00Z"
    });

    let (status, body) = app.post_json("/api/statistics", &document).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "message": "Statistics saved successfully"})
    );

    let (status, loaded) = app.get("/api/statistics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(loaded, document);

    // Persisted with two-space indentation
    assert!(app
        .statistics_file()
        .unwrap()
        .contains("\n  \"totalProblems\": 3"));
}

#[tokio::test]
async fn test_statistics_rejects_bad_documents() {
    let app = spawn_app();

    let (status, body) = app.post_raw("/api/statistics", "{ nope".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let inconsistent = json!({"totalProblems": 1, "solvedProblems": 4});
    let (status, _) = app.post_json("/api/statistics", &inconsistent).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.statistics_file().is_none());
}

#[tokio::test]
async fn test_statistics_served_as_stored() {
    let app = spawn_app();
    let stored = json!({
        "totalProblems": 1,
        "solvedProblems": 0,
        "difficultyStats": {"medium": 1},
        "topicStats": [{"name": "Matrix", "total": 1, "solved": 0}],
        "problemDetails": {
            "Matrix": [{"name": "Valid Sudoku", "solved": false, "difficulty": "medium"}]
        },
        "lastUpdated": "yesterday"
    });
    std::fs::write(&app.statistics_path, stored.to_string()).unwrap();

    let (status, body) = app.get("/api/statistics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, stored);
}

#[tokio::test]
async fn test_malformed_statistics_file() {
    let app = spawn_app();
    std::fs::write(&app.statistics_path, "not json").unwrap();

    let (status, body) = app.get("/api/statistics").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_update_problem_status() {
    let app = spawn_app_with_statistics();
    let request = json!({"topic": "Matrix", "problemName": "Valid Sudoku", "solved": true});

    let (status, body) = app
        .post_json("/api/statistics/problems/status", &request)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["solvedProblems"], 2);
    assert_eq!(body["topicStats"][1]["solved"], 1);
    assert_eq!(body["problemDetails"]["Matrix"][0]["solved"], true);

    // Repeating the request changes nothing
    let (_, again) = app
        .post_json("/api/statistics/problems/status", &request)
        .await;
    assert_eq!(again["solvedProblems"], 2);
    assert_eq!(again["lastUpdated"], body["lastUpdated"]);
}

#[tokio::test]
async fn test_update_unknown_problem_keeps_file() {
    let app = spawn_app_with_statistics();
    let before = app.statistics_file().unwrap();

    let request = json!({"topic": "Matrix", "problemName": "Rotate Image", "solved": true});
    let (status, body) = app
        .post_json("/api/statistics/problems/status", &request)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["solvedProblems"], 1);
    assert_eq!(app.statistics_file().unwrap(), before);
}

#[tokio::test]
async fn test_update_without_statistics() {
    let app = spawn_app();
    let request = json!({"topic": "Arrays", "problemName": "Two Sum", "solved": true});

    let (status, body) = app
        .post_json("/api/statistics/problems/status", &request)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Statistics file not found");
}

#[tokio::test]
async fn test_add_problem() {
    let app = spawn_app_with_statistics();
    let request = json!({
        "topic": "Graphs",
        "problem": {"name": "Clone Graph", "solved": true}
    });

    let (status, body) = app.post_json("/api/statistics/problems", &request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalProblems"], 3);
    assert_eq!(body["solvedProblems"], 2);
    assert_eq!(body["difficultyStats"]["Unknown"], 1);
    assert_eq!(body["topicStats"][2], json!({"name": "Graphs", "total": 1, "solved": 1}));
    assert_eq!(body["problemDetails"]["Graphs"][0]["difficulty"], "Unknown");

    let (_, loaded) = app.get("/api/statistics").await;
    assert_eq!(loaded, body);
}

#[tokio::test]
async fn test_add_problem_validation() {
    let app = spawn_app();
    let request = json!({"topic": "", "problem": {"name": "Two Sum"}});

    let (status, body) = app.post_json("/api/statistics/problems", &request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Topic is required"));
}

#[tokio::test]
async fn test_unknown_route() {
    let app = spawn_app();
    let (status, body) = app.get("/api/unknown").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"error": "Resource not found", "path": "/api/unknown"})
    );
}

#[tokio::test]
async fn test_openapi_document() {
    let app = spawn_app();
    let (status, body) = app.get("/api/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "DSA Dashboard API");
    assert!(body["paths"]["/api/tree"].is_object());
}

/// Percent-encode a path for use in a query string
fn encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                (b as char).to_string()
            }
            other => format!("%{:02X}", other),
        })
        .collect()
}
