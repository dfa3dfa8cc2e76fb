//! Shared helpers for `wordforge-cli` integration tests.

#![allow(dead_code)]

use std::path::Path;

use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wordforge_cli::AppContext;
use wordforge_domain::{AppConfig, DifficultyLevel};

pub fn level(n: u8) -> DifficultyLevel {
    DifficultyLevel::new(n).expect("level should be in range")
}

/// Configuration backed by a database file inside `dir`, source disabled.
pub fn offline_config(dir: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.cache.database_path = dir.join("wordforge.db").to_string_lossy().into_owned();
    config.source.enabled = false;
    config
}

/// Same as [`offline_config`] but with the source pointed at `server`.
pub fn online_config(dir: &Path, server: &MockServer) -> AppConfig {
    let mut config = offline_config(dir);
    config.source.enabled = true;
    config.source.base_url = server.uri();
    config.source.request_timeout_ms = 500;
    config.source.base_backoff_ms = 5;
    config.source.deadline_ms = 2_000;
    config
}

pub fn isolated(config: AppConfig) -> AppContext {
    AppContext::new_isolated(config).expect("context should build")
}

/// Temp dir plus a JSON file of records to preload.
pub fn preload_file(records: serde_json::Value) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("temp dir should be created");
    let file = dir.path().join("records.json");
    std::fs::write(&file, records.to_string()).expect("preload file should be written");
    (dir, file)
}

pub fn record_json(id: &str, solution: &str, scrambled: &str, difficulty: u8) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "solution": solution,
        "scrambled": scrambled,
        "category": "Test",
        "hint": "test hint",
        "difficulty": difficulty,
    })
}

/// Mount a `/words` response for words of exactly `len` letters.
pub async fn mount_words(server: &MockServer, len: usize, words: &[&str]) {
    let rows: Vec<serde_json::Value> = words
        .iter()
        .map(|word| serde_json::json!({ "word": word, "score": 100, "tags": ["f:42.0"] }))
        .collect();
    Mock::given(method("GET"))
        .and(path("/words"))
        .and(query_param("sp", "?".repeat(len)))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(server)
        .await;
}
