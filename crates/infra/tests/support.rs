//! Shared helpers for `wordforge-infra` integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Once};
use std::time::Duration;

use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wordforge_domain::SourceSettings;
use wordforge_infra::SqliteStore;

static TRACING: Once = Once::new();

/// Install a test-writer tracing subscriber once per test binary.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("wordforge=debug")
            .with_test_writer()
            .try_init();
    });
}

/// Temporary SQLite store that keeps its directory alive for the test.
pub struct TestStore {
    pub store: Arc<SqliteStore>,
    pub dir: TempDir,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = SqliteStore::open(dir.path().join("wordforge.db"), 5 * 1024 * 1024)
            .expect("sqlite store should open");
        Self { store: Arc::new(store), dir }
    }

    /// Open a second handle onto the same database file.
    pub fn reopen(&self) -> Arc<SqliteStore> {
        let store = SqliteStore::open(self.dir.path().join("wordforge.db"), 5 * 1024 * 1024)
            .expect("sqlite store should reopen");
        Arc::new(store)
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Source settings pointed at a mock server with fast retries.
pub fn settings_for(server: &MockServer) -> SourceSettings {
    SourceSettings {
        base_url: server.uri(),
        request_timeout_ms: 500,
        max_attempts: 3,
        base_backoff_ms: 5,
        ..SourceSettings::default()
    }
}

/// Datamuse-shaped row with a frequency tag.
pub fn row(word: &str, frequency: f64) -> serde_json::Value {
    serde_json::json!({ "word": word, "score": 100, "tags": [format!("f:{frequency}")] })
}

/// Mount a `/words` response for words of exactly `len` letters.
pub async fn mount_words(server: &MockServer, len: usize, rows: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path("/words"))
        .and(query_param("sp", "?".repeat(len)))
        .and(query_param("md", "f"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(server)
        .await;
}

/// Mount a `/words` response for `len` letters that stalls far past any
/// request timeout used in these tests.
pub async fn mount_stalled(server: &MockServer, len: usize) {
    Mock::given(method("GET"))
        .and(path("/words"))
        .and(query_param("sp", "?".repeat(len)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(Vec::<serde_json::Value>::new())
                .set_delay(Duration::from_secs(10)),
        )
        .mount(server)
        .await;
}
