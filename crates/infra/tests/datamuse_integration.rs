//! Integration tests for the Datamuse word source against a mock server

mod support;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use support::{init_tracing, mount_stalled, mount_words, row, settings_for};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wordforge_common::ErrorClassification;
use wordforge_core::{
    AcquisitionService, AnagramCache, CuratedPool, WordConstraints, WordSource, WordSourceError,
};
use wordforge_domain::{AcquisitionMode, DifficultyLevel, SourceSettings};
use wordforge_infra::{DatamuseSource, MemoryStore};

fn constraints(level: u8) -> WordConstraints {
    WordConstraints::for_level(DifficultyLevel::new(level).unwrap(), 5.0, 50)
}

#[tokio::test]
async fn merges_lengths_and_filters_by_frequency() {
    init_tracing();
    let server = MockServer::start().await;
    mount_words(&server, 4, vec![row("frog", 12.0), row("zyme", 0.2)]).await;
    mount_words(&server, 5, vec![row("crane", 9.5), row("table", 80.0), row("ice-t", 40.0)])
        .await;

    let source = DatamuseSource::from_settings(&settings_for(&server)).unwrap();
    let words = source.query(&constraints(1)).await.unwrap();

    assert_eq!(words, ["FROG", "CRANE", "TABLE"]);
}

#[tokio::test]
async fn sends_pattern_frequency_and_limit() {
    let server = MockServer::start().await;
    mount_words(&server, 10, vec![row("helicopter", 6.0)]).await;
    mount_words(&server, 11, vec![]).await;
    mount_words(&server, 12, vec![]).await;

    let source = DatamuseSource::from_settings(&settings_for(&server)).unwrap();
    source.query(&constraints(5)).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(query.contains("md=f"), "query was {query}");
    assert!(query.contains("max=50"), "query was {query}");
}

#[tokio::test]
async fn nothing_above_threshold_is_no_candidates() {
    let server = MockServer::start().await;
    for len in 4..=5 {
        mount_words(&server, len, vec![row("zzzz", 0.01)]).await;
    }

    let source = DatamuseSource::from_settings(&settings_for(&server)).unwrap();
    let err = source.query(&constraints(1)).await.unwrap_err();

    assert_eq!(err, WordSourceError::NoCandidates);
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn server_errors_are_retried_then_reported() {
    let server = MockServer::start().await;
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    Mock::given(method("GET"))
        .and(path("/words"))
        .respond_with(move |_req: &wiremock::Request| -> ResponseTemplate {
            counter.fetch_add(1, Ordering::SeqCst);
            ResponseTemplate::new(503)
        })
        .mount(&server)
        .await;

    let source = DatamuseSource::from_settings(&settings_for(&server)).unwrap();
    let err = source.query(&constraints(1)).await.unwrap_err();

    // Two lengths in the band, three attempts each
    assert_eq!(hits.load(Ordering::SeqCst), 6);
    match err {
        WordSourceError::Network { message, retryable } => {
            assert!(message.contains("503"));
            assert!(retryable);
        }
        other => panic!("expected network error, got {other:?}"),
    }
}

#[tokio::test]
async fn partial_failure_still_returns_candidates() {
    let server = MockServer::start().await;
    mount_words(&server, 4, vec![row("lamp", 30.0)]).await;
    Mock::given(method("GET"))
        .and(path("/words"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let source = DatamuseSource::from_settings(&settings_for(&server)).unwrap();
    let words = source.query(&constraints(1)).await.unwrap();

    assert_eq!(words, ["LAMP"]);
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/words"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let source = DatamuseSource::from_settings(&settings_for(&server)).unwrap();
    let err = source.query(&constraints(2)).await.unwrap_err();

    assert!(matches!(err, WordSourceError::InvalidResponse(_)));
}

#[tokio::test]
async fn client_errors_are_not_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/words"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let source = DatamuseSource::from_settings(&settings_for(&server)).unwrap();
    let err = source.query(&constraints(1)).await.unwrap_err();

    assert!(matches!(err, WordSourceError::Network { retryable: false, .. }));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn truncates_to_limit() {
    let server = MockServer::start().await;
    mount_words(&server, 6, vec![row("garden", 40.0), row("castle", 35.0)]).await;
    mount_words(&server, 7, vec![row("harvest", 20.0)]).await;
    mount_words(&server, 8, vec![row("mountain", 25.0)]).await;

    let source = DatamuseSource::from_settings(&settings_for(&server)).unwrap();
    let limited = WordConstraints { limit: 2, ..constraints(3) };
    let words = source.query(&limited).await.unwrap();

    assert_eq!(words, ["GARDEN", "CASTLE"]);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn stalled_length_keeps_candidates_from_the_others() {
    init_tracing();
    let server = MockServer::start().await;
    mount_words(&server, 5, vec![row("crane", 30.0), row("table", 80.0)]).await;
    mount_stalled(&server, 6).await;
    mount_stalled(&server, 7).await;

    let settings = settings_for(&server);
    let source = DatamuseSource::from_settings(&settings).unwrap();
    let started = Instant::now();
    let words = source.query(&constraints(2)).await.unwrap();

    assert_eq!(words, ["CRANE", "TABLE"]);
    // Lengths run side by side, so the call costs one retry chain, not three
    assert!(started.elapsed() < settings.retry_budget() * 2, "took {:?}", started.elapsed());
}

#[tokio::test]
async fn acquisition_serves_source_word_while_a_length_stalls() {
    init_tracing();
    let server = MockServer::start().await;
    mount_words(&server, 5, vec![row("crane", 30.0), row("table", 80.0)]).await;
    mount_stalled(&server, 6).await;
    mount_stalled(&server, 7).await;

    let settings = SourceSettings { deadline_ms: 2_500, ..settings_for(&server) };
    assert!(settings.deadline() > settings.retry_budget());
    let source: Arc<dyn WordSource> = Arc::new(DatamuseSource::from_settings(&settings).unwrap());
    let cache = Arc::new(AnagramCache::builder(Arc::new(MemoryStore::new())).build());
    let service = AcquisitionService::new(cache, source, Arc::new(CuratedPool::builtin()))
        .with_source_settings(settings);

    let level = DifficultyLevel::new(2).unwrap();
    let record = service.acquire(level, AcquisitionMode::UnlimitedOnly).await.unwrap();

    assert!(record.id().starts_with("src-"), "id was {}", record.id());
    assert!(["CRANE", "TABLE"].contains(&record.solution()));
    assert_eq!(service.stats().source_successes, 1);
    assert_eq!(service.cache().count_for(level), 1);
}
